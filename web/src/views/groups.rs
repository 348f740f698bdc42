use dioxus::prelude::*;
use types::ConsoleSettings;
use ui::{ListingEvent, fetch_groups, use_listing};

use super::components::{ListingBody, Pager, SearchBar, SortHeader};

#[component]
pub fn Groups() -> Element {
    let settings = use_context::<ConsoleSettings>();
    let groups = use_listing(settings.default_page_size, fetch_groups);

    let listing = groups.listing();
    let listing = listing.read();
    let state = listing.state();
    let page = state.page();

    rsx! {
        div {
            div { class: "page-header",
                h1 { class: "page-title", "Groups" }
            }
            div { class: "card",
                div { class: "card-header",
                    h2 { class: "card-title", "All groups" }
                    div { class: "card-tools",
                        SearchBar {
                            value: listing.search().text.clone(),
                            placeholder: "Search groups...",
                            on_search: move |text| groups.send(ListingEvent::Search(text)),
                        }
                    }
                }
                ListingBody {
                    loading: state.is_loading(),
                    error: state.error().map(str::to_owned),
                    ready: page.is_some(),
                    empty: page.is_some_and(|p| p.is_empty()),
                    empty_text: "No groups yet.",
                    on_retry: move |_| groups.refresh(),
                    table {
                        thead {
                            tr {
                                SortHeader {
                                    label: "Name",
                                    attr: "name",
                                    sort: listing.sort().clone(),
                                    on_sort: move |(attr, direction)| groups.send(ListingEvent::Sort(attr, direction)),
                                }
                                th { "Description" }
                                th { "Members" }
                                th { "Membership" }
                            }
                        }
                        tbody {
                            for group in page.into_iter().flat_map(|p| p.items.iter()) {
                                tr { key: "{group.id}",
                                    td { "{group.name}" }
                                    td { {group.description.clone().unwrap_or_default()} }
                                    td { "{group.members_count}" }
                                    td {
                                        if group.rule_based {
                                            span { class: "badge badge-info", "Rule-based" }
                                        } else {
                                            span { class: "badge badge-muted", "Manual" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                Pager {
                    meta: page.map(|p| p.pagination),
                    pagination: *listing.pagination(),
                    on_page: move |index| groups.send(ListingEvent::Page(index)),
                    on_rows_per_page: move |size| groups.send(ListingEvent::RowsPerPage(size)),
                }
            }
        }
    }
}
