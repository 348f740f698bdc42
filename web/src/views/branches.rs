use dioxus::prelude::*;
use types::{ConsoleSettings, NavigationNode};
use ui::{BrowserHandle, ListingEvent, Pane, use_tree_browser};

use super::components::{Breadcrumbs, ListingBody, Pager, SearchBar, SearchTypeSelect, SortHeader};
use super::users::UserRows;

#[component]
pub fn Branches() -> Element {
    let settings = use_context::<ConsoleSettings>();
    let browser = use_tree_browser(settings.default_page_size, |node, direction| {
        tracing::info!(branch = %node.title, %direction, "opened branch");
    });

    let tree = browser.tree();
    let tree = tree.read();
    let current = tree.current().clone();
    let trail = tree.controller().breadcrumbs().to_vec();
    let can_go_back = tree.controller().can_go_back();

    rsx! {
        div {
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "{current.title}" }
                    if let Some(code) = &current.code {
                        p { class: "page-subtitle", "Code {code}" }
                    }
                }
                div { class: "page-header-actions",
                    button {
                        class: "btn btn-secondary",
                        disabled: !can_go_back,
                        onclick: move |_| browser.go_back(),
                        "Back"
                    }
                }
            }

            Breadcrumbs {
                trail,
                on_select: move |node| browser.go_to_breadcrumb(node),
            }

            BranchPane { browser }
            UserPane { browser, branch: current.title.clone() }
        }
    }
}

#[component]
fn BranchPane(browser: BrowserHandle) -> Element {
    let tree = browser.tree();
    let tree = tree.read();
    let listing = tree.branches();
    let state = listing.state();
    let page = state.page();
    let send = move |event| browser.send(Pane::Branches, event);

    rsx! {
        div { class: "card",
            div { class: "card-header",
                h2 { class: "card-title", "Branches" }
                div { class: "card-tools",
                    SearchBar {
                        value: listing.search().text.clone(),
                        placeholder: "Search branches...",
                        on_search: move |text| send(ListingEvent::Search(text)),
                    }
                    SearchTypeSelect {
                        value: listing.search().search_type,
                        on_change: move |search_type| send(ListingEvent::SearchType(search_type)),
                    }
                }
            }
            ListingBody {
                loading: state.is_loading(),
                error: state.error().map(str::to_owned),
                ready: page.is_some(),
                empty: page.is_some_and(|p| p.is_empty()),
                empty_text: "This branch has no sub-branches.",
                on_retry: move |_| browser.refresh(Pane::Branches),
                table {
                    thead {
                        tr {
                            SortHeader {
                                label: "Title",
                                attr: "title",
                                sort: listing.sort().clone(),
                                on_sort: move |(attr, direction)| send(ListingEvent::Sort(attr, direction)),
                            }
                            th { "Code" }
                            th { "Users" }
                            th {}
                        }
                    }
                    tbody {
                        for branch in page.into_iter().flat_map(|p| p.items.iter()) {
                            {
                                let node = NavigationNode::from(branch);
                                let navigable = branch.has_children;
                                rsx! {
                                    tr {
                                        key: "{branch.id}",
                                        class: if navigable { "clickable" },
                                        onclick: move |_| {
                                            if navigable {
                                                browser.go_forward(node.clone());
                                            }
                                        },
                                        td { "{branch.title}" }
                                        td { {branch.code.clone().unwrap_or_default()} }
                                        td { {branch.users_count.map(|n| n.to_string()).unwrap_or_default()} }
                                        td { class: "row-chevron", if navigable { "›" } }
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
                on_page: move |index| send(ListingEvent::Page(index)),
                on_rows_per_page: move |size| send(ListingEvent::RowsPerPage(size)),
            }
        }
    }
}

#[component]
fn UserPane(browser: BrowserHandle, branch: String) -> Element {
    let tree = browser.tree();
    let tree = tree.read();
    let listing = tree.entities();
    let state = listing.state();
    let page = state.page();
    let send = move |event| browser.send(Pane::Users, event);

    rsx! {
        div { class: "card",
            div { class: "card-header",
                h2 { class: "card-title", "Users in {branch}" }
                div { class: "card-tools",
                    SearchBar {
                        value: listing.search().text.clone(),
                        placeholder: "Search users...",
                        on_search: move |text| send(ListingEvent::Search(text)),
                    }
                }
            }
            ListingBody {
                loading: state.is_loading(),
                error: state.error().map(str::to_owned),
                ready: page.is_some(),
                empty: page.is_some_and(|p| p.is_empty()),
                empty_text: "No users in this branch.",
                on_retry: move |_| browser.refresh(Pane::Users),
                UserRows {
                    users: page.map(|p| p.items.clone()).unwrap_or_default(),
                    sort: listing.sort().clone(),
                    on_sort: move |(attr, direction)| send(ListingEvent::Sort(attr, direction)),
                }
            }
            Pager {
                meta: page.map(|p| p.pagination),
                pagination: *listing.pagination(),
                on_page: move |index| send(ListingEvent::Page(index)),
                on_rows_per_page: move |size| send(ListingEvent::RowsPerPage(size)),
            }
        }
    }
}
