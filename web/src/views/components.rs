use dioxus::prelude::*;
use types::{NavigationNode, PageMeta, PaginationState, SearchType, SortDirection, SortState};

const ROWS_PER_PAGE: [usize; 4] = [10, 25, 50, 100];

/// The navigation trail. Every entry but the last is clickable.
#[component]
pub fn Breadcrumbs(trail: Vec<NavigationNode>, on_select: EventHandler<NavigationNode>) -> Element {
    let last = trail.len().saturating_sub(1);

    rsx! {
        nav { class: "breadcrumbs",
            for (i, node) in trail.into_iter().enumerate() {
                if i > 0 {
                    span { class: "breadcrumb-separator", "/" }
                }
                if i == last {
                    span { class: "breadcrumb-current", "{node.title}" }
                } else {
                    button {
                        class: "breadcrumb-link",
                        onclick: {
                            let node = node.clone();
                            move |_| on_select.call(node.clone())
                        },
                        "{node.title}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn SearchBar(
    value: String,
    on_search: EventHandler<String>,
    #[props(default = "Search...".to_string())] placeholder: String,
) -> Element {
    rsx! {
        input {
            class: "form-input search-input",
            r#type: "search",
            placeholder,
            value,
            oninput: move |e| on_search.call(e.value()),
        }
    }
}

#[component]
pub fn SearchTypeSelect(value: SearchType, on_change: EventHandler<SearchType>) -> Element {
    rsx! {
        select {
            class: "form-select",
            value: u8::from(value).to_string(),
            onchange: move |e| {
                match e.value().parse::<u8>().map(SearchType::try_from) {
                    Ok(Ok(search_type)) => on_change.call(search_type),
                    _ => tracing::warn!(value = %e.value(), "unknown search type"),
                }
            },
            for search_type in SearchType::ALL {
                option {
                    value: u8::from(search_type).to_string(),
                    selected: search_type == value,
                    {search_type.label()}
                }
            }
        }
    }
}

/// A column header that sorts by `attr`. Clicking the active column flips
/// the direction.
#[component]
pub fn SortHeader(
    label: String,
    attr: String,
    sort: SortState,
    on_sort: EventHandler<(String, SortDirection)>,
) -> Element {
    let active = sort.attr.as_deref() == Some(attr.as_str());
    let indicator = match (active, sort.direction) {
        (false, _) => "",
        (true, SortDirection::Asc) => " ▲",
        (true, SortDirection::Desc) => " ▼",
    };

    rsx! {
        th {
            class: "sortable",
            onclick: move |_| {
                let direction = if active { sort.direction.toggled() } else { SortDirection::Asc };
                on_sort.call((attr.clone(), direction));
            },
            "{label}{indicator}"
        }
    }
}

#[component]
pub fn Pager(
    #[props(!optional)] meta: Option<PageMeta>,
    pagination: PaginationState,
    on_page: EventHandler<usize>,
    on_rows_per_page: EventHandler<usize>,
) -> Element {
    let index = pagination.page_index;
    let has_next = meta.is_some_and(|m| m.has_next());
    let summary = match meta {
        Some(m) if m.total > 0 => format!("Page {} of {} ({} total)", index + 1, m.page_count(), m.total),
        _ => String::new(),
    };

    rsx! {
        div { class: "pager",
            span { class: "pager-summary", "{summary}" }
            label { class: "pager-size",
                "Rows per page "
                select {
                    class: "form-select",
                    onchange: move |e| {
                        if let Ok(size) = e.value().parse() {
                            on_rows_per_page.call(size);
                        }
                    },
                    for size in ROWS_PER_PAGE {
                        option { value: "{size}", selected: size == pagination.page_size, "{size}" }
                    }
                }
            }
            button {
                class: "btn btn-secondary btn-sm",
                disabled: index == 0,
                onclick: move |_| on_page.call(index.saturating_sub(1)),
                "Previous"
            }
            button {
                class: "btn btn-secondary btn-sm",
                disabled: !has_next,
                onclick: move |_| on_page.call(index + 1),
                "Next"
            }
        }
    }
}

/// Loading, error and empty states around a listing's table.
#[component]
pub fn ListingBody(
    loading: bool,
    #[props(!optional)] error: Option<String>,
    ready: bool,
    empty: bool,
    empty_text: String,
    on_retry: EventHandler<()>,
    children: Element,
) -> Element {
    if let Some(error) = error {
        return rsx! {
            div { class: "listing-error",
                span { "{error}" }
                button {
                    class: "btn btn-secondary btn-sm",
                    onclick: move |_| on_retry.call(()),
                    "Retry"
                }
            }
        };
    }

    if !ready {
        return rsx! {
            div { class: "loading", "Loading..." }
        };
    }

    if empty {
        return rsx! {
            div { class: "empty-state", "{empty_text}" }
        };
    }

    rsx! {
        div { class: if loading { "table-container loading-overlay" } else { "table-container" },
            {children}
        }
    }
}

#[component]
pub fn FormField(
    name: &'static str,
    label: String,
    value: String,
    #[props(!optional)] error: Option<String>,
    on_input: EventHandler<String>,
    #[props(default = "text".to_string())] input_type: String,
    #[props(default)] placeholder: String,
) -> Element {
    rsx! {
        div { class: "form-group",
            label { class: "form-label", r#for: "{name}", "{label}" }
            input {
                id: "{name}",
                class: if error.is_some() { "form-input invalid" } else { "form-input" },
                r#type: "{input_type}",
                placeholder,
                value,
                oninput: move |e| on_input.call(e.value()),
            }
            if let Some(ref error) = error {
                span { class: "form-error", "{error}" }
            }
        }
    }
}
