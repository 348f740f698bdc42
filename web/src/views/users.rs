use crate::use_error;
use dioxus::prelude::*;
use jiff::Timestamp;
use types::{
    Branch, ConsoleSettings, NewUser, SortDirection, SortState, User,
    forms::{create_user_schema, user_fields},
};
use ui::{
    CreateUserStep, DrawerEvent, DrawerState, ListingEvent, Steps, fetch_branches, fetch_users,
    use_drawer, use_listing,
};

use super::components::{FormField, ListingBody, Pager, SearchBar, SortHeader};

#[component]
pub fn Users() -> Element {
    let settings = use_context::<ConsoleSettings>();
    let users = use_listing(settings.default_page_size, fetch_users);

    let listing = users.listing();
    let listing = listing.read();
    let state = listing.state();
    let page = state.page();

    rsx! {
        div {
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "Users" }
                    p { class: "page-subtitle", "Every user of the tenant, across all branches." }
                }
                div { class: "page-header-actions",
                    CreateUserDrawer { on_created: move |_| users.refresh() }
                }
            }

            div { class: "card",
                div { class: "card-header",
                    h2 { class: "card-title", "All users" }
                    div { class: "card-tools",
                        SearchBar {
                            value: listing.search().text.clone(),
                            placeholder: "Search users...",
                            on_search: move |text| users.send(ListingEvent::Search(text)),
                        }
                    }
                }
                ListingBody {
                    loading: state.is_loading(),
                    error: state.error().map(str::to_owned),
                    ready: page.is_some(),
                    empty: page.is_some_and(|p| p.is_empty()),
                    empty_text: "No users found.",
                    on_retry: move |_| users.refresh(),
                    UserRows {
                        users: page.map(|p| p.items.clone()).unwrap_or_default(),
                        sort: listing.sort().clone(),
                        on_sort: move |(attr, direction)| users.send(ListingEvent::Sort(attr, direction)),
                    }
                }
                Pager {
                    meta: page.map(|p| p.pagination),
                    pagination: *listing.pagination(),
                    on_page: move |index| users.send(ListingEvent::Page(index)),
                    on_rows_per_page: move |size| users.send(ListingEvent::RowsPerPage(size)),
                }
            }
        }
    }
}

#[component]
pub fn UserRows(users: Vec<User>, sort: SortState, on_sort: EventHandler<(String, SortDirection)>) -> Element {
    rsx! {
        table {
            thead {
                tr {
                    SortHeader { label: "Name", attr: "name", sort: sort.clone(), on_sort }
                    SortHeader { label: "Username", attr: "username", sort: sort.clone(), on_sort }
                    th { "Email" }
                    th { "Branch" }
                    th { "Created" }
                    th { "Status" }
                }
            }
            tbody {
                for user in users {
                    tr { key: "{user.id}",
                        td { "{user.name}" }
                        td { "{user.username}" }
                        td { {user.email.clone().unwrap_or_default()} }
                        td { {user.branch.clone().unwrap_or_default()} }
                        td {
                            if let Some(created_at) = user.created_at {
                                CreatedAt { created_at }
                            }
                        }
                        td {
                            if user.active {
                                span { class: "badge badge-success", "Active" }
                            } else {
                                span { class: "badge badge-muted", "Inactive" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn CreatedAt(created_at: Timestamp) -> Element {
    let formatted = created_at.strftime("%b %d, %Y").to_string();

    rsx! {
        span { class: "text-muted", "{formatted}" }
    }
}

/// The "Create User" button and the multi-step drawer it opens.
#[component]
fn CreateUserDrawer(on_created: EventHandler<User>) -> Element {
    let mut error_state = use_error();
    let drawer = use_drawer::<CreateUserStep>();
    let mut form = use_signal(NewUser::default);
    let mut branch = use_signal(|| None::<Branch>);

    let state = drawer.state().read().clone();
    let Some(step) = state.step() else {
        return rsx! {
            button {
                class: "btn btn-primary",
                onclick: move |_| {
                    form.set(NewUser::default());
                    branch.set(None);
                    drawer.send(DrawerEvent::Open);
                },
                "Create User"
            }
        };
    };

    let field_error = |name: &str| state.errors().and_then(|e| e.get(name)).map(str::to_owned);
    let submitting = state.is_submitting();
    let review = form.read().clone();
    let branch_title = branch.read().as_ref().map(|b| b.title.clone()).unwrap_or_default();
    let failure = match &state {
        DrawerState::Failed { message, .. } => Some(message.clone()),
        _ => None,
    };

    let next = move |_: MouseEvent| {
        let errors = create_user_schema().validate_fields(step.fields(), &form.read().form_values());
        drawer.send(DrawerEvent::Next { errors });
    };

    let submit = move |_: MouseEvent| {
        let new_user = form.read().clone().normalized();
        let errors = create_user_schema().validate(&new_user.form_values());
        drawer.send(DrawerEvent::Submit { errors });
        if !drawer.state().peek().is_submitting() {
            return;
        }

        spawn(async move {
            match api::create_user(new_user).await {
                Ok(user) => {
                    drawer.send(DrawerEvent::Succeeded);
                    on_created.call(user);
                }
                Err(e) => {
                    error_state.set_server_error(&e);
                    drawer.send(DrawerEvent::Failed(e.to_string()));
                }
            }
        });
    };

    rsx! {
        div { class: "drawer-overlay",
            onclick: move |_| drawer.send(DrawerEvent::Close),
            aside { class: "drawer",
                onclick: move |e| e.stop_propagation(),
                div { class: "drawer-header",
                    h2 { class: "drawer-title", "Create User" }
                    button {
                        class: "modal-close",
                        disabled: submitting,
                        onclick: move |_| drawer.send(DrawerEvent::Close),
                        "×"
                    }
                }
                ol { class: "drawer-steps",
                    for s in CreateUserStep::ALL.iter().copied() {
                        li {
                            class: if s == step { "drawer-step active" } else { "drawer-step" },
                            {s.title()}
                        }
                    }
                }
                div { class: "drawer-body",
                    {match step {
                        CreateUserStep::Account => rsx! {
                            FormField {
                                name: user_fields::NAME,
                                label: "Name",
                                value: form.read().name.clone(),
                                error: field_error(user_fields::NAME),
                                placeholder: "e.g. Lina Haddad",
                                on_input: move |value: String| form.write().name = value,
                            }
                            FormField {
                                name: user_fields::USERNAME,
                                label: "Username",
                                value: form.read().username.clone(),
                                error: field_error(user_fields::USERNAME),
                                placeholder: "e.g. lina.haddad",
                                on_input: move |value: String| form.write().username = value,
                            }
                            FormField {
                                name: user_fields::EMAIL,
                                label: "Email",
                                input_type: "email",
                                value: form.read().email.clone(),
                                error: field_error(user_fields::EMAIL),
                                placeholder: "e.g. lina@example.com",
                                on_input: move |value: String| form.write().email = value,
                            }
                        },
                        CreateUserStep::Placement => rsx! {
                            BranchPicker {
                                selected: branch.read().clone(),
                                on_select: move |picked: Branch| {
                                    form.write().branch_id = Some(picked.id.clone());
                                    branch.set(Some(picked));
                                },
                            }
                            if let Some(error) = field_error(user_fields::BRANCH) {
                                span { class: "form-error", "{error}" }
                            }
                        },
                        CreateUserStep::Review => rsx! {
                            dl { class: "review-list",
                                dt { "Name" }
                                dd { "{review.name}" }
                                dt { "Username" }
                                dd { "{review.username}" }
                                dt { "Email" }
                                dd { "{review.email}" }
                                dt { "Branch" }
                                dd { "{branch_title}" }
                            }
                            if let Some(message) = &failure {
                                div { class: "form-error", "{message}" }
                            }
                        },
                    }}
                }
                div { class: "drawer-footer",
                    button {
                        class: "btn btn-secondary",
                        disabled: submitting || step.previous().is_none(),
                        onclick: move |_| drawer.send(DrawerEvent::Back),
                        "Back"
                    }
                    if step.is_last() {
                        button {
                            class: "btn btn-primary",
                            disabled: submitting,
                            onclick: submit,
                            if submitting { "Creating..." } else { "Create" }
                        }
                    } else {
                        button {
                            class: "btn btn-primary",
                            onclick: next,
                            "Next"
                        }
                    }
                }
            }
        }
    }
}

/// Search any branch of the tenant and pick one.
#[component]
fn BranchPicker(
    #[props(!optional)] selected: Option<Branch>,
    on_select: EventHandler<Branch>,
) -> Element {
    let settings = use_context::<ConsoleSettings>();
    let branches = use_listing(settings.default_page_size, fetch_branches);

    let listing = branches.listing();
    let listing = listing.read();
    let state = listing.state();
    let page = state.page();
    let selected_id = selected.as_ref().map(|b| b.id.clone());

    rsx! {
        div { class: "form-group",
            label { class: "form-label", "Branch" }
            if let Some(branch) = &selected {
                p { class: "text-muted", "Selected: {branch.title}" }
            }
            SearchBar {
                value: listing.search().text.clone(),
                placeholder: "Search branches...",
                on_search: move |text| branches.send(ListingEvent::Search(text)),
            }
            ListingBody {
                loading: state.is_loading(),
                error: state.error().map(str::to_owned),
                ready: page.is_some(),
                empty: page.is_some_and(|p| p.is_empty()),
                empty_text: "No branches match.",
                on_retry: move |_| branches.refresh(),
                ul { class: "picker-list",
                    for candidate in page.into_iter().flat_map(|p| p.items.iter()).cloned() {
                        li {
                            key: "{candidate.id}",
                            class: if selected_id.as_ref() == Some(&candidate.id) { "picker-item selected" } else { "picker-item" },
                            onclick: {
                                let candidate = candidate.clone();
                                move |_| on_select.call(candidate.clone())
                            },
                            "{candidate.title}"
                            if let Some(code) = &candidate.code {
                                span { class: "text-muted", " ({code})" }
                            }
                        }
                    }
                }
            }
        }
    }
}
