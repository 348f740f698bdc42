use crate::Route;
use dioxus::prelude::*;
use types::ConsoleSettings;

#[component]
pub fn Dashboard() -> Element {
    let settings = use_context::<ConsoleSettings>();

    rsx! {
        div {
            div { class: "page-header",
                h1 { class: "page-title", "Dashboard" }
                p { class: "page-subtitle", "Administration console for {settings.tenant.name}." }
            }
            div { class: "dashboard-grid",
                Link {
                    to: Route::Branches {},
                    class: "dashboard-card",
                    h3 { class: "dashboard-card-title", "Branches" }
                    p { class: "dashboard-card-desc",
                        "Walk the organisation tree and see who works in each branch."
                    }
                }
                Link {
                    to: Route::Users {},
                    class: "dashboard-card",
                    h3 { class: "dashboard-card-title", "Users" }
                    p { class: "dashboard-card-desc", "Search every user and create new accounts." }
                }
                Link {
                    to: Route::Groups {},
                    class: "dashboard-card",
                    h3 { class: "dashboard-card-title", "Groups" }
                    p { class: "dashboard-card-desc", "Manual and rule-based user groups." }
                }
                Link {
                    to: Route::UserFields {},
                    class: "dashboard-card",
                    h3 { class: "dashboard-card-title", "User Fields" }
                    p { class: "dashboard-card-desc", "Extra profile attributes defined by the tenant." }
                }
            }
        }
    }
}
