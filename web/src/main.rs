use dioxus::prelude::*;
use types::ConsoleSettings;

mod views;

use views::{Branches, Dashboard, Groups, UserFields, Users};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(ConsoleLayout)]
        #[route("/")]
        Dashboard {},
        #[route("/branches")]
        Branches {},
        #[route("/users")]
        Users {},
        #[route("/groups")]
        Groups {},
        #[route("/user-fields")]
        UserFields {},
}

fn main() {
    #[cfg(feature = "server")]
    {
        server::init_tracing();
        dioxus::serve(|| async move {
            let routes = server::init().await?;

            Ok(dioxus::server::router(App).merge(routes))
        });
    }

    #[cfg(all(feature = "web", not(feature = "server")))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Haykal Console" }
        document::Link { rel: "icon", href: asset!("/assets/favicon.svg") }
        document::Link { rel: "stylesheet", href: asset!("/assets/main.css") }

        Router::<Route> {}
    }
}

#[component]
fn NavLink(to: Route, children: Element) -> Element {
    let current_route: Route = use_route();
    let is_active = current_route == to;

    rsx! {
        Link {
            to,
            class: if is_active { "active" },
            {children}
        }
    }
}

/// Error information for display
#[derive(Clone, Debug, Default)]
pub struct ErrorInfo {
    pub message: String,
}

impl ErrorInfo {
    pub fn from_server_error(err: &ServerFnError) -> Self {
        let message = match err {
            ServerFnError::ServerError { message, .. } => message.clone(),
            other => other.to_string(),
        };
        Self { message }
    }
}

/// Global error state - use `use_error()` to access
#[derive(Clone, Copy)]
pub struct ErrorState(Signal<Option<ErrorInfo>>);

impl ErrorState {
    pub fn set_server_error(&mut self, err: &ServerFnError) {
        tracing::warn!(%err, "server function failed");
        self.0.set(Some(ErrorInfo::from_server_error(err)));
    }

    pub fn clear(&mut self) {
        self.0.set(None);
    }
}

/// Get the global error state for setting/clearing errors
pub fn use_error() -> ErrorState {
    use_context::<ErrorState>()
}

#[component]
fn ErrorBanner() -> Element {
    let mut error_state = use_context::<ErrorState>();
    let error = error_state.0.read();

    let Some(err) = error.as_ref() else {
        return rsx! {};
    };

    rsx! {
        div { class: "error-banner",
            div { class: "error-banner-content",
                div { class: "error-banner-header",
                    span { class: "error-banner-message", "{err.message}" }
                    div { class: "error-banner-actions",
                        button {
                            class: "error-banner-close",
                            onclick: move |_| error_state.clear(),
                            "×"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ConsoleLayout() -> Element {
    use_context_provider(|| ErrorState(Signal::new(None)));
    let mut settings = use_server_future(api::get_tenant_settings)?;

    match &*settings.read() {
        Some(Ok(settings)) => rsx! {
            ConsoleShell { settings: settings.clone() }
        },
        Some(Err(err)) => {
            let info = ErrorInfo::from_server_error(err);
            rsx! {
                div { class: "console-unavailable",
                    h1 { class: "page-title", "Console unavailable" }
                    p { class: "text-muted", "{info.message}" }
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| settings.restart(),
                        "Retry"
                    }
                }
            }
        }
        None => rsx! {
            div { class: "loading", "Loading..." }
        },
    }
}

#[component]
fn ConsoleShell(settings: ConsoleSettings) -> Element {
    let tenant = settings.tenant.clone();
    use_context_provider(move || settings);

    let initial = tenant
        .name
        .chars()
        .next()
        .unwrap_or('?')
        .to_uppercase()
        .to_string();
    let style = tenant
        .primary_color
        .as_ref()
        .map(|color| format!("--primary: {color};"))
        .unwrap_or_default();

    rsx! {
        div { class: "app-layout", style,
            aside { class: "sidebar",
                div { class: "sidebar-header",
                    if let Some(logo) = &tenant.logo_url {
                        img { class: "sidebar-logo-image", src: "{logo}", alt: "{tenant.name}" }
                    } else {
                        div { class: "sidebar-avatar", "{initial}" }
                    }
                    span { class: "sidebar-logo", "{tenant.name}" }
                }
                nav { class: "sidebar-nav",
                    NavLink { to: Route::Dashboard {}, "Dashboard" }
                    NavLink { to: Route::Branches {}, "Branches" }
                    NavLink { to: Route::Users {}, "Users" }
                    NavLink { to: Route::Groups {}, "Groups" }
                    NavLink { to: Route::UserFields {}, "User Fields" }
                }
            }
            main { class: "main-content",
                ErrorBanner {}
                Outlet::<Route> {}
            }
        }
    }
}
