use dioxus::prelude::*;
use types::validation::Rule;

use super::components::ListingBody;

fn describe(rule: &Rule) -> String {
    match rule {
        Rule::Required => "required".into(),
        Rule::MinLength(min) => format!("min {min} chars"),
        Rule::MaxLength(max) => format!("max {max} chars"),
        Rule::Email => "email".into(),
        Rule::Pattern { regex, .. } => format!("matches {regex}"),
        Rule::OneOf(options) => format!("one of {}", options.join(", ")),
        Rule::Range { min, max } => match (min, max) {
            (Some(min), Some(max)) => format!("{min} to {max}"),
            (Some(min), None) => format!("at least {min}"),
            (None, Some(max)) => format!("at most {max}"),
            (None, None) => "number".into(),
        },
    }
}

#[component]
pub fn UserFields() -> Element {
    let mut resource = use_resource(api::list_user_fields);

    let fields = resource.read();
    let (loaded, error) = match &*fields {
        Some(Ok(list)) => (Some(list.clone()), None),
        Some(Err(e)) => (None, Some(e.to_string())),
        None => (None, None),
    };

    rsx! {
        div {
            div { class: "page-header",
                h1 { class: "page-title", "User Fields" }
                p { class: "page-subtitle", "Profile attributes every user of this tenant can carry." }
            }
            div { class: "card",
                ListingBody {
                    loading: fields.is_none(),
                    error,
                    ready: loaded.is_some(),
                    empty: loaded.as_ref().is_some_and(|list| list.is_empty()),
                    empty_text: "No custom fields are defined.",
                    on_retry: move |_| resource.restart(),
                    table {
                        thead {
                            tr {
                                th { "Label" }
                                th { "Key" }
                                th { "Type" }
                                th { "Rules" }
                            }
                        }
                        tbody {
                            for field in loaded.into_iter().flatten() {
                                tr { key: "{field.id}",
                                    td {
                                        "{field.label}"
                                        if field.required {
                                            span { class: "required-mark", " *" }
                                        }
                                    }
                                    td { code { "{field.key}" } }
                                    td { {field.kind.label()} }
                                    td {
                                        {field.field_schema().rules.iter().map(describe).collect::<Vec<_>>().join(", ")}
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
