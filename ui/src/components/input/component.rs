use dioxus::prelude::*;
use webook::Field;

/// Only plain and masked text: a typed input such as `email` would let the
/// webview reject the submit before the form handler runs.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputKind {
    Text,
    /// Masks what is typed.
    Password,
}

impl InputKind {
    pub fn for_field(field: Field) -> Self {
        if field.is_secret() {
            InputKind::Password
        } else {
            InputKind::Text
        }
    }

    fn html_type(self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Password => "password",
        }
    }
}

#[component]
pub fn Input(
    /// Label text shown before the input, associated through `id`.
    label: String,
    id: String,
    value: String,
    #[props(default = InputKind::Text)]
    kind: InputKind,
    /// Validation message rendered below the input.
    #[props(default = None)]
    error: Option<String>,
    oninput: EventHandler<FormEvent>,
) -> Element {
    let input_class = if error.is_some() {
        "form-input form-input-invalid"
    } else {
        "form-input"
    };

    rsx! {
        div { class: "form-item",
            label { r#for: "{id}", class: "form-label", "{label}" }
            div { class: "form-control",
                input {
                    id: "{id}",
                    name: "{id}",
                    class: "{input_class}",
                    r#type: kind.html_type(),
                    autocomplete: "off",
                    value: "{value}",
                    oninput: move |e| oninput.call(e),
                }
                if let Some(ref message) = error {
                    div { class: "form-error", "{message}" }
                }
            }
        }
    }
}
