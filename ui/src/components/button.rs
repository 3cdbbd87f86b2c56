use dioxus::prelude::*;

use crate::Route;

#[derive(PartialEq, Clone, Copy)]
pub enum ButtonKind {
    Primary,
    Link,
}

#[derive(PartialEq, Clone, Props)]
pub struct ButtonProps {
    text: String,
    to: Option<Route>,
    #[props(default = ButtonKind::Primary)]
    kind: ButtonKind,
    /// Renders a `type="submit"` button so the enclosing form's `onsubmit` fires.
    #[props(default = false)]
    submit: bool,
}

fn class_for(kind: ButtonKind) -> &'static str {
    match kind {
        ButtonKind::Primary => "btn btn-primary",
        ButtonKind::Link => "btn btn-link",
    }
}

#[component]
pub fn Button(props: ButtonProps) -> Element {
    let class = class_for(props.kind);
    let button_type = if props.submit { "submit" } else { "button" };

    match props.to.clone() {
        Some(to) => {
            rsx! {
                Link { to, class: "{class}",
                    span { "{props.text}" }
                }
            }
        }
        None => {
            rsx! {
                button { class: "{class}", r#type: button_type,
                    span { "{props.text}" }
                }
            }
        }
    }
}
