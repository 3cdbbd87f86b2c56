use dioxus::prelude::*;

use crate::{
    components::{Button, ButtonKind},
    Route,
};

/// Where a successful signup lands.
#[component]
pub fn Login() -> Element {
    rsx! {
        div { class: "page",
            div { class: "card",
                h1 { class: "card-title", "Log in" }
                p { class: "muted",
                    "Use the email and password you signed up with."
                }
                div { class: "form-actions",
                    Button {
                        kind: ButtonKind::Link,
                        to: Some(Route::Signup {}),
                        text: "Create an account",
                    }
                }
            }
        }
    }
}
