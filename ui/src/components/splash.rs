use dioxus::prelude::*;

#[component]
pub fn Splash() -> Element {
    rsx! {
        div { class: "page splash",
            h3 { "webook" }
            div { class: "muted", "Loading…" }
        }
    }
}
