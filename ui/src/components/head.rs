use dioxus::prelude::*;

// We can import assets in dioxus with the `asset!` macro. This macro takes a path to an asset relative to the crate root.
// The asset macro also minifies some assets like CSS and JS to make bundled smaller
const MAIN_CSS: Asset = asset!("/assets/styling/main.css");

#[component]
pub fn Head() -> Element {
    rsx! {
        document::Title { "webook" }
        document::Stylesheet { rel: "stylesheet", href: MAIN_CSS }
    }
}
