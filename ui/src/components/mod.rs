//! The components module contains all shared components for our app. Components are the building blocks of dioxus apps.
//! They can be used to defined common UI elements like buttons, forms, and modals.

mod button;
mod head;
pub mod input;
mod splash;
mod toast;

pub use button::Button;
pub use button::ButtonKind;
pub use head::Head;
pub use splash::Splash;
pub use toast::{show_notices, Toasts};
