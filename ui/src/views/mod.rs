//! The views module contains the components for all Layouts and Routes for our app. Each layout and route in our [`Route`]
//! enum will render one of these components.

mod login;
mod signup;

pub use login::Login;
pub use signup::Signup;
