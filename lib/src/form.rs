//! Signup form values, required-field validation and the request payload.

use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer, ser::SerializeStruct};

/// One input of the signup form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Field {
    #[display("email")]
    Email,
    #[display("password")]
    Password,
    #[display("confirmPassword")]
    ConfirmPassword,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Email, Field::Password, Field::ConfirmPassword];

    pub fn label(&self) -> &'static str {
        match self {
            Field::Email => "Email",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm password",
        }
    }

    /// Message shown next to the input when it is left empty.
    pub fn required_message(&self) -> &'static str {
        match self {
            Field::Email => "Please enter your email",
            Field::Password => "Please enter your password",
            Field::ConfirmPassword => "Please confirm your password",
        }
    }

    /// Whether the input masks what is typed.
    pub fn is_secret(&self) -> bool {
        !matches!(self, Field::Email)
    }
}

/// Raw values of the three inputs, owned by the form for its lifetime.
#[derive(derive_more::Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    #[debug("***")]
    pub password: String,
    #[debug("***")]
    pub confirm_password: String,
}

/// Submission blocked because required fields are empty.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Invalid input")]
pub struct InvalidInput {
    pub missing: Vec<Field>,
}

impl std::error::Error for InvalidInput {}

impl SignupForm {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
        }
    }

    /// Fields that fail the "required" rule, in form order.
    ///
    /// Only an empty value fails; whitespace counts as input.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.value(*field).is_empty())
            .collect()
    }

    pub fn passwords_match(&self) -> bool {
        self.password == self.confirm_password
    }

    /// Applies the required-field rules and builds the request payload.
    ///
    /// Content is not inspected: no email shape check and no comparison of
    /// the two passwords.
    pub fn validate(&self) -> Result<SignupRequest, InvalidInput> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(InvalidInput { missing });
        }
        Ok(SignupRequest {
            email: self.email.clone(),
            password: SecretString::from(self.password.clone()),
            confirm_password: SecretString::from(self.confirm_password.clone()),
        })
    }
}

/// Validated payload of `POST /users/signup`.
#[derive(Debug)]
pub struct SignupRequest {
    email: String,
    password: SecretString,
    confirm_password: SecretString,
}

impl SignupRequest {
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl Serialize for SignupRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SignupRequest", 3)?;
        state.serialize_field("email", &self.email)?;
        state.serialize_field("password", self.password.expose_secret())?;
        state.serialize_field("confirmPassword", self.confirm_password.expose_secret())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn every_empty_field_is_reported() {
        let form = SignupForm::default();
        let err = form.validate().unwrap_err();
        assert_eq!(err.missing, Field::ALL.to_vec());
        assert_eq!(err.to_string(), "Invalid input");

        let form = SignupForm::new("a@b.c", "", "secret");
        assert_eq!(form.missing_fields(), vec![Field::Password]);
    }

    #[test]
    fn content_is_not_checked() {
        let form = SignupForm::new("not an email", "x", "y");
        assert!(!form.passwords_match());
        let request = form.validate().unwrap();
        assert_eq!(request.email(), "not an email");
    }

    #[test]
    fn whitespace_counts_as_input() {
        let form = SignupForm::new(" ", " ", " ");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn payload_uses_wire_names() {
        let request = SignupForm::new("me@webook.test", "hunter22", "hunter23")
            .validate()
            .unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "email": "me@webook.test",
                "password": "hunter22",
                "confirmPassword": "hunter23",
            })
        );
    }

    #[test]
    fn debug_hides_passwords() {
        let form = SignupForm::new("me@webook.test", "hunter22", "hunter22");
        let debug = format!("{form:?}");
        assert!(debug.contains("me@webook.test"));
        assert!(!debug.contains("hunter22"));

        let request = form.validate().unwrap();
        assert!(!format!("{request:?}").contains("hunter22"));
    }
}
