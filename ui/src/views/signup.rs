use dioxus::prelude::*;
use webook::{Field, Navigation, NoticeQueue, SignupForm};

use crate::{
    components::{
        input::{Input, InputKind},
        show_notices, Button, ButtonKind,
    },
    state::AppState,
    Route,
};

/// Email, password and confirmation, posted to the backend's signup endpoint.
///
/// Every submit runs independently: nothing stops a second click while the
/// first request is still pending.
#[component]
pub fn Signup() -> Element {
    let nav = use_navigator();
    let state = use_context::<AppState>();
    let notices = use_context::<Signal<NoticeQueue>>();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut missing = use_signal(Vec::<Field>::new);
    let mut pending = use_signal(|| 0usize);

    let mut set_field = move |field: Field, value: String| {
        if !value.is_empty() {
            missing.write().retain(|f| *f != field);
        }
        match field {
            Field::Email => email.set(value),
            Field::Password => password.set(value),
            Field::ConfirmPassword => confirm_password.set(value),
        }
    };
    let error_for = move |field: Field| {
        missing
            .read()
            .contains(&field)
            .then(|| field.required_message().to_string())
    };

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let form = SignupForm::new(email(), password(), confirm_password());
        let flow = state.flow().clone();
        let ttl = state.config().notice_ttl();
        spawn(async move {
            pending += 1;
            let outcome = flow.submit(&form).await;
            pending -= 1;
            missing.set(outcome.missing);
            show_notices(notices, outcome.notices, ttl);
            if outcome.navigate == Some(Navigation::Login) {
                nav.push(Route::Login {});
            }
        });
    };

    rsx! {
        div { class: "page",
            div { class: "card",
                h1 { class: "card-title", "Create your account" }
                form {
                    class: "signup-form",
                    autocomplete: "off",
                    novalidate: true,
                    onsubmit: onsubmit,
                    Input {
                        id: "email",
                        label: Field::Email.label(),
                        kind: InputKind::for_field(Field::Email),
                        value: email(),
                        error: error_for(Field::Email),
                        oninput: move |e: FormEvent| set_field(Field::Email, e.value()),
                    }
                    Input {
                        id: "password",
                        label: Field::Password.label(),
                        kind: InputKind::for_field(Field::Password),
                        value: password(),
                        error: error_for(Field::Password),
                        oninput: move |e: FormEvent| set_field(Field::Password, e.value()),
                    }
                    Input {
                        id: "confirmPassword",
                        label: Field::ConfirmPassword.label(),
                        kind: InputKind::for_field(Field::ConfirmPassword),
                        value: confirm_password(),
                        error: error_for(Field::ConfirmPassword),
                        oninput: move |e: FormEvent| set_field(Field::ConfirmPassword, e.value()),
                    }
                    div { class: "form-actions",
                        Button {
                            kind: ButtonKind::Primary,
                            submit: true,
                            text: if pending() > 0 { "Signing up…".to_string() } else { "Sign up".to_string() },
                        }
                        Button {
                            kind: ButtonKind::Link,
                            to: Some(Route::Login {}),
                            text: "Log in",
                        }
                    }
                }
            }
        }
    }
}
