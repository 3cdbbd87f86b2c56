//! Local stand-in for the webook backend's `POST /users/signup`.
//!
//! Validates the payload the way the real handler does and keeps registered
//! emails in memory. Answers use the backend's `{ code, msg }` convention:
//! `0` for success, `4` for bad input. A body that is not valid JSON gets a
//! plain-text `400 system error`.

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use n0_error::{Result, StdResultExt};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const CODE_OK: i64 = 0;
pub const CODE_BAD_INPUT: i64 = 4;

const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignupBody {
    email: String,
    password: String,
    confirm_password: String,
}

#[derive(Debug, Serialize)]
struct Reply {
    code: i64,
    msg: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct DevBackend {
    users: Arc<Mutex<HashMap<String, Uuid>>>,
}

impl DevBackend {
    pub fn router(&self) -> Router {
        Router::new()
            .route("/users/signup", post(signup))
            .with_state(self.clone())
    }

    pub fn user_count(&self) -> usize {
        self.users().len()
    }

    pub fn is_registered(&self, email: &str) -> bool {
        self.users().contains_key(email)
    }

    fn users(&self) -> MutexGuard<'_, HashMap<String, Uuid>> {
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Serves until `cancel` fires.
    pub async fn serve(self, listener: TcpListener, cancel: CancellationToken) -> Result<()> {
        let addr = listener.local_addr()?;
        info!(%addr, "dev backend listening");
        axum::serve(listener, self.router())
            .with_graceful_shutdown(cancel.cancelled_owned())
            .await
            .std_context("dev backend failed")?;
        debug!("dev backend stopped");
        Ok(())
    }

    /// Binds `addr` and serves in a background task.
    pub async fn spawn(
        self,
        addr: SocketAddr,
        cancel: CancellationToken,
    ) -> Result<(SocketAddr, tokio::task::JoinHandle<Result<()>>)> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;
        let task = tokio::spawn(self.serve(listener, cancel));
        Ok((local_addr, task))
    }

    fn register(&self, body: SignupBody) -> Reply {
        if !is_valid_email(&body.email) {
            return bad_input("invalid email format");
        }
        if !is_valid_password(&body.password) {
            return bad_input(
                "password must be at least 8 characters and contain letters and digits",
            );
        }
        if body.password != body.confirm_password {
            return bad_input("the two passwords do not match");
        }

        let mut users = self.users();
        if users.contains_key(&body.email) {
            return bad_input("email already registered");
        }
        let id = Uuid::new_v4();
        users.insert(body.email.clone(), id);
        info!(email = %body.email, %id, "user registered");
        Reply {
            code: CODE_OK,
            msg: "signup succeeded",
        }
    }
}

async fn signup(State(backend): State<DevBackend>, body: String) -> Response {
    let body: SignupBody = match serde_json::from_str(&body) {
        Ok(body) => body,
        Err(err) => {
            warn!("malformed signup body: {err}");
            return (StatusCode::BAD_REQUEST, "system error").into_response();
        }
    };
    Json(backend.register(body)).into_response()
}

fn bad_input(msg: &'static str) -> Reply {
    Reply {
        code: CODE_BAD_INPUT,
        msg,
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}

fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(email: &str, password: &str, confirm: &str) -> SignupBody {
        SignupBody {
            email: email.into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("1234@qq.com"));
        assert!(is_valid_email("first.last@mail.webook.test"));
        assert!(!is_valid_email("123"));
        assert!(!is_valid_email("@qq.com"));
        assert!(!is_valid_email("a@qq"));
        assert!(!is_valid_email("a@@qq.com"));
        assert!(!is_valid_email("a b@qq.com"));
        assert!(!is_valid_email("a@qq..com"));
    }

    #[test]
    fn password_rules() {
        assert!(is_valid_password("helloworld123"));
        assert!(!is_valid_password("11"));
        assert!(!is_valid_password("helloworld"));
        assert!(!is_valid_password("123456789"));
        assert!(!is_valid_password("abc1234"));
    }

    #[test]
    fn register_checks_in_order() {
        let backend = DevBackend::default();
        assert_eq!(
            backend.register(body("123", "x", "y")).msg,
            "invalid email format"
        );
        assert_eq!(
            backend
                .register(body("123@qq.com", "helloworld123", "helloworld1234"))
                .msg,
            "the two passwords do not match"
        );
        assert_eq!(
            backend.register(body("123@qq.com", "11", "22")).msg,
            "password must be at least 8 characters and contain letters and digits"
        );
        assert_eq!(backend.user_count(), 0);

        let ok = backend.register(body("123@qq.com", "helloworld123", "helloworld123"));
        assert_eq!(ok.code, CODE_OK);
        assert!(backend.is_registered("123@qq.com"));

        let dup = backend.register(body("123@qq.com", "helloworld123", "helloworld123"));
        assert_eq!(dup.code, CODE_BAD_INPUT);
        assert_eq!(dup.msg, "email already registered");
        assert_eq!(backend.user_count(), 1);
    }
}
