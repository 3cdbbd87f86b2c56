use async_trait::async_trait;
use n0_error::{Result, StdResultExt};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{config::Config, form::SignupRequest};

/// A response that resolved with a 2xx status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

/// Transport-level rejection of a signup request.
#[derive(Debug, Clone, PartialEq, derive_more::Display)]
pub enum SignupFailure {
    /// The server answered with a non-2xx status.
    #[display("request failed with status code {status}")]
    Status {
        status: u16,
        status_text: String,
        body: Option<Value>,
    },
    /// The request went out but no response came back.
    #[display("network error: {message}")]
    NoResponse { message: String },
    /// The request could not be built or sent at all.
    #[display("{message}")]
    Send { message: String },
}

impl std::error::Error for SignupFailure {}

impl SignupFailure {
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if err.is_builder() {
            SignupFailure::Send { message }
        } else {
            SignupFailure::NoResponse { message }
        }
    }

    /// The `error` field of an error body, if the server sent one.
    pub fn server_error(&self) -> Option<String> {
        let SignupFailure::Status {
            body: Some(body), ..
        } = self
        else {
            return None;
        };
        match body.get("error")? {
            Value::Null | Value::Bool(false) => None,
            Value::String(error) if error.is_empty() => None,
            Value::String(error) => Some(error.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Sends a validated signup request to the backend.
#[async_trait]
pub trait SignupTransport: Send + Sync {
    async fn post_signup(&self, request: &SignupRequest) -> Result<RawResponse, SignupFailure>;
}

#[derive(Debug, Clone)]
pub struct HttpSignupClient {
    http: reqwest::Client,
    url: String,
}

impl HttpSignupClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .std_context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            url: config.signup_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SignupTransport for HttpSignupClient {
    async fn post_signup(&self, request: &SignupRequest) -> Result<RawResponse, SignupFailure> {
        let req = self
            .http
            .post(&self.url)
            .json(request)
            .build()
            .map_err(SignupFailure::from_reqwest)?;
        debug!(url = %req.url(), email = request.email(), "sending signup request");

        let res = self
            .http
            .execute(req)
            .await
            .inspect_err(|e| warn!(url = %self.url, "signup request got no response: {e:#}"))
            .map_err(SignupFailure::from_reqwest)?;

        let status = res.status();
        let status_text = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_str().to_string());
        let body = res.text().await.map_err(SignupFailure::from_reqwest)?;
        debug!(status = status.as_u16(), "signup response received");

        if !status.is_success() {
            return Err(SignupFailure::Status {
                status: status.as_u16(),
                status_text,
                body: parse_error_body(&body),
            });
        }

        Ok(RawResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}

fn parse_error_body(body: &str) -> Option<Value> {
    if body.is_empty() {
        return None;
    }
    Some(serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string())))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn status_failure(body: Option<Value>) -> SignupFailure {
        SignupFailure::Status {
            status: 400,
            status_text: "Bad Request".into(),
            body,
        }
    }

    #[test]
    fn server_error_is_read_from_body() {
        let failure = status_failure(Some(json!({ "error": "exists" })));
        assert_eq!(failure.server_error().as_deref(), Some("exists"));
        assert_eq!(failure.to_string(), "request failed with status code 400");
    }

    #[test]
    fn server_error_ignores_empty_values() {
        assert_eq!(status_failure(None).server_error(), None);
        assert_eq!(status_failure(Some(json!({ "error": "" }))).server_error(), None);
        assert_eq!(status_failure(Some(json!({ "error": null }))).server_error(), None);
        assert_eq!(status_failure(Some(json!("plain text"))).server_error(), None);
        assert_eq!(
            status_failure(Some(json!({ "error": 17 }))).server_error().as_deref(),
            Some("17")
        );
    }

    #[test]
    fn error_body_keeps_plain_text() {
        assert_eq!(parse_error_body(""), None);
        assert_eq!(parse_error_body("system error"), Some(json!("system error")));
        assert_eq!(parse_error_body(r#"{"error":"x"}"#), Some(json!({ "error": "x" })));
    }

    #[test]
    fn invalid_url_is_a_send_failure() {
        let config = Config {
            api_url: "not a url".into(),
            ..Default::default()
        };
        let client = HttpSignupClient::new(&config).unwrap();
        let err = client.http.post(client.url()).build().unwrap_err();
        assert!(matches!(
            SignupFailure::from_reqwest(err),
            SignupFailure::Send { .. }
        ));
    }
}
