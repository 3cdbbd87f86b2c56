pub mod client;
pub mod config;
#[cfg(feature = "server")]
pub mod dev_backend;
pub mod flow;
pub mod form;
pub mod notice;
pub mod reply;
mod repo;

pub use client::{HttpSignupClient, RawResponse, SignupFailure, SignupTransport};
pub use config::{Config, FormPolicy};
pub use flow::{Navigation, SignupFlow, SignupOutcome};
pub use form::{Field, InvalidInput, SignupForm, SignupRequest};
pub use notice::{Notice, NoticeLevel, NoticeQueue, QueuedNotice};
pub use reply::{ApiResult, SignupReply};
pub use repo::Repo;

/// Signup flow wired to the real HTTP backend.
pub type HttpSignupFlow = SignupFlow<HttpSignupClient>;

impl HttpSignupFlow {
    /// Builds the HTTP client from `config` and wraps it in a flow.
    pub fn from_config(config: Config) -> n0_error::Result<Self> {
        let client = HttpSignupClient::new(&config)?;
        Ok(SignupFlow::new(client, config))
    }
}
