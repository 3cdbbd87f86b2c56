//! Submitting the signup form and turning the result into notices.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use tracing::{debug, error, info};

use crate::{
    client::{RawResponse, SignupFailure, SignupTransport},
    config::Config,
    form::{Field, SignupForm},
    notice::Notice,
    reply::SignupReply,
};

pub const INVALID_INPUT: &str = "Invalid input";
pub const NO_RESPONSE: &str = "Request received no response";
pub const PASSWORDS_DIFFER: &str = "The two passwords do not match";
pub const SUBMIT_IN_PROGRESS: &str = "A signup request is already in progress";

/// Where the UI should go after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Login,
}

/// Everything the UI needs to react to one submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignupOutcome {
    pub notices: Vec<Notice>,
    pub navigate: Option<Navigation>,
    /// Fields that failed the required rule; empty when the form was valid.
    pub missing: Vec<Field>,
    /// Whether a request was handed to the transport.
    pub request_sent: bool,
}

impl SignupOutcome {
    fn blocked(notice: Notice, missing: Vec<Field>) -> Self {
        Self {
            notices: vec![notice],
            missing,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct SignupFlow<T> {
    transport: T,
    config: Config,
    in_flight: Arc<AtomicUsize>,
}

impl<T: SignupTransport> SignupFlow<T> {
    pub fn new(transport: T, config: Config) -> Self {
        Self {
            transport,
            config,
            in_flight: Default::default(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Number of requests currently awaiting a response.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Validates the form and, if it passes, posts it once.
    ///
    /// Never fails: every problem becomes a notice in the outcome.
    pub async fn submit(&self, form: &SignupForm) -> SignupOutcome {
        let request = match form.validate() {
            Ok(request) => request,
            Err(invalid) => {
                debug!(missing = ?invalid.missing, "signup blocked by required fields");
                return SignupOutcome::blocked(Notice::warning(INVALID_INPUT), invalid.missing);
            }
        };

        let policy = self.config.form;
        if policy.require_matching_passwords && !form.passwords_match() {
            return SignupOutcome::blocked(Notice::warning(PASSWORDS_DIFFER), Vec::new());
        }

        let Some(_guard) = InFlightGuard::enter(&self.in_flight, policy.block_concurrent_submits)
        else {
            return SignupOutcome::blocked(Notice::warning(SUBMIT_IN_PROGRESS), Vec::new());
        };

        let result = self.transport.post_signup(&request).await;
        let mut outcome = match result {
            Ok(response) => interpret_response(&self.config, &response),
            Err(failure) => {
                error!("signup request failed: {failure}");
                interpret_failure(&failure)
            }
        };
        outcome.request_sent = true;
        outcome
    }
}

/// Maps a 2xx response to notices and navigation.
pub fn interpret_response(config: &Config, response: &RawResponse) -> SignupOutcome {
    let mut outcome = SignupOutcome::default();
    if response.status != config.success_status {
        outcome
            .notices
            .push(Notice::warning(response.status_text.clone()));
        return outcome;
    }

    match SignupReply::parse(&response.body) {
        SignupReply::Message(message) => outcome.notices.push(Notice::info(message)),
        SignupReply::Result(result) => {
            let proceed = result.code == Some(config.success_code);
            let text = result.display_text();
            if proceed {
                info!("signup accepted, continuing to login");
                outcome.notices.push(Notice::success(text));
                outcome.navigate = Some(Navigation::Login);
            } else {
                outcome.notices.push(Notice::info(text));
            }
        }
    }
    outcome
}

/// Maps a transport failure to its notice, followed by the raw failure.
pub fn interpret_failure(failure: &SignupFailure) -> SignupOutcome {
    let first = match failure {
        SignupFailure::Status { status_text, .. } => {
            let detail = failure
                .server_error()
                .unwrap_or_else(|| status_text.clone());
            format!("Request error: {detail}")
        }
        SignupFailure::NoResponse { .. } => NO_RESPONSE.to_string(),
        SignupFailure::Send { message } => format!("Request failed: {message}"),
    };
    SignupOutcome {
        notices: vec![Notice::error(first), Notice::error(failure.to_string())],
        ..Default::default()
    }
}

struct InFlightGuard<'a>(&'a AtomicUsize);

impl<'a> InFlightGuard<'a> {
    fn enter(counter: &'a AtomicUsize, exclusive: bool) -> Option<Self> {
        if exclusive {
            counter
                .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
                .ok()?;
        } else {
            counter.fetch_add(1, Ordering::SeqCst);
        }
        Some(Self(counter))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
