use std::{fs, path::PathBuf, time::Duration};

use n0_error::{Result, StackResultExt, StdResultExt};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable that overrides [`Config::api_url`].
pub const API_URL_ENV: &str = "WEBOOK_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", default)]
pub struct Config {
    /// Base URL of the webook backend, e.g. `http://localhost:8080`.
    pub api_url: String,

    /// Path of the signup endpoint, joined onto `api_url`.
    pub signup_path: String,

    /// Route of the login view that a successful signup navigates to.
    pub login_route: String,

    /// HTTP status that counts as a successful signup response.
    ///
    /// Any other 2xx status surfaces its status text and stops there.
    pub success_status: u16,

    /// Value of the `code` field that signals "proceed to login".
    pub success_code: i64,

    /// Request timeout in seconds. A timed out request is reported as
    /// "no response received".
    pub request_timeout: u64,

    /// How long a notice stays on screen, in seconds.
    pub notice_ttl: u64,

    /// Maximum number of notices kept at once. Older ones are dropped first.
    pub notice_capacity: usize,

    pub form: FormPolicy,
}

/// Optional client-side checks on top of the required-field rules.
///
/// Both are off by default: a form with three non-empty fields is always
/// submitted, and overlapping submissions are not prevented.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", default)]
pub struct FormPolicy {
    /// Block the request when password and confirmation differ.
    pub require_matching_passwords: bool,
    /// Refuse a new submission while another one is still pending.
    pub block_concurrent_submits: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            signup_path: "/users/signup".to_string(),
            login_route: "/users/login".to_string(),
            success_status: 200,
            success_code: 0,
            request_timeout: 10,
            notice_ttl: 4,
            notice_capacity: 8,
            form: FormPolicy::default(),
        }
    }
}

impl Config {
    pub async fn from_file(path: PathBuf) -> Result<Self> {
        let config = tokio::fs::read_to_string(path)
            .await
            .context("reading config file")?;
        let config = serde_yml::from_str(&config).std_context("parsing config file")?;
        Ok(config)
    }

    pub async fn write(&self, path: PathBuf) -> Result<()> {
        let data = serde_yml::to_string(self).anyerr()?;
        fs::write(path, data)?;
        Ok(())
    }

    /// Applies overrides from the process environment (after `.env` is loaded).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                debug!(%url, "api url overridden from environment");
                self.api_url = url;
            }
        }
        self
    }

    /// Full URL of the signup endpoint.
    pub fn signup_url(&self) -> String {
        format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            self.signup_path.trim_start_matches('/')
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notice_ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_url_joins_without_double_slash() {
        let mut config = Config::default();
        assert_eq!(config.signup_url(), "http://localhost:8080/users/signup");

        config.api_url = "http://api.webook.test/".to_string();
        assert_eq!(config.signup_url(), "http://api.webook.test/users/signup");

        config.signup_path = "v1/users/signup".to_string();
        assert_eq!(config.signup_url(), "http://api.webook.test/v1/users/signup");
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let yaml = "api_url: http://10.0.0.2:9000\nform:\n  require_matching_passwords: true\n";
        let config: Config = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.api_url, "http://10.0.0.2:9000");
        assert_eq!(config.success_status, 200);
        assert_eq!(config.success_code, 0);
        assert!(config.form.require_matching_passwords);
        assert!(!config.form.block_concurrent_submits);
    }

    #[tokio::test]
    async fn write_then_read_back() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.yml");
        let mut config = Config::default();
        config.notice_ttl = 9;
        config.write(path.clone()).await?;
        let loaded = Config::from_file(path).await?;
        assert_eq!(loaded, config);
        Ok(())
    }
}
