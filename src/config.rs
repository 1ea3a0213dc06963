use crate::error::{Issue1Error, Result};
use reqwest::Url;
use std::env;
use std::time::Duration;

pub const ENV_BASE_URL: &str = "ISSUE1_BASE_URL";
pub const ENV_TIMEOUT_MS: &str = "ISSUE1_TIMEOUT_MS";

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_USER_AGENT: &str = concat!("issue1-client/", env!("CARGO_PKG_VERSION"));

/// Settings for an [`Issue1Client`](crate::Issue1Client).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    /// Applied to every request that does not set its own.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl ClientConfig {
    /// Validates `base_url` and strips any trailing slash.
    pub fn new(base_url: &str) -> Result<Self> {
        Url::parse(base_url)
            .map_err(|e| Issue1Error::Config(format!("invalid base URL `{base_url}`: {e}")))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    /// Reads `ISSUE1_BASE_URL` and `ISSUE1_TIMEOUT_MS`, loading a `.env` file
    /// first when there is one.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let base_url = env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let mut config = Self::new(&base_url)?;

        if let Ok(raw) = env::var(ENV_TIMEOUT_MS) {
            let millis = raw.trim().parse::<u64>().map_err(|e| {
                Issue1Error::Config(format!("{ENV_TIMEOUT_MS} must be a number of milliseconds: {e}"))
            })?;
            config.timeout = Some(Duration::from_millis(millis));
        }

        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
