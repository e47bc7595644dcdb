//! Client configuration.

use std::time::Duration;

use anyhow::Context;

/// Base path used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "/api";

/// API client configuration.
///
/// Immutable once handed to [`crate::ApiClient::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix joined verbatim with every endpoint path.
    pub base_url: String,
    /// Optional bearer token sent with every request.
    pub bearer_token: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            bearer_token: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Load configuration from the process environment.
    ///
    /// - `EVENTLY_API_URL` (default `/api`)
    /// - `EVENTLY_API_TOKEN`
    /// - `EVENTLY_API_CONNECT_TIMEOUT_SECS`, `EVENTLY_API_TIMEOUT_SECS`
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        match lookup("EVENTLY_API_URL").filter(|v| !v.trim().is_empty()) {
            Some(url) => config.base_url = url,
            None => tracing::warn!(
                "EVENTLY_API_URL not set; using default base path {}",
                DEFAULT_BASE_URL
            ),
        }

        config.bearer_token = lookup("EVENTLY_API_TOKEN").filter(|t| !t.is_empty());

        if let Some(timeout) = read_secs(&lookup, "EVENTLY_API_CONNECT_TIMEOUT_SECS")? {
            config.connect_timeout = timeout;
        }
        if let Some(timeout) = read_secs(&lookup, "EVENTLY_API_TIMEOUT_SECS")? {
            config.request_timeout = timeout;
        }

        Ok(config)
    }
}

fn read_secs<F>(lookup: &F, key: &str) -> anyhow::Result<Option<Duration>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let secs: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("{key} must be a whole number of seconds, got '{raw}'"))?;
    Ok(Some(Duration::from_secs(secs)))
}
