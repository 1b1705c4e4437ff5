//! Configuration for the outbound call layer.
//!
//! Configuration is built once (usually by the binary at start-up) and handed
//! to [`HttpClient`](crate::transport::HttpClient) and
//! [`JsonpBridge`](crate::jsonp::JsonpBridge) explicitly. The library itself
//! never reads the environment behind the caller's back.

use std::env;
use std::time::Duration;

/// Default request timeout for every HTTP call.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// Default wait for a JSONP callback before giving up.
pub const DEFAULT_JSONP_TIMEOUT: Duration = Duration::from_secs(60);

/// Settings for the HTTP client wrapper.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub proxy_url: Option<String>,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_HTTP_TIMEOUT,
            proxy_url: None,
            user_agent: format!("phonetic-dict/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpConfig {
    /// Defaults overridden by `PHONETIC_HTTP_TIMEOUT_SECS` and `PHONETIC_PROXY_URL`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let timeout = env::var("PHONETIC_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);
        let proxy_url = env::var("PHONETIC_PROXY_URL")
            .ok()
            .filter(|s| !s.trim().is_empty());
        Self {
            timeout,
            proxy_url,
            ..defaults
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_proxy(mut self, url: impl Into<String>) -> Self {
        self.proxy_url = Some(url.into());
        self
    }
}

/// Settings for the JSONP bridge.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonpConfig {
    /// `None` waits forever for the callback.
    pub timeout: Option<Duration>,
}

impl Default for JsonpConfig {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_JSONP_TIMEOUT),
        }
    }
}

impl JsonpConfig {
    /// Defaults overridden by `PHONETIC_JSONP_TIMEOUT_SECS` (`0` disables the timeout).
    pub fn from_env() -> Self {
        match env::var("PHONETIC_JSONP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            Some(0) => Self { timeout: None },
            Some(secs) => Self {
                timeout: Some(Duration::from_secs(secs)),
            },
            None => Self::default(),
        }
    }

    pub fn without_timeout() -> Self {
        Self { timeout: None }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }
}
