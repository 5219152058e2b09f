//! Dispatcher configuration.

use std::env;
use std::time::Duration;

use log::warn;

/// Default base URL of the dashboard backend.
pub const DEFAULT_API_URL: &str = "https://127.0.0.1:3000";

/// Default ceiling for a single request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration injected into a dispatcher at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without a trailing `/`.
    pub base_url: String,
    /// Time after which an unanswered request fails with a network error.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Read `FINDASH_API_URL` and `FINDASH_TIMEOUT_SECS`, falling back to defaults.
    pub fn from_env() -> Self {
        let base_url = env::var("FINDASH_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let timeout_secs = match env::var("FINDASH_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().unwrap_or_else(|_| {
                warn!(
                    "Ignoring invalid FINDASH_TIMEOUT_SECS '{}', using {}s",
                    raw, DEFAULT_TIMEOUT_SECS
                );
                DEFAULT_TIMEOUT_SECS
            }),
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        Self::new(&base_url, Duration::from_secs(timeout_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_ten_second_ceiling() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://127.0.0.1:3000");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = ClientConfig::new("http://localhost:8080/", Duration::from_secs(3));
        assert_eq!(config.base_url, "http://localhost:8080");
    }
}
