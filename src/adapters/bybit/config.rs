//! Bybit Configuration
//!
//! Configuration for the Bybit V5 REST API including environment loading.

use std::fmt;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::config::constants::default_recv_window_ms;

/// Mainnet REST root
pub const MAINNET_REST_URL: &str = "https://api.bybit.com";
/// Testnet REST root
pub const TESTNET_REST_URL: &str = "https://api-testnet.bybit.com";

/// API key pair. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Configuration for Bybit REST access
#[derive(Debug, Clone)]
pub struct BybitConfig {
    /// None restricts the adapter to public endpoints
    pub credentials: Option<Credentials>,
    /// Use testnet endpoints (true) or mainnet (false)
    pub testnet: bool,
    /// Explicit REST root, takes precedence over `testnet`
    pub rest_url_override: Option<String>,
    /// `X-BAPI-RECV-WINDOW` in milliseconds
    pub recv_window_ms: u64,
    /// Log request and response bodies at info instead of debug
    pub log_requests: bool,
}

impl BybitConfig {
    /// Create configuration from environment variables
    ///
    /// Requires `BYBIT_API_KEY` and `BYBIT_API_SECRET`. Optional:
    /// `BYBIT_TESTNET`, `BYBIT_REST_URL`, `BYBIT_RECV_WINDOW_MS`.
    pub fn from_env() -> ExchangeResult<Self> {
        let api_key = read_required("BYBIT_API_KEY")?;
        let api_secret = read_required("BYBIT_API_SECRET")?;

        let mut config = Self::public_from_env();
        config.credentials = Some(Credentials::new(api_key, api_secret));
        Ok(config)
    }

    /// Same as `from_env` but without credentials
    pub fn public_from_env() -> Self {
        let testnet = std::env::var("BYBIT_TESTNET")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        let rest_url_override = std::env::var("BYBIT_REST_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());
        let recv_window_ms = std::env::var("BYBIT_RECV_WINDOW_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(default_recv_window_ms);

        Self {
            credentials: None,
            testnet,
            rest_url_override,
            recv_window_ms,
            log_requests: false,
        }
    }

    /// Public-only configuration
    pub fn public(testnet: bool) -> Self {
        Self {
            testnet,
            ..Default::default()
        }
    }

    /// Mainnet configuration with explicit credentials
    pub fn with_credentials(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            credentials: Some(Credentials::new(api_key, api_secret)),
            ..Default::default()
        }
    }

    /// Get REST API base URL (no trailing slash)
    pub fn rest_base_url(&self) -> &str {
        match &self.rest_url_override {
            Some(url) => url.trim_end_matches('/'),
            None if self.testnet => TESTNET_REST_URL,
            None => MAINNET_REST_URL,
        }
    }

    /// Credentials required by private endpoints
    pub fn credentials(&self) -> ExchangeResult<&Credentials> {
        self.credentials.as_ref().ok_or_else(|| {
            ExchangeError::AuthenticationFailed(
                "API credentials required for private endpoint".into(),
            )
        })
    }
}

impl Default for BybitConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            testnet: false,
            rest_url_override: None,
            recv_window_ms: default_recv_window_ms(),
            log_requests: false,
        }
    }
}

fn read_required(var: &str) -> ExchangeResult<String> {
    let value = std::env::var(var)
        .map_err(|_| ExchangeError::AuthenticationFailed(format!("{} not set", var)))?;
    if value.trim().is_empty() {
        return Err(ExchangeError::AuthenticationFailed(format!("{} is empty", var)));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for var in [
            "BYBIT_API_KEY",
            "BYBIT_API_SECRET",
            "BYBIT_TESTNET",
            "BYBIT_REST_URL",
            "BYBIT_RECV_WINDOW_MS",
        ] {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_bybit_config_default() {
        let config = BybitConfig::default();
        assert!(config.credentials.is_none());
        assert!(!config.testnet);
        assert_eq!(config.recv_window_ms, 5000);
        assert_eq!(config.rest_base_url(), MAINNET_REST_URL);
    }

    #[test]
    fn test_bybit_config_urls() {
        let config = BybitConfig::public(true);
        assert_eq!(config.rest_base_url(), TESTNET_REST_URL);

        let config = BybitConfig {
            rest_url_override: Some("http://127.0.0.1:1234/".into()),
            testnet: true,
            ..Default::default()
        };
        assert_eq!(config.rest_base_url(), "http://127.0.0.1:1234");
    }

    #[test]
    fn test_public_config_has_no_credentials() {
        let config = BybitConfig::public(false);
        assert!(matches!(
            config.credentials(),
            Err(ExchangeError::AuthenticationFailed(_))
        ));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = BybitConfig::with_credentials("my-key", "super-secret");
        let debug = format!("{:?}", config);
        assert!(debug.contains("my-key"));
        assert!(!debug.contains("super-secret"));
    }

    #[test]
    #[serial(env)]
    fn test_from_env_missing_vars() {
        clear_env();
        let err = BybitConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("BYBIT_API_KEY not set"), "Got: {}", err);
    }

    #[test]
    #[serial(env)]
    fn test_from_env_empty_secret() {
        clear_env();
        std::env::set_var("BYBIT_API_KEY", "key");
        std::env::set_var("BYBIT_API_SECRET", "  ");
        let err = BybitConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("BYBIT_API_SECRET is empty"), "Got: {}", err);
        clear_env();
    }

    #[test]
    #[serial(env)]
    fn test_from_env_full() {
        clear_env();
        std::env::set_var("BYBIT_API_KEY", "key");
        std::env::set_var("BYBIT_API_SECRET", "secret");
        std::env::set_var("BYBIT_TESTNET", "1");
        std::env::set_var("BYBIT_RECV_WINDOW_MS", "10000");

        let config = BybitConfig::from_env().unwrap();
        let creds = config.credentials().unwrap();
        assert_eq!(creds.api_key, "key");
        assert_eq!(creds.api_secret, "secret");
        assert!(config.testnet);
        assert_eq!(config.recv_window_ms, 10000);
        assert_eq!(config.rest_base_url(), TESTNET_REST_URL);
        clear_env();
    }
}
