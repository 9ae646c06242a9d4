//! Exchange adapter error types
//!
//! All exchange-related errors are wrapped in ExchangeError enum
//! which implements thiserror for consistent error handling.

use thiserror::Error;

/// Exchange-specific error types for adapter operations
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// Connection to exchange failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Network operation timed out
    #[error("Network timeout after {0}ms")]
    NetworkTimeout(u64),

    /// Invalid or unexpected response from exchange
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Missing, empty or refused API credentials
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Non-2xx HTTP status
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Exchange answered with a non-zero retCode
    #[error("Rejected by exchange (retCode {code}): {message}")]
    Rejected { code: i64, message: String },

    /// Order failed client-side validation before being sent
    #[error("Invalid order: {0}")]
    InvalidOrder(String),
}

impl ExchangeError {
    /// Map a reqwest transport error onto the adapter taxonomy
    pub fn from_transport(err: reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            ExchangeError::NetworkTimeout(timeout_ms)
        } else if err.is_connect() {
            ExchangeError::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            ExchangeError::InvalidResponse(err.to_string())
        } else {
            ExchangeError::ConnectionFailed(err.to_string())
        }
    }
}

/// Result type alias for exchange operations
pub type ExchangeResult<T> = std::result::Result<T, ExchangeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failed_display() {
        let err = ExchangeError::ConnectionFailed("timeout".to_string());
        assert_eq!(err.to_string(), "Connection failed: timeout");
    }

    #[test]
    fn test_network_timeout_display() {
        let err = ExchangeError::NetworkTimeout(5000);
        assert_eq!(err.to_string(), "Network timeout after 5000ms");
    }

    #[test]
    fn test_invalid_response_display() {
        let err = ExchangeError::InvalidResponse("malformed JSON".to_string());
        assert_eq!(err.to_string(), "Invalid response: malformed JSON");
    }

    #[test]
    fn test_rejected_display() {
        let err = ExchangeError::Rejected {
            code: 10001,
            message: "params error: qty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Rejected by exchange (retCode 10001): params error: qty"
        );
    }

    #[test]
    fn test_http_display() {
        let err = ExchangeError::Http {
            status: 403,
            body: "Forbidden".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 403: Forbidden");
    }

    #[test]
    fn test_authentication_failed_display() {
        let err = ExchangeError::AuthenticationFailed("BYBIT_API_KEY not set".into());
        assert!(err.to_string().contains("BYBIT_API_KEY"));
    }
}
