//! Application-wide constants and configuration defaults
//!
//! This module centralizes all hardcoded values to make them configurable
//! and maintainable. Values can be overridden via environment variables.

use std::time::Duration;

// =============================================================================
// HTTP Configuration
// =============================================================================

/// Total HTTP request timeout (default: 10 seconds)
///
/// Environment variable: `HTTP_TIMEOUT_SECS`
pub fn http_timeout() -> Duration {
    let secs = std::env::var("HTTP_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);
    Duration::from_secs(secs)
}

/// HTTP connect timeout (default: 3000ms)
///
/// Environment variable: `HTTP_CONNECT_TIMEOUT_MS`
pub fn http_connect_timeout() -> Duration {
    let ms = std::env::var("HTTP_CONNECT_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3000);
    Duration::from_millis(ms)
}

// =============================================================================
// Signing
// =============================================================================

/// Default `X-BAPI-RECV-WINDOW` in milliseconds
pub const DEFAULT_RECV_WINDOW_MS: u64 = 5000;

pub fn default_recv_window_ms() -> u64 {
    DEFAULT_RECV_WINDOW_MS
}

// =============================================================================
// Files
// =============================================================================

/// Smoke plan location (default: `config.yaml`)
///
/// Environment variable: `SMOKE_CONFIG`
pub fn smoke_config_path() -> String {
    std::env::var("SMOKE_CONFIG").unwrap_or_else(|_| "config.yaml".to_string())
}

/// Log all effective values at startup
pub fn log_config_summary() {
    tracing::info!(
        http_timeout_ms = http_timeout().as_millis() as u64,
        http_connect_timeout_ms = http_connect_timeout().as_millis() as u64,
        recv_window_ms = DEFAULT_RECV_WINDOW_MS,
        smoke_config = %smoke_config_path(),
        "Effective constants"
    );
}
