//! Bybit Exchange Adapter
//!
//! Implements the ExchangeAdapter trait for the Bybit V5 unified-trading
//! REST API. Uses HMAC-SHA256 signatures for private endpoints.
//!
//! This module is organized into submodules:
//! - `config` - Configuration and environment loading
//! - `types` - API envelopes, request bodies and response payloads
//! - `signing` - V5 request signing
//! - `adapter` - Main BybitAdapter implementation

mod adapter;
mod config;
pub mod signing;
mod types;

// Re-export public items
pub use adapter::BybitAdapter;
pub use config::{BybitConfig, Credentials, MAINNET_REST_URL, TESTNET_REST_URL};
