//! Configuration module
//!
//! This module provides:
//! - Smoke plan types (`SmokeConfig`, `OrderbookQuery`, `OrderPlan`)
//! - YAML loading functionality (`load_config`, `load_config_or_default`)
//! - Application constants with environment variable overrides
//! - Logging configuration (`init_logging`)

pub mod constants;
mod loader;
pub mod logging;
mod types;

// Re-export types
pub use types::{OrderPlan, OrderbookQuery, SmokeConfig, DEFAULT_QTY, DEFAULT_SYMBOL};

// Re-export loader functions
pub use loader::{load_config, load_config_from_str, load_config_or_default};

// Re-export logging functions
pub use logging::init_logging;
