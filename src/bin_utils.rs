//! Shared bootstrap utilities for binary entry points
//!
//! Eliminates duplicated init boilerplate across `bybit_smoke`,
//! `orderbook_snapshot`, and `account_status`.

use std::path::Path;
use tracing::info;

use crate::adapters::bybit::{BybitAdapter, BybitConfig};
use crate::adapters::errors::ExchangeResult;
use crate::config::{self, SmokeConfig};
use crate::error::AppError;

/// Initialize dotenv, logging, and load the smoke plan.
///
/// This covers the common init sequence shared by all binaries:
/// 1. Load `.env` file
/// 2. Initialize structured logging (JSON/Pretty via `LOG_FORMAT`)
/// 3. Load the plan from `SMOKE_CONFIG` (default `config.yaml`), or the
///    built-in defaults when the file is absent
///
/// # Errors
/// Returns an error if the plan file exists but is invalid.
pub fn boot() -> Result<SmokeConfig, AppError> {
    boot_minimal();
    config::constants::log_config_summary();

    let path = config::constants::smoke_config_path();
    let plan = config::load_config_or_default(Path::new(&path))?;
    info!(
        orderbook_symbol = %plan.orderbook.symbol,
        order_symbol = %plan.order.symbol,
        side = plan.order.side.as_str(),
        order_type = plan.order.order_type.as_str(),
        qty = plan.order.qty,
        "Smoke plan loaded"
    );
    Ok(plan)
}

/// Initialize dotenv and logging only (no config.yaml needed).
pub fn boot_minimal() {
    dotenvy::dotenv().ok();
    config::init_logging();
}

/// Build an authenticated adapter from the environment.
///
/// # Errors
/// `AuthenticationFailed` when `BYBIT_API_KEY` or `BYBIT_API_SECRET` is
/// missing or empty.
pub fn connect_adapter(plan: &SmokeConfig) -> ExchangeResult<BybitAdapter> {
    let mut bybit_config = BybitConfig::from_env()?;
    bybit_config.log_requests = plan.log_requests;
    info!(
        testnet = bybit_config.testnet,
        base_url = bybit_config.rest_base_url(),
        recv_window_ms = bybit_config.recv_window_ms,
        "Bybit config loaded"
    );
    Ok(BybitAdapter::new(bybit_config))
}
