//! Bybit smoke test entry point
//!
//! 1. Loads `.env` and the smoke plan
//! 2. Builds a signed Bybit client from `BYBIT_API_KEY` / `BYBIT_API_SECRET`
//! 3. Fetches and prints the orderbook snapshot
//! 4. Places the configured order and prints the acknowledgment
//!
//! Logs go to stderr; stdout carries only the printed results.

use bybit_smoke::adapters::ExchangeAdapter;
use bybit_smoke::bin_utils;
use bybit_smoke::core::run_smoke;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let plan = bin_utils::boot()?;
    let adapter = bin_utils::connect_adapter(&plan)?;

    info!(exchange = adapter.exchange_name(), "=== BYBIT SMOKE TEST ===");
    let report = run_smoke(&adapter, &plan).await?;

    info!(
        order_id = %report.ack.order_id,
        orderbook_latency_ms = report.orderbook_latency_ms,
        order_latency_ms = report.order_latency_ms,
        "Smoke test complete"
    );
    Ok(())
}
