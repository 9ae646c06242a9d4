//! Bybit Orderbook Snapshot
//! Public endpoint only, no credentials required.
//!
//! Usage: `orderbook_snapshot [symbol] [category]` (default `ETHUSDT linear`)
//!
//! # Logging
//! - Uses LOG_FORMAT env var: `json` (default) or `pretty`

use std::time::Instant;

use anyhow::anyhow;
use bybit_smoke::adapters::{BybitAdapter, BybitConfig, Category, ExchangeAdapter};
use bybit_smoke::bin_utils;
use bybit_smoke::config::DEFAULT_SYMBOL;
use bybit_smoke::core::print_json;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bin_utils::boot_minimal();

    let mut args = std::env::args().skip(1);
    let symbol = args.next().unwrap_or_else(|| DEFAULT_SYMBOL.to_string());
    let category: Category = match args.next() {
        Some(raw) => raw.parse().map_err(|e: String| anyhow!(e))?,
        None => Category::Linear,
    };

    let config = BybitConfig::public_from_env();
    info!(symbol = %symbol, category = %category, base_url = config.rest_base_url(), "=== BYBIT ORDERBOOK ===");
    let adapter = BybitAdapter::new(config);

    let start = Instant::now();
    let snapshot = adapter.fetch_orderbook(category, &symbol, None).await?;
    info!(
        bid = ?snapshot.orderbook.best_bid(),
        ask = ?snapshot.orderbook.best_ask(),
        mid = ?snapshot.orderbook.mid_price(),
        latency_ms = start.elapsed().as_millis() as u64,
        "Orderbook prices"
    );

    print_json(&mut std::io::stdout().lock(), &snapshot)?;
    Ok(())
}
