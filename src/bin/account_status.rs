//! Bybit Account Status
//! Prints wallet balance, position and open orders for the configured symbol.
//!
//! Read-only: never places or cancels orders.

use bybit_smoke::adapters::ExchangeAdapter;
use bybit_smoke::bin_utils;
use bybit_smoke::core::print_json;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let plan = bin_utils::boot()?;
    let adapter = bin_utils::connect_adapter(&plan)?;
    let category = plan.order.category;
    let symbol = plan.order.symbol.as_str();

    info!(symbol, category = %category, "=== BYBIT ACCOUNT STATUS ===");
    let mut out = std::io::stdout().lock();

    info!("Phase 1: Wallet balance...");
    let wallet = adapter.get_wallet_balance().await?;
    info!(
        account_type = %wallet.account_type,
        total_equity = wallet.total_equity,
        available = wallet.total_available_balance,
        coins = wallet.coins.len(),
        "Wallet balance"
    );
    print_json(&mut out, &wallet)?;

    info!("Phase 2: Position...");
    match adapter.get_position(category, symbol).await {
        Ok(Some(pos)) => {
            info!(
                side = %pos.side,
                qty = pos.quantity,
                entry_price = pos.entry_price,
                pnl = pos.unrealized_pnl,
                "Existing position"
            );
            print_json(&mut out, &pos)?;
        }
        Ok(None) => info!("No existing position"),
        Err(e) => warn!(error = %e, "Error checking position"),
    }

    info!("Phase 3: Open orders...");
    let orders = adapter.get_open_orders(category, symbol).await?;
    info!(count = orders.len(), "Open orders");
    print_json(&mut out, &orders)?;

    Ok(())
}
