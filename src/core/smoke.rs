//! Smoke run: one orderbook snapshot, then one order
//!
//! Both results are printed to the output as pretty JSON. The first failure
//! aborts the run; nothing is retried.

use std::io::Write;
use std::time::Instant;

use serde::Serialize;
use tracing::info;

use crate::adapters::traits::ExchangeAdapter;
use crate::adapters::types::{OrderAck, OrderbookSnapshot};
use crate::config::SmokeConfig;
use crate::core::events::{current_timestamp_ms, log_event, SmokeEvent};
use crate::error::Result;

/// Outcome of a successful smoke run
#[derive(Debug, Clone, Serialize)]
pub struct SmokeReport {
    pub orderbook: OrderbookSnapshot,
    pub ack: OrderAck,
    pub orderbook_latency_ms: u64,
    pub order_latency_ms: u64,
}

/// Run the smoke plan, printing results to stdout
pub async fn run_smoke<A>(adapter: &A, plan: &SmokeConfig) -> Result<SmokeReport>
where
    A: ExchangeAdapter + ?Sized,
{
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_smoke_to(adapter, plan, &mut out).await
}

/// Run the smoke plan, printing results to `out`
pub async fn run_smoke_to<A, W>(adapter: &A, plan: &SmokeConfig, out: &mut W) -> Result<SmokeReport>
where
    A: ExchangeAdapter + ?Sized,
    W: Write,
{
    let exchange = adapter.exchange_name();
    let started_ms = current_timestamp_ms();
    log_event(&SmokeEvent::smoke_started(exchange, &plan.orderbook.symbol));

    // Phase 1: orderbook
    let query = &plan.orderbook;
    let start = Instant::now();
    let orderbook = adapter
        .fetch_orderbook(query.category, &query.symbol, query.limit)
        .await?;
    let orderbook_latency_ms = start.elapsed().as_millis() as u64;

    log_event(&SmokeEvent::orderbook_fetched(
        exchange,
        &orderbook.symbol,
        orderbook.orderbook.best_bid(),
        orderbook.orderbook.best_ask(),
        orderbook_latency_ms,
    ));
    info!(
        bids = orderbook.orderbook.bids.len(),
        asks = orderbook.orderbook.asks.len(),
        spread = ?orderbook.orderbook.spread(),
        "Orderbook depth"
    );
    print_json(out, &orderbook)?;

    // Phase 2: order
    let request = plan.order.to_request();
    request.validate()?;

    log_event(&SmokeEvent::order_placed(
        exchange,
        &request.symbol,
        request.side.as_str(),
        request.quantity,
    ));
    let start = Instant::now();
    let ack = match adapter.place_order(request.clone()).await {
        Ok(ack) => ack,
        Err(e) => {
            let latency_ms = start.elapsed().as_millis() as u64;
            log_event(&SmokeEvent::order_failed(
                exchange,
                &request.symbol,
                &e.to_string(),
                latency_ms,
            ));
            return Err(e.into());
        }
    };
    let order_latency_ms = start.elapsed().as_millis() as u64;

    log_event(&SmokeEvent::order_accepted(
        exchange,
        &request.symbol,
        &ack.order_id,
        &ack.client_order_id,
        order_latency_ms,
    ));
    print_json(out, &ack)?;

    log_event(&SmokeEvent::smoke_finished(exchange, started_ms));

    Ok(SmokeReport {
        orderbook,
        ack,
        orderbook_latency_ms,
        order_latency_ms,
    })
}

/// Write `value` as pretty JSON followed by a newline
pub fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value)?;
    writeln!(out, "{}", rendered)?;
    Ok(())
}
