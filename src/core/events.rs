//! Smoke Event System
//!
//! Structured events emitted by the smoke run. Every event shares one schema
//! so a run can be reconstructed from the JSON log alone.
//!
//! # Event Types
//!
//! - **SmokeStarted**: Run begins, exchange and symbols known
//! - **OrderbookFetched**: Snapshot received, best bid/ask known
//! - **OrderPlaced**: Order sent to exchange
//! - **OrderAccepted**: Exchange acknowledged the order
//! - **OrderFailed**: Order rejected or transport error
//! - **SmokeFinished**: Run completed
//!
//! # Example
//!
//! ```ignore
//! use crate::core::events::{SmokeEvent, log_event};
//!
//! log_event(&SmokeEvent::orderbook_fetched("bybit", "ETHUSDT", Some(3100.0), Some(3100.1), 42));
//! ```

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

/// Smoke event types for structured logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmokeEventType {
    SmokeStarted,
    OrderbookFetched,
    OrderPlaced,
    OrderAccepted,
    OrderFailed,
    SmokeFinished,
}

impl fmt::Display for SmokeEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmokeEventType::SmokeStarted => write!(f, "SMOKE_STARTED"),
            SmokeEventType::OrderbookFetched => write!(f, "ORDERBOOK_FETCHED"),
            SmokeEventType::OrderPlaced => write!(f, "ORDER_PLACED"),
            SmokeEventType::OrderAccepted => write!(f, "ORDER_ACCEPTED"),
            SmokeEventType::OrderFailed => write!(f, "ORDER_FAILED"),
            SmokeEventType::SmokeFinished => write!(f, "SMOKE_FINISHED"),
        }
    }
}

/// Smoke event with all context fields for structured logging
#[derive(Debug, Clone)]
pub struct SmokeEvent {
    pub event_type: SmokeEventType,
    pub timestamp_ms: u64,
    pub exchange: Option<String>,
    pub symbol: Option<String>,
    pub best_bid: Option<f64>,
    pub best_ask: Option<f64>,
    pub latency_ms: Option<u64>,
    pub order_id: Option<String>,
    pub client_order_id: Option<String>,
    pub side: Option<String>,
    pub quantity: Option<f64>,
    pub error: Option<String>,
}

impl SmokeEvent {
    /// Create a new event with the current timestamp
    pub fn new(event_type: SmokeEventType) -> Self {
        Self {
            event_type,
            timestamp_ms: current_timestamp_ms(),
            exchange: None,
            symbol: None,
            best_bid: None,
            best_ask: None,
            latency_ms: None,
            order_id: None,
            client_order_id: None,
            side: None,
            quantity: None,
            error: None,
        }
    }

    pub fn smoke_started(exchange: &str, symbol: &str) -> Self {
        Self {
            exchange: Some(exchange.to_string()),
            symbol: Some(symbol.to_string()),
            ..Self::new(SmokeEventType::SmokeStarted)
        }
    }

    /// Create an ORDERBOOK_FETCHED event
    pub fn orderbook_fetched(
        exchange: &str,
        symbol: &str,
        best_bid: Option<f64>,
        best_ask: Option<f64>,
        latency_ms: u64,
    ) -> Self {
        Self {
            exchange: Some(exchange.to_string()),
            symbol: Some(symbol.to_string()),
            best_bid,
            best_ask,
            latency_ms: Some(latency_ms),
            ..Self::new(SmokeEventType::OrderbookFetched)
        }
    }

    /// Create an ORDER_PLACED event
    pub fn order_placed(exchange: &str, symbol: &str, side: &str, quantity: f64) -> Self {
        Self {
            exchange: Some(exchange.to_string()),
            symbol: Some(symbol.to_string()),
            side: Some(side.to_string()),
            quantity: Some(quantity),
            ..Self::new(SmokeEventType::OrderPlaced)
        }
    }

    /// Create an ORDER_ACCEPTED event
    pub fn order_accepted(
        exchange: &str,
        symbol: &str,
        order_id: &str,
        client_order_id: &str,
        latency_ms: u64,
    ) -> Self {
        Self {
            exchange: Some(exchange.to_string()),
            symbol: Some(symbol.to_string()),
            order_id: Some(order_id.to_string()),
            client_order_id: Some(client_order_id.to_string()),
            latency_ms: Some(latency_ms),
            ..Self::new(SmokeEventType::OrderAccepted)
        }
    }

    /// Create an ORDER_FAILED event
    pub fn order_failed(exchange: &str, symbol: &str, error: &str, latency_ms: u64) -> Self {
        Self {
            exchange: Some(exchange.to_string()),
            symbol: Some(symbol.to_string()),
            error: Some(error.to_string()),
            latency_ms: Some(latency_ms),
            ..Self::new(SmokeEventType::OrderFailed)
        }
    }

    /// Create a SMOKE_FINISHED event carrying the total run time
    pub fn smoke_finished(exchange: &str, started_ms: u64) -> Self {
        Self {
            exchange: Some(exchange.to_string()),
            latency_ms: Some(calculate_latency_ms(started_ms)),
            ..Self::new(SmokeEventType::SmokeFinished)
        }
    }
}

/// Get current timestamp in milliseconds since Unix epoch
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Milliseconds elapsed since `start_timestamp_ms`
pub fn calculate_latency_ms(start_timestamp_ms: u64) -> u64 {
    let now = current_timestamp_ms();
    now.saturating_sub(start_timestamp_ms)
}

/// Log a smoke event using structured tracing fields
///
/// Failures are logged at WARN, everything else at INFO.
pub fn log_event(event: &SmokeEvent) {
    let event_type = event.event_type.to_string();
    let timestamp = event.timestamp_ms;

    match event.event_type {
        SmokeEventType::OrderFailed => {
            warn!(
                event_type = %event_type,
                timestamp = timestamp,
                exchange = ?event.exchange,
                symbol = ?event.symbol,
                latency_ms = ?event.latency_ms,
                error = ?event.error,
                ""
            );
        }
        _ => {
            info!(
                event_type = %event_type,
                timestamp = timestamp,
                exchange = ?event.exchange,
                symbol = ?event.symbol,
                best_bid = ?event.best_bid,
                best_ask = ?event.best_ask,
                latency_ms = ?event.latency_ms,
                order_id = ?event.order_id,
                client_order_id = ?event.client_order_id,
                side = ?event.side,
                quantity = ?event.quantity,
                ""
            );
        }
    }
}
