//! Core data types for exchange adapters
//!
//! These types are used by the adapter trait and the smoke flow for
//! consistent orderbook representation and order management.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::config::constants::{http_connect_timeout, http_timeout};

// =============================================================================
// Shared HTTP Client Builder
// =============================================================================

/// Create the HTTP client used for REST calls
///
/// Timeouts come from `config::constants` so they can be overridden per run.
pub fn create_http_client(exchange_name: &str) -> reqwest::Client {
    let timeout = http_timeout();
    let connect_timeout = http_connect_timeout();
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .tcp_nodelay(true)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new());
    tracing::info!(
        phase = "init",
        exchange = %exchange_name,
        timeout_ms = timeout.as_millis() as u64,
        connect_timeout_ms = connect_timeout.as_millis() as u64,
        "HTTP client configured"
    );
    client
}

/// Format a quantity or price as the decimal string the exchange expects
///
/// `f64`'s `Display` never uses exponent notation, so `0.01` stays `"0.01"`
/// and `1.0` becomes `"1"`.
pub fn format_decimal(value: f64) -> String {
    format!("{}", value)
}

// =============================================================================
// Enums
// =============================================================================

/// Product category of a unified-trading account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Spot,
    #[default]
    Linear,
    Inverse,
    Option,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Spot => "spot",
            Category::Linear => "linear",
            Category::Inverse => "inverse",
            Category::Option => "option",
        }
    }

    /// Inclusive range accepted for the orderbook `limit` parameter
    pub fn orderbook_limit_range(&self) -> (u32, u32) {
        match self {
            Category::Spot => (1, 200),
            Category::Linear | Category::Inverse => (1, 500),
            Category::Option => (1, 25),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "spot" => Ok(Category::Spot),
            "linear" => Ok(Category::Linear),
            "inverse" => Ok(Category::Inverse),
            "option" => Ok(Category::Option),
            other => Err(format!("unknown category: {}", other)),
        }
    }
}

/// Order side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OrderSide {
    #[default]
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "Buy",
            OrderSide::Sell => "Sell",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OrderType {
    #[default]
    Market,
    Limit,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "Market",
            OrderType::Limit => "Limit",
        }
    }
}

/// Time in force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInForce {
    #[serde(rename = "GTC")]
    Gtc,
    #[serde(rename = "IOC")]
    Ioc,
    #[serde(rename = "FOK")]
    Fok,
    PostOnly,
}

impl TimeInForce {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::Gtc => "GTC",
            TimeInForce::Ioc => "IOC",
            TimeInForce::Fok => "FOK",
            TimeInForce::PostOnly => "PostOnly",
        }
    }
}

// =============================================================================
// Orderbook Types
// =============================================================================

/// A single level in the orderbook (price + quantity)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderbookLevel {
    /// Price at this level
    pub price: f64,
    /// Quantity available at this price
    pub quantity: f64,
}

impl OrderbookLevel {
    /// Create a new orderbook level
    pub fn new(price: f64, quantity: f64) -> Self {
        Self { price, quantity }
    }
}

/// Orderbook with bid and ask levels
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Orderbook {
    /// Bid levels sorted descending by price (best bid first)
    pub bids: Vec<OrderbookLevel>,
    /// Ask levels sorted ascending by price (best ask first)
    pub asks: Vec<OrderbookLevel>,
    /// Exchange timestamp in Unix milliseconds
    pub timestamp: u64,
}

impl Orderbook {
    /// Create a new empty orderbook
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the best bid price (highest bid)
    pub fn best_bid(&self) -> Option<f64> {
        self.bids.first().map(|l| l.price)
    }

    /// Get the best ask price (lowest ask)
    pub fn best_ask(&self) -> Option<f64> {
        self.asks.first().map(|l| l.price)
    }

    /// Calculate mid price
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid + ask) / 2.0),
            _ => None,
        }
    }

    /// Absolute distance between best ask and best bid
    pub fn spread(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }
}

/// Orderbook snapshot as returned by a single REST query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderbookSnapshot {
    pub symbol: String,
    pub category: Category,
    pub orderbook: Orderbook,
    /// Exchange update id (`u`)
    pub update_id: u64,
    /// Cross sequence (`seq`)
    pub seq: u64,
}

// =============================================================================
// Order Types
// =============================================================================

/// Maximum length of a client order id (`orderLinkId`)
pub const MAX_CLIENT_ORDER_ID_LEN: usize = 36;

/// Order request sent to an exchange adapter
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    /// Client order id, empty lets the adapter generate one
    pub client_order_id: String,
    pub category: Category,
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    /// Limit price, ignored for market orders
    pub price: Option<f64>,
    pub quantity: f64,
    /// None lets the exchange apply its default
    pub time_in_force: Option<TimeInForce>,
    pub reduce_only: bool,
}

impl OrderRequest {
    /// Market order with exchange-default time in force
    pub fn market(
        category: Category,
        symbol: impl Into<String>,
        side: OrderSide,
        quantity: f64,
    ) -> Self {
        Self {
            client_order_id: String::new(),
            category,
            symbol: symbol.into(),
            side,
            order_type: OrderType::Market,
            price: None,
            quantity,
            time_in_force: None,
            reduce_only: false,
        }
    }

    /// Limit order
    pub fn limit(
        category: Category,
        symbol: impl Into<String>,
        side: OrderSide,
        price: f64,
        quantity: f64,
        time_in_force: TimeInForce,
    ) -> Self {
        Self {
            client_order_id: String::new(),
            category,
            symbol: symbol.into(),
            side,
            order_type: OrderType::Limit,
            price: Some(price),
            quantity,
            time_in_force: Some(time_in_force),
            reduce_only: false,
        }
    }

    pub fn with_client_order_id(mut self, client_order_id: impl Into<String>) -> Self {
        self.client_order_id = client_order_id.into();
        self
    }

    pub fn with_reduce_only(mut self, reduce_only: bool) -> Self {
        self.reduce_only = reduce_only;
        self
    }

    /// Reject requests the exchange would refuse anyway
    pub fn validate(&self) -> ExchangeResult<()> {
        if self.symbol.trim().is_empty() {
            return Err(ExchangeError::InvalidOrder("symbol cannot be empty".into()));
        }
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(ExchangeError::InvalidOrder(format!(
                "quantity must be a positive number (got {})",
                self.quantity
            )));
        }
        if self.client_order_id.len() > MAX_CLIENT_ORDER_ID_LEN {
            return Err(ExchangeError::InvalidOrder(format!(
                "client_order_id longer than {} characters",
                MAX_CLIENT_ORDER_ID_LEN
            )));
        }
        match self.order_type {
            OrderType::Limit => match self.price {
                Some(p) if p.is_finite() && p > 0.0 => {}
                other => {
                    return Err(ExchangeError::InvalidOrder(format!(
                        "limit order requires a positive price (got {:?})",
                        other
                    )))
                }
            },
            OrderType::Market => {
                if self.time_in_force == Some(TimeInForce::PostOnly) {
                    return Err(ExchangeError::InvalidOrder(
                        "market order cannot be PostOnly".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Acknowledgment returned when an order is accepted or cancelled
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderAck {
    /// Exchange-assigned order id
    pub order_id: String,
    /// Client order id (`orderLinkId`)
    pub client_order_id: String,
}

/// Live order as reported by the exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenOrder {
    pub order_id: String,
    pub client_order_id: String,
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub price: f64,
    pub quantity: f64,
    pub filled_quantity: f64,
    pub status: String,
    pub reduce_only: bool,
    /// Creation time in Unix milliseconds
    pub created_time: u64,
}

/// Position information for a symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionInfo {
    pub symbol: String,
    /// "Buy" (long) or "Sell" (short)
    pub side: String,
    /// Absolute position size
    pub quantity: f64,
    pub entry_price: f64,
    pub mark_price: f64,
    pub unrealized_pnl: f64,
    pub leverage: Option<f64>,
}

/// Balance of a single coin in the unified account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinBalance {
    pub coin: String,
    pub equity: f64,
    pub wallet_balance: f64,
    pub locked: f64,
    pub unrealized_pnl: f64,
}

/// Unified account wallet balance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletBalance {
    pub account_type: String,
    pub total_equity: f64,
    pub total_available_balance: f64,
    pub coins: Vec<CoinBalance>,
}

impl WalletBalance {
    /// Find the balance for a coin, case-insensitive
    pub fn coin(&self, name: &str) -> Option<&CoinBalance> {
        self.coins.iter().find(|c| c.coin.eq_ignore_ascii_case(name))
    }
}
