//! Bybit Types
//!
//! V5 REST envelopes, request bodies and response payloads.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::types::{
    format_decimal, Category, CoinBalance, OpenOrder, OrderAck, OrderRequest, OrderSide,
    OrderType, Orderbook, OrderbookLevel, OrderbookSnapshot, PositionInfo, TimeInForce,
    WalletBalance,
};

// =============================================================================
// Envelope
// =============================================================================

/// Common response wrapper. `result` is `{}` when `retCode != 0`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BybitEnvelope {
    pub ret_code: i64,
    pub ret_msg: String,
    #[serde(default)]
    pub result: serde_json::Value,
    #[serde(default)]
    pub time: u64,
}

impl BybitEnvelope {
    /// Decode `result`, mapping a non-zero `retCode` to `Rejected`
    pub fn into_result<T: DeserializeOwned>(self) -> ExchangeResult<T> {
        if self.ret_code != 0 {
            return Err(ExchangeError::Rejected {
                code: self.ret_code,
                message: self.ret_msg,
            });
        }
        serde_json::from_value(self.result)
            .map_err(|e| ExchangeError::InvalidResponse(format!("Unexpected result shape: {}", e)))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BybitList<T> {
    pub list: Vec<T>,
}

// =============================================================================
// Number helpers
// =============================================================================

fn parse_num(field: &str, value: &str) -> ExchangeResult<f64> {
    value
        .parse::<f64>()
        .map_err(|e| ExchangeError::InvalidResponse(format!("Invalid {} '{}': {}", field, value, e)))
}

/// Bybit sends `""` for fields that do not apply (e.g. price on market orders)
fn parse_num_or_zero(field: &str, value: &str) -> ExchangeResult<f64> {
    if value.is_empty() {
        Ok(0.0)
    } else {
        parse_num(field, value)
    }
}

// =============================================================================
// Orderbook
// =============================================================================

/// `GET /v5/market/orderbook` result
#[derive(Debug, Deserialize)]
pub(crate) struct BybitOrderbookResult {
    pub s: String,
    pub b: Vec<[String; 2]>,
    pub a: Vec<[String; 2]>,
    pub ts: u64,
    pub u: u64,
    #[serde(default)]
    pub seq: u64,
}

fn parse_levels(side: &str, raw: &[[String; 2]]) -> ExchangeResult<Vec<OrderbookLevel>> {
    raw.iter()
        .map(|[price, qty]| {
            let p = parse_num(&format!("{} price", side), price)?;
            let q = parse_num(&format!("{} quantity", side), qty)?;
            Ok(OrderbookLevel::new(p, q))
        })
        .collect()
}

impl BybitOrderbookResult {
    /// Convert to a snapshot with bids descending and asks ascending
    pub fn into_snapshot(self, category: Category) -> ExchangeResult<OrderbookSnapshot> {
        let mut bids = parse_levels("bid", &self.b)?;
        let mut asks = parse_levels("ask", &self.a)?;

        bids.sort_by(|a, b| {
            b.price
                .partial_cmp(&a.price)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        asks.sort_by(|a, b| {
            a.price
                .partial_cmp(&b.price)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(OrderbookSnapshot {
            symbol: self.s,
            category,
            orderbook: Orderbook {
                bids,
                asks,
                timestamp: self.ts,
            },
            update_id: self.u,
            seq: self.seq,
        })
    }
}

// =============================================================================
// Orders
// =============================================================================

/// `POST /v5/order/create` body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BybitCreateOrderBody<'a> {
    pub category: &'a str,
    pub symbol: &'a str,
    pub side: &'a str,
    pub order_type: &'a str,
    pub qty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<&'a str>,
    pub order_link_id: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub reduce_only: bool,
}

impl<'a> BybitCreateOrderBody<'a> {
    /// Map an order request onto the wire format
    ///
    /// Market orders carry no price and are always IOC. PostOnly is a limit
    /// order with `timeInForce=PostOnly`.
    pub fn from_request(order: &'a OrderRequest, order_link_id: String) -> Self {
        let (order_type, time_in_force) = match (order.order_type, order.time_in_force) {
            (OrderType::Market, _) => ("Market", Some(TimeInForce::Ioc)),
            (_, Some(TimeInForce::PostOnly)) => ("Limit", Some(TimeInForce::PostOnly)),
            (OrderType::Limit, tif) => ("Limit", tif),
        };
        let price = match order_type {
            "Market" => None,
            _ => order.price.map(format_decimal),
        };

        Self {
            category: order.category.as_str(),
            symbol: &order.symbol,
            side: order.side.as_str(),
            order_type,
            qty: format_decimal(order.quantity),
            price,
            time_in_force: time_in_force.map(|t| t.as_str()),
            order_link_id,
            reduce_only: order.reduce_only,
        }
    }
}

/// `POST /v5/order/cancel` body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BybitCancelOrderBody<'a> {
    pub category: &'a str,
    pub symbol: &'a str,
    pub order_id: &'a str,
}

/// Result of create and cancel
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BybitOrderAckResult {
    pub order_id: String,
    #[serde(default)]
    pub order_link_id: String,
}

impl From<BybitOrderAckResult> for OrderAck {
    fn from(r: BybitOrderAckResult) -> Self {
        OrderAck {
            order_id: r.order_id,
            client_order_id: r.order_link_id,
        }
    }
}

/// Entry of `GET /v5/order/realtime`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BybitOrder {
    pub order_id: String,
    #[serde(default)]
    pub order_link_id: String,
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    #[serde(default)]
    pub price: String,
    pub qty: String,
    #[serde(default)]
    pub cum_exec_qty: String,
    pub order_status: String,
    #[serde(default)]
    pub reduce_only: bool,
    #[serde(default)]
    pub created_time: String,
}

impl BybitOrder {
    pub fn into_open_order(self) -> ExchangeResult<OpenOrder> {
        Ok(OpenOrder {
            price: parse_num_or_zero("price", &self.price)?,
            quantity: parse_num("qty", &self.qty)?,
            filled_quantity: parse_num_or_zero("cumExecQty", &self.cum_exec_qty)?,
            created_time: self.created_time.parse().unwrap_or(0),
            order_id: self.order_id,
            client_order_id: self.order_link_id,
            symbol: self.symbol,
            side: self.side,
            order_type: self.order_type,
            status: self.order_status,
            reduce_only: self.reduce_only,
        })
    }
}

// =============================================================================
// Positions
// =============================================================================

/// Entry of `GET /v5/position/list`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BybitPosition {
    pub symbol: String,
    #[serde(default)]
    pub side: String,
    pub size: String,
    #[serde(default)]
    pub avg_price: String,
    #[serde(default)]
    pub mark_price: String,
    #[serde(default)]
    pub unrealised_pnl: String,
    #[serde(default)]
    pub leverage: String,
}

impl BybitPosition {
    /// Zero-size entries are placeholders, not positions
    pub fn into_position(self) -> ExchangeResult<Option<PositionInfo>> {
        let quantity = parse_num_or_zero("size", &self.size)?;
        if quantity == 0.0 {
            return Ok(None);
        }
        let leverage = match self.leverage.as_str() {
            "" => None,
            lev => Some(parse_num("leverage", lev)?),
        };
        Ok(Some(PositionInfo {
            symbol: self.symbol,
            side: self.side,
            quantity: quantity.abs(),
            entry_price: parse_num_or_zero("avgPrice", &self.avg_price)?,
            mark_price: parse_num_or_zero("markPrice", &self.mark_price)?,
            unrealized_pnl: parse_num_or_zero("unrealisedPnl", &self.unrealised_pnl)?,
            leverage,
        }))
    }
}

// =============================================================================
// Wallet
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BybitWalletCoin {
    pub coin: String,
    #[serde(default)]
    pub equity: String,
    #[serde(default)]
    pub wallet_balance: String,
    #[serde(default)]
    pub locked: String,
    #[serde(default)]
    pub unrealised_pnl: String,
}

/// Entry of `GET /v5/account/wallet-balance`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BybitWalletAccount {
    pub account_type: String,
    #[serde(default)]
    pub total_equity: String,
    #[serde(default)]
    pub total_available_balance: String,
    #[serde(default)]
    pub coin: Vec<BybitWalletCoin>,
}

impl BybitWalletAccount {
    pub fn into_wallet_balance(self) -> ExchangeResult<WalletBalance> {
        let coins = self
            .coin
            .into_iter()
            .map(|c| {
                Ok(CoinBalance {
                    equity: parse_num_or_zero("equity", &c.equity)?,
                    wallet_balance: parse_num_or_zero("walletBalance", &c.wallet_balance)?,
                    locked: parse_num_or_zero("locked", &c.locked)?,
                    unrealized_pnl: parse_num_or_zero("unrealisedPnl", &c.unrealised_pnl)?,
                    coin: c.coin,
                })
            })
            .collect::<ExchangeResult<Vec<_>>>()?;

        Ok(WalletBalance {
            account_type: self.account_type,
            total_equity: parse_num_or_zero("totalEquity", &self.total_equity)?,
            total_available_balance: parse_num_or_zero(
                "totalAvailableBalance",
                &self.total_available_balance,
            )?,
            coins,
        })
    }
}
