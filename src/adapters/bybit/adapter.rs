//! Bybit Adapter Implementation
//!
//! Main BybitAdapter struct implementing ExchangeAdapter trait.
//! Uses modules: config, types, signing for sub-components.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::Level;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::traits::ExchangeAdapter;
use crate::adapters::types::{
    create_http_client, Category, OpenOrder, OrderAck, OrderRequest, OrderbookSnapshot,
    PositionInfo, WalletBalance,
};
use crate::config::constants::http_timeout;

use super::config::BybitConfig;
use super::signing::SignedHeaders;
use super::types::{
    BybitCancelOrderBody, BybitCreateOrderBody, BybitEnvelope, BybitList, BybitOrder,
    BybitOrderAckResult, BybitOrderbookResult, BybitPosition, BybitWalletAccount,
};

// =============================================================================
// Endpoints
// =============================================================================

const PATH_ORDERBOOK: &str = "/v5/market/orderbook";
const PATH_CREATE_ORDER: &str = "/v5/order/create";
const PATH_CANCEL_ORDER: &str = "/v5/order/cancel";
const PATH_OPEN_ORDERS: &str = "/v5/order/realtime";
const PATH_POSITIONS: &str = "/v5/position/list";
const PATH_WALLET_BALANCE: &str = "/v5/account/wallet-balance";

/// Response bodies longer than this are cut in error messages
const MAX_ERROR_BODY_CHARS: usize = 512;

// =============================================================================
// BybitAdapter Implementation
// =============================================================================

/// Bybit V5 REST adapter implementing ExchangeAdapter trait
pub struct BybitAdapter {
    pub(crate) config: BybitConfig,
    pub(crate) http_client: reqwest::Client,
    timeout_ms: u64,
}

impl BybitAdapter {
    /// Create a new BybitAdapter with the given configuration
    pub fn new(config: BybitConfig) -> Self {
        Self {
            config,
            http_client: create_http_client("Bybit"),
            timeout_ms: http_timeout().as_millis() as u64,
        }
    }

    pub fn config(&self) -> &BybitConfig {
        &self.config
    }

    /// Generate an `orderLinkId` (32 hex chars, within the 36-char limit)
    pub fn new_order_link_id() -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }

    fn endpoint(&self, path: &str, params: &[(&str, String)]) -> ExchangeResult<Url> {
        let raw = format!("{}{}", self.config.rest_base_url(), path);
        let mut url = Url::parse(&raw)
            .map_err(|e| ExchangeError::ConnectionFailed(format!("Invalid URL '{}': {}", raw, e)))?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Unsigned GET for market data
    async fn get_public<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> ExchangeResult<T> {
        let url = self.endpoint(path, params)?;
        let request = self.http_client.get(url);
        self.execute("GET", path, None, request).await
    }

    /// Signed GET, the signature covers the exact query string
    async fn get_signed<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> ExchangeResult<T> {
        let credentials = self.config.credentials()?;
        let url = self.endpoint(path, params)?;
        let query = url.query().unwrap_or("").to_string();
        let headers = SignedHeaders::new(credentials, self.config.recv_window_ms, &query)?;
        let request = headers.apply(self.http_client.get(url));
        self.execute("GET", path, None, request).await
    }

    /// Signed POST, the signature covers the exact JSON body
    async fn post_signed<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ExchangeResult<T> {
        let credentials = self.config.credentials()?;
        let url = self.endpoint(path, &[])?;
        let payload = serde_json::to_string(body)
            .map_err(|e| ExchangeError::InvalidOrder(format!("Cannot encode body: {}", e)))?;
        let headers = SignedHeaders::new(credentials, self.config.recv_window_ms, &payload)?;
        let request = headers
            .apply(self.http_client.post(url))
            .header("Content-Type", "application/json")
            .body(payload.clone());
        self.execute("POST", path, Some(&payload), request).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: &'static str,
        path: &str,
        body: Option<&str>,
        request: reqwest::RequestBuilder,
    ) -> ExchangeResult<T> {
        log_body(
            body_log_level(self.config.log_requests),
            method,
            path,
            "Request",
            body.unwrap_or(""),
        );

        let start = Instant::now();
        let response = request
            .send()
            .await
            .map_err(|e| ExchangeError::from_transport(e, self.timeout_ms))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ExchangeError::from_transport(e, self.timeout_ms))?;
        let latency_ms = start.elapsed().as_millis() as u64;

        tracing::debug!(
            exchange = "bybit",
            method,
            path,
            status = status.as_u16(),
            latency_ms,
            "Response"
        );
        log_body(
            body_log_level(self.config.log_requests),
            method,
            path,
            "Response body",
            &text,
        );

        if !status.is_success() {
            tracing::warn!(exchange = "bybit", path, status = status.as_u16(), "HTTP error");
            return Err(ExchangeError::Http {
                status: status.as_u16(),
                body: truncate(&text),
            });
        }

        let envelope: BybitEnvelope = serde_json::from_str(&text).map_err(|e| {
            ExchangeError::InvalidResponse(format!("{} (body: {})", e, truncate(&text)))
        })?;
        if envelope.ret_code != 0 {
            tracing::warn!(
                exchange = "bybit",
                path,
                ret_code = envelope.ret_code,
                ret_msg = %envelope.ret_msg,
                "Request rejected"
            );
        }
        envelope.into_result()
    }
}

/// Bodies are logged at info when `log_requests` is set, debug otherwise
fn body_log_level(log_requests: bool) -> Level {
    if log_requests {
        Level::INFO
    } else {
        Level::DEBUG
    }
}

fn log_body(level: Level, method: &str, path: &str, message: &str, body: &str) {
    if level == Level::INFO {
        tracing::info!(exchange = "bybit", method, path, body, "{}", message);
    } else {
        tracing::debug!(exchange = "bybit", method, path, body, "{}", message);
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_ERROR_BODY_CHARS {
        text.to_string()
    } else {
        let cut: String = text.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{}...", cut)
    }
}

#[async_trait]
impl ExchangeAdapter for BybitAdapter {
    async fn fetch_orderbook(
        &self,
        category: Category,
        symbol: &str,
        limit: Option<u32>,
    ) -> ExchangeResult<OrderbookSnapshot> {
        let mut params = vec![
            ("category", category.as_str().to_string()),
            ("symbol", symbol.to_string()),
        ];
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }

        let result: BybitOrderbookResult = self.get_public(PATH_ORDERBOOK, &params).await?;
        let snapshot = result.into_snapshot(category)?;

        tracing::debug!(
            exchange = "bybit",
            symbol = %snapshot.symbol,
            bids_count = snapshot.orderbook.bids.len(),
            asks_count = snapshot.orderbook.asks.len(),
            best_bid = ?snapshot.orderbook.best_bid(),
            best_ask = ?snapshot.orderbook.best_ask(),
            "Orderbook snapshot"
        );
        Ok(snapshot)
    }

    async fn place_order(&self, order: OrderRequest) -> ExchangeResult<OrderAck> {
        order.validate()?;

        let order_link_id = if order.client_order_id.is_empty() {
            Self::new_order_link_id()
        } else {
            order.client_order_id.clone()
        };
        let body = BybitCreateOrderBody::from_request(&order, order_link_id);

        tracing::info!(
            exchange = "bybit",
            category = %order.category,
            symbol = %order.symbol,
            side = %order.side,
            order_type = body.order_type,
            qty = %body.qty,
            order_link_id = %body.order_link_id,
            "Placing order"
        );

        let result: BybitOrderAckResult = self.post_signed(PATH_CREATE_ORDER, &body).await?;
        let ack = OrderAck::from(result);
        tracing::info!(
            exchange = "bybit",
            order_id = %ack.order_id,
            order_link_id = %ack.client_order_id,
            "Order accepted"
        );
        Ok(ack)
    }

    async fn cancel_order(
        &self,
        category: Category,
        symbol: &str,
        order_id: &str,
    ) -> ExchangeResult<OrderAck> {
        let body = BybitCancelOrderBody {
            category: category.as_str(),
            symbol,
            order_id,
        };
        let result: BybitOrderAckResult = self.post_signed(PATH_CANCEL_ORDER, &body).await?;
        tracing::info!(exchange = "bybit", order_id = %result.order_id, "Order cancelled");
        Ok(result.into())
    }

    async fn get_open_orders(
        &self,
        category: Category,
        symbol: &str,
    ) -> ExchangeResult<Vec<OpenOrder>> {
        let params = [
            ("category", category.as_str().to_string()),
            ("symbol", symbol.to_string()),
        ];
        let result: BybitList<BybitOrder> = self.get_signed(PATH_OPEN_ORDERS, &params).await?;
        result
            .list
            .into_iter()
            .map(BybitOrder::into_open_order)
            .collect()
    }

    async fn get_position(
        &self,
        category: Category,
        symbol: &str,
    ) -> ExchangeResult<Option<PositionInfo>> {
        let params = [
            ("category", category.as_str().to_string()),
            ("symbol", symbol.to_string()),
        ];
        let result: BybitList<BybitPosition> = self.get_signed(PATH_POSITIONS, &params).await?;
        // Hedge mode returns one entry per leg, any of them may be flat
        for entry in result.list.into_iter().filter(|p| p.symbol == symbol) {
            if let Some(position) = entry.into_position()? {
                return Ok(Some(position));
            }
        }
        Ok(None)
    }

    async fn get_wallet_balance(&self) -> ExchangeResult<WalletBalance> {
        let params = [("accountType", "UNIFIED".to_string())];
        let result: BybitList<BybitWalletAccount> =
            self.get_signed(PATH_WALLET_BALANCE, &params).await?;
        result
            .list
            .into_iter()
            .next()
            .ok_or_else(|| ExchangeError::InvalidResponse("Empty wallet balance list".into()))?
            .into_wallet_balance()
    }

    fn exchange_name(&self) -> &'static str {
        "bybit"
    }
}
