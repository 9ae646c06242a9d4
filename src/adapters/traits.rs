//! Exchange adapter trait definition
//!
//! The ExchangeAdapter trait defines the REST surface the smoke flow and the
//! binaries are written against.

use async_trait::async_trait;

use crate::adapters::errors::ExchangeResult;
use crate::adapters::types::{
    Category, OpenOrder, OrderAck, OrderRequest, OrderbookSnapshot, PositionInfo, WalletBalance,
};

/// Common trait for exchange adapters
///
/// Every call is a single request/response round trip. Implementations do
/// not retry and do not cache.
#[async_trait]
pub trait ExchangeAdapter: Send + Sync {
    /// Fetch an orderbook snapshot
    ///
    /// # Arguments
    /// * `category` - Product category (e.g. `Category::Linear`)
    /// * `symbol` - Exchange symbol (e.g. "ETHUSDT")
    /// * `limit` - Depth per side, `None` for the exchange default
    async fn fetch_orderbook(
        &self,
        category: Category,
        symbol: &str,
        limit: Option<u32>,
    ) -> ExchangeResult<OrderbookSnapshot>;

    /// Place an order on the exchange
    ///
    /// # Returns
    /// Acknowledgment with exchange-assigned order id and client order id
    async fn place_order(&self, order: OrderRequest) -> ExchangeResult<OrderAck>;

    /// Cancel an existing order by exchange order id
    async fn cancel_order(
        &self,
        category: Category,
        symbol: &str,
        order_id: &str,
    ) -> ExchangeResult<OrderAck>;

    /// List live orders for a symbol
    async fn get_open_orders(&self, category: Category, symbol: &str)
        -> ExchangeResult<Vec<OpenOrder>>;

    /// Get current position for a symbol
    ///
    /// * `Ok(Some(PositionInfo))` - Position exists
    /// * `Ok(None)` - No position (or zero size) for this symbol
    async fn get_position(
        &self,
        category: Category,
        symbol: &str,
    ) -> ExchangeResult<Option<PositionInfo>>;

    /// Get unified account wallet balance
    async fn get_wallet_balance(&self) -> ExchangeResult<WalletBalance>;

    /// Get the exchange name identifier
    fn exchange_name(&self) -> &'static str;
}
