//! Shared test utilities for adapter testing
//!
//! Provides a configurable `TestMockAdapter` used by the trait tests and the
//! smoke flow tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::traits::ExchangeAdapter;
use crate::adapters::types::{
    Category, OpenOrder, OrderAck, OrderRequest, Orderbook, OrderbookLevel, OrderbookSnapshot,
    PositionInfo, WalletBalance,
};

/// Mock adapter with a fixed two-level orderbook
pub struct TestMockAdapter {
    /// When true, `place_order` returns a rejection
    pub should_fail: bool,
    /// Counter for how many orders were placed (thread-safe for async tests)
    pub order_count: Arc<AtomicU64>,
    /// Exchange name returned by `exchange_name()`
    pub name: &'static str,
    /// Orderbook returned by `fetch_orderbook`
    pub orderbook: Orderbook,
}

impl TestMockAdapter {
    /// Create a new mock adapter with the given exchange name
    pub fn new(name: &'static str) -> Self {
        Self {
            should_fail: false,
            order_count: Arc::new(AtomicU64::new(0)),
            name,
            orderbook: Orderbook {
                bids: vec![
                    OrderbookLevel::new(3100.0, 5.0),
                    OrderbookLevel::new(3099.9, 2.5),
                ],
                asks: vec![
                    OrderbookLevel::new(3100.1, 4.0),
                    OrderbookLevel::new(3100.2, 1.0),
                ],
                timestamp: 1_700_000_000_000,
            },
        }
    }

    /// Create a mock that always fails on `place_order`
    pub fn with_failure(name: &'static str) -> Self {
        let mut mock = Self::new(name);
        mock.should_fail = true;
        mock
    }

    pub fn orders_placed(&self) -> u64 {
        self.order_count.load(Ordering::Relaxed)
    }
}

impl Default for TestMockAdapter {
    fn default() -> Self {
        Self::new("mock")
    }
}

#[async_trait]
impl ExchangeAdapter for TestMockAdapter {
    async fn fetch_orderbook(
        &self,
        category: Category,
        symbol: &str,
        limit: Option<u32>,
    ) -> ExchangeResult<OrderbookSnapshot> {
        let mut orderbook = self.orderbook.clone();
        if let Some(limit) = limit {
            orderbook.bids.truncate(limit as usize);
            orderbook.asks.truncate(limit as usize);
        }
        Ok(OrderbookSnapshot {
            symbol: symbol.to_string(),
            category,
            orderbook,
            update_id: 1,
            seq: 1,
        })
    }

    async fn place_order(&self, order: OrderRequest) -> ExchangeResult<OrderAck> {
        self.order_count.fetch_add(1, Ordering::Relaxed);

        if self.should_fail {
            return Err(ExchangeError::Rejected {
                code: 110007,
                message: "Mock failure".to_string(),
            });
        }

        Ok(OrderAck {
            order_id: format!("{}-{}", self.name, self.orders_placed()),
            client_order_id: order.client_order_id,
        })
    }

    async fn cancel_order(
        &self,
        _category: Category,
        _symbol: &str,
        order_id: &str,
    ) -> ExchangeResult<OrderAck> {
        Ok(OrderAck {
            order_id: order_id.to_string(),
            client_order_id: String::new(),
        })
    }

    async fn get_open_orders(
        &self,
        _category: Category,
        _symbol: &str,
    ) -> ExchangeResult<Vec<OpenOrder>> {
        Ok(Vec::new())
    }

    async fn get_position(
        &self,
        _category: Category,
        _symbol: &str,
    ) -> ExchangeResult<Option<PositionInfo>> {
        Ok(None)
    }

    async fn get_wallet_balance(&self) -> ExchangeResult<WalletBalance> {
        Ok(WalletBalance {
            account_type: "UNIFIED".to_string(),
            total_equity: 0.0,
            total_available_balance: 0.0,
            coins: Vec::new(),
        })
    }

    fn exchange_name(&self) -> &'static str {
        self.name
    }
}
