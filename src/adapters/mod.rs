//! Exchange adapters
//!
//! This module provides the adapter abstraction and the Bybit V5 REST
//! implementation used by the smoke flow.

pub mod bybit;
pub mod errors;
#[cfg(test)]
pub mod test_utils;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use bybit::{BybitAdapter, BybitConfig};
pub use errors::{ExchangeError, ExchangeResult};
pub use traits::ExchangeAdapter;
pub use types::{
    Category, OpenOrder, OrderAck, OrderRequest, OrderSide, OrderType, Orderbook, OrderbookLevel,
    OrderbookSnapshot, PositionInfo, TimeInForce, WalletBalance,
};
