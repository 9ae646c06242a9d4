//! Configuration types for the smoke plan
//!
//! This module defines the structs loaded from `config.yaml`. Every field
//! has a default, and the defaults reproduce the canonical smoke run: an
//! ETHUSDT linear orderbook snapshot followed by a 0.01 market buy.

use serde::{Deserialize, Serialize};

use crate::adapters::types::{Category, OrderRequest, OrderSide, OrderType, TimeInForce};
use crate::error::AppError;

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_SYMBOL: &str = "ETHUSDT";
pub const DEFAULT_QTY: f64 = 0.01;

// ============================================================================
// Configuration Structs
// ============================================================================

/// Orderbook snapshot query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrderbookQuery {
    pub category: Category,
    pub symbol: String,
    /// Depth per side, None uses the exchange default
    pub limit: Option<u32>,
}

impl Default for OrderbookQuery {
    fn default() -> Self {
        Self {
            category: Category::Linear,
            symbol: DEFAULT_SYMBOL.to_string(),
            limit: None,
        }
    }
}

impl OrderbookQuery {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.symbol.trim().is_empty() {
            return Err(AppError::Config("orderbook.symbol cannot be empty".to_string()));
        }
        if let Some(limit) = self.limit {
            let (min, max) = self.category.orderbook_limit_range();
            if limit < min || limit > max {
                return Err(AppError::Config(format!(
                    "orderbook.limit must be {}-{} for {} (got {})",
                    min, max, self.category, limit
                )));
            }
        }
        Ok(())
    }
}

/// Order placed by the smoke run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrderPlan {
    pub category: Category,
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub qty: f64,
    pub price: Option<f64>,
    pub time_in_force: Option<TimeInForce>,
    pub reduce_only: bool,
    /// Fixed `orderLinkId`; generated per run when absent
    pub client_order_id: Option<String>,
}

impl Default for OrderPlan {
    fn default() -> Self {
        Self {
            category: Category::Linear,
            symbol: DEFAULT_SYMBOL.to_string(),
            side: OrderSide::Buy,
            order_type: OrderType::Market,
            qty: DEFAULT_QTY,
            price: None,
            time_in_force: None,
            reduce_only: false,
            client_order_id: None,
        }
    }
}

impl OrderPlan {
    /// Build the order request this plan describes
    pub fn to_request(&self) -> OrderRequest {
        OrderRequest {
            client_order_id: self.client_order_id.clone().unwrap_or_default(),
            category: self.category,
            symbol: self.symbol.clone(),
            side: self.side,
            order_type: self.order_type,
            price: self.price,
            quantity: self.qty,
            time_in_force: self.time_in_force,
            reduce_only: self.reduce_only,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        self.to_request()
            .validate()
            .map_err(|e| AppError::Config(format!("order: {}", e)))
    }
}

/// Root of `config.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SmokeConfig {
    pub orderbook: OrderbookQuery,
    pub order: OrderPlan,
    /// Log request/response bodies at info level
    pub log_requests: bool,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            orderbook: OrderbookQuery::default(),
            order: OrderPlan::default(),
            log_requests: true,
        }
    }
}

impl SmokeConfig {
    /// Validate all configuration rules
    pub fn validate(&self) -> Result<(), AppError> {
        self.orderbook.validate()?;
        self.order.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_canonical_run() {
        let config = SmokeConfig::default();
        assert_eq!(config.orderbook.category, Category::Linear);
        assert_eq!(config.orderbook.symbol, "ETHUSDT");
        assert_eq!(config.orderbook.limit, None);
        assert_eq!(config.order.side, OrderSide::Buy);
        assert_eq!(config.order.order_type, OrderType::Market);
        assert_eq!(config.order.qty, 0.01);
        assert!(config.log_requests);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_to_request() {
        let plan = OrderPlan {
            client_order_id: Some("fixed-id".into()),
            reduce_only: true,
            ..Default::default()
        };
        let req = plan.to_request();
        assert_eq!(req.client_order_id, "fixed-id");
        assert_eq!(req.symbol, "ETHUSDT");
        assert_eq!(req.quantity, 0.01);
        assert!(req.reduce_only);

        let req = OrderPlan::default().to_request();
        assert!(req.client_order_id.is_empty());
    }

    #[test]
    fn test_limit_out_of_range() {
        let query = OrderbookQuery {
            category: Category::Option,
            limit: Some(50),
            ..Default::default()
        };
        let err = query.validate().unwrap_err();
        assert!(err.to_string().contains("1-25"), "Got: {}", err);

        let query = OrderbookQuery {
            category: Category::Linear,
            limit: Some(500),
            ..Default::default()
        };
        assert!(query.validate().is_ok());

        let query = OrderbookQuery {
            limit: Some(0),
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_invalid_qty_rejected() {
        let config = SmokeConfig {
            order: OrderPlan {
                qty: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("quantity"), "Got: {}", err);
    }

    #[test]
    fn test_limit_order_without_price_rejected() {
        let plan = OrderPlan {
            order_type: OrderType::Limit,
            price: None,
            ..Default::default()
        };
        assert!(plan.validate().is_err());
    }
}
