//! Bybit V5 smoke client
//!
//! Minimal implementation focusing on:
//! - Signed REST access to Bybit (orderbook, orders, positions, wallet)
//! - A config-driven smoke run: one orderbook snapshot, one order

pub mod adapters;
pub mod bin_utils;
pub mod config;
pub mod core;
pub mod error;

pub use error::AppError;
