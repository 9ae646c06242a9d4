//! Core module - Smoke run and structured events
//!
//! ## Usage
//! Prefer importing from `crate::core`:
//! ```ignore
//! use crate::core::{run_smoke, SmokeReport};
//! ```

pub mod events;
pub mod smoke;

// Explicit re-exports for events module
pub use events::{
    calculate_latency_ms, current_timestamp_ms, log_event, SmokeEvent, SmokeEventType,
};

// Explicit re-exports for smoke module
pub use smoke::{print_json, run_smoke, run_smoke_to, SmokeReport};
