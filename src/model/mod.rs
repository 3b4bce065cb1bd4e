//! Gateway request/response value records.
//!
//! # Data Flow
//! ```text
//! Inbound HTTP request
//!     → request.rs (GatewayRequest: method, path, headers, client id)
//!     → filter chain mutates request during pre-phase
//!     → forwarding populates GatewayResponse
//!     → filter chain mutates response during post-phase
//!     → Sent back to client
//! ```
//!
//! # Design Decisions
//! - Header lookup is case-insensitive even though storage preserves case
//! - Request timestamp captured exactly once, at construction
//! - Bodies are whole strings (no streaming in this core)

pub mod request;
pub mod response;

pub use request::GatewayRequest;
pub use response::GatewayResponse;

use std::time::{SystemTime, UNIX_EPOCH};

/// Current wall-clock time in milliseconds since the Unix epoch.
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
