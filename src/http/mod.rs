//! Inbound HTTP adapter.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, timeout + trace layers)
//!     → gateway handler decodes into GatewayRequest
//!     → GatewayService::process_request
//!     → GatewayResponse mapped back to an HTTP response
//! ```

pub mod server;

pub use server::{AppState, HttpServer};
