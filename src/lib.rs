//! HTTP API Gateway Library
//!
//! A reverse proxy that matches inbound requests against path-prefix
//! routes, runs each request through the route's filter chain, and
//! forwards survivors to the configured upstream over a bounded pool of
//! reusable HTTP clients.

pub mod config;
pub mod filter;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod observability;
pub mod pool;
pub mod route;
pub mod service;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use service::GatewayService;
