//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → GatewayConfig (immutable once loaded)
//!     → route seeding builds Routes via the validating builder
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no reload
//! - All fields have defaults so a minimal (or empty) config works
//! - Semantic route validation is the RouteBuilder's job; a bad route
//!   aborts startup with the builder's error

pub mod loader;
pub mod schema;

pub use loader::{load_config, ConfigError};
pub use schema::{
    FilterConfig, GatewayConfig, ListenerConfig, ObservabilityConfig, PoolConfig, RouteConfig,
};
