//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files;
//! every section has defaults so a minimal config works.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::filter::{
    AuthenticationFilter, Filter, LoggingFilter, RateLimitFilter, TransformationFilter,
};
use crate::route::{Route, RouteError};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, request timeout).
    pub listener: ListenerConfig,

    /// Upstream client pool sizing.
    pub pool: PoolConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Routes seeded at startup.
    pub routes: Vec<RouteConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Total time budget per inbound request in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 60,
        }
    }
}

/// Upstream HTTP client pool configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Number of clients allocated at startup.
    pub max_clients: usize,

    /// Maximum wait for a free client in seconds.
    pub acquire_timeout_secs: u64,

    /// Per-request upstream timeout baked into each client, in seconds.
    pub upstream_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_clients: 10,
            acquire_timeout_secs: 5,
            upstream_timeout_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// A filter reference inside a route definition.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FilterConfig {
    Logging,
    Authentication,
    RateLimit { max_per_minute: u32 },
    Transformation,
}

impl FilterConfig {
    fn build(&self) -> Filter {
        match self {
            FilterConfig::Logging => LoggingFilter::new().into(),
            FilterConfig::Authentication => AuthenticationFilter::new().into(),
            FilterConfig::RateLimit { max_per_minute } => {
                RateLimitFilter::new(*max_per_minute).into()
            }
            FilterConfig::Transformation => TransformationFilter::new().into(),
        }
    }
}

/// Route definition seeded at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Inbound path prefix to match.
    pub path_prefix: String,

    /// Upstream URL requests are forwarded to.
    pub target_url: String,

    /// Filters in execution order.
    #[serde(default)]
    pub filters: Vec<FilterConfig>,

    /// Per-route headers.
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Advisory per-route timeout in milliseconds.
    #[serde(default = "default_route_timeout_ms")]
    pub timeout_ms: u64,

    /// Advisory requests-per-minute budget.
    #[serde(default = "default_route_rate_limit")]
    pub rate_limit: u32,

    #[serde(default)]
    pub transform_request: bool,

    #[serde(default)]
    pub transform_response: bool,
}

fn default_route_timeout_ms() -> u64 {
    5_000
}

fn default_route_rate_limit() -> u32 {
    100
}

impl RouteConfig {
    /// Build the runtime route through the validating builder.
    pub fn build_route(&self) -> Result<Route, RouteError> {
        Route::builder(&self.path_prefix)
            .target_url(&self.target_url)
            .filters(self.filters.iter().map(FilterConfig::build).collect())
            .headers(self.headers.clone())
            .timeout_ms(self.timeout_ms)
            .rate_limit(self.rate_limit)
            .transform_request(self.transform_request)
            .transform_response(self.transform_response)
            .build()
    }
}
