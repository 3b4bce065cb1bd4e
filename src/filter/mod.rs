//! Request/response processing stages.
//!
//! # Data Flow
//! ```text
//! GatewayRequest
//!     → chain.rs pre-phase (declared order, first `false` aborts)
//!     → [forwarding]
//!     → chain.rs post-phase (reverse order, always runs every filter)
//!     → GatewayResponse
//! ```
//!
//! # Design Decisions
//! - Closed set of filter kinds; dispatch via enum, not trait objects
//! - Filters are cheap to clone: stateful ones share their state through Arc,
//!   so a cloned route still observes runtime token additions and rate counts
//! - Post hooks never abort; response-side effects are best-effort additive

pub mod auth;
pub mod chain;
pub mod logging;
pub mod rate_limit;
pub mod transform;

pub use auth::AuthenticationFilter;
pub use chain::FilterChain;
pub use logging::LoggingFilter;
pub use rate_limit::RateLimitFilter;
pub use transform::TransformationFilter;

use crate::model::{GatewayRequest, GatewayResponse};

/// A processing stage in a route's chain.
///
/// `pre` runs before forwarding and may veto the request; `post` runs after
/// forwarding (or after a veto) and only decorates the response.
#[derive(Debug, Clone)]
pub enum Filter {
    Logging(LoggingFilter),
    Authentication(AuthenticationFilter),
    RateLimit(RateLimitFilter),
    Transformation(TransformationFilter),
}

impl Filter {
    /// Run the request-side hook. Returns false to abort the chain.
    pub fn pre(&self, request: &mut GatewayRequest) -> bool {
        match self {
            Filter::Logging(f) => f.pre(request),
            Filter::Authentication(f) => f.pre(request),
            Filter::RateLimit(f) => f.pre(request),
            Filter::Transformation(f) => f.pre(request),
        }
    }

    /// Run the response-side hook. Never aborts.
    pub fn post(&self, request: &GatewayRequest, response: &mut GatewayResponse) {
        match self {
            Filter::Logging(f) => f.post(request, response),
            Filter::Authentication(f) => f.post(request, response),
            Filter::RateLimit(f) => f.post(request, response),
            Filter::Transformation(f) => f.post(request, response),
        }
    }

    /// Stable name for logging and debugging.
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Logging(_) => "logging",
            Filter::Authentication(_) => "authentication",
            Filter::RateLimit(_) => "rate-limit",
            Filter::Transformation(_) => "transformation",
        }
    }
}

impl From<LoggingFilter> for Filter {
    fn from(f: LoggingFilter) -> Self {
        Filter::Logging(f)
    }
}

impl From<AuthenticationFilter> for Filter {
    fn from(f: AuthenticationFilter) -> Self {
        Filter::Authentication(f)
    }
}

impl From<RateLimitFilter> for Filter {
    fn from(f: RateLimitFilter) -> Self {
        Filter::RateLimit(f)
    }
}

impl From<TransformationFilter> for Filter {
    fn from(f: TransformationFilter) -> Self {
        Filter::Transformation(f)
    }
}
