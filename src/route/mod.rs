//! Route definitions.
//!
//! # Data Flow
//! ```text
//! RouteBuilder (startup)
//!     → build() validates prefix + target URL
//!     → immutable Route
//!     → registry.rs (insertion order = matching priority)
//!     → first prefix match wins at request time
//! ```
//!
//! # Design Decisions
//! - Routes are immutable after build; registration order is the only
//!   precedence mechanism (order more specific prefixes first)
//! - Prefix matching is a plain `starts_with`: no regex, no captures,
//!   deterministic and O(prefix length)
//! - Per-route `timeout_ms` and `rate_limit` are descriptive metadata; the
//!   pool's client timeouts and a composed RateLimitFilter do the enforcing

pub mod registry;

pub use registry::RouteRegistry;

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use url::Url;

use crate::filter::Filter;

/// Route construction failures, surfaced to the operator at startup.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route path prefix must not be empty")]
    EmptyPathPrefix,

    #[error("route {path_prefix} has no target URL")]
    MissingTargetUrl { path_prefix: String },

    #[error("route {path_prefix} has invalid target URL {url}: {source}")]
    InvalidTargetUrl {
        path_prefix: String,
        url: String,
        source: url::ParseError,
    },
}

/// An immutable binding of a path prefix to an upstream target and its
/// processing chain.
#[derive(Debug, Clone)]
pub struct Route {
    path_prefix: String,
    target_url: String,
    filters: Vec<Filter>,
    headers: HashMap<String, String>,
    timeout_ms: u64,
    rate_limit: u32,
    transform_request: bool,
    transform_response: bool,
}

impl Route {
    /// Start building a route for the given path prefix.
    pub fn builder(path_prefix: impl Into<String>) -> RouteBuilder {
        RouteBuilder::new(path_prefix)
    }

    /// True iff `path` falls under this route's prefix.
    ///
    /// Loose prefix semantics: `/api/users` also matches
    /// `/api/users_admin`. Register more specific prefixes first.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.path_prefix)
    }

    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    /// The route's filters, in execution order. Returns an owned copy;
    /// mutating it does not affect the route.
    pub fn filters(&self) -> Vec<Filter> {
        self.filters.clone()
    }

    /// Per-route headers. Returns an owned copy.
    pub fn headers(&self) -> HashMap<String, String> {
        self.headers.clone()
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn rate_limit(&self) -> u32 {
        self.rate_limit
    }

    pub fn transform_request(&self) -> bool {
        self.transform_request
    }

    pub fn transform_response(&self) -> bool {
        self.transform_response
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({} filters)",
            self.path_prefix,
            self.target_url,
            self.filters.len()
        )
    }
}

/// Chainable configuration for a [`Route`].
///
/// Only `target_url` is required; everything else has defaults.
#[derive(Debug, Clone)]
pub struct RouteBuilder {
    path_prefix: String,
    target_url: String,
    filters: Vec<Filter>,
    headers: HashMap<String, String>,
    timeout_ms: u64,
    rate_limit: u32,
    transform_request: bool,
    transform_response: bool,
}

impl RouteBuilder {
    fn new(path_prefix: impl Into<String>) -> Self {
        Self {
            path_prefix: path_prefix.into(),
            target_url: String::new(),
            filters: Vec::new(),
            headers: HashMap::new(),
            timeout_ms: 5_000,
            rate_limit: 100,
            transform_request: false,
            transform_response: false,
        }
    }

    /// Set the upstream URL requests are forwarded to.
    pub fn target_url(mut self, target_url: impl Into<String>) -> Self {
        self.target_url = target_url.into();
        self
    }

    /// Append a filter; filters run in the order they were added.
    pub fn filter(mut self, filter: impl Into<Filter>) -> Self {
        self.filters.push(filter.into());
        self
    }

    /// Replace the filter list wholesale.
    pub fn filters(mut self, filters: Vec<Filter>) -> Self {
        self.filters = filters;
        self
    }

    /// Add a per-route header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Replace the header map wholesale.
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn rate_limit(mut self, rate_limit: u32) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    pub fn transform_request(mut self, enabled: bool) -> Self {
        self.transform_request = enabled;
        self
    }

    pub fn transform_response(mut self, enabled: bool) -> Self {
        self.transform_response = enabled;
        self
    }

    /// Validate and produce the immutable route.
    pub fn build(self) -> Result<Route, RouteError> {
        if self.path_prefix.is_empty() {
            return Err(RouteError::EmptyPathPrefix);
        }

        if self.target_url.is_empty() {
            return Err(RouteError::MissingTargetUrl {
                path_prefix: self.path_prefix,
            });
        }

        if let Err(source) = Url::parse(&self.target_url) {
            return Err(RouteError::InvalidTargetUrl {
                path_prefix: self.path_prefix,
                url: self.target_url,
                source,
            });
        }

        Ok(Route {
            path_prefix: self.path_prefix,
            target_url: self.target_url,
            filters: self.filters,
            headers: self.headers,
            timeout_ms: self.timeout_ms,
            rate_limit: self.rate_limit,
            transform_request: self.transform_request,
            transform_response: self.transform_response,
        })
    }
}
