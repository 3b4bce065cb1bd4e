//! Ordered filter execution.
//!
//! # Design Decisions
//! - Pre-phase walks filters in declared order and stops at the first veto
//! - Post-phase walks the full list in reverse, unconditionally, even when
//!   the pre-phase short-circuited: response-side effects (security headers,
//!   rate-limit headers, timing) are attached to error responses too

use crate::filter::Filter;
use crate::model::{GatewayRequest, GatewayResponse};

/// Runs a route's filters around the upstream call.
#[derive(Debug, Clone)]
pub struct FilterChain {
    filters: Vec<Filter>,
}

impl FilterChain {
    pub fn new(filters: Vec<Filter>) -> Self {
        Self { filters }
    }

    /// Run every filter's request-side hook in declared order.
    /// Returns false as soon as any filter vetoes.
    pub fn execute_pre(&self, request: &mut GatewayRequest) -> bool {
        tracing::debug!(path = %request.path(), filters = self.filters.len(), "Executing pre-filters");

        for filter in &self.filters {
            if !filter.pre(request) {
                tracing::warn!(filter = filter.name(), "Filter stopped the chain");
                return false;
            }
        }

        true
    }

    /// Run every filter's response-side hook in reverse order.
    pub fn execute_post(&self, request: &GatewayRequest, response: &mut GatewayResponse) {
        tracing::debug!(path = %request.path(), "Executing post-filters");

        for filter in self.filters.iter().rev() {
            filter.post(request, response);
        }
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
