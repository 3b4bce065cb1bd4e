//! Sliding-window rate limiting filter.
//!
//! # Responsibilities
//! - Cap each client at `max_per_minute` requests over a sliding 60 s window
//! - Expose remaining budget via `X-RateLimit-*` response headers
//!
//! # Design Decisions
//! - Window state is a concurrent map of client id → timestamp queue; the
//!   entry guard keeps trim-check-push atomic per client, so two concurrent
//!   requests can never both slip past the limit
//! - Memory is bounded by active clients × limit (old entries are trimmed
//!   on every check)

use std::collections::VecDeque;
use std::sync::Arc;

use dashmap::DashMap;

use crate::model::{now_millis, GatewayRequest, GatewayResponse};

const WINDOW_MS: u64 = 60_000;

/// Per-client sliding-window request counter.
#[derive(Debug, Clone)]
pub struct RateLimitFilter {
    max_per_minute: u32,
    windows: Arc<DashMap<String, VecDeque<u64>>>,
}

impl RateLimitFilter {
    pub fn new(max_per_minute: u32) -> Self {
        Self {
            max_per_minute,
            windows: Arc::new(DashMap::new()),
        }
    }

    pub fn max_per_minute(&self) -> u32 {
        self.max_per_minute
    }

    /// Requests from clients without an id share one bucket.
    fn window_key(request: &GatewayRequest) -> &str {
        let client_id = request.client_id();
        if client_id.is_empty() {
            "default"
        } else {
            client_id
        }
    }

    /// Trim entries older than the window, then admit and record the
    /// request iff the client is under its limit. Rejections are not
    /// recorded.
    fn admit(&self, client_id: &str, now: u64) -> bool {
        let cutoff = now.saturating_sub(WINDOW_MS);

        // The entry guard holds the shard lock for the whole
        // trim-check-push sequence.
        let mut window = self.windows.entry(client_id.to_string()).or_default();

        while window.front().is_some_and(|&t| t < cutoff) {
            window.pop_front();
        }

        if window.len() >= self.max_per_minute as usize {
            return false;
        }

        window.push_back(now);
        true
    }

    pub fn pre(&self, request: &mut GatewayRequest) -> bool {
        let client_id = Self::window_key(request);

        if self.admit(client_id, now_millis()) {
            tracing::debug!(
                client_id = %client_id,
                current = self.current_count(client_id),
                limit = self.max_per_minute,
                "Rate limit check passed"
            );
            true
        } else {
            tracing::warn!(
                client_id = %client_id,
                limit = self.max_per_minute,
                "Rate limit exceeded"
            );
            false
        }
    }

    pub fn post(&self, request: &GatewayRequest, response: &mut GatewayResponse) {
        let client_id = Self::window_key(request);
        if let Some(window) = self.windows.get(client_id) {
            let remaining = self.max_per_minute.saturating_sub(window.len() as u32);
            response.add_header("X-RateLimit-Limit", self.max_per_minute.to_string());
            response.add_header("X-RateLimit-Remaining", remaining.to_string());
        }
    }

    /// Number of requests recorded for a client in the current window.
    pub fn current_count(&self, client_id: &str) -> usize {
        self.windows.get(client_id).map_or(0, |w| w.len())
    }

    /// Forget a client's recorded requests.
    pub fn reset(&self, client_id: &str) {
        self.windows.remove(client_id);
    }
}
