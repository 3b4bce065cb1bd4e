//! Bearer-token authentication filter.
//!
//! # Responsibilities
//! - Reject requests without a valid `Authorization: Bearer <token>` header
//! - Allow runtime addition of accepted tokens
//! - Stamp security headers on every response
//!
//! # Design Decisions
//! - Token set is a concurrent set shared across clones of the filter, so
//!   tokens added at runtime are visible to in-flight routes
//! - Header name and the `Bearer` scheme match case-insensitively

use std::sync::Arc;

use dashmap::DashSet;

use crate::model::{GatewayRequest, GatewayResponse};

/// Validates bearer tokens against a shared set of accepted values.
#[derive(Debug, Clone)]
pub struct AuthenticationFilter {
    valid_tokens: Arc<DashSet<String>>,
}

impl AuthenticationFilter {
    /// Create a filter seeded with the demo tokens.
    pub fn new() -> Self {
        let valid_tokens = DashSet::new();
        valid_tokens.insert("token-123".to_string());
        valid_tokens.insert("token-456".to_string());
        valid_tokens.insert("token-789".to_string());
        Self {
            valid_tokens: Arc::new(valid_tokens),
        }
    }

    /// Accept an additional token at runtime.
    pub fn add_valid_token(&self, token: impl Into<String>) {
        self.valid_tokens.insert(token.into());
    }

    pub fn pre(&self, request: &mut GatewayRequest) -> bool {
        let auth_header = match request.header("Authorization") {
            Some(value) if !value.is_empty() => value,
            _ => {
                tracing::warn!(path = %request.path(), "Missing Authorization header");
                return false;
            }
        };

        let token = auth_header
            .strip_prefix("Bearer ")
            .or_else(|| auth_header.strip_prefix("bearer "))
            .unwrap_or(auth_header);

        if !self.valid_tokens.contains(token) {
            tracing::warn!(path = %request.path(), "Invalid bearer token");
            return false;
        }

        tracing::debug!(path = %request.path(), "Authentication successful");
        true
    }

    pub fn post(&self, _request: &GatewayRequest, response: &mut GatewayResponse) {
        response.add_header("X-Content-Type-Options", "nosniff");
        response.add_header("X-Frame-Options", "DENY");
    }
}

impl Default for AuthenticationFilter {
    fn default() -> Self {
        Self::new()
    }
}
