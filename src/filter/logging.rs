//! Request/response logging filter.

use crate::model::{GatewayRequest, GatewayResponse};

/// Logs the request on the way in and the response on the way out.
/// Stateless; never vetoes.
#[derive(Debug, Clone, Default)]
pub struct LoggingFilter;

impl LoggingFilter {
    pub fn new() -> Self {
        Self
    }

    pub fn pre(&self, request: &mut GatewayRequest) -> bool {
        tracing::info!(
            method = %request.method(),
            path = %request.path(),
            client_id = %request.client_id(),
            headers = ?request.headers(),
            timestamp_ms = request.timestamp_ms(),
            "Request received"
        );
        true
    }

    pub fn post(&self, _request: &GatewayRequest, response: &mut GatewayResponse) {
        tracing::info!(
            status = response.status_code(),
            processing_time_ms = response.processing_time_ms(),
            headers = ?response.headers(),
            "Response sent"
        );
    }
}
