//! Header transformation filter.
//!
//! Marks requests with gateway headers on the way in and stamps the
//! response with route and timing information on the way out. The
//! `X-Gateway-*` request headers are internal markers; forwarding strips
//! them before the upstream call.

use crate::model::{now_millis, GatewayRequest, GatewayResponse};

#[derive(Debug, Clone, Default)]
pub struct TransformationFilter;

impl TransformationFilter {
    pub fn new() -> Self {
        Self
    }

    pub fn pre(&self, request: &mut GatewayRequest) -> bool {
        request.add_header("X-Gateway-Version", "1.0");
        request.add_header("X-Gateway-Timestamp", now_millis().to_string());

        if let Some(body) = request.body() {
            if !body.is_empty() {
                tracing::debug!(body_bytes = body.len(), "Request body before transformation");
            }
        }

        true
    }

    pub fn post(&self, request: &GatewayRequest, response: &mut GatewayResponse) {
        response.add_header("X-Gateway-Processed", "true");
        response.add_header("X-Gateway-Route", request.path());

        let processing_time = now_millis().saturating_sub(request.timestamp_ms());
        response.set_processing_time_ms(processing_time);

        tracing::debug!(processing_time_ms = processing_time, "Response transformation complete");
    }
}
