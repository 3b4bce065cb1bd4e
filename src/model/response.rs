//! Outbound response representation.

use std::collections::HashMap;

/// The response handed back to the inbound adapter.
///
/// Populated by forwarding (status, body) and by post-phase filters
/// (headers, processing time).
#[derive(Debug, Clone)]
pub struct GatewayResponse {
    status_code: u16,
    headers: HashMap<String, String>,
    body: String,
    processing_time_ms: u64,
}

impl GatewayResponse {
    pub fn new() -> Self {
        Self {
            status_code: 200,
            headers: HashMap::new(),
            body: String::new(),
            processing_time_ms: 0,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn set_status_code(&mut self, status_code: u16) {
        self.status_code = status_code;
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Milliseconds spent in the gateway, stamped by the transformation
    /// filter during the post-phase.
    pub fn processing_time_ms(&self) -> u64 {
        self.processing_time_ms
    }

    pub fn set_processing_time_ms(&mut self, millis: u64) {
        self.processing_time_ms = millis;
    }
}

impl Default for GatewayResponse {
    fn default() -> Self {
        Self::new()
    }
}
