//! Inbound request representation.
//!
//! # Responsibilities
//! - Carry everything the pipeline needs: method, path, headers, query, body
//! - Identify the client (`X-Client-Id`, defaulting to "unknown")
//! - Record the arrival timestamp for processing-time accounting

use std::collections::HashMap;

use crate::model::now_millis;

/// A decoded client request flowing through the gateway.
///
/// Mutable during the pre-filter phase (filters may add headers); the
/// arrival timestamp is fixed at construction and never changes.
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    method: String,
    path: String,
    headers: HashMap<String, String>,
    query_params: HashMap<String, String>,
    body: Option<String>,
    client_id: String,
    timestamp_ms: u64,
}

impl GatewayRequest {
    /// Create a request for the given method and path, stamping the
    /// arrival time.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into().to_uppercase(),
            path: path.into(),
            headers: HashMap::new(),
            query_params: HashMap::new(),
            body: None,
            client_id: String::new(),
            timestamp_ms: now_millis(),
        }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Look up a header by name, ignoring case.
    ///
    /// Storage preserves whatever case the adapter supplied; HTTP header
    /// names compare case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    pub fn set_headers(&mut self, headers: HashMap<String, String>) {
        self.headers = headers;
    }

    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    pub fn set_query_params(&mut self, params: HashMap<String, String>) {
        self.query_params = params;
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = Some(body.into());
    }

    /// The caller's identity, taken from `X-Client-Id` by the inbound
    /// adapter. Empty until set.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn set_client_id(&mut self, client_id: impl Into<String>) {
        self.client_id = client_id.into();
    }

    /// Arrival time in milliseconds since the Unix epoch.
    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }
}
