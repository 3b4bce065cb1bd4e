//! Upstream forwarding over a pooled client.
//!
//! # Responsibilities
//! - Borrow a client from the pool (503 on acquire timeout)
//! - Translate the gateway request into an upstream GET or POST
//! - Map upstream status and body verbatim into the gateway response
//! - Map upstream I/O failure to 502, request-construction failure to 500
//!
//! # Design Decisions
//! - Hop-specific headers (`Host`, `Content-Length`) and the gateway's own
//!   `X-Gateway-*` markers are not forwarded
//! - The whole response body is read as a string; no streaming
//! - The borrowed client is a guard, so every path below releases it

use std::sync::Arc;

use crate::model::{GatewayRequest, GatewayResponse};
use crate::pool::HttpClientPool;
use crate::route::Route;

/// Default headers set on every upstream request.
const DEFAULT_HEADERS: [(&str, &str); 3] = [
    ("User-Agent", "Mozilla/5.0 (compatible; API-Gateway/1.0)"),
    ("Accept", "application/json, text/plain, */*"),
    ("Accept-Language", "en-US,en;q=0.9"),
];

/// Forward `request` to the route's target URL and return the mapped
/// response. Never fails; every error becomes a response status.
pub async fn forward(
    pool: &Arc<HttpClientPool>,
    request: &GatewayRequest,
    route: &Route,
) -> GatewayResponse {
    let mut response = GatewayResponse::new();

    let client = match pool.acquire().await {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to acquire pooled HTTP client");
            response.set_status_code(503);
            response.set_body("Service temporarily unavailable");
            return response;
        }
    };

    tracing::info!(
        in_use = pool.in_use(),
        max = pool.max_pool_size(),
        target_url = %route.target_url(),
        "Forwarding via pooled HTTP client"
    );

    let mut builder = if request.method().eq_ignore_ascii_case("POST") {
        client
            .post(route.target_url())
            .body(request.body().unwrap_or_default().to_string())
    } else {
        client.get(route.target_url())
    };

    for (name, value) in DEFAULT_HEADERS {
        builder = builder.header(name, value);
    }

    for (name, value) in request.headers() {
        if should_skip_header(name) {
            continue;
        }
        builder = builder.header(name.as_str(), value.as_str());
    }

    match builder.send().await {
        Ok(upstream) => {
            response.set_status_code(upstream.status().as_u16());
            match upstream.text().await {
                Ok(body) => {
                    tracing::info!(status = response.status_code(), "Backend response received");
                    response.set_body(body);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Error reading upstream response body");
                    response.set_status_code(502);
                    response.set_body(format!("Bad gateway: {e}"));
                }
            }
        }
        Err(e) if e.is_builder() => {
            // Malformed header names/values from the client surface here.
            tracing::error!(error = %e, "Failed to build upstream request");
            response.set_status_code(500);
            response.set_body(format!("Internal gateway error: {e}"));
        }
        Err(e) => {
            tracing::error!(error = %e, "Error forwarding request");
            response.set_status_code(502);
            response.set_body(format!("Bad gateway: {e}"));
        }
    }

    response
    // `client` drops here and returns to the pool.
}

/// Headers never copied to the upstream request: the hop-by-hop `Host` and
/// `Content-Length`, plus the gateway's internal markers.
fn should_skip_header(name: &str) -> bool {
    name.eq_ignore_ascii_case("Host")
        || name.eq_ignore_ascii_case("Content-Length")
        || name.starts_with("X-Gateway-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_hop_and_gateway_headers() {
        assert!(should_skip_header("Host"));
        assert!(should_skip_header("host"));
        assert!(should_skip_header("Content-Length"));
        assert!(should_skip_header("content-length"));
        assert!(should_skip_header("X-Gateway-Version"));
        assert!(should_skip_header("X-Gateway-Timestamp"));
    }

    #[test]
    fn forwards_ordinary_headers() {
        assert!(!should_skip_header("Authorization"));
        assert!(!should_skip_header("X-Client-Id"));
        assert!(!should_skip_header("Accept"));
    }
}
