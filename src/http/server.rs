//! HTTP server setup and request decoding.
//!
//! # Responsibilities
//! - Create the Axum router with the gateway, health, and stats handlers
//! - Wire up middleware (request timeout, tracing)
//! - Decode inbound requests into gateway requests (headers map, query
//!   params, `X-Client-Id`, body)
//! - Map gateway responses back onto HTTP responses

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::config::GatewayConfig;
use crate::model::{GatewayRequest, GatewayResponse};
use crate::observability::metrics;
use crate::service::GatewayService;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<GatewayService>,
}

/// HTTP server fronting the gateway service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server over the given gateway service.
    pub fn new(config: &GatewayConfig, gateway: Arc<GatewayService>) -> Self {
        let state = AppState { gateway };

        let router = Router::new()
            .route("/health", get(health_handler))
            .route("/stats", get(stats_handler))
            .route("/api", get(gateway_handler).post(gateway_handler))
            .route("/api/{*path}", get(gateway_handler).post(gateway_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http());

        Self { router }
    }

    /// Accept connections until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn health_handler() -> &'static str {
    "API Gateway is running"
}

async fn stats_handler(State(state): State<AppState>) -> String {
    let pool = state.gateway.client_pool();
    format!(
        "Gateway Statistics:\n\
         Routes configured: {}\n\
         HTTP clients available: {}/{}\n\
         HTTP clients in use: {}",
        state.gateway.routes().len(),
        pool.available(),
        pool.max_pool_size(),
        pool.in_use()
    )
}

/// Decode the inbound request, run it through the gateway, and map the
/// result back to HTTP.
async fn gateway_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let start = Instant::now();
    let path = uri.path().to_string();

    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Inbound request"
    );

    let mut request = GatewayRequest::new(method.as_str(), &path);

    let mut header_map = HashMap::new();
    for (name, value) in headers.iter() {
        if let Ok(v) = value.to_str() {
            header_map.insert(name.as_str().to_string(), v.to_string());
        }
    }
    request.set_headers(header_map);
    request.set_query_params(params);

    let client_id = headers
        .get("x-client-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");
    request.set_client_id(client_id);

    if method == Method::POST && !body.is_empty() {
        request.set_body(body);
    }

    let gateway_response = state.gateway.process_request(&mut request).await;
    metrics::record_request(method.as_str(), gateway_response.status_code(), start);

    into_http_response(gateway_response)
}

fn into_http_response(response: GatewayResponse) -> Response {
    let status = StatusCode::from_u16(response.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut builder = Response::builder().status(status);
    if let Some(headers) = builder.headers_mut() {
        for (name, value) in response.headers() {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(n), Ok(v)) => {
                    headers.insert(n, v);
                }
                _ => tracing::warn!(header = %name, "Dropping invalid response header"),
            }
        }
    }

    builder
        .body(Body::from(response.body().to_string()))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
