//! Gateway orchestration.
//!
//! # Data Flow
//! ```text
//! GatewayRequest
//!     → route registry (first prefix match, 404 on miss)
//!     → filter chain pre-phase (403 on veto, post-phase still runs)
//!     → forward via pooled client (503 pool timeout, 502 upstream failure)
//!     → filter chain post-phase
//!     → GatewayResponse
//! ```
//!
//! # Design Decisions
//! - Route lookup clones the matched route out of the read lock so no lock
//!   is held across the upstream await
//! - Forwarding maps every failure to a response status instead of
//!   propagating; a gateway request never takes the process down
//! - The pooled client is an RAII guard, released on every return path

pub mod forward;

use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::filter::FilterChain;
use crate::model::{GatewayRequest, GatewayResponse};
use crate::pool::HttpClientPool;
use crate::route::{Route, RouteRegistry};

/// Top-level request processor: route registry + filter chains + client
/// pool.
pub struct GatewayService {
    routes: RwLock<RouteRegistry>,
    client_pool: Arc<HttpClientPool>,
}

impl GatewayService {
    /// Create a service with the stock pool: 10 clients, 5 s acquire
    /// timeout, 30 s upstream timeout.
    pub fn new() -> Self {
        Self::with_pool(Arc::new(HttpClientPool::new(
            10,
            Duration::from_secs(5),
            Duration::from_secs(30),
        )))
    }

    /// Create a service around an existing pool (sized from config).
    pub fn with_pool(client_pool: Arc<HttpClientPool>) -> Self {
        tracing::info!("Gateway service initialized");
        Self {
            routes: RwLock::new(RouteRegistry::new()),
            client_pool,
        }
    }

    /// Register a route. Registration order is matching priority.
    pub fn register_route(&self, route: Route) {
        tracing::info!(route = %route, "Route registered");
        self.routes
            .write()
            .expect("route registry lock poisoned")
            .register(route);
    }

    /// Run a request through the full pipeline and produce its response.
    pub async fn process_request(&self, request: &mut GatewayRequest) -> GatewayResponse {
        tracing::info!(
            method = %request.method(),
            path = %request.path(),
            "Processing request"
        );

        let route = {
            let routes = self.routes.read().expect("route registry lock poisoned");
            routes.find(request.path()).cloned()
        };

        let Some(route) = route else {
            tracing::warn!(path = %request.path(), "No route found");
            let mut response = GatewayResponse::new();
            response.set_status_code(404);
            response.set_body("No route found");
            return response;
        };

        let chain = FilterChain::new(route.filters());

        if !chain.execute_pre(request) {
            let mut response = GatewayResponse::new();
            response.set_status_code(403);
            response.set_body("Request blocked by filters");
            // The rejection still carries response-side filter effects
            // (security headers, rate-limit headers, timing).
            chain.execute_post(request, &mut response);
            return response;
        }

        let mut response = forward::forward(&self.client_pool, request, &route).await;
        chain.execute_post(request, &mut response);
        response
    }

    /// Snapshot of the registered routes.
    pub fn routes(&self) -> Vec<Route> {
        self.routes
            .read()
            .expect("route registry lock poisoned")
            .routes()
            .to_vec()
    }

    pub fn client_pool(&self) -> &Arc<HttpClientPool> {
        &self.client_pool
    }

    /// Shut down the client pool. Idempotent.
    pub fn shutdown(&self) {
        tracing::info!("Shutting down gateway service");
        self.client_pool.shutdown();
    }
}

impl Default for GatewayService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{AuthenticationFilter, LoggingFilter};

    fn service() -> GatewayService {
        GatewayService::with_pool(Arc::new(HttpClientPool::new(
            2,
            Duration::from_millis(100),
            Duration::from_secs(5),
        )))
    }

    #[tokio::test]
    async fn unmatched_path_yields_404() {
        let service = service();
        let mut request = GatewayRequest::new("GET", "/api/nonexistent");
        request.set_client_id("test-client");

        let response = service.process_request(&mut request).await;
        assert_eq!(response.status_code(), 404);
        assert_eq!(response.body(), "No route found");
    }

    #[tokio::test]
    async fn filter_veto_yields_403_with_post_effects() {
        let service = service();
        service.register_route(
            Route::builder("/api/test")
                .target_url("http://upstream/test")
                .filter(LoggingFilter::new())
                .filter(AuthenticationFilter::new())
                .build()
                .unwrap(),
        );

        // No Authorization header.
        let mut request = GatewayRequest::new("GET", "/api/test");
        let response = service.process_request(&mut request).await;

        assert_eq!(response.status_code(), 403);
        assert_eq!(response.body(), "Request blocked by filters");
        // Post-phase ran on the rejection.
        assert_eq!(response.header("X-Content-Type-Options"), Some("nosniff"));
        assert_eq!(response.header("X-Frame-Options"), Some("DENY"));
        // Forwarding never started, so no client was borrowed.
        assert_eq!(service.client_pool().available(), 2);
    }

    #[tokio::test]
    async fn exhausted_pool_yields_503() {
        let service = service();
        service.register_route(
            Route::builder("/api/test")
                .target_url("http://127.0.0.1:9")
                .build()
                .unwrap(),
        );

        let _held_1 = service.client_pool().acquire().await.unwrap();
        let _held_2 = service.client_pool().acquire().await.unwrap();

        let mut request = GatewayRequest::new("GET", "/api/test");
        let response = service.process_request(&mut request).await;

        assert_eq!(response.status_code(), 503);
        assert_eq!(response.body(), "Service temporarily unavailable");
    }

    #[tokio::test]
    async fn unreachable_upstream_yields_502_and_releases_client() {
        let service = service();
        service.register_route(
            Route::builder("/api/test")
                // Discard port: connection refused immediately.
                .target_url("http://127.0.0.1:9")
                .build()
                .unwrap(),
        );

        let mut request = GatewayRequest::new("GET", "/api/test");
        let response = service.process_request(&mut request).await;

        assert_eq!(response.status_code(), 502);
        assert!(response.body().starts_with("Bad gateway:"));
        assert_eq!(service.client_pool().available(), 2);
    }

    #[tokio::test]
    async fn routes_snapshot_reflects_registrations() {
        let service = service();
        assert!(service.routes().is_empty());

        service.register_route(
            Route::builder("/api/a").target_url("http://a").build().unwrap(),
        );
        service.register_route(
            Route::builder("/api/b").target_url("http://b").build().unwrap(),
        );
        assert_eq!(service.routes().len(), 2);
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let service = service();
        service.shutdown();
        service.shutdown();
        assert_eq!(service.client_pool().available(), 0);
    }
}
