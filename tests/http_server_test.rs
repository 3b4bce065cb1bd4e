//! Full-stack tests: inbound HTTP adapter through to a mock backend.

mod common;

use std::net::SocketAddr;
use std::sync::Arc;

use api_gateway::filter::{AuthenticationFilter, RateLimitFilter};
use api_gateway::route::Route;
use api_gateway::{GatewayConfig, GatewayService, HttpServer, Shutdown};

/// Serve the gateway on an ephemeral port. The returned `Shutdown` must be
/// kept alive for the duration of the test.
async fn start_gateway(gateway: Arc<GatewayService>) -> (SocketAddr, Shutdown) {
    let config = GatewayConfig::default();
    let server = HttpServer::new(&config, gateway);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

#[tokio::test]
async fn health_endpoint_reports_running() {
    let gateway = Arc::new(GatewayService::new());
    let (addr, _shutdown) = start_gateway(gateway).await;

    let res = client()
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "API Gateway is running");
}

#[tokio::test]
async fn stats_endpoint_reports_routes_and_pool() {
    let gateway = Arc::new(GatewayService::new());
    gateway.register_route(
        Route::builder("/api/one")
            .target_url("http://127.0.0.1:9")
            .build()
            .unwrap(),
    );
    let (addr, _shutdown) = start_gateway(gateway).await;

    let res = client()
        .get(format!("http://{addr}/stats"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body = res.text().await.unwrap();
    assert_eq!(
        body,
        "Gateway Statistics:\n\
         Routes configured: 1\n\
         HTTP clients available: 10/10\n\
         HTTP clients in use: 0"
    );
}

#[tokio::test]
async fn unrouted_api_path_returns_404() {
    let gateway = Arc::new(GatewayService::new());
    let (addr, _shutdown) = start_gateway(gateway).await;

    let res = client()
        .get(format!("http://{addr}/api/nonexistent"))
        .header("X-Client-Id", "test-client")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    assert_eq!(res.text().await.unwrap(), "No route found");
}

#[tokio::test]
async fn proxies_authenticated_request_to_backend() {
    let backend = common::start_mock_backend(200, "backend says hi").await;

    let gateway = Arc::new(GatewayService::new());
    gateway.register_route(
        Route::builder("/api/test")
            .target_url(format!("http://{backend}/test"))
            .filter(AuthenticationFilter::new())
            .build()
            .unwrap(),
    );
    let (addr, _shutdown) = start_gateway(gateway).await;

    let res = client()
        .get(format!("http://{addr}/api/test"))
        .header("Authorization", "Bearer token-123")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    assert_eq!(
        res.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert_eq!(res.headers().get("x-frame-options").unwrap(), "DENY");
    assert_eq!(res.text().await.unwrap(), "backend says hi");
}

#[tokio::test]
async fn missing_token_is_rejected_with_403() {
    let backend = common::start_mock_backend(200, "never reached").await;

    let gateway = Arc::new(GatewayService::new());
    gateway.register_route(
        Route::builder("/api/test")
            .target_url(format!("http://{backend}/test"))
            .filter(AuthenticationFilter::new())
            .build()
            .unwrap(),
    );
    let (addr, _shutdown) = start_gateway(gateway).await;

    let res = client()
        .get(format!("http://{addr}/api/test"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 403);
    assert_eq!(res.text().await.unwrap(), "Request blocked by filters");
}

#[tokio::test]
async fn client_identity_comes_from_x_client_id_header() {
    let backend = common::start_mock_backend(200, "ok").await;

    let gateway = Arc::new(GatewayService::new());
    gateway.register_route(
        Route::builder("/api/limited")
            .target_url(format!("http://{backend}/limited"))
            .filter(RateLimitFilter::new(1))
            .build()
            .unwrap(),
    );
    let (addr, _shutdown) = start_gateway(gateway).await;

    let http = client();
    let url = format!("http://{addr}/api/limited");

    let first = http
        .get(&url)
        .header("X-Client-Id", "c9")
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), 200);

    let second = http
        .get(&url)
        .header("X-Client-Id", "c9")
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), 403);

    // A different client id is an independent budget.
    let other = http
        .get(&url)
        .header("X-Client-Id", "c10")
        .send()
        .await
        .unwrap();
    assert_eq!(other.status(), 200);
}

#[tokio::test]
async fn post_round_trip_through_the_full_stack() {
    let backend = common::start_mock_backend(201, "stored").await;

    let gateway = Arc::new(GatewayService::new());
    gateway.register_route(
        Route::builder("/api/items")
            .target_url(format!("http://{backend}/items"))
            .build()
            .unwrap(),
    );
    let (addr, _shutdown) = start_gateway(gateway).await;

    let res = client()
        .post(format!("http://{addr}/api/items"))
        .body(r#"{"name":"widget"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 201);
    assert_eq!(res.text().await.unwrap(), "stored");
}
