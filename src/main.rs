//! HTTP API Gateway
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                   API GATEWAY                     │
//!                     │                                                   │
//!   Client Request    │  ┌─────────┐   ┌──────────┐   ┌──────────────┐   │
//!   ──────────────────┼─▶│  http   │──▶│  route   │──▶│ filter chain │   │
//!                     │  │ server  │   │ registry │   │  pre-phase   │   │
//!                     │  └─────────┘   └──────────┘   └──────┬───────┘   │
//!                     │                                      │           │
//!                     │                                      ▼           │
//!                     │                              ┌──────────────┐    │
//!                     │                              │ client pool  │    │
//!                     │                              │  + forward   │    │
//!                     │                              └──────┬───────┘    │
//!                     │                                      │           │
//!   Client Response   │  ┌─────────┐   ┌──────────────┐      │           │
//!   ◀─────────────────┼──│  http   │◀──│ filter chain │◀─────┘           │
//!                     │  │response │   │  post-phase  │                  │
//!                     │  └─────────┘   └──────────────┘                  │
//!                     │                                                   │
//!                     │  config · observability · lifecycle               │
//!                     └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use api_gateway::config::{load_config, GatewayConfig};
use api_gateway::filter::{
    AuthenticationFilter, LoggingFilter, RateLimitFilter, TransformationFilter,
};
use api_gateway::lifecycle::Shutdown;
use api_gateway::observability;
use api_gateway::pool::HttpClientPool;
use api_gateway::route::{Route, RouteError};
use api_gateway::{GatewayService, HttpServer};

#[derive(Parser, Debug)]
#[command(name = "api-gateway", about = "HTTP API gateway with per-route filter chains")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    observability::logging::init(&config.observability.log_level);
    tracing::info!("api-gateway v0.1.0 starting");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => observability::metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let pool = Arc::new(HttpClientPool::new(
        config.pool.max_clients,
        Duration::from_secs(config.pool.acquire_timeout_secs),
        Duration::from_secs(config.pool.upstream_timeout_secs),
    ));
    let gateway = Arc::new(GatewayService::with_pool(pool));

    for route in seed_routes(&config)? {
        gateway.register_route(route);
    }
    tracing::info!(total = gateway.routes().len(), "Routes configured");

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            shutdown.trigger();
        }
    });

    let server = HttpServer::new(&config, gateway.clone());
    server.run(listener, server_shutdown).await?;

    gateway.shutdown();
    tracing::info!("Shutdown complete");
    Ok(())
}

/// Build the startup routes: from config when present, demo routes
/// otherwise.
fn seed_routes(config: &GatewayConfig) -> Result<Vec<Route>, RouteError> {
    if config.routes.is_empty() {
        tracing::info!("No routes configured; seeding demo routes");
        return demo_routes();
    }
    config.routes.iter().map(|r| r.build_route()).collect()
}

/// Demo routes against a public JSON API, exercising every filter kind.
fn demo_routes() -> Result<Vec<Route>, RouteError> {
    Ok(vec![
        Route::builder("/api/public")
            .target_url("https://jsonplaceholder.typicode.com/posts/1")
            .filter(LoggingFilter::new())
            .filter(TransformationFilter::new())
            .timeout_ms(5_000)
            .rate_limit(100)
            .build()?,
        Route::builder("/api/secure")
            .target_url("https://jsonplaceholder.typicode.com/users/1")
            .filter(LoggingFilter::new())
            .filter(AuthenticationFilter::new())
            .filter(RateLimitFilter::new(10))
            .filter(TransformationFilter::new())
            .timeout_ms(3_000)
            .build()?,
        Route::builder("/api/data")
            .target_url("https://jsonplaceholder.typicode.com/posts")
            .filter(LoggingFilter::new())
            .filter(AuthenticationFilter::new())
            .filter(RateLimitFilter::new(50))
            .filter(TransformationFilter::new())
            .timeout_ms(10_000)
            .rate_limit(50)
            .build()?,
    ])
}
