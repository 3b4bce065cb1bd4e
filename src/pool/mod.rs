//! Bounded pool of reusable upstream HTTP clients.
//!
//! # Responsibilities
//! - Allocate `max_pool_size` clients eagerly at construction
//! - Lend clients out with a bounded blocking acquire
//! - Take clients back on release; drain and drop everything on shutdown
//!
//! # Design Decisions
//! - A semaphore gates admission; the client queue itself is behind a plain
//!   mutex with short critical sections. A waiter that times out or is
//!   cancelled never holds a permit, so nothing leaks
//! - Clients are handed out as RAII guards: dropping the guard returns the
//!   client, so every exit path of forwarding releases exactly once
//! - Upstream I/O timeouts are baked into each client at construction time;
//!   per-request timeout enforcement lives in the client, not the pool

use std::collections::VecDeque;
use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Semaphore;

/// Pool acquisition failures.
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("no HTTP client available within {0:?}")]
    Exhausted(Duration),

    #[error("client pool is shut down")]
    Closed,
}

/// Fixed-size pool of reqwest clients.
///
/// `available() + in_use() == max_pool_size()` at every observation point
/// outside an in-flight acquire or release.
#[derive(Debug)]
pub struct HttpClientPool {
    clients: Mutex<VecDeque<reqwest::Client>>,
    permits: Semaphore,
    max_pool_size: usize,
    acquire_timeout: Duration,
    closed: AtomicBool,
}

impl HttpClientPool {
    /// Build the pool, eagerly constructing every client with the given
    /// upstream request timeout.
    pub fn new(max_pool_size: usize, acquire_timeout: Duration, upstream_timeout: Duration) -> Self {
        let mut clients = VecDeque::with_capacity(max_pool_size);
        for _ in 0..max_pool_size {
            match reqwest::Client::builder().timeout(upstream_timeout).build() {
                Ok(client) => clients.push_back(client),
                Err(e) => tracing::error!(error = %e, "Failed to build HTTP client for pool"),
            }
        }

        let available = clients.len();
        tracing::info!(size = available, "HTTP client pool initialized");

        Self {
            clients: Mutex::new(clients),
            permits: Semaphore::new(available),
            max_pool_size,
            acquire_timeout,
            closed: AtomicBool::new(false),
        }
    }

    /// Borrow a client, waiting up to the acquire timeout for one to free
    /// up. The returned guard gives the client back when dropped.
    pub async fn acquire(self: &Arc<Self>) -> Result<PooledClient, PoolError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(PoolError::Closed);
        }

        let permit = tokio::time::timeout(self.acquire_timeout, self.permits.acquire())
            .await
            .map_err(|_| {
                tracing::error!(timeout = ?self.acquire_timeout, "Timeout acquiring HTTP client from pool");
                PoolError::Exhausted(self.acquire_timeout)
            })?
            .map_err(|_| PoolError::Closed)?;

        // The permit's count is handed over to the guard; release()
        // re-adds it when the client comes back.
        permit.forget();

        let client = self
            .clients
            .lock()
            .expect("client pool mutex poisoned")
            .pop_front()
            .ok_or(PoolError::Closed)?;

        tracing::debug!(available = self.available(), "HTTP client acquired");

        Ok(PooledClient {
            client: Some(client),
            pool: Arc::clone(self),
        })
    }

    fn release(&self, client: reqwest::Client) {
        if self.closed.load(Ordering::SeqCst) {
            // Shutdown already drained the queue; drop the straggler.
            return;
        }

        let mut clients = self.clients.lock().expect("client pool mutex poisoned");
        if clients.len() < self.max_pool_size {
            clients.push_back(client);
            drop(clients);
            self.permits.add_permits(1);
            tracing::debug!(available = self.available(), "HTTP client returned to pool");
        } else {
            // Logic error: more releases than acquires. Drop the client
            // rather than grow past the bound.
            tracing::warn!("Failed to return client to pool (pool full)");
        }
    }

    /// Drain and drop every pooled client. Safe to call more than once;
    /// subsequent acquires fail with [`PoolError::Closed`].
    pub fn shutdown(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }

        tracing::info!("Shutting down HTTP client pool");
        self.permits.close();
        self.clients
            .lock()
            .expect("client pool mutex poisoned")
            .clear();
    }

    /// Clients currently free.
    pub fn available(&self) -> usize {
        self.clients.lock().expect("client pool mutex poisoned").len()
    }

    pub fn max_pool_size(&self) -> usize {
        self.max_pool_size
    }

    /// Clients currently lent out.
    pub fn in_use(&self) -> usize {
        self.max_pool_size.saturating_sub(self.available())
    }
}

/// RAII borrow of a pooled client.
///
/// Dereferences to [`reqwest::Client`]; dropping it returns the client to
/// the pool.
#[derive(Debug)]
pub struct PooledClient {
    client: Option<reqwest::Client>,
    pool: Arc<HttpClientPool>,
}

impl Deref for PooledClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        self.client.as_ref().expect("client already released")
    }
}

impl Drop for PooledClient {
    fn drop(&mut self) {
        if let Some(client) = self.client.take() {
            self.pool.release(client);
        }
    }
}
