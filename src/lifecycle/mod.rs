//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup: load config → init observability → build pool/service →
//!          seed routes → start listener
//!
//! Shutdown: Ctrl+C → broadcast signal → server stops accepting →
//!           service drains and closes the client pool
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
