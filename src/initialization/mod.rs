//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources:
//! - HTTP clients (redirect-following and redirect-surfacing)
//! - The global concurrency semaphore
//! - The logger

mod client;
mod logger;

use std::sync::Arc;

use tokio::sync::Semaphore;

// Re-export public API
pub use client::{init_clients, ProbeClients};
pub use logger::init_logger_with;

/// Initializes a semaphore for controlling concurrency.
///
/// The returned semaphore bounds the number of probes in flight; the global
/// instance lives as long as the [`crate::Searcher`] and is shared across all
/// concurrent searches.
pub fn init_semaphore(count: usize) -> Arc<Semaphore> {
    Arc::new(Semaphore::new(count))
}
