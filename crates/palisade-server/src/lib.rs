//! palisade-server: the EDL publishing daemon.
//!
//! Serves the plain-text EDL endpoint and a small JSON admin API, runs
//! the expiry sweep on a fixed interval, drives feed pulls, and drains
//! the notification channel.

pub mod config;
pub mod error;
pub mod feed;
pub mod notify;
pub mod routes;
pub mod sweep;

use palisade_store::MemoryStore;

/// Shared state for all HTTP handlers. Clone is cheap.
#[derive(Clone)]
pub struct AppState {
    pub store: MemoryStore,
}
