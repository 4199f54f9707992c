//! In-memory store state and category bookkeeping types.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Deserialize;
use tokio::sync::mpsc::UnboundedSender;

use palisade_core::events::{EdlEvent, EventPayload};
use palisade_core::types::{Category, CategoryId, Indicator, IndicatorId, WhitelistEntry};

/// Thread-safe store for indicators, categories, and the whitelist.
///
/// Clone is cheap (inner Arc). All mutations take the write lock, which
/// makes the token-uniqueness check and the insert atomic under
/// concurrent access.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<RwLock<State>>,
    events: Option<UnboundedSender<EdlEvent>>,
}

#[derive(Default)]
pub(crate) struct State {
    pub(crate) categories: HashMap<CategoryId, Category>,
    pub(crate) indicators: HashMap<IndicatorId, Indicator>,
    /// token → indicator id. Enforces global token uniqueness.
    pub(crate) token_index: HashMap<String, IndicatorId>,
    /// Keyed by token; BTreeMap keeps listings ordered.
    pub(crate) whitelist: BTreeMap<String, WhitelistEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(State::default())),
            events: None,
        }
    }

    /// Attach the notification channel. Sends are best-effort; a closed
    /// channel is logged and never fails the triggering operation.
    pub fn with_events(mut self, events: UnboundedSender<EdlEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, State> {
        // A poisoned lock only means a writer panicked mid-operation;
        // the maps themselves are still structurally valid.
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn emit(&self, payload: EventPayload) {
        if let Some(tx) = &self.events {
            if tx.send(EdlEvent::new(payload)).is_err() {
                tracing::warn!("Notification channel closed, event dropped");
            }
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters for creating a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CategorySpec {
    /// URL-safe slug, unique across categories.
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default)]
    pub is_default: bool,
    /// Seconds until indicators in this category expire.
    #[serde(default)]
    pub expiration_secs: Option<u32>,
    #[serde(default)]
    pub auto_cleanup: bool,
}

fn default_color() -> String {
    "#607d8b".to_string()
}

fn default_icon() -> String {
    "shield".to_string()
}

/// Partial update for a category. `name` and `is_default` are identity
/// fields and cannot be patched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryPatch {
    pub label: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub is_active: Option<bool>,
    /// Set a new expiration window, in seconds.
    pub expiration_secs: Option<u32>,
    /// Remove the expiration policy entirely. Takes precedence over
    /// `expiration_secs` when both are given.
    #[serde(default)]
    pub clear_expiration: bool,
    pub auto_cleanup: Option<bool>,
}
