//! Event types for the notification channel.
//!
//! The store publishes these best-effort after mutations; the server's
//! drain task consumes them for the notifier collaborator. Delivery is
//! fire-and-forget: a failed send is logged and never fails the
//! operation that produced it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{CategoryId, IndicatorId, Source};

/// An event emitted by the indicator store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdlEvent {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub payload: EventPayload,
}

impl EdlEvent {
    pub fn new(payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            payload,
        }
    }
}

/// The event payload, tagged by type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum EventPayload {
    /// An indicator was inserted (manually or by ingestion).
    IndicatorAdded {
        indicator_id: IndicatorId,
        token: String,
        kind: crate::classify::Kind,
        category_id: CategoryId,
        source: Source,
    },
    /// The sweep removed an expired indicator.
    IndicatorExpired {
        indicator_id: IndicatorId,
        token: String,
        category_id: CategoryId,
    },
    /// A sweep pass finished.
    SweepCompleted {
        removed: u32,
        categories_swept: u32,
        duration_ms: u64,
    },
}
