//! palisade-ingest: reputation feed providers and the ingestion merger.
//!
//! Providers return normalized indicator tuples; the merger reconciles
//! them with the store (dedup by token, whitelist skip, threat sub-type
//! classification) and lands survivors in the holding category. The
//! scheduler drives enabled feeds on their configured intervals.

pub mod error;
pub mod merge;
pub mod provider;
pub mod scheduler;

pub use error::{IngestError, Result};
pub use merge::{merge, sub_type_for_confidence, MergeOutcome};
pub use provider::{FeedIndicator, JsonFeedProvider, ReputationProvider};
pub use scheduler::{FeedSchedule, FeedScheduler};
