//! The ingestion merger.
//!
//! Reconciles a provider snapshot with the store: whitelisted tokens and
//! tokens already tracked anywhere are skipped (dedup is by token, not
//! by source: a manually added IP blocks re-ingestion of the same IP
//! from a feed), survivors get a threat sub-type from the confidence
//! threshold table and land in the holding category. Safe to run
//! repeatedly: an identical snapshot adds nothing the second time.

use palisade_core::types::{CategoryId, Source};
use palisade_store::{MemoryStore, NewIndicator, StoreError};

use crate::error::Result;
use crate::provider::FeedIndicator;

/// Counters for one merge pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub added: usize,
    pub skipped: usize,
}

/// Map a provider confidence signal to a threat sub-type label.
pub fn sub_type_for_confidence(confidence: u8) -> &'static str {
    match confidence {
        90..=255 => "malware",
        85..=89 => "c2",
        80..=84 => "bruteforce",
        _ => "unclassified",
    }
}

/// Merge a feed snapshot into the holding category.
///
/// Whitelisted and already-present tokens count as skipped, not as
/// errors. Any other store failure aborts the pass.
pub fn merge(
    store: &MemoryStore,
    snapshot: &[FeedIndicator],
    holding_category: CategoryId,
    source: Source,
) -> Result<MergeOutcome> {
    let mut outcome = MergeOutcome::default();

    for observation in snapshot {
        let new = NewIndicator {
            token: observation.token.clone(),
            category_id: holding_category,
            source,
            description: observation.comment.clone().unwrap_or_default(),
            sub_type: Some(sub_type_for_confidence(observation.confidence).to_string()),
            reputation: observation.reputation(source),
        };

        match store.insert(new) {
            Ok(_) => outcome.added += 1,
            Err(StoreError::AlreadyExists { .. })
            | Err(StoreError::AlreadyWhitelisted { .. })
            | Err(StoreError::InvalidToken { .. }) => {
                tracing::debug!(token = %observation.token, "Feed indicator skipped");
                outcome.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::info!(
        source = %source,
        added = outcome.added,
        skipped = outcome.skipped,
        "Feed merge complete"
    );
    Ok(outcome)
}
