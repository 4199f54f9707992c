//! Feed pull scheduling.
//!
//! Spawns one tokio task per enabled feed, each pulling and merging its
//! snapshot at the configured interval. A failed pull or merge is logged
//! and retried on the next tick.

use std::sync::Arc;

use serde::Deserialize;
use tokio::time::{interval, Duration};

use palisade_core::types::{CategoryId, Source};
use palisade_store::MemoryStore;

use crate::merge::merge;
use crate::provider::{JsonFeedProvider, ReputationProvider};

/// A feed with its pull schedule.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedSchedule {
    /// Which provider the snapshot comes from.
    pub source: Source,

    /// Path to the normalized JSON snapshot.
    pub path: String,

    /// Pull interval in seconds.
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Whether this feed is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_interval() -> u64 {
    3600
}

fn default_true() -> bool {
    true
}

/// The scheduler manages periodic pulls for multiple feeds.
pub struct FeedScheduler {
    store: MemoryStore,
    holding_category: CategoryId,
    feeds: Vec<FeedSchedule>,
}

impl FeedScheduler {
    pub fn new(store: MemoryStore, holding_category: CategoryId, feeds: Vec<FeedSchedule>) -> Self {
        Self {
            store,
            holding_category,
            feeds,
        }
    }

    /// Run the scheduler, spawning a tokio task per feed.
    /// Blocks until all tasks complete or the runtime shuts down.
    pub async fn run(&self) {
        let mut handles = Vec::new();

        for feed in &self.feeds {
            if !feed.enabled {
                tracing::info!(source = %feed.source, "Feed disabled, skipping");
                continue;
            }

            let store = self.store.clone();
            let holding = self.holding_category;
            let feed = feed.clone();

            let handle = tokio::spawn(async move {
                run_feed_loop(store, holding, feed).await;
            });
            handles.push(handle);
        }

        tracing::info!(feed_count = handles.len(), "Feed scheduler started");

        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Feed pull task panicked");
            }
        }
    }
}

/// Per-feed pull loop with configurable interval.
async fn run_feed_loop(store: MemoryStore, holding: CategoryId, feed: FeedSchedule) {
    let provider = Arc::new(JsonFeedProvider::new(feed.source, &feed.path));
    let mut ticker = interval(Duration::from_secs(feed.interval_secs));

    loop {
        ticker.tick().await;

        if let Err(e) = pull_once(&store, provider.as_ref(), holding).await {
            tracing::error!(source = %feed.source, error = %e, "Feed pull failed");
        }
    }
}

/// Execute a single pull: fetch → merge.
pub async fn pull_once(
    store: &MemoryStore,
    provider: &dyn ReputationProvider,
    holding: CategoryId,
) -> crate::error::Result<()> {
    let snapshot = provider.fetch().await?;
    let outcome = merge(store, &snapshot, holding, provider.source())?;

    tracing::info!(
        source = %provider.source(),
        fetched = snapshot.len(),
        added = outcome.added,
        skipped = outcome.skipped,
        "Feed pull complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use palisade_store::CategorySpec;
    use std::io::Write;

    #[tokio::test]
    async fn pull_once_fetches_and_merges() {
        let store = MemoryStore::new();
        let holding = store
            .create_category(CategorySpec {
                name: "sources".to_string(),
                label: "Sources".to_string(),
                description: String::new(),
                color: "#607d8b".to_string(),
                icon: "rss".to_string(),
                is_default: true,
                expiration_secs: None,
                auto_cleanup: false,
            })
            .unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"token": "203.0.113.80", "confidence": 91}}]"#).unwrap();
        let provider = JsonFeedProvider::new(Source::AbuseIpDb, file.path());

        pull_once(&store, &provider, holding.id).await.unwrap();
        assert_eq!(store.list_by_category(holding.id).len(), 1);

        // Pulling the same snapshot again is a no-op.
        pull_once(&store, &provider, holding.id).await.unwrap();
        assert_eq!(store.list_by_category(holding.id).len(), 1);
    }
}
