//! Reputation feed providers.
//!
//! A provider pulls one snapshot of malicious indicators and returns
//! them as normalized tuples. Provider-specific authentication, rate
//! limiting, and wire formats stay behind this seam; the merger only
//! ever sees [`FeedIndicator`] values.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;

use palisade_core::types::{Reputation, Source};

use crate::error::{IngestError, Result};

/// One indicator as reported by an external reputation provider.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedIndicator {
    pub token: String,
    /// Provider confidence / maliciousness signal, 0–100.
    pub confidence: u8,
    #[serde(default)]
    pub comment: Option<String>,
}

impl FeedIndicator {
    /// Structured reputation fields for this observation, attributed to
    /// the originating provider.
    pub fn reputation(&self, source: Source) -> Reputation {
        match source {
            Source::AbuseIpDb => Reputation {
                abuseipdb_confidence: Some(self.confidence),
                virustotal_positives: None,
            },
            Source::VirusTotal => Reputation {
                abuseipdb_confidence: None,
                virustotal_positives: Some(u32::from(self.confidence)),
            },
            Source::Manual => Reputation::default(),
        }
    }
}

/// A pull-based reputation feed.
#[async_trait]
pub trait ReputationProvider: Send + Sync {
    /// Which source this provider's indicators are attributed to.
    fn source(&self) -> Source;

    /// Pull the current snapshot.
    async fn fetch(&self) -> Result<Vec<FeedIndicator>>;
}

/// Provider reading normalized JSON snapshots from disk, the landing
/// format for exported AbuseIPDB and VirusTotal pulls.
///
/// Snapshot format: a JSON array of `{token, confidence, comment?}`.
pub struct JsonFeedProvider {
    source: Source,
    path: PathBuf,
}

impl JsonFeedProvider {
    pub fn new(source: Source, path: impl Into<PathBuf>) -> Self {
        Self {
            source,
            path: path.into(),
        }
    }
}

#[async_trait]
impl ReputationProvider for JsonFeedProvider {
    fn source(&self) -> Source {
        self.source
    }

    async fn fetch(&self) -> Result<Vec<FeedIndicator>> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                IngestError::SnapshotNotFound {
                    path: self.path.display().to_string(),
                }
            } else {
                IngestError::Io(e)
            }
        })?;

        let indicators: Vec<FeedIndicator> = serde_json::from_str(&raw)?;
        tracing::debug!(
            source = %self.source,
            path = %self.path.display(),
            count = indicators.len(),
            "Feed snapshot loaded"
        );
        Ok(indicators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn loads_snapshot_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"token": "203.0.113.50", "confidence": 92, "comment": "ssh brute"}},
                {{"token": "bad.example.com", "confidence": 80}}
            ]"#
        )
        .unwrap();

        let provider = JsonFeedProvider::new(Source::AbuseIpDb, file.path());
        let snapshot = provider.fetch().await.unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].token, "203.0.113.50");
        assert_eq!(snapshot[0].confidence, 92);
        assert_eq!(snapshot[1].comment, None);
    }

    #[tokio::test]
    async fn missing_snapshot_is_distinct_error() {
        let provider = JsonFeedProvider::new(Source::VirusTotal, "/nonexistent/feed.json");
        let result = provider.fetch().await;
        assert!(matches!(result, Err(IngestError::SnapshotNotFound { .. })));
    }

    #[test]
    fn reputation_attributed_to_provider() {
        let observation = FeedIndicator {
            token: "1.2.3.4".to_string(),
            confidence: 88,
            comment: None,
        };

        let rep = observation.reputation(Source::AbuseIpDb);
        assert_eq!(rep.abuseipdb_confidence, Some(88));
        assert_eq!(rep.virustotal_positives, None);

        let rep = observation.reputation(Source::VirusTotal);
        assert_eq!(rep.abuseipdb_confidence, None);
        assert_eq!(rep.virustotal_positives, Some(88));
    }
}
