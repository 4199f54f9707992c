//! Core domain types for the Palisade block lists.
//!
//! These types represent indicators, categories, and whitelist entries,
//! shared across the store, ingestion, and server crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::classify::Kind;

// ── Identifiers ───────────────────────────────────────────────────

/// Unique identifier for an indicator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct IndicatorId(pub Uuid);

impl IndicatorId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for IndicatorId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for IndicatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CategoryId(pub Uuid);

impl CategoryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Indicator ─────────────────────────────────────────────────────

/// Where an indicator came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Manual,
    AbuseIpDb,
    VirusTotal,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Source::Manual => "manual",
            Source::AbuseIpDb => "abuseipdb",
            Source::VirusTotal => "virustotal",
        };
        write!(f, "{s}")
    }
}

/// Reputation scores attached by external providers.
///
/// Scores are additive: an indicator may carry both an AbuseIPDB
/// confidence and a VirusTotal detection count independently.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reputation {
    /// AbuseIPDB abuse confidence, 0–100.
    pub abuseipdb_confidence: Option<u8>,
    /// Number of VirusTotal engines flagging the token.
    pub virustotal_positives: Option<u32>,
}

impl Reputation {
    /// True when no provider has scored this indicator.
    pub fn is_empty(&self) -> bool {
        self.abuseipdb_confidence.is_none() && self.virustotal_positives.is_none()
    }

    /// Merge scores from another reputation record. Fields present in
    /// `other` overwrite the local value; absent fields are kept.
    pub fn merge_from(&mut self, other: &Reputation) {
        if other.abuseipdb_confidence.is_some() {
            self.abuseipdb_confidence = other.abuseipdb_confidence;
        }
        if other.virustotal_positives.is_some() {
            self.virustotal_positives = other.virustotal_positives;
        }
    }
}

/// A single malicious network identifier tracked by the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Indicator {
    pub id: IndicatorId,
    /// The IP/CIDR/hostname/FQDN string. Globally unique while present.
    pub token: String,
    /// Classified once at creation, immutable afterwards.
    pub kind: Kind,
    /// Current category. Mutable only through an explicit reassign.
    pub category_id: CategoryId,
    /// Originating source, immutable.
    pub source: Source,
    /// Threat label assigned at ingestion (malware/c2/bruteforce/...).
    /// Meaningful while the indicator sits in the holding category.
    pub sub_type: Option<String>,
    pub description: String,
    pub reputation: Reputation,
    pub added_at: DateTime<Utc>,
    pub last_modified_at: DateTime<Utc>,
}

// ── Category ──────────────────────────────────────────────────────

/// A named group of indicators published as one EDL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    /// URL-safe slug, unique across categories.
    pub name: String,
    pub label: String,
    pub description: String,
    pub color: String,
    pub icon: String,
    /// The default category cannot be deleted.
    pub is_default: bool,
    /// Inactive categories are hidden from dashboards but their
    /// indicators stay queryable.
    pub is_active: bool,
    /// Seconds until an indicator in this category expires.
    /// Absent means indicators never expire.
    pub expiration_secs: Option<u32>,
    /// When true and an expiration is set, the sweep physically removes
    /// expired indicators. Advisory-only otherwise.
    pub auto_cleanup: bool,
}

impl Category {
    /// Whether the sweep may delete expired indicators in this category.
    /// Auto-cleanup without an expiration policy is treated as off.
    pub fn cleanup_enabled(&self) -> bool {
        self.auto_cleanup && self.expiration_secs.is_some()
    }
}

// ── Whitelist ─────────────────────────────────────────────────────

/// A protected token excluded from every category and every EDL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhitelistEntry {
    pub token: String,
    pub kind: Kind,
    pub description: String,
    pub added_at: DateTime<Utc>,
}
