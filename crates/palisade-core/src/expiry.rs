//! Expiration math for indicators.
//!
//! Remaining TTL is a pure function of `(added_at, policy, now)`, no
//! countdown state is ever persisted. The store's sweep and the UI-facing
//! countdown both derive from [`remaining_ttl`].
//!
//! The canonical unit for expiration policies is seconds. Any boundary
//! that accepts another unit (the daemon config takes hours for category
//! seeds) converts exactly once before the value reaches this module.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

/// Remaining time-to-live for an indicator under a category policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// The category has no expiration policy; the indicator never expires.
    Unbounded,
    /// Time left before expiry. Always strictly positive.
    Remaining(TimeDelta),
    /// The policy window has elapsed.
    Expired,
}

impl Ttl {
    pub fn is_expired(&self) -> bool {
        matches!(self, Ttl::Expired)
    }

    /// Seconds left, if bounded and not yet expired.
    pub fn seconds_remaining(&self) -> Option<i64> {
        match self {
            Ttl::Remaining(delta) => Some(delta.num_seconds()),
            _ => None,
        }
    }
}

/// Lifecycle state derived from the TTL. Expired indicators in
/// advisory-only categories stay visible in this state until deleted.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorState {
    Alive,
    Expired,
}

impl From<Ttl> for IndicatorState {
    fn from(ttl: Ttl) -> Self {
        if ttl.is_expired() {
            IndicatorState::Expired
        } else {
            IndicatorState::Alive
        }
    }
}

/// Compute the remaining TTL for an indicator added at `added_at` under a
/// category expiring after `expiration_secs` seconds, as of `now`.
///
/// Zero or negative remaining time is `Expired`.
pub fn remaining_ttl(
    added_at: DateTime<Utc>,
    expiration_secs: Option<u32>,
    now: DateTime<Utc>,
) -> Ttl {
    let secs = match expiration_secs {
        Some(secs) => secs,
        None => return Ttl::Unbounded,
    };

    let deadline = added_at + TimeDelta::seconds(i64::from(secs));
    let remaining = deadline - now;
    if remaining <= TimeDelta::zero() {
        Ttl::Expired
    } else {
        Ttl::Remaining(remaining)
    }
}
