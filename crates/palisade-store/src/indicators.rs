//! Indicator operations: insert, delete, list, reassign, expiry sweep.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use palisade_core::classify;
use palisade_core::events::EventPayload;
use palisade_core::expiry::{remaining_ttl, Ttl};
use palisade_core::types::{CategoryId, Indicator, IndicatorId, Reputation, Source};

use crate::error::{Result, StoreError};
use crate::memory::MemoryStore;

/// Parameters for inserting an indicator.
#[derive(Debug, Clone)]
pub struct NewIndicator {
    pub token: String,
    pub category_id: CategoryId,
    pub source: Source,
    pub description: String,
    pub sub_type: Option<String>,
    pub reputation: Reputation,
}

impl NewIndicator {
    /// A manually submitted indicator with no reputation metadata.
    pub fn manual(token: impl Into<String>, category_id: CategoryId, description: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            category_id,
            source: Source::Manual,
            description: description.into(),
            sub_type: None,
            reputation: Reputation::default(),
        }
    }
}

/// Result of one expiry sweep pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    pub removed: usize,
    pub categories_swept: usize,
}

impl MemoryStore {
    /// Insert an indicator. The token must be non-empty, not
    /// whitelisted, and not already tracked; the target category must
    /// exist. The kind is classified here, once. Emits `IndicatorAdded`
    /// best-effort on success.
    pub fn insert(&self, new: NewIndicator) -> Result<Indicator> {
        let token = validate_token(&new.token)?;

        let indicator = {
            let mut state = self.write();

            if !state.categories.contains_key(&new.category_id) {
                return Err(StoreError::unknown_category(new.category_id));
            }
            if state.whitelist.contains_key(&token) {
                return Err(StoreError::AlreadyWhitelisted { token });
            }
            if state.token_index.contains_key(&token) {
                return Err(StoreError::AlreadyExists { token });
            }

            let now = Utc::now();
            let indicator = Indicator {
                id: IndicatorId::new(),
                kind: classify(&token),
                token: token.clone(),
                category_id: new.category_id,
                source: new.source,
                sub_type: new.sub_type,
                description: new.description,
                reputation: new.reputation,
                added_at: now,
                last_modified_at: now,
            };
            state.token_index.insert(token, indicator.id);
            state.indicators.insert(indicator.id, indicator.clone());
            indicator
        };

        tracing::debug!(
            token = %indicator.token,
            kind = %indicator.kind,
            category = %indicator.category_id,
            source = %indicator.source,
            "Indicator inserted"
        );
        self.emit(EventPayload::IndicatorAdded {
            indicator_id: indicator.id,
            token: indicator.token.clone(),
            kind: indicator.kind,
            category_id: indicator.category_id,
            source: indicator.source,
        });

        Ok(indicator)
    }

    /// Delete by id. Idempotent: returns false when already gone.
    pub fn delete(&self, id: IndicatorId) -> bool {
        let mut state = self.write();
        match state.indicators.remove(&id) {
            Some(indicator) => {
                state.token_index.remove(&indicator.token);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: IndicatorId) -> Option<Indicator> {
        self.read().indicators.get(&id).cloned()
    }

    pub fn find_by_token(&self, token: &str) -> Option<Indicator> {
        let state = self.read();
        let id = state.token_index.get(token.trim())?;
        state.indicators.get(id).cloned()
    }

    /// Indicators in a category, newest first.
    pub fn list_by_category(&self, category_id: CategoryId) -> Vec<Indicator> {
        let state = self.read();
        let mut indicators: Vec<_> = state
            .indicators
            .values()
            .filter(|i| i.category_id == category_id)
            .cloned()
            .collect();
        indicators.sort_by(|a, b| b.added_at.cmp(&a.added_at));
        indicators
    }

    pub fn update_description(&self, id: IndicatorId, description: impl Into<String>) -> Result<Indicator> {
        let mut state = self.write();
        let indicator = state
            .indicators
            .get_mut(&id)
            .ok_or(StoreError::IndicatorNotFound(id))?;
        indicator.description = description.into();
        indicator.last_modified_at = Utc::now();
        Ok(indicator.clone())
    }

    /// Merge provider scores into the indicator's reputation record.
    /// Scores are additive across providers.
    pub fn set_reputation(&self, id: IndicatorId, reputation: &Reputation) -> Result<Indicator> {
        let mut state = self.write();
        let indicator = state
            .indicators
            .get_mut(&id)
            .ok_or(StoreError::IndicatorNotFound(id))?;
        indicator.reputation.merge_from(reputation);
        indicator.last_modified_at = Utc::now();
        Ok(indicator.clone())
    }

    /// Atomic bulk move of indicators into `target`. All-or-nothing: an
    /// unknown target or any missing id fails the whole batch and
    /// leaves the store unchanged. Returns the number moved; repeated
    /// ids in the batch count once.
    pub fn reassign(&self, ids: &[IndicatorId], target: CategoryId) -> Result<usize> {
        let unique: HashSet<IndicatorId> = ids.iter().copied().collect();

        let mut state = self.write();

        if !state.categories.contains_key(&target) {
            return Err(StoreError::unknown_category(target));
        }
        for id in &unique {
            if !state.indicators.contains_key(id) {
                return Err(StoreError::IndicatorNotFound(*id));
            }
        }

        let now = Utc::now();
        for id in &unique {
            // Presence was checked above; the lock is still held.
            if let Some(indicator) = state.indicators.get_mut(id) {
                indicator.category_id = target;
                indicator.last_modified_at = now;
            }
        }

        tracing::info!(moved = unique.len(), target = %target, "Indicators reassigned");
        Ok(unique.len())
    }

    /// Remaining TTL for an indicator under its category's policy.
    pub fn ttl(&self, indicator: &Indicator, now: DateTime<Utc>) -> Ttl {
        let expiration = self
            .read()
            .categories
            .get(&indicator.category_id)
            .and_then(|c| c.expiration_secs);
        remaining_ttl(indicator.added_at, expiration, now)
    }

    /// Tokens of a category fit for publication: not expired under the
    /// category's policy and not whitelisted, newest first.
    ///
    /// The whitelist filter is applied here even though inserts already
    /// reject whitelisted tokens: a backend that does not enforce the
    /// mutual-exclusion invariant (or a whitelist populated after the
    /// indicator existed) must still never leak into a published feed.
    pub fn publishable_tokens(&self, category_id: CategoryId, now: DateTime<Utc>) -> Vec<String> {
        let state = self.read();
        let expiration = state
            .categories
            .get(&category_id)
            .and_then(|c| c.expiration_secs);

        let mut indicators: Vec<_> = state
            .indicators
            .values()
            .filter(|i| i.category_id == category_id)
            .filter(|i| !remaining_ttl(i.added_at, expiration, now).is_expired())
            .filter(|i| !state.whitelist.contains_key(&i.token))
            .collect();
        indicators.sort_by(|a, b| b.added_at.cmp(&a.added_at));
        indicators.into_iter().map(|i| i.token.clone()).collect()
    }

    /// Remove expired indicators from every category with auto-cleanup
    /// enabled. Idempotent; advisory-only categories are never touched.
    /// Emits `IndicatorExpired` per removal and `SweepCompleted` when
    /// anything was removed.
    pub fn sweep_expired(&self, now: DateTime<Utc>) -> SweepOutcome {
        let started = std::time::Instant::now();
        let expired = {
            let mut state = self.write();

            let policies: Vec<(CategoryId, u32)> = state
                .categories
                .values()
                .filter(|c| c.cleanup_enabled())
                // cleanup_enabled guarantees the expiration is set
                .filter_map(|c| c.expiration_secs.map(|secs| (c.id, secs)))
                .collect();

            let mut expired = Vec::new();
            for (category_id, secs) in &policies {
                let doomed: Vec<_> = state
                    .indicators
                    .values()
                    .filter(|i| i.category_id == *category_id)
                    .filter(|i| remaining_ttl(i.added_at, Some(*secs), now).is_expired())
                    .map(|i| (i.id, i.token.clone()))
                    .collect();
                for (id, token) in doomed {
                    state.indicators.remove(&id);
                    state.token_index.remove(&token);
                    expired.push((id, token, *category_id));
                }
            }
            expired
        };

        let categories_swept = {
            let mut seen: Vec<CategoryId> = expired.iter().map(|(_, _, c)| *c).collect();
            seen.sort_by_key(|c| c.0);
            seen.dedup();
            seen.len()
        };

        for (id, token, category_id) in &expired {
            tracing::debug!(token = %token, category = %category_id, "Expired indicator removed");
            self.emit(EventPayload::IndicatorExpired {
                indicator_id: *id,
                token: token.clone(),
                category_id: *category_id,
            });
        }

        let outcome = SweepOutcome {
            removed: expired.len(),
            categories_swept,
        };
        if outcome.removed > 0 {
            self.emit(EventPayload::SweepCompleted {
                removed: outcome.removed as u32,
                categories_swept: outcome.categories_swept as u32,
                duration_ms: started.elapsed().as_millis() as u64,
            });
        }
        outcome
    }
}

/// Trim and validate an indicator token.
fn validate_token(token: &str) -> Result<String> {
    let token = token.trim();
    if token.is_empty() {
        return Err(StoreError::InvalidToken {
            reason: "token must not be empty".to_string(),
        });
    }
    if token.chars().any(char::is_whitespace) {
        return Err(StoreError::InvalidToken {
            reason: "token must not contain whitespace".to_string(),
        });
    }
    Ok(token.to_string())
}
