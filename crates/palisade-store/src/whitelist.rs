//! Whitelist operations.
//!
//! A whitelisted token may never simultaneously exist as an indicator;
//! insertion into either store checks the other and rejects on conflict.

use chrono::Utc;

use palisade_core::classify;
use palisade_core::types::WhitelistEntry;

use crate::error::{Result, StoreError};
use crate::memory::MemoryStore;

impl MemoryStore {
    /// Add a protected token. Rejects tokens currently tracked as
    /// indicators and duplicate entries.
    pub fn add_whitelist_entry(
        &self,
        token: &str,
        description: impl Into<String>,
    ) -> Result<WhitelistEntry> {
        let token = token.trim();
        if token.is_empty() {
            return Err(StoreError::InvalidToken {
                reason: "token must not be empty".to_string(),
            });
        }

        let mut state = self.write();
        if state.token_index.contains_key(token) {
            return Err(StoreError::TokenIsIndicator {
                token: token.to_string(),
            });
        }
        if state.whitelist.contains_key(token) {
            return Err(StoreError::WhitelistEntryExists {
                token: token.to_string(),
            });
        }

        let entry = WhitelistEntry {
            token: token.to_string(),
            kind: classify(token),
            description: description.into(),
            added_at: Utc::now(),
        };
        state.whitelist.insert(entry.token.clone(), entry.clone());

        tracing::info!(token = %entry.token, "Whitelist entry added");
        Ok(entry)
    }

    /// Remove a protected token. Returns false when absent.
    pub fn remove_whitelist_entry(&self, token: &str) -> bool {
        self.write().whitelist.remove(token.trim()).is_some()
    }

    /// All whitelist entries, ordered by token.
    pub fn list_whitelist(&self) -> Vec<WhitelistEntry> {
        self.read().whitelist.values().cloned().collect()
    }

    pub fn is_whitelisted(&self, token: &str) -> bool {
        self.read().whitelist.contains_key(token.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::tests::spec;
    use crate::indicators::NewIndicator;
    use palisade_core::classify::Kind;

    #[test]
    fn add_and_list() {
        let store = MemoryStore::new();
        store.add_whitelist_entry("10.0.0.1", "gateway").unwrap();
        store.add_whitelist_entry("dc01.corp.example", "domain controller").unwrap();

        let listed = store.list_whitelist();
        assert_eq!(listed.len(), 2);
        // Ordered by token.
        assert_eq!(listed[0].token, "10.0.0.1");
        assert_eq!(listed[0].kind, Kind::Ip);
        assert_eq!(listed[1].kind, Kind::Fqdn);
        assert!(store.is_whitelisted("10.0.0.1"));
    }

    #[test]
    fn duplicate_entry_rejected() {
        let store = MemoryStore::new();
        store.add_whitelist_entry("10.0.0.1", "").unwrap();

        let result = store.add_whitelist_entry("10.0.0.1", "");
        assert!(matches!(result, Err(StoreError::WhitelistEntryExists { .. })));
    }

    #[test]
    fn existing_indicator_blocks_whitelisting() {
        let store = MemoryStore::new();
        let category = store.create_category(spec("malware")).unwrap();
        store
            .insert(NewIndicator::manual("1.2.3.4", category.id, ""))
            .unwrap();

        let result = store.add_whitelist_entry("1.2.3.4", "");
        assert!(matches!(result, Err(StoreError::TokenIsIndicator { .. })));
    }

    #[test]
    fn remove_is_idempotent() {
        let store = MemoryStore::new();
        store.add_whitelist_entry("10.0.0.1", "").unwrap();

        assert!(store.remove_whitelist_entry("10.0.0.1"));
        assert!(!store.remove_whitelist_entry("10.0.0.1"));
        assert!(!store.is_whitelisted("10.0.0.1"));
    }
}
