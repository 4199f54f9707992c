//! Category operations: create, update, delete-with-migration, lookup.

use palisade_core::types::{Category, CategoryId};

use crate::error::{Result, StoreError};
use crate::memory::{CategoryPatch, CategorySpec, MemoryStore};

impl MemoryStore {
    /// Create a category from a spec. The slug must be non-empty and
    /// unique.
    pub fn create_category(&self, spec: CategorySpec) -> Result<Category> {
        let name = spec.name.trim().to_string();
        if name.is_empty() {
            return Err(StoreError::InvalidToken {
                reason: "category name must not be empty".to_string(),
            });
        }

        let mut state = self.write();
        if state.categories.values().any(|c| c.name == name) {
            return Err(StoreError::CategoryNameTaken { name });
        }

        let category = Category {
            id: CategoryId::new(),
            name,
            label: spec.label,
            description: spec.description,
            color: spec.color,
            icon: spec.icon,
            is_default: spec.is_default,
            is_active: true,
            expiration_secs: spec.expiration_secs,
            auto_cleanup: spec.auto_cleanup,
        };
        state.categories.insert(category.id, category.clone());

        tracing::info!(category = %category.name, id = %category.id, "Category created");
        Ok(category)
    }

    /// Apply a partial update. Identity fields (`name`, `is_default`)
    /// are not patchable.
    pub fn update_category(&self, id: CategoryId, patch: CategoryPatch) -> Result<Category> {
        let mut state = self.write();
        let category = state
            .categories
            .get_mut(&id)
            .ok_or_else(|| StoreError::unknown_category(id))?;

        if let Some(label) = patch.label {
            category.label = label;
        }
        if let Some(description) = patch.description {
            category.description = description;
        }
        if let Some(color) = patch.color {
            category.color = color;
        }
        if let Some(icon) = patch.icon {
            category.icon = icon;
        }
        if let Some(is_active) = patch.is_active {
            category.is_active = is_active;
        }
        if patch.clear_expiration {
            category.expiration_secs = None;
        } else if let Some(secs) = patch.expiration_secs {
            category.expiration_secs = Some(secs);
        }
        if let Some(auto_cleanup) = patch.auto_cleanup {
            category.auto_cleanup = auto_cleanup;
        }

        Ok(category.clone())
    }

    /// Delete a category. Its indicators are moved to `migrate_to` when
    /// given, otherwise deleted with it. Returns the number of
    /// indicators affected. The default category is protected.
    pub fn delete_category(
        &self,
        id: CategoryId,
        migrate_to: Option<CategoryId>,
    ) -> Result<usize> {
        let mut state = self.write();

        let category = state
            .categories
            .get(&id)
            .ok_or_else(|| StoreError::unknown_category(id))?;
        if category.is_default {
            return Err(StoreError::DefaultCategoryProtected {
                name: category.name.clone(),
            });
        }
        let name = category.name.clone();

        if let Some(target) = migrate_to {
            // The doomed category is still in the map at this point, so
            // a plain existence check would wave the self-migration
            // through and strand its indicators on a deleted id.
            if target == id {
                return Err(StoreError::InvalidToken {
                    reason: "cannot migrate indicators into the category being deleted"
                        .to_string(),
                });
            }
            if !state.categories.contains_key(&target) {
                return Err(StoreError::unknown_category(target));
            }
            let now = chrono::Utc::now();
            let mut moved = 0;
            for indicator in state.indicators.values_mut() {
                if indicator.category_id == id {
                    indicator.category_id = target;
                    indicator.last_modified_at = now;
                    moved += 1;
                }
            }
            state.categories.remove(&id);
            tracing::info!(category = %name, moved, target = %target, "Category deleted, indicators migrated");
            Ok(moved)
        } else {
            let doomed: Vec<_> = state
                .indicators
                .values()
                .filter(|i| i.category_id == id)
                .map(|i| (i.id, i.token.clone()))
                .collect();
            for (iid, token) in &doomed {
                state.indicators.remove(iid);
                state.token_index.remove(token);
            }
            state.categories.remove(&id);
            tracing::info!(category = %name, removed = doomed.len(), "Category deleted with indicators");
            Ok(doomed.len())
        }
    }

    /// All categories, ordered by slug.
    pub fn list_categories(&self) -> Vec<Category> {
        let state = self.read();
        let mut categories: Vec<_> = state.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        categories
    }

    pub fn category(&self, id: CategoryId) -> Option<Category> {
        self.read().categories.get(&id).cloned()
    }

    pub fn category_by_name(&self, name: &str) -> Option<Category> {
        self.read()
            .categories
            .values()
            .find(|c| c.name == name)
            .cloned()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A plain category spec for tests.
    pub(crate) fn spec(name: &str) -> CategorySpec {
        CategorySpec {
            name: name.to_string(),
            label: name.to_uppercase(),
            description: String::new(),
            color: "#607d8b".to_string(),
            icon: "shield".to_string(),
            is_default: false,
            expiration_secs: None,
            auto_cleanup: false,
        }
    }

    #[test]
    fn create_and_lookup() {
        let store = MemoryStore::new();
        let created = store.create_category(spec("botnets")).unwrap();

        assert_eq!(store.category(created.id).unwrap().name, "botnets");
        assert_eq!(store.category_by_name("botnets").unwrap().id, created.id);
        assert!(store.category_by_name("missing").is_none());
    }

    #[test]
    fn duplicate_slug_rejected() {
        let store = MemoryStore::new();
        store.create_category(spec("botnets")).unwrap();

        let result = store.create_category(spec("botnets"));
        assert!(matches!(result, Err(StoreError::CategoryNameTaken { .. })));
    }

    #[test]
    fn patch_preserves_identity() {
        let store = MemoryStore::new();
        let created = store.create_category(spec("scanners")).unwrap();

        let updated = store
            .update_category(
                created.id,
                CategoryPatch {
                    label: Some("Port scanners".to_string()),
                    is_active: Some(false),
                    expiration_secs: Some(7200),
                    auto_cleanup: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "scanners");
        assert_eq!(updated.label, "Port scanners");
        assert!(!updated.is_active);
        assert_eq!(updated.expiration_secs, Some(7200));
        assert!(updated.cleanup_enabled());
    }

    #[test]
    fn clear_expiration_wins_over_set() {
        let store = MemoryStore::new();
        let created = store.create_category(spec("tmp")).unwrap();

        let updated = store
            .update_category(
                created.id,
                CategoryPatch {
                    expiration_secs: Some(60),
                    clear_expiration: true,
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.expiration_secs, None);
    }

    #[test]
    fn delete_rejects_migration_into_itself() {
        use crate::indicators::NewIndicator;

        let store = MemoryStore::new();
        let doomed = store.create_category(spec("staging")).unwrap();
        let kept = store
            .insert(NewIndicator::manual("1.2.3.4", doomed.id, "probe host"))
            .unwrap();

        let result = store.delete_category(doomed.id, Some(doomed.id));
        assert!(matches!(result, Err(StoreError::InvalidToken { .. })));

        // Nothing was deleted or moved, and the token is still usable.
        assert!(store.category(doomed.id).is_some());
        assert_eq!(store.get(kept.id).unwrap().category_id, doomed.id);
        assert_eq!(store.list_by_category(doomed.id).len(), 1);
    }

    #[test]
    fn default_category_cannot_be_deleted() {
        let store = MemoryStore::new();
        let mut s = spec("sources");
        s.is_default = true;
        let created = store.create_category(s).unwrap();

        let result = store.delete_category(created.id, None);
        assert!(matches!(
            result,
            Err(StoreError::DefaultCategoryProtected { .. })
        ));
        assert!(store.category(created.id).is_some());
    }
}
