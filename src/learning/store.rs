//! Progress persistence layer
//!
//! Keyed by (user id, module id). The in-memory store stands in for the
//! browser key-value store the learning pages write to.

use crate::models::ModuleProgress;
use crate::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Read-modify-write step applied by `ProgressStore::update`.
pub type ProgressUpdate<'a> =
    &'a (dyn Fn(Option<ModuleProgress>) -> Result<ModuleProgress> + Send + Sync);

/// Trait for learning progress persistence
#[async_trait::async_trait]
pub trait ProgressStore: Send + Sync {
    async fn load(&self, user_id: &str, module_id: u32) -> Result<Option<ModuleProgress>>;

    /// Apply `apply` to the stored record and persist its output as one
    /// step. Nothing is written when `apply` fails.
    async fn update(
        &self,
        user_id: &str,
        module_id: u32,
        apply: ProgressUpdate<'_>,
    ) -> Result<ModuleProgress>;
}

/// Storage key in the form the web client uses.
pub fn progress_key(user_id: &str, module_id: u32) -> String {
    format!("user-{}-module-{}-progress", user_id, module_id)
}

/// In-memory progress store for development and tests
pub struct InMemoryProgressStore {
    entries: Arc<RwLock<HashMap<String, ModuleProgress>>>,
}

impl InMemoryProgressStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryProgressStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ProgressStore for InMemoryProgressStore {
    async fn load(&self, user_id: &str, module_id: u32) -> Result<Option<ModuleProgress>> {
        let entries = self.entries.read().await;
        Ok(entries.get(&progress_key(user_id, module_id)).copied())
    }

    async fn update(
        &self,
        user_id: &str,
        module_id: u32,
        apply: ProgressUpdate<'_>,
    ) -> Result<ModuleProgress> {
        let key = progress_key(user_id, module_id);
        let mut entries = self.entries.write().await;
        let updated = apply(entries.get(&key).copied())?;
        entries.insert(key, updated);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn put(store: &InMemoryProgressStore, user_id: &str, module_id: u32, progress: ModuleProgress) {
        let overwrite = move |_: Option<ModuleProgress>| -> Result<ModuleProgress> { Ok(progress) };
        store.update(user_id, module_id, &overwrite).await.unwrap();
    }

    #[test]
    fn test_progress_key_format() {
        assert_eq!(progress_key("currentUser", 1), "user-currentUser-module-1-progress");
    }

    #[test]
    fn test_users_do_not_share_progress() {
        let store = InMemoryProgressStore::new();
        let progress = ModuleProgress::from_cursor(1, 8);

        tokio_test::block_on(put(&store, "asha", 1, progress));
        assert_eq!(tokio_test::block_on(store.load("asha", 1)).unwrap(), Some(progress));
        assert_eq!(tokio_test::block_on(store.load("ravi", 1)).unwrap(), None);
    }

    #[tokio::test]
    async fn test_stored_record_loads_back() {
        let store = InMemoryProgressStore::new();
        let progress = ModuleProgress {
            progress_percent: 50,
            current_step: 2,
            completed_steps: 2,
        };

        put(&store, "u1", 2, progress).await;
        assert_eq!(store.load("u1", 2).await.unwrap(), Some(progress));
    }

    #[tokio::test]
    async fn test_update_sees_previous_record() {
        let store = InMemoryProgressStore::new();
        put(&store, "u1", 1, ModuleProgress::from_cursor(3, 8)).await;

        let updated = store
            .update("u1", 1, &|previous: Option<ModuleProgress>| {
                let cursor = previous.map(|p| p.current_step).unwrap_or(0) + 1;
                Ok(ModuleProgress::from_cursor(cursor, 8))
            })
            .await
            .unwrap();

        assert_eq!(updated.current_step, 4);
        assert_eq!(store.load("u1", 1).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_failed_update_writes_nothing() {
        let store = InMemoryProgressStore::new();
        let result = store
            .update("u1", 1, &|_: Option<ModuleProgress>| -> Result<ModuleProgress> {
                Err(crate::error::AppError::invalid("rejected"))
            })
            .await;

        assert!(result.is_err());
        assert_eq!(store.load("u1", 1).await.unwrap(), None);
    }
}
