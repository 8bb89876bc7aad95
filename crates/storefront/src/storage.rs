//! Visitor-scoped storage backed by the session.
//!
//! Each value is kept as a JSON string under its key, so the session holds
//! exactly what a browser's local storage would for this origin.

use bookverse_core::{KeyValueStore, StorageError};
use tower_sessions::Session;

/// A [`KeyValueStore`] over the visitor's session.
#[derive(Debug, Clone)]
pub struct BrowserStorage(Session);

impl BrowserStorage {
    /// Wrap a session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    /// The underlying session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.0
    }
}

impl KeyValueStore for BrowserStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.get::<String>(key).await.map_err(StorageError::backend)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.0.insert(key, value).await.map_err(StorageError::backend)
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.0
            .remove_value(key)
            .await
            .map(|_| ())
            .map_err(StorageError::backend)
    }

    /// Issue a new session id; the old cookie stops resolving.
    async fn rotate(&self) -> Result<(), StorageError> {
        self.0.cycle_id().await.map_err(StorageError::backend)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn storage() -> BrowserStorage {
        let store = Arc::new(tower_sessions::MemoryStore::default());
        BrowserStorage::new(Session::new(None, store, None))
    }

    #[tokio::test]
    async fn test_values_round_trip_through_session() {
        let storage = storage();
        storage.set("auth_token", "mock-jwt-token".to_string()).await.unwrap();

        assert_eq!(
            storage.get("auth_token").await.unwrap().as_deref(),
            Some("mock-jwt-token")
        );

        storage.remove("auth_token").await.unwrap();
        assert!(storage.get("auth_token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rotate_issues_new_id_and_keeps_values() {
        let store = Arc::new(tower_sessions::MemoryStore::default());
        let session = Session::new(None, store.clone(), None);
        let storage = BrowserStorage::new(session.clone());
        storage.set("bookstore_cart", "[]".to_string()).await.unwrap();
        session.save().await.unwrap();
        let old_id = session.id().unwrap();

        storage.rotate().await.unwrap();
        session.save().await.unwrap();

        let new_id = session.id().unwrap();
        assert_ne!(old_id, new_id);
        assert_eq!(
            storage.get("bookstore_cart").await.unwrap().as_deref(),
            Some("[]")
        );
        let reopened = Session::new(Some(old_id), store, None);
        assert!(reopened.get::<String>("bookstore_cart").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_missing_key_is_ok() {
        let storage = storage();
        assert!(storage.remove("bookstore_cart").await.is_ok());
    }
}
