//! In-memory fragment store.

use async_trait::async_trait;
use serde_json::Value;
use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use campex_core::{
    application::{ApplicationError, ports::FragmentStore},
    domain::FragmentCategory,
    error::ExportResult,
};

/// Thread-safe in-memory fragment store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFragmentStore {
    inner: Arc<RwLock<HashMap<(FragmentCategory, String), Value>>>,
}

impl InMemoryFragmentStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a fragment.
    pub fn insert(
        &self,
        category: FragmentCategory,
        name: impl Into<String>,
        document: Value,
    ) -> ExportResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.insert((category, name.into()), document);
        Ok(())
    }

    /// Builder-style insert for fixtures.
    pub fn with(self, category: FragmentCategory, name: &str, document: Value) -> Self {
        {
            let mut inner = self.inner.write().unwrap();
            inner.insert((category, name.to_string()), document);
        }
        self
    }

    /// Get the number of fragments.
    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    /// Check if store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl FragmentStore for InMemoryFragmentStore {
    async fn load(&self, category: FragmentCategory, name: &str) -> ExportResult<Option<Value>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.get(&(category, name.to_string())).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_and_load() {
        let store = InMemoryFragmentStore::new();
        store
            .insert(FragmentCategory::Colors, "dark", json!({ "colors": {} }))
            .unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.load(FragmentCategory::Colors, "dark").await.unwrap().is_some());
        assert!(store.load(FragmentCategory::Fonts, "dark").await.unwrap().is_none());
    }
}
