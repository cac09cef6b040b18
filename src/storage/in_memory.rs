//! In-memory resource store

use crate::core::error::StayError;
use crate::core::resource::Resource;
use crate::storage::ResourceStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Thread-safe in-memory store keyed by resource id
///
/// Cloning is cheap and shares the underlying map, so the same collection can
/// back several routers or embed hooks.
#[derive(Debug)]
pub struct InMemoryStore<T: Resource> {
    items: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Resource> Clone for InMemoryStore<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T: Resource> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Resource> InMemoryStore<T> {
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Synchronous copy of the collection, for embed and gating hooks that
    /// run inside another resource's handler
    pub fn snapshot(&self) -> Vec<T> {
        self.items
            .read()
            .map(|items| items.values().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl<T: Resource> ResourceStore<T> for InMemoryStore<T> {
    async fn create(&self, resource: T) -> Result<T, StayError> {
        let mut items = self
            .items
            .write()
            .map_err(|e| StayError::Storage(format!("lock poisoned: {}", e)))?;
        items.insert(resource.id(), resource.clone());
        Ok(resource)
    }

    async fn get(&self, id: Uuid) -> Result<Option<T>, StayError> {
        let items = self
            .items
            .read()
            .map_err(|e| StayError::Storage(format!("lock poisoned: {}", e)))?;
        Ok(items.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>, StayError> {
        let items = self
            .items
            .read()
            .map_err(|e| StayError::Storage(format!("lock poisoned: {}", e)))?;
        Ok(items.values().cloned().collect())
    }

    async fn update(&self, resource: T) -> Result<T, StayError> {
        let mut items = self
            .items
            .write()
            .map_err(|e| StayError::Storage(format!("lock poisoned: {}", e)))?;
        if !items.contains_key(&resource.id()) {
            return Err(StayError::not_found(
                T::resource_name_singular(),
                resource.id(),
            ));
        }
        items.insert(resource.id(), resource.clone());
        Ok(resource)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StayError> {
        let mut items = self
            .items
            .write()
            .map_err(|e| StayError::Storage(format!("lock poisoned: {}", e)))?;
        if items.remove(&id).is_none() {
            return Err(StayError::not_found(T::resource_name_singular(), id));
        }
        Ok(())
    }
}
