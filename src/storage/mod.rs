//! Storage abstraction for resource collections
//!
//! Handlers talk to a [`ResourceStore`] trait object so the HTTP layer stays
//! independent of where resources actually live. The shipped backend is
//! in-memory; a persistent backend only has to implement the trait.

mod in_memory;

pub use in_memory::InMemoryStore;

use crate::core::error::StayError;
use crate::core::resource::{Queryable, Resource};
use async_trait::async_trait;
use uuid::Uuid;

/// CRUD operations over a single resource collection
#[async_trait]
pub trait ResourceStore<T: Resource>: Send + Sync {
    /// Insert a new resource
    async fn create(&self, resource: T) -> Result<T, StayError>;

    /// Fetch a resource by id
    async fn get(&self, id: Uuid) -> Result<Option<T>, StayError>;

    /// Fetch every resource in the collection
    async fn list(&self) -> Result<Vec<T>, StayError>;

    /// Replace an existing resource; fails with `NotFound` when absent
    async fn update(&self, resource: T) -> Result<T, StayError>;

    /// Remove a resource by id; fails with `NotFound` when absent
    async fn delete(&self, id: Uuid) -> Result<(), StayError>;

    /// Fetch every resource whose field matches the given query value
    async fn find_by_field(&self, field: &str, query: &str) -> Result<Vec<T>, StayError>
    where
        T: Queryable,
    {
        let mut items = self.list().await?;
        items.retain(|item| {
            item.field_value(field)
                .is_some_and(|value| value.matches_query(query))
        });
        Ok(items)
    }
}
