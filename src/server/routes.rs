//! Generic CRUD routes for a resource collection
//!
//! One route set per resource, mounted under `/api/{plural-name}`:
//!
//! - `GET    /api/{name}`       list (filters, optional pagination, `include`)
//! - `POST   /api/{name}`       create, 201 on success
//! - `GET    /api/{name}/{id}`  fetch one
//! - `PUT    /api/{name}/{id}`  full-field-set update
//! - `DELETE /api/{name}/{id}`  delete, 204, or 409 when dependents exist
//!
//! The handlers are generic over the resource type; per-resource behavior
//! (eager-load embeds, delete gating) is injected through [`ResourceState`]
//! hooks.

use crate::core::error::StayError;
use crate::core::query::{ListParams, PaginatedResponse, PaginationMeta};
use crate::core::resource::{Editable, Queryable, Resource, sort_for_display};
use crate::storage::ResourceStore;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Computes the related objects to merge into a serialized resource when the
/// client asks for eager loading
pub type EmbedHook<T> = Arc<dyn Fn(&T) -> serde_json::Map<String, Value> + Send + Sync>;

/// Counts records that still reference a resource, gating its deletion
///
/// Returns the dependent count and the plural name of the dependent resource.
pub type DependentsHook<T> = Arc<dyn Fn(&T) -> (usize, &'static str) + Send + Sync>;

/// Shared state for one resource's route set
pub struct ResourceState<T: Resource> {
    pub store: Arc<dyn ResourceStore<T>>,
    pub embed: Option<EmbedHook<T>>,
    pub dependents: Option<DependentsHook<T>>,
}

impl<T: Resource> Clone for ResourceState<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            embed: self.embed.clone(),
            dependents: self.dependents.clone(),
        }
    }
}

impl<T: Resource> ResourceState<T> {
    pub fn new(store: Arc<dyn ResourceStore<T>>) -> Self {
        Self {
            store,
            embed: None,
            dependents: None,
        }
    }

    pub fn with_embed(mut self, hook: EmbedHook<T>) -> Self {
        self.embed = Some(hook);
        self
    }

    pub fn with_dependents(mut self, hook: DependentsHook<T>) -> Self {
        self.dependents = Some(hook);
        self
    }

    fn serialize_one(&self, item: &T, include: bool) -> Result<Value, StayError>
    where
        T: Editable,
    {
        let mut value = serde_json::to_value(item)
            .map_err(|e| StayError::Internal(format!("serialization failed: {}", e)))?;
        if include {
            if let (Some(hook), Some(object)) = (&self.embed, value.as_object_mut()) {
                for (key, related) in hook(item) {
                    object.insert(key, related);
                }
            }
        }
        Ok(value)
    }
}

/// Build the five CRUD routes for a resource
pub fn resource_routes<T>(state: ResourceState<T>) -> Router
where
    T: Editable + Queryable,
{
    let base = format!("/api/{}", T::resource_name());
    let by_id = format!("{}/{{id}}", base);
    Router::new()
        .route(&base, get(list_resources::<T>).post(create_resource::<T>))
        .route(
            &by_id,
            get(get_resource::<T>)
                .put(update_resource::<T>)
                .delete(delete_resource::<T>),
        )
        .with_state(state)
}

async fn list_resources<T>(
    State(state): State<ResourceState<T>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, StayError>
where
    T: Editable + Queryable,
{
    let params = ListParams::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    let mut items = state.store.list().await?;

    if !params.filters.is_empty() {
        items.retain(|item| {
            params.filters.iter().all(|(field, query)| {
                item.field_value(field)
                    .is_some_and(|value| value.matches_query(query))
            })
        });
    }
    sort_for_display(&mut items);

    debug!(
        resource = T::resource_name(),
        count = items.len(),
        include = params.include,
        "listing resources"
    );

    // The pagination envelope is opt-in: plain arrays unless `page` was sent
    if params.page.is_some() {
        let page = params.page();
        let limit = params.limit();
        let meta = PaginationMeta::new(page, limit, items.len());
        let data = items
            .iter()
            .skip((page - 1).saturating_mul(limit))
            .take(limit)
            .map(|item| state.serialize_one(item, params.include))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Json(PaginatedResponse { data, pagination: meta }).into_response());
    }

    let data = items
        .iter()
        .map(|item| state.serialize_one(item, params.include))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(data).into_response())
}

async fn get_resource<T>(
    State(state): State<ResourceState<T>>,
    Path(id): Path<Uuid>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Response, StayError>
where
    T: Editable + Queryable,
{
    let params = ListParams::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    let item = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| StayError::not_found(T::resource_name_singular(), id))?;
    Ok(Json(state.serialize_one(&item, params.include)?).into_response())
}

async fn create_resource<T>(
    State(state): State<ResourceState<T>>,
    Json(payload): Json<T::Payload>,
) -> Result<Response, StayError>
where
    T: Editable + Queryable,
{
    let item = T::create_from(payload)?;
    let created = state.store.create(item).await?;
    debug!(
        resource = T::resource_name(),
        id = %created.id(),
        "created resource"
    );
    Ok((StatusCode::CREATED, Json(created)).into_response())
}

async fn update_resource<T>(
    State(state): State<ResourceState<T>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<T::Payload>,
) -> Result<Response, StayError>
where
    T: Editable + Queryable,
{
    let mut item = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| StayError::not_found(T::resource_name_singular(), id))?;
    item.apply(payload)?;
    let updated = state.store.update(item).await?;
    Ok(Json(updated).into_response())
}

async fn delete_resource<T>(
    State(state): State<ResourceState<T>>,
    Path(id): Path<Uuid>,
) -> Result<Response, StayError>
where
    T: Editable + Queryable,
{
    let item = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| StayError::not_found(T::resource_name_singular(), id))?;

    if let Some(hook) = &state.dependents {
        let (count, dependent_resource) = hook(&item);
        if count > 0 {
            return Err(StayError::Conflict {
                resource: T::resource_name_singular().to_string(),
                name: item.name().to_string(),
                dependents: count,
                dependent_resource: dependent_resource.to_string(),
            });
        }
    }

    state.store.delete(id).await?;
    debug!(resource = T::resource_name(), %id, "deleted resource");
    Ok(StatusCode::NO_CONTENT.into_response())
}
