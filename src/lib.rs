//! # StayOps
//!
//! Back office for a hotel-booking marketplace: a typed resource model, a
//! REST API, and the console building blocks (lists, forms, selection) the
//! administrative screens are assembled from.
//!
//! ## Features
//!
//! - **Uniform Resource Model**: every manageable resource shares the same
//!   shape (UUID identity, display name, display order, timestamps), defined
//!   with the `impl_resource!` macro
//! - **Generic CRUD API**: one axum route set per resource with exact-match
//!   filters, eager loading (`?include=true`) and opt-in pagination
//! - **Delete Gating**: destructive actions are refused with 409 while
//!   dependent records exist
//! - **Three-Mode Forms**: single, bulk and raw-JSON editing over one
//!   canonical draft list
//! - **Client-Side Joins**: list views resolve relations through lookup
//!   tables and shape-tolerant fallbacks
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stayops::prelude::*;
//!
//! let stores = BackofficeStores::new();
//! let app = backoffice_router(&stores);
//! stayops::server::serve(app, "127.0.0.1:3000").await?;
//! ```

pub mod client;
pub mod config;
pub mod console;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        DEFAULT_DISPLAY_ORDER, Editable, ErrorBody, FieldErrors, FieldValue, FormPayload,
        ListParams, PaginatedResponse, PaginationMeta, Queryable, Resource, StayError,
        TransportError, sort_for_display,
    };

    // === Macros ===
    pub use crate::impl_resource;

    // === Entities ===
    pub use crate::entities::{
        AccommodationType, Address, City, Country, Destination, HotelAmenity, HotelCard,
        HotelHighlight, Label, Landmark,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryStore, ResourceStore};

    // === Server ===
    pub use crate::server::{BackofficeStores, ResourceState, ServerBuilder, backoffice_router};

    // === Client & Console ===
    pub use crate::client::{ApiClient, BulkOutcome, ListPage};
    pub use crate::console::{
        FilterSet, FormMode, ListView, RelationPicker, ResourceForm, SelectionStore,
    };

    // === Config ===
    pub use crate::config::StayConfig;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
