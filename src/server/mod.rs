//! HTTP server for the back-office REST API

pub mod backoffice;
pub mod builder;
pub mod routes;

pub use backoffice::{BackofficeStores, backoffice_router};
pub use builder::{ServerBuilder, serve};
pub use routes::{DependentsHook, EmbedHook, ResourceState, resource_routes};
