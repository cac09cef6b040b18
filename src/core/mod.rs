//! Core abstractions shared by the server, the transport shim and the console

pub mod error;
pub mod field;
pub mod pluralize;
pub mod query;
pub mod resource;
pub mod validation;

pub use error::{ErrorBody, FieldErrors, StayError, TransportError};
pub use field::FieldValue;
pub use query::{ListParams, PaginatedResponse, PaginationMeta};
pub use resource::{DEFAULT_DISPLAY_ORDER, Editable, Queryable, Resource, sort_for_display};
pub use validation::FormPayload;
