//! Typed error handling for the stayops back office
//!
//! Every error in the system falls into one of three user-facing families
//! (see the error contract of the REST API):
//!
//! - **Validation errors** are local and field-scoped. They block submission
//!   and carry a [`FieldErrors`] map serialized into `details.fields`.
//! - **Transport errors** are non-2xx HTTP responses surfaced as a single
//!   human-readable string taken from the response body's `error` field.
//! - **Integrity conflicts** are server-signaled refusals of a destructive
//!   action because dependent records exist. They answer with 409 and are an
//!   anticipated outcome, not a bug.
//!
//! Nothing here is fatal to the process: callers catch, display and retry.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Ordered field-keyed validation error map
///
/// Keys are the wire-format (camelCase) field names so the console can attach
/// each message to the offending input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for a field, keeping the first message on conflict
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(|s| s.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Client-side transport failures (see [`crate::client::ApiClient`])
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    /// The server answered with a non-2xx status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never produced a response
    #[error("request failed: {0}")]
    Network(String),
}

/// The main error type for the stayops back office
#[derive(Debug)]
pub enum StayError {
    /// Field-scoped validation failure, blocks submission
    Validation(FieldErrors),

    /// Resource lookup by id failed
    NotFound { resource: &'static str, id: Uuid },

    /// Destructive action refused because dependent records exist
    Conflict {
        resource: String,
        name: String,
        dependents: usize,
        dependent_resource: String,
    },

    /// HTTP-level failure reported by the transport shim
    Transport(TransportError),

    /// Storage backend failure
    Storage(String),

    /// Configuration loading or parsing failure
    Config(String),

    /// Internal errors that should not happen in normal operation
    Internal(String),
}

impl StayError {
    /// Shorthand for a single-field validation error
    pub fn missing_field(field: &str) -> Self {
        let mut errors = FieldErrors::new();
        errors.push(field, "is required");
        StayError::Validation(errors)
    }

    pub fn not_found(resource: &'static str, id: Uuid) -> Self {
        StayError::NotFound { resource, id }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            StayError::Validation(_) => StatusCode::BAD_REQUEST,
            StayError::NotFound { .. } => StatusCode::NOT_FOUND,
            StayError::Conflict { .. } => StatusCode::CONFLICT,
            StayError::Transport(TransportError::Status { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            StayError::Transport(TransportError::Network(_)) => StatusCode::BAD_GATEWAY,
            StayError::Storage(_) | StayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StayError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert to the wire-format error body
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            StayError::Validation(errors) => Some(serde_json::json!({ "fields": errors })),
            StayError::NotFound { resource, id } => Some(serde_json::json!({
                "resource": resource,
                "id": id.to_string(),
            })),
            StayError::Conflict { dependents, dependent_resource, .. } => {
                Some(serde_json::json!({
                    "dependents": dependents,
                    "dependentResource": dependent_resource,
                }))
            }
            _ => None,
        }
    }
}

impl fmt::Display for StayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StayError::Validation(errors) if errors.is_empty() => {
                write!(f, "validation failed")
            }
            StayError::Validation(errors) => write!(f, "validation failed: {}", errors),
            StayError::NotFound { resource, id } => {
                write!(f, "{} with id '{}' not found", resource, id)
            }
            StayError::Conflict { resource, name, dependents, dependent_resource } => {
                write!(
                    f,
                    "cannot delete {} '{}': {} {} still reference it",
                    resource, name, dependents, dependent_resource
                )
            }
            StayError::Transport(e) => write!(f, "{}", e),
            StayError::Storage(msg) => write!(f, "storage error: {}", msg),
            StayError::Config(msg) => write!(f, "configuration error: {}", msg),
            StayError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for StayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StayError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TransportError> for StayError {
    fn from(e: TransportError) -> Self {
        StayError::Transport(e)
    }
}

/// Error response body: `{ "error": string, "details"?: object }`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message
    pub error: String,

    /// Optional machine-readable details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for StayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_body());
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.push("name", "is required");
        errors.push("name", "something else");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("name"), Some("is required"));
    }

    #[test]
    fn test_field_errors_preserve_insertion_order() {
        let mut errors = FieldErrors::new();
        errors.push("starRating", "must be between 1 and 5");
        errors.push("basePricePerNight", "must be positive");
        let fields: Vec<&str> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["starRating", "basePricePerNight"]);
    }

    #[test]
    fn test_validation_status_code() {
        let err = StayError::missing_field("cityId");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let body = err.to_body();
        assert!(body.error.contains("cityId"));
        assert_eq!(
            body.details.expect("details")["fields"]["cityId"],
            "is required"
        );
    }

    #[test]
    fn test_not_found_status_code() {
        let err = StayError::not_found("destination", Uuid::new_v4());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_status_and_message() {
        let err = StayError::Conflict {
            resource: "accommodation-type".to_string(),
            name: "Villa".to_string(),
            dependents: 3,
            dependent_resource: "hotel-cards".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        let body = err.to_body();
        assert!(body.error.contains("Villa"));
        assert!(body.error.contains("3 hotel-cards"));
        assert_eq!(body.details.expect("details")["dependents"], 3);
    }

    #[test]
    fn test_transport_status_passthrough() {
        let err = StayError::Transport(TransportError::Status {
            status: 409,
            message: "blocked".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "blocked");
    }

    #[test]
    fn test_error_body_shape() {
        let err = StayError::Storage("lock poisoned".to_string());
        let json = serde_json::to_value(err.to_body()).expect("serialize");
        assert!(json["error"].as_str().expect("string").contains("lock poisoned"));
        assert!(json.get("details").is_none());
    }
}
