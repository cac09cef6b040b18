//! Form payload validation
//!
//! Validation is local and field-scoped: each payload checks its own required
//! and bounded fields before anything reaches the network. Relational
//! integrity (a `cityId` pointing at an existing city) is deliberately NOT
//! validated here; it is deferred to the backing store and surfaced as a
//! submit-time error string.

pub mod validators;

use crate::core::error::FieldErrors;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Trait implemented by every resource's editable payload
///
/// A payload is draft-representable: every field a form may leave blank is an
/// `Option`, so `Default` yields a valid empty draft. Required-ness is
/// enforced by [`validate`](FormPayload::validate) at submit time, not by the
/// type.
pub trait FormPayload:
    Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// JSON wrapper key signalling the bulk shape (e.g. a `"labels"` array)
    const WRAPPER_KEY: &'static str;

    /// Full validation: required fields, numeric bounds and cross-field rules
    fn validate(&self) -> FieldErrors;

    /// Whether all *required* fields are present
    ///
    /// Bulk submission drops incomplete drafts instead of rejecting the whole
    /// batch, so this intentionally ignores bound and cross-field violations.
    fn is_complete(&self) -> bool;

    /// Name used when reporting a failed bulk item
    fn display_name(&self) -> &str;
}
