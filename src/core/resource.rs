//! Resource traits defining the common shape of every manageable entity
//!
//! Every back-office resource (destinations, hotel cards, landmarks, ...)
//! shares the same skeleton: an opaque immutable id, a required display name,
//! an optional display-order integer, and creation/update timestamps that are
//! display-only for the client. The traits below capture that shape plus the
//! two capabilities the rest of the crate needs: payload-based editing and
//! dynamic field access.

use crate::core::error::StayError;
use crate::core::field::FieldValue;
use crate::core::validation::FormPayload;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cmp::Ordering;
use uuid::Uuid;

/// Sort sentinel for resources without an explicit display order
pub const DEFAULT_DISPLAY_ORDER: i64 = 100;

/// Base trait for all manageable resources
pub trait Resource: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g. "hotel-cards")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g. "hotel-card")
    fn resource_name_singular() -> &'static str;

    /// Opaque unique identifier, immutable once created
    fn id(&self) -> Uuid;

    /// Display name (always required, never empty after validation)
    fn name(&self) -> &str;

    /// Display-order field; `None` sorts as [`DEFAULT_DISPLAY_ORDER`]
    fn order(&self) -> Option<i64>;

    /// Replace the display order (used by move up / move down)
    fn set_order(&mut self, order: Option<i64>);

    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> DateTime<Utc>;

    /// Update the `updated_at` timestamp to now
    fn touch(&mut self);

    /// Effective sort key for display ordering
    fn display_order(&self) -> i64 {
        self.order().unwrap_or(DEFAULT_DISPLAY_ORDER)
    }
}

/// Display comparison: ascending by order, ties broken by name
///
/// The name comparison is a plain byte-wise `str` comparison, matching the
/// default (case-sensitive) locale comparison the console has always used.
pub fn display_cmp<T: Resource>(a: &T, b: &T) -> Ordering {
    a.display_order()
        .cmp(&b.display_order())
        .then_with(|| a.name().cmp(b.name()))
}

/// Stable in-place display sort
pub fn sort_for_display<T: Resource>(items: &mut [T]) {
    items.sort_by(display_cmp);
}

/// Trait for resources that can be created and updated from a form payload
///
/// Updates have full-field-set PUT semantics: the payload carries every
/// editable field and `apply` replaces them wholesale (partial updates are
/// expressed by the caller spreading previous values over changed ones).
pub trait Editable: Resource + Serialize + DeserializeOwned {
    /// Editable fields only, no id or timestamps
    type Payload: FormPayload;

    /// Validate the payload and build a fresh entity from it
    fn create_from(payload: Self::Payload) -> Result<Self, StayError>;

    /// Validate the payload and replace all editable fields, touching
    /// `updated_at`
    fn apply(&mut self, payload: Self::Payload) -> Result<(), StayError>;

    /// Project the entity back into its editable payload (used to pre-populate
    /// edit forms and to re-rank without changing anything else)
    fn to_payload(&self) -> Self::Payload;
}

/// Trait for resources that expose fields dynamically
///
/// `field_value` powers server-side exact-match filter parameters and
/// client-side joins; `search_haystack` powers the free-text search of list
/// views.
pub trait Queryable: Resource {
    /// Get the value of a specific wire-format field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// The strings free-text search should match against
    fn search_haystack(&self) -> Vec<String> {
        vec![self.name().to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct Stub {
        id: Uuid,
        name: String,
        order: Option<i64>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }

    impl Stub {
        fn new(name: &str, order: Option<i64>) -> Self {
            let now = Utc::now();
            Self {
                id: Uuid::new_v4(),
                name: name.to_string(),
                order,
                created_at: now,
                updated_at: now,
            }
        }
    }

    impl Resource for Stub {
        fn resource_name() -> &'static str {
            "stubs"
        }
        fn resource_name_singular() -> &'static str {
            "stub"
        }
        fn id(&self) -> Uuid {
            self.id
        }
        fn name(&self) -> &str {
            &self.name
        }
        fn order(&self) -> Option<i64> {
            self.order
        }
        fn set_order(&mut self, order: Option<i64>) {
            self.order = order;
        }
        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }
        fn updated_at(&self) -> DateTime<Utc> {
            self.updated_at
        }
        fn touch(&mut self) {
            self.updated_at = Utc::now();
        }
    }

    #[test]
    fn test_missing_order_defaults_to_sentinel() {
        let stub = Stub::new("Riviera Suites", None);
        assert_eq!(stub.display_order(), DEFAULT_DISPLAY_ORDER);
    }

    #[test]
    fn test_sort_explicit_order_before_defaulted() {
        // Azur Palace (50) must render before Riviera Suites (null -> 100)
        let mut items = vec![
            Stub::new("Riviera Suites", None),
            Stub::new("Azur Palace", Some(50)),
        ];
        sort_for_display(&mut items);
        assert_eq!(items[0].name(), "Azur Palace");
        assert_eq!(items[1].name(), "Riviera Suites");
    }

    #[test]
    fn test_sort_ties_broken_by_name() {
        let mut items = vec![
            Stub::new("Zanzibar", Some(20)),
            Stub::new("Amalfi", Some(20)),
            Stub::new("Mykonos", Some(20)),
        ];
        sort_for_display(&mut items);
        let names: Vec<&str> = items.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["Amalfi", "Mykonos", "Zanzibar"]);
    }

    #[test]
    fn test_sort_is_non_decreasing_in_order() {
        let mut items = vec![
            Stub::new("d", None),
            Stub::new("a", Some(300)),
            Stub::new("b", Some(1)),
            Stub::new("c", Some(100)),
        ];
        sort_for_display(&mut items);
        let orders: Vec<i64> = items.iter().map(|s| s.display_order()).collect();
        let mut sorted = orders.clone();
        sorted.sort();
        assert_eq!(orders, sorted);
    }

    #[test]
    fn test_name_comparison_is_case_sensitive() {
        let mut items = vec![Stub::new("alpha", Some(1)), Stub::new("Beta", Some(1))];
        sort_for_display(&mut items);
        // Uppercase sorts before lowercase byte-wise
        assert_eq!(items[0].name(), "Beta");
    }
}
