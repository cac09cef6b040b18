//! Console layer: the list/detail/form pattern the back office is built on
//!
//! Every resource screen is the same trio: a [`ListView`] over the loaded
//! collection, a [`ResourceForm`] for create/edit, and the shared
//! [`SelectionStore`] carrying cross-view selection. Relation reads go
//! through [`relations`] so legacy data shapes keep rendering.

pub mod form;
pub mod list_view;
pub mod relations;
pub mod store;

pub use form::{Debounce, FormMode, ResourceForm, SubmitOutcome};
pub use list_view::{FilterSet, ListView, MoveDirection, RangeFilter};
pub use relations::{
    PickerOption, RelationPicker, RelationShape, UNASSIGNED, city_options,
    destination_landmark_names, resolve_relation,
};
pub use store::SelectionStore;
