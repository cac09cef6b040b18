//! Resource forms: single, bulk and raw-JSON editing modes
//!
//! The structured draft list is the single source of truth. The JSON text is
//! a derived view: regenerated after every structured edit, parsed back and
//! replacing the drafts on JSON edits. A JSON parse failure raises an
//! invalid flag that blocks submission but never destroys the last valid
//! structured state.

use crate::client::{ApiClient, BulkOutcome};
use crate::core::error::{FieldErrors, StayError};
use crate::core::resource::Editable;
use crate::core::validation::FormPayload;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::warn;
use uuid::Uuid;

/// Editing mode of a [`ResourceForm`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Single,
    Bulk,
    Json,
}

/// What a successful submit produced
#[derive(Debug)]
pub enum SubmitOutcome<T> {
    Created(T),
    Updated(T),
    Bulk(BulkOutcome<T>),
}

/// Trailing-edge debounce for expensive revalidation while typing
///
/// `touch()` on every keystroke; `should_fire()` turns true once the delay
/// has elapsed since the last touch.
#[derive(Debug, Clone)]
pub struct Debounce {
    delay: Duration,
    last_touch: Option<Instant>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_touch: None,
        }
    }

    pub fn touch(&mut self) {
        self.last_touch = Some(Instant::now());
    }

    pub fn should_fire(&self) -> bool {
        self.last_touch
            .is_some_and(|touched| touched.elapsed() >= self.delay)
    }

    pub fn reset(&mut self) {
        self.last_touch = None;
    }
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}

/// Form state for creating or editing resources of one type
pub struct ResourceForm<T: Editable> {
    pub mode: FormMode,
    drafts: Vec<T::Payload>,

    /// Id of the entity being edited; `None` for create forms
    editing: Option<Uuid>,

    json_text: String,
    json_invalid: bool,

    /// One error map per draft, aligned by index
    pub errors: Vec<FieldErrors>,

    /// Submit-time server error, shown until the next attempt
    pub submit_error: Option<String>,

    pub submitting: bool,
    bulk_enabled: bool,
    pub debounce: Debounce,
}

impl<T: Editable> Default for ResourceForm<T> {
    fn default() -> Self {
        Self::create()
    }
}

impl<T: Editable> ResourceForm<T> {
    /// A create form with one blank draft
    pub fn create() -> Self {
        let mut form = Self {
            mode: FormMode::Single,
            drafts: vec![T::Payload::default()],
            editing: None,
            json_text: String::new(),
            json_invalid: false,
            errors: vec![FieldErrors::new()],
            submit_error: None,
            submitting: false,
            bulk_enabled: false,
            debounce: Debounce::default(),
        };
        form.regenerate_json();
        form
    }

    /// A create form that also offers the bulk mode
    pub fn with_bulk() -> Self {
        let mut form = Self::create();
        form.bulk_enabled = true;
        form
    }

    /// An edit form pre-populated from an existing entity
    pub fn edit(entity: &T) -> Self {
        let mut form = Self::create();
        form.editing = Some(entity.id());
        form.drafts = vec![entity.to_payload()];
        form.errors = vec![FieldErrors::new()];
        form.regenerate_json();
        form
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn bulk_enabled(&self) -> bool {
        self.bulk_enabled
    }

    pub fn drafts(&self) -> &[T::Payload] {
        &self.drafts
    }

    pub fn json_text(&self) -> &str {
        &self.json_text
    }

    pub fn json_invalid(&self) -> bool {
        self.json_invalid
    }

    /// Switch editing mode
    ///
    /// Entering JSON mode regenerates the text from the structured drafts.
    /// Leaving JSON mode with invalid text falls back to the last valid
    /// drafts and clears the invalid flag.
    pub fn set_mode(&mut self, mode: FormMode) {
        if mode == self.mode {
            return;
        }
        // The drafts are authoritative in every mode transition: the JSON
        // view is rebuilt from them, discarding any unparseable text.
        self.json_invalid = false;
        self.regenerate_json();
        self.mode = mode;
    }

    /// Mutate one draft in place; the JSON view follows
    pub fn update_draft(&mut self, index: usize, edit: impl FnOnce(&mut T::Payload)) {
        if let Some(draft) = self.drafts.get_mut(index) {
            edit(draft);
            self.debounce.touch();
            self.regenerate_json();
        }
    }

    /// Append a blank draft (bulk mode)
    pub fn add_draft(&mut self) {
        self.drafts.push(T::Payload::default());
        self.errors.push(FieldErrors::new());
        self.regenerate_json();
    }

    /// Remove a draft, never going below one
    pub fn remove_draft(&mut self, index: usize) {
        if self.drafts.len() > 1 && index < self.drafts.len() {
            self.drafts.remove(index);
            if index < self.errors.len() {
                self.errors.remove(index);
            }
            self.regenerate_json();
        }
    }

    /// Replace the JSON text with user input and try to parse it back
    ///
    /// Accepted shapes: a single object, an array of objects, or an object
    /// wrapped under the resource's plural key
    /// (e.g. `{ "labels": [ ... ] }`). Parse failures keep the text, raise
    /// the invalid flag and leave the structured drafts untouched.
    pub fn apply_json_edit(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.json_text = text.clone();

        match Self::parse_drafts(&text) {
            Some(drafts) if !drafts.is_empty() => {
                self.errors = drafts.iter().map(|_| FieldErrors::new()).collect();
                self.drafts = drafts;
                self.json_invalid = false;
            }
            _ => {
                self.json_invalid = true;
            }
        }
    }

    fn parse_drafts(text: &str) -> Option<Vec<T::Payload>> {
        let value: Value = serde_json::from_str(text).ok()?;
        let list = match value {
            Value::Array(items) => items,
            Value::Object(mut object) => match object.remove(T::Payload::WRAPPER_KEY) {
                Some(Value::Array(items)) => items,
                Some(_) => return None,
                None => vec![Value::Object(object)],
            },
            _ => return None,
        };
        list.into_iter()
            .map(|item| serde_json::from_value(item).ok())
            .collect()
    }

    fn regenerate_json(&mut self) {
        let rendered = if self.drafts.len() == 1 {
            serde_json::to_string_pretty(&self.drafts[0])
        } else {
            serde_json::to_string_pretty(
                &serde_json::json!({ (T::Payload::WRAPPER_KEY): self.drafts }),
            )
        };
        match rendered {
            Ok(text) => self.json_text = text,
            Err(e) => warn!(error = %e, "draft serialization failed"),
        }
    }

    /// Validate every draft, refreshing the per-draft error maps
    ///
    /// Returns true when all drafts are clean.
    pub fn validate(&mut self) -> bool {
        self.errors = self.drafts.iter().map(|draft| draft.validate()).collect();
        self.debounce.reset();
        self.errors.iter().all(|errors| errors.is_empty())
    }

    /// Run validation if the debounce delay has elapsed since the last edit
    pub fn validate_debounced(&mut self) -> bool {
        if self.debounce.should_fire() {
            self.validate();
            return true;
        }
        false
    }

    /// Whether submit should be offered
    ///
    /// In bulk mode incomplete drafts are tolerated (they are filtered at
    /// submit time) as long as at least one draft is complete.
    pub fn can_submit(&self) -> bool {
        if self.submitting || self.json_invalid {
            return false;
        }
        if self.drafts.len() > 1 {
            return self.drafts.iter().any(|draft| draft.is_complete());
        }
        self.drafts
            .first()
            .map(|draft| draft.validate().is_empty())
            .unwrap_or(false)
    }

    /// Submit the form
    ///
    /// Single-draft create forms POST the draft; edit forms PUT it; multiple
    /// drafts are bulk-created with incomplete drafts filtered out. Failures
    /// land in `submit_error` and leave all form state recoverable.
    pub async fn submit(&mut self, client: &ApiClient) -> Result<SubmitOutcome<T>, StayError> {
        if self.json_invalid {
            self.submit_error = Some("invalid JSON".to_string());
            return Err(StayError::Internal("invalid JSON".to_string()));
        }
        if !self.validate() && self.drafts.len() == 1 {
            let errors = self.errors.first().cloned().unwrap_or_default();
            return Err(StayError::Validation(errors));
        }

        self.submitting = true;
        self.submit_error = None;

        let result = if let Some(id) = self.editing {
            client
                .update::<T>(id, &self.drafts[0])
                .await
                .map(SubmitOutcome::Updated)
                .map_err(StayError::from)
        } else if self.drafts.len() > 1 {
            let complete: Vec<T::Payload> = self
                .drafts
                .iter()
                .filter(|draft| draft.is_complete())
                .cloned()
                .collect();
            Ok(SubmitOutcome::Bulk(client.create_bulk::<T>(complete).await))
        } else {
            client
                .create::<T>(&self.drafts[0])
                .await
                .map(SubmitOutcome::Created)
                .map_err(StayError::from)
        };

        self.submitting = false;
        if let Err(e) = &result {
            self.submit_error = Some(e.to_string());
        }
        result
    }
}
