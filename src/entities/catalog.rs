//! Catalog resources: destinations, landmarks and accommodation types

use crate::core::error::{FieldErrors, StayError};
use crate::core::field::FieldValue;
use crate::core::resource::{Editable, Queryable, Resource};
use crate::core::validation::FormPayload;
use crate::core::validation::validators::{check_in_list, require_non_empty};
use crate::impl_resource;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed label set for destination types
pub const DESTINATION_TYPES: &[&str] = &["City", "Beach", "Mountain", "Countryside"];

/// Fixed label set for landmark types
pub const LANDMARK_TYPES: &[&str] = &["Monument", "Museum", "Park", "Nature"];

impl_resource!(
    /// A point of interest travellers search for.
    Landmark, "landmark",
    {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        /// One of [`LANDMARK_TYPES`]
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        landmark_type: Option<String>,
    }
);

/// Editable fields of a [`Landmark`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LandmarkPayload {
    pub name: String,
    pub order: Option<i64>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub landmark_type: Option<String>,
}

impl FormPayload for LandmarkPayload {
    const WRAPPER_KEY: &'static str = "landmarks";

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_non_empty(&mut errors, "name", &self.name);
        if let Some(landmark_type) = &self.landmark_type {
            check_in_list(&mut errors, "type", landmark_type, LANDMARK_TYPES);
        }
        errors
    }

    fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Editable for Landmark {
    type Payload = LandmarkPayload;

    fn create_from(payload: LandmarkPayload) -> Result<Self, StayError> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(StayError::Validation(errors));
        }
        Ok(Landmark::new(
            payload.name,
            payload.order,
            payload.description,
            payload.landmark_type,
        ))
    }

    fn apply(&mut self, payload: LandmarkPayload) -> Result<(), StayError> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(StayError::Validation(errors));
        }
        self.name = payload.name;
        self.order = payload.order;
        self.description = payload.description;
        self.landmark_type = payload.landmark_type;
        self.touch();
        Ok(())
    }

    fn to_payload(&self) -> LandmarkPayload {
        LandmarkPayload {
            name: self.name.clone(),
            order: self.order,
            description: self.description.clone(),
            landmark_type: self.landmark_type.clone(),
        }
    }
}

impl Queryable for Landmark {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => Some(FieldValue::String(self.name.clone())),
            "type" => Some(
                self.landmark_type
                    .clone()
                    .map(FieldValue::String)
                    .unwrap_or(FieldValue::Null),
            ),
            _ => None,
        }
    }

    fn search_haystack(&self) -> Vec<String> {
        let mut haystack = vec![self.name.clone()];
        haystack.extend(self.description.clone());
        haystack.extend(self.landmark_type.clone());
        haystack
    }
}

/// Join row linking a destination to a landmark
///
/// Older destination documents carry a direct `landmarks` array, newer ones
/// carry these join rows (optionally with the landmark embedded). Both shapes
/// coexist in stored data; see [`crate::console::relations`] for the read
/// path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationLandmark {
    pub id: Uuid,
    pub landmark_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmark: Option<Landmark>,
}

impl_resource!(
    /// A curated destination hotels are grouped under.
    Destination, "destination",
    {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        /// One of [`DESTINATION_TYPES`]
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        category: Option<String>,
        /// Legacy direct relation shape
        #[serde(default, skip_serializing_if = "Option::is_none")]
        landmarks: Option<Vec<Landmark>>,
        /// Join-table relation shape
        #[serde(default, skip_serializing_if = "Option::is_none")]
        destination_landmarks: Option<Vec<DestinationLandmark>>,
    }
);

/// Editable fields of a [`Destination`]
///
/// The landmark relations are read shapes maintained elsewhere; the form does
/// not edit them, so they are absent here and preserved by `apply`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DestinationPayload {
    pub name: String,
    pub order: Option<i64>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<String>,
}

impl FormPayload for DestinationPayload {
    const WRAPPER_KEY: &'static str = "destinations";

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_non_empty(&mut errors, "name", &self.name);
        if let Some(category) = &self.category {
            check_in_list(&mut errors, "type", category, DESTINATION_TYPES);
        }
        errors
    }

    fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Editable for Destination {
    type Payload = DestinationPayload;

    fn create_from(payload: DestinationPayload) -> Result<Self, StayError> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(StayError::Validation(errors));
        }
        Ok(Destination::new(
            payload.name,
            payload.order,
            payload.description,
            payload.category,
            None,
            None,
        ))
    }

    fn apply(&mut self, payload: DestinationPayload) -> Result<(), StayError> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(StayError::Validation(errors));
        }
        self.name = payload.name;
        self.order = payload.order;
        self.description = payload.description;
        self.category = payload.category;
        self.touch();
        Ok(())
    }

    fn to_payload(&self) -> DestinationPayload {
        DestinationPayload {
            name: self.name.clone(),
            order: self.order,
            description: self.description.clone(),
            category: self.category.clone(),
        }
    }
}

impl Queryable for Destination {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => Some(FieldValue::String(self.name.clone())),
            "type" => Some(
                self.category
                    .clone()
                    .map(FieldValue::String)
                    .unwrap_or(FieldValue::Null),
            ),
            _ => None,
        }
    }

    fn search_haystack(&self) -> Vec<String> {
        let mut haystack = vec![self.name.clone()];
        haystack.extend(self.description.clone());
        haystack.extend(self.category.clone());
        haystack
    }
}

impl_resource!(
    /// How a property is categorized (hotel, villa, apartment, ...).
    AccommodationType, "accommodation-type",
    {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
    }
);

/// Editable fields of an [`AccommodationType`]
///
/// The associated-hotel count is server-computed and display-only; it never
/// appears in the payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccommodationTypePayload {
    pub name: String,
    pub order: Option<i64>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl FormPayload for AccommodationTypePayload {
    const WRAPPER_KEY: &'static str = "accommodationTypes";

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_non_empty(&mut errors, "name", &self.name);
        errors
    }

    fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Editable for AccommodationType {
    type Payload = AccommodationTypePayload;

    fn create_from(payload: AccommodationTypePayload) -> Result<Self, StayError> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(StayError::Validation(errors));
        }
        Ok(AccommodationType::new(
            payload.name,
            payload.order,
            payload.description,
            payload.icon,
        ))
    }

    fn apply(&mut self, payload: AccommodationTypePayload) -> Result<(), StayError> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(StayError::Validation(errors));
        }
        self.name = payload.name;
        self.order = payload.order;
        self.description = payload.description;
        self.icon = payload.icon;
        self.touch();
        Ok(())
    }

    fn to_payload(&self) -> AccommodationTypePayload {
        AccommodationTypePayload {
            name: self.name.clone(),
            order: self.order,
            description: self.description.clone(),
            icon: self.icon.clone(),
        }
    }
}

impl Queryable for AccommodationType {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => Some(FieldValue::String(self.name.clone())),
            _ => None,
        }
    }

    fn search_haystack(&self) -> Vec<String> {
        let mut haystack = vec![self.name.clone()];
        haystack.extend(self.description.clone());
        haystack
    }
}
