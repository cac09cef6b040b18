//! Tagging resources: labels, amenities and highlights
//!
//! These are flat vocabularies hotels reference by id. They share the same
//! form behavior (single, bulk, raw JSON) and the same ordering rules as the
//! rest of the catalog.

use crate::core::error::{FieldErrors, StayError};
use crate::core::field::FieldValue;
use crate::core::resource::{Editable, Queryable, Resource};
use crate::core::validation::FormPayload;
use crate::core::validation::validators::require_non_empty;
use crate::impl_resource;
use serde::{Deserialize, Serialize};

impl_resource!(
    /// A marketing label shown on hotel cards ("Eco-friendly", "Pet friendly").
    Label, "label",
    {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
    }
);

/// Editable fields of a [`Label`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelPayload {
    pub name: String,
    pub order: Option<i64>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl FormPayload for LabelPayload {
    const WRAPPER_KEY: &'static str = "labels";

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

impl Editable for Label {
    type Payload = LabelPayload;

    fn create_from(payload: LabelPayload) -> Result<Self, StayError> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(StayError::Validation(errors));
        }
        Ok(Label::new(
            payload.name,
            payload.order,
            payload.color,
            payload.icon,
        ))
    }

    fn apply(&mut self, payload: LabelPayload) -> Result<(), StayError> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(StayError::Validation(errors));
        }
        self.name = payload.name;
        self.order = payload.order;
        self.color = payload.color;
        self.icon = payload.icon;
        self.touch();
        Ok(())
    }

    fn to_payload(&self) -> LabelPayload {
        LabelPayload {
            name: self.name.clone(),
            order: self.order,
            color: self.color.clone(),
            icon: self.icon.clone(),
        }
    }
}

impl Queryable for Label {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => Some(FieldValue::String(self.name.clone())),
            "color" => Some(
                self.color
                    .clone()
                    .map(FieldValue::String)
                    .unwrap_or(FieldValue::Null),
            ),
            _ => None,
        }
    }
}

impl_resource!(
    /// An amenity a hotel offers ("Free WiFi", "Pool", "Spa").
    HotelAmenity, "hotel-amenity",
    {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        category: Option<String>,
    }
);

/// Editable fields of a [`HotelAmenity`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HotelAmenityPayload {
    pub name: String,
    pub order: Option<i64>,
    pub icon: Option<String>,
    pub category: Option<String>,
}

impl FormPayload for HotelAmenityPayload {
    const WRAPPER_KEY: &'static str = "hotelAmenities";

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

impl Editable for HotelAmenity {
    type Payload = HotelAmenityPayload;

    fn create_from(payload: HotelAmenityPayload) -> Result<Self, StayError> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(StayError::Validation(errors));
        }
        Ok(HotelAmenity::new(
            payload.name,
            payload.order,
            payload.icon,
            payload.category,
        ))
    }

    fn apply(&mut self, payload: HotelAmenityPayload) -> Result<(), StayError> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(StayError::Validation(errors));
        }
        self.name = payload.name;
        self.order = payload.order;
        self.icon = payload.icon;
        self.category = payload.category;
        self.touch();
        Ok(())
    }

    fn to_payload(&self) -> HotelAmenityPayload {
        HotelAmenityPayload {
            name: self.name.clone(),
            order: self.order,
            icon: self.icon.clone(),
            category: self.category.clone(),
        }
    }
}

impl Queryable for HotelAmenity {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => Some(FieldValue::String(self.name.clone())),
            "category" => Some(
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
        haystack.extend(self.category.clone());
        haystack
    }
}

impl_resource!(
    /// A promotional highlight ("Best seller", "New on the platform").
    HotelHighlight, "hotel-highlight",
    {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        promo_text: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
    }
);

/// Editable fields of a [`HotelHighlight`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HotelHighlightPayload {
    pub name: String,
    pub order: Option<i64>,
    pub promo_text: Option<String>,
    pub icon: Option<String>,
}

impl FormPayload for HotelHighlightPayload {
    const WRAPPER_KEY: &'static str = "hotelHighlights";

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

impl Editable for HotelHighlight {
    type Payload = HotelHighlightPayload;

    fn create_from(payload: HotelHighlightPayload) -> Result<Self, StayError> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(StayError::Validation(errors));
        }
        Ok(HotelHighlight::new(
            payload.name,
            payload.order,
            payload.promo_text,
            payload.icon,
        ))
    }

    fn apply(&mut self, payload: HotelHighlightPayload) -> Result<(), StayError> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(StayError::Validation(errors));
        }
        self.name = payload.name;
        self.order = payload.order;
        self.promo_text = payload.promo_text;
        self.icon = payload.icon;
        self.touch();
        Ok(())
    }

    fn to_payload(&self) -> HotelHighlightPayload {
        HotelHighlightPayload {
            name: self.name.clone(),
            order: self.order,
            promo_text: self.promo_text.clone(),
            icon: self.icon.clone(),
        }
    }
}

impl Queryable for HotelHighlight {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => Some(FieldValue::String(self.name.clone())),
            _ => None,
        }
    }

    fn search_haystack(&self) -> Vec<String> {
        let mut haystack = vec![self.name.clone()];
        haystack.extend(self.promo_text.clone());
        haystack
    }
}
