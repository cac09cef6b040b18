//! Hotel card resource
//!
//! The hotel card is the marketplace listing itself. It references a city
//! (required) plus optional accommodation type and destination, and carries
//! the pricing and rating fields the storefront renders.

use crate::core::error::{FieldErrors, StayError};
use crate::core::field::FieldValue;
use crate::core::resource::{Editable, Queryable, Resource};
use crate::core::validation::FormPayload;
use crate::core::validation::validators::{
    check_exceeds, check_positive, check_range, require_non_empty, require_some,
};
use crate::impl_resource;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

impl_resource!(
    /// A bookable hotel listing.
    HotelCard, "hotel-card",
    {
        /// Foreign identifier of the city the hotel is located in
        city_id: Uuid,

        /// Star classification, 1 to 5
        star_rating: u8,

        /// Nightly base price, strictly positive
        base_price_per_night: f64,

        /// Strikethrough price; when present it must exceed the base price
        #[serde(default, skip_serializing_if = "Option::is_none")]
        regular_price: Option<f64>,

        /// Guest review score, 0 to 100
        #[serde(default, skip_serializing_if = "Option::is_none")]
        score: Option<f64>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        accommodation_type_id: Option<Uuid>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        destination_id: Option<Uuid>,
    }
);

/// Editable fields of a [`HotelCard`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HotelCardPayload {
    pub name: String,
    pub order: Option<i64>,
    pub city_id: Option<Uuid>,
    pub star_rating: Option<u8>,
    pub base_price_per_night: Option<f64>,
    pub regular_price: Option<f64>,
    pub score: Option<f64>,
    pub description: Option<String>,
    pub accommodation_type_id: Option<Uuid>,
    pub destination_id: Option<Uuid>,
}

impl FormPayload for HotelCardPayload {
    const WRAPPER_KEY: &'static str = "hotelCards";

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_non_empty(&mut errors, "name", &self.name);
        require_some(&mut errors, "cityId", &self.city_id);
        require_some(&mut errors, "starRating", &self.star_rating);
        require_some(&mut errors, "basePricePerNight", &self.base_price_per_night);
        if let Some(star_rating) = self.star_rating {
            check_range(&mut errors, "starRating", f64::from(star_rating), 1.0, 5.0);
        }
        if let Some(base_price) = self.base_price_per_night {
            check_positive(&mut errors, "basePricePerNight", base_price);
            if let Some(regular_price) = self.regular_price {
                check_exceeds(
                    &mut errors,
                    "regularPrice",
                    regular_price,
                    "base price",
                    base_price,
                );
            }
        }
        if let Some(score) = self.score {
            check_range(&mut errors, "score", score, 0.0, 100.0);
        }
        errors
    }

    fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && self.city_id.is_some()
            && self.star_rating.is_some()
            && self.base_price_per_night.is_some()
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Editable for HotelCard {
    type Payload = HotelCardPayload;

    fn create_from(payload: HotelCardPayload) -> Result<Self, StayError> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(StayError::Validation(errors));
        }
        let city_id = payload
            .city_id
            .ok_or_else(|| StayError::missing_field("cityId"))?;
        let star_rating = payload
            .star_rating
            .ok_or_else(|| StayError::missing_field("starRating"))?;
        let base_price_per_night = payload
            .base_price_per_night
            .ok_or_else(|| StayError::missing_field("basePricePerNight"))?;
        Ok(HotelCard::new(
            payload.name,
            payload.order,
            city_id,
            star_rating,
            base_price_per_night,
            payload.regular_price,
            payload.score,
            payload.description,
            payload.accommodation_type_id,
            payload.destination_id,
        ))
    }

    fn apply(&mut self, payload: HotelCardPayload) -> Result<(), StayError> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(StayError::Validation(errors));
        }
        self.name = payload.name;
        self.order = payload.order;
        self.city_id = payload
            .city_id
            .ok_or_else(|| StayError::missing_field("cityId"))?;
        self.star_rating = payload
            .star_rating
            .ok_or_else(|| StayError::missing_field("starRating"))?;
        self.base_price_per_night = payload
            .base_price_per_night
            .ok_or_else(|| StayError::missing_field("basePricePerNight"))?;
        self.regular_price = payload.regular_price;
        self.score = payload.score;
        self.description = payload.description;
        self.accommodation_type_id = payload.accommodation_type_id;
        self.destination_id = payload.destination_id;
        self.touch();
        Ok(())
    }

    fn to_payload(&self) -> HotelCardPayload {
        HotelCardPayload {
            name: self.name.clone(),
            order: self.order,
            city_id: Some(self.city_id),
            star_rating: Some(self.star_rating),
            base_price_per_night: Some(self.base_price_per_night),
            regular_price: self.regular_price,
            score: self.score,
            description: self.description.clone(),
            accommodation_type_id: self.accommodation_type_id,
            destination_id: self.destination_id,
        }
    }
}

impl Queryable for HotelCard {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => Some(FieldValue::String(self.name.clone())),
            "cityId" => Some(FieldValue::Uuid(self.city_id)),
            "starRating" => Some(FieldValue::Integer(i64::from(self.star_rating))),
            "score" => Some(
                self.score
                    .map(FieldValue::Float)
                    .unwrap_or(FieldValue::Null),
            ),
            "accommodationTypeId" => Some(
                self.accommodation_type_id
                    .map(FieldValue::Uuid)
                    .unwrap_or(FieldValue::Null),
            ),
            "destinationId" => Some(
                self.destination_id
                    .map(FieldValue::Uuid)
                    .unwrap_or(FieldValue::Null),
            ),
            _ => None,
        }
    }

    fn search_haystack(&self) -> Vec<String> {
        let mut haystack = vec![self.name.clone()];
        haystack.extend(self.description.clone());
        haystack
    }
}
