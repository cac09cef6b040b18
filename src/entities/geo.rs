//! Geographic resources: countries, cities and street addresses
//!
//! Cities reference their country, addresses reference their city. The
//! console joins those references client-side from separately fetched lists
//! unless the endpoint was asked to eager-load them.

use crate::core::error::{FieldErrors, StayError};
use crate::core::field::FieldValue;
use crate::core::resource::{Editable, Queryable, Resource};
use crate::core::validation::FormPayload;
use crate::core::validation::validators::{
    check_latitude, check_longitude, require_non_empty, require_some,
};
use crate::impl_resource;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

impl_resource!(
    /// A country the marketplace operates in.
    Country, "country",
    {
        /// ISO 3166-1 alpha-2 code
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<String>,
    }
);

/// Editable fields of a [`Country`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CountryPayload {
    pub name: String,
    pub order: Option<i64>,
    pub code: Option<String>,
}

impl FormPayload for CountryPayload {
    const WRAPPER_KEY: &'static str = "countries";

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

impl Editable for Country {
    type Payload = CountryPayload;

    fn create_from(payload: CountryPayload) -> Result<Self, StayError> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(StayError::Validation(errors));
        }
        Ok(Country::new(payload.name, payload.order, payload.code))
    }

    fn apply(&mut self, payload: CountryPayload) -> Result<(), StayError> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(StayError::Validation(errors));
        }
        self.name = payload.name;
        self.order = payload.order;
        self.code = payload.code;
        self.touch();
        Ok(())
    }

    fn to_payload(&self) -> CountryPayload {
        CountryPayload {
            name: self.name.clone(),
            order: self.order,
            code: self.code.clone(),
        }
    }
}

impl Queryable for Country {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => Some(FieldValue::String(self.name.clone())),
            "code" => Some(
                self.code
                    .clone()
                    .map(FieldValue::String)
                    .unwrap_or(FieldValue::Null),
            ),
            _ => None,
        }
    }
}

impl_resource!(
    /// A city inside a country.
    City, "city",
    {
        /// Foreign identifier of the owning country
        country_id: Uuid,
    }
);

/// Editable fields of a [`City`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CityPayload {
    pub name: String,
    pub order: Option<i64>,
    pub country_id: Option<Uuid>,
}

impl FormPayload for CityPayload {
    const WRAPPER_KEY: &'static str = "cities";

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_non_empty(&mut errors, "name", &self.name);
        require_some(&mut errors, "countryId", &self.country_id);
        errors
    }

    fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && self.country_id.is_some()
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Editable for City {
    type Payload = CityPayload;

    fn create_from(payload: CityPayload) -> Result<Self, StayError> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(StayError::Validation(errors));
        }
        let country_id = payload
            .country_id
            .ok_or_else(|| StayError::missing_field("countryId"))?;
        Ok(City::new(payload.name, payload.order, country_id))
    }

    fn apply(&mut self, payload: CityPayload) -> Result<(), StayError> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(StayError::Validation(errors));
        }
        self.name = payload.name;
        self.order = payload.order;
        self.country_id = payload
            .country_id
            .ok_or_else(|| StayError::missing_field("countryId"))?;
        self.touch();
        Ok(())
    }

    fn to_payload(&self) -> CityPayload {
        CityPayload {
            name: self.name.clone(),
            order: self.order,
            country_id: Some(self.country_id),
        }
    }
}

impl Queryable for City {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => Some(FieldValue::String(self.name.clone())),
            "countryId" => Some(FieldValue::Uuid(self.country_id)),
            _ => None,
        }
    }
}

impl_resource!(
    /// A street address; `name` holds the street line.
    Address, "address",
    {
        /// Foreign identifier of the city this address belongs to
        city_id: Uuid,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        zip_code: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        latitude: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        longitude: Option<f64>,
    }
);

/// Editable fields of an [`Address`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressPayload {
    pub name: String,
    pub order: Option<i64>,
    pub city_id: Option<Uuid>,
    pub zip_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl FormPayload for AddressPayload {
    const WRAPPER_KEY: &'static str = "addresses";

    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        require_non_empty(&mut errors, "name", &self.name);
        require_some(&mut errors, "cityId", &self.city_id);
        if let Some(latitude) = self.latitude {
            check_latitude(&mut errors, "latitude", latitude);
        }
        if let Some(longitude) = self.longitude {
            check_longitude(&mut errors, "longitude", longitude);
        }
        errors
    }

    fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && self.city_id.is_some()
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Editable for Address {
    type Payload = AddressPayload;

    fn create_from(payload: AddressPayload) -> Result<Self, StayError> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(StayError::Validation(errors));
        }
        let city_id = payload
            .city_id
            .ok_or_else(|| StayError::missing_field("cityId"))?;
        Ok(Address::new(
            payload.name,
            payload.order,
            city_id,
            payload.zip_code,
            payload.latitude,
            payload.longitude,
        ))
    }

    fn apply(&mut self, payload: AddressPayload) -> Result<(), StayError> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(StayError::Validation(errors));
        }
        self.name = payload.name;
        self.order = payload.order;
        self.city_id = payload
            .city_id
            .ok_or_else(|| StayError::missing_field("cityId"))?;
        self.zip_code = payload.zip_code;
        self.latitude = payload.latitude;
        self.longitude = payload.longitude;
        self.touch();
        Ok(())
    }

    fn to_payload(&self) -> AddressPayload {
        AddressPayload {
            name: self.name.clone(),
            order: self.order,
            city_id: Some(self.city_id),
            zip_code: self.zip_code.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

impl Queryable for Address {
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => Some(FieldValue::String(self.name.clone())),
            "cityId" => Some(FieldValue::Uuid(self.city_id)),
            "zipCode" => Some(
                self.zip_code
                    .clone()
                    .map(FieldValue::String)
                    .unwrap_or(FieldValue::Null),
            ),
            _ => None,
        }
    }

    fn search_haystack(&self) -> Vec<String> {
        let mut haystack = vec![self.name.clone()];
        if let Some(zip) = &self.zip_code {
            haystack.push(zip.clone());
        }
        haystack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_requires_country() {
        let payload = CityPayload {
            name: "Nice".to_string(),
            ..Default::default()
        };
        let errors = payload.validate();
        assert_eq!(errors.get("countryId"), Some("is required"));
        assert!(!payload.is_complete());
        assert!(City::create_from(payload).is_err());
    }

    #[test]
    fn test_city_create_and_roundtrip_payload() {
        let country_id = Uuid::new_v4();
        let payload = CityPayload {
            name: "Nice".to_string(),
            order: Some(10),
            country_id: Some(country_id),
        };
        let city = City::create_from(payload).expect("valid payload");
        assert_eq!(city.name, "Nice");
        assert_eq!(city.country_id, country_id);

        let back = city.to_payload();
        assert_eq!(back.name, "Nice");
        assert_eq!(back.country_id, Some(country_id));
    }

    #[test]
    fn test_city_apply_touches_updated_at() {
        let city = City::new("Nice".to_string(), None, Uuid::new_v4());
        let before = city.updated_at;
        let mut city = city;
        let mut payload = city.to_payload();
        payload.name = "Nizza".to_string();
        city.apply(payload).expect("valid payload");
        assert_eq!(city.name, "Nizza");
        assert!(city.updated_at >= before);
    }

    #[test]
    fn test_address_gps_bounds() {
        let payload = AddressPayload {
            name: "12 Promenade des Anglais".to_string(),
            city_id: Some(Uuid::new_v4()),
            latitude: Some(95.0),
            longitude: Some(7.26),
            ..Default::default()
        };
        let errors = payload.validate();
        assert!(errors.get("latitude").is_some());
        assert!(errors.get("longitude").is_none());
        // Bound violations do not make the draft incomplete
        assert!(payload.is_complete());
    }

    #[test]
    fn test_address_serializes_camel_case() {
        let address = Address::new(
            "12 Promenade des Anglais".to_string(),
            None,
            Uuid::new_v4(),
            Some("06000".to_string()),
            None,
            None,
        );
        let json = serde_json::to_value(&address).expect("serialize");
        assert!(json.get("cityId").is_some());
        assert!(json.get("zipCode").is_some());
        assert!(json.get("createdAt").is_some());
        // Unset optionals are omitted, not null
        assert!(json.get("latitude").is_none());
    }

    #[test]
    fn test_country_resource_names() {
        assert_eq!(Country::resource_name_singular(), "country");
        assert_eq!(Country::resource_name(), "countries");
        assert_eq!(Address::resource_name(), "addresses");
    }
}
