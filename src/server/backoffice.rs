//! Full back-office wiring
//!
//! Assembles the ten resource collections of the marketplace back office into
//! one router: stores, eager-load embed hooks and dependent-count delete
//! gates.
//!
//! Embeds (active with `?include=true`):
//! - city → owning country
//! - hotel card → city, accommodation type, destination
//! - accommodation type → `hotelCount` derived counter
//! - destination → landmark objects resolved into the join rows
//!
//! Delete gates (409 when dependents exist):
//! - country ← cities
//! - city ← addresses, hotel cards
//! - accommodation type ← hotel cards
//! - landmark ← destinations referencing it

use crate::entities::{
    AccommodationType, Address, City, Country, Destination, HotelAmenity, HotelCard,
    HotelHighlight, Label, Landmark,
};
use crate::server::builder::ServerBuilder;
use crate::server::routes::ResourceState;
use crate::storage::InMemoryStore;
use axum::Router;
use serde_json::Map;
use serde_json::Value;
use std::sync::Arc;

/// The ten resource collections of the back office
///
/// Cloning shares the underlying collections.
#[derive(Clone, Default)]
pub struct BackofficeStores {
    pub countries: InMemoryStore<Country>,
    pub cities: InMemoryStore<City>,
    pub addresses: InMemoryStore<Address>,
    pub destinations: InMemoryStore<Destination>,
    pub landmarks: InMemoryStore<Landmark>,
    pub accommodation_types: InMemoryStore<AccommodationType>,
    pub labels: InMemoryStore<Label>,
    pub hotel_amenities: InMemoryStore<HotelAmenity>,
    pub hotel_highlights: InMemoryStore<HotelHighlight>,
    pub hotel_cards: InMemoryStore<HotelCard>,
}

impl BackofficeStores {
    pub fn new() -> Self {
        Self::default()
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Option<Value> {
    serde_json::to_value(value).ok()
}

/// Build the complete back-office router over the given stores
pub fn backoffice_router(stores: &BackofficeStores) -> Router {
    let country_state = {
        let cities = stores.cities.clone();
        ResourceState::new(Arc::new(stores.countries.clone())).with_dependents(Arc::new(
            move |country: &Country| {
                let count = cities
                    .snapshot()
                    .iter()
                    .filter(|c| c.country_id == country.id)
                    .count();
                (count, "cities")
            },
        ))
    };

    let city_state = {
        let countries = stores.countries.clone();
        let addresses = stores.addresses.clone();
        let hotel_cards = stores.hotel_cards.clone();
        ResourceState::new(Arc::new(stores.cities.clone()))
            .with_embed(Arc::new(move |city: &City| {
                let mut embedded = Map::new();
                if let Some(country) = countries
                    .snapshot()
                    .into_iter()
                    .find(|c| c.id == city.country_id)
                {
                    if let Some(json) = to_json(&country) {
                        embedded.insert("country".to_string(), json);
                    }
                }
                embedded
            }))
            .with_dependents(Arc::new(move |city: &City| {
                let address_count = addresses
                    .snapshot()
                    .iter()
                    .filter(|a| a.city_id == city.id)
                    .count();
                if address_count > 0 {
                    return (address_count, "addresses");
                }
                let hotel_count = hotel_cards
                    .snapshot()
                    .iter()
                    .filter(|h| h.city_id == city.id)
                    .count();
                (hotel_count, "hotel-cards")
            }))
    };

    let address_state = ResourceState::new(Arc::new(stores.addresses.clone()));

    let destination_state = {
        let landmarks = stores.landmarks.clone();
        ResourceState::new(Arc::new(stores.destinations.clone())).with_embed(Arc::new(
            move |destination: &Destination| {
                let mut embedded = Map::new();
                if let Some(rows) = &destination.destination_landmarks {
                    let all = landmarks.snapshot();
                    let enriched: Vec<Value> = rows
                        .iter()
                        .map(|row| {
                            let mut row = row.clone();
                            if row.landmark.is_none() {
                                row.landmark =
                                    all.iter().find(|l| l.id == row.landmark_id).cloned();
                            }
                            to_json(&row).unwrap_or(Value::Null)
                        })
                        .collect();
                    embedded.insert("destinationLandmarks".to_string(), Value::Array(enriched));
                }
                embedded
            },
        ))
    };

    let landmark_state = {
        let destinations = stores.destinations.clone();
        ResourceState::new(Arc::new(stores.landmarks.clone())).with_dependents(Arc::new(
            move |landmark: &Landmark| {
                let count = destinations
                    .snapshot()
                    .iter()
                    .filter(|d| references_landmark(d, landmark.id))
                    .count();
                (count, "destinations")
            },
        ))
    };

    let accommodation_type_state = {
        let hotel_cards_embed = stores.hotel_cards.clone();
        let hotel_cards_gate = stores.hotel_cards.clone();
        ResourceState::new(Arc::new(stores.accommodation_types.clone()))
            .with_embed(Arc::new(move |accommodation_type: &AccommodationType| {
                let count = hotel_cards_embed
                    .snapshot()
                    .iter()
                    .filter(|h| h.accommodation_type_id == Some(accommodation_type.id))
                    .count();
                let mut embedded = Map::new();
                embedded.insert("hotelCount".to_string(), Value::from(count));
                embedded
            }))
            .with_dependents(Arc::new(move |accommodation_type: &AccommodationType| {
                let count = hotel_cards_gate
                    .snapshot()
                    .iter()
                    .filter(|h| h.accommodation_type_id == Some(accommodation_type.id))
                    .count();
                (count, "hotel-cards")
            }))
    };

    let hotel_card_state = {
        let cities = stores.cities.clone();
        let accommodation_types = stores.accommodation_types.clone();
        let destinations = stores.destinations.clone();
        ResourceState::new(Arc::new(stores.hotel_cards.clone())).with_embed(Arc::new(
            move |hotel: &HotelCard| {
                let mut embedded = Map::new();
                if let Some(city) = cities.snapshot().into_iter().find(|c| c.id == hotel.city_id)
                {
                    if let Some(json) = to_json(&city) {
                        embedded.insert("city".to_string(), json);
                    }
                }
                if let Some(type_id) = hotel.accommodation_type_id {
                    if let Some(accommodation_type) = accommodation_types
                        .snapshot()
                        .into_iter()
                        .find(|t| t.id == type_id)
                    {
                        if let Some(json) = to_json(&accommodation_type) {
                            embedded.insert("accommodationType".to_string(), json);
                        }
                    }
                }
                if let Some(destination_id) = hotel.destination_id {
                    if let Some(destination) = destinations
                        .snapshot()
                        .into_iter()
                        .find(|d| d.id == destination_id)
                    {
                        if let Some(json) = to_json(&destination) {
                            embedded.insert("destination".to_string(), json);
                        }
                    }
                }
                embedded
            },
        ))
    };

    ServerBuilder::new()
        .register::<Country>(country_state)
        .register::<City>(city_state)
        .register::<Address>(address_state)
        .register::<Destination>(destination_state)
        .register::<Landmark>(landmark_state)
        .register::<AccommodationType>(accommodation_type_state)
        .register::<Label>(ResourceState::new(Arc::new(stores.labels.clone())))
        .register::<HotelAmenity>(ResourceState::new(Arc::new(stores.hotel_amenities.clone())))
        .register::<HotelHighlight>(ResourceState::new(Arc::new(
            stores.hotel_highlights.clone(),
        )))
        .register::<HotelCard>(hotel_card_state)
        .build()
}

/// True when a destination references the landmark through either relation
/// shape
fn references_landmark(destination: &Destination, landmark_id: uuid::Uuid) -> bool {
    if let Some(landmarks) = &destination.landmarks {
        if landmarks.iter().any(|l| l.id == landmark_id) {
            return true;
        }
    }
    if let Some(rows) = &destination.destination_landmarks {
        if rows.iter().any(|row| row.landmark_id == landmark_id) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::DestinationLandmark;
    use uuid::Uuid;

    #[test]
    fn test_references_landmark_direct_shape() {
        let landmark = Landmark::new("Old Port".to_string(), None, None, None);
        let id = landmark.id;
        let destination = Destination::new(
            "Marseille".to_string(),
            None,
            None,
            None,
            Some(vec![landmark]),
            None,
        );
        assert!(references_landmark(&destination, id));
        assert!(!references_landmark(&destination, Uuid::new_v4()));
    }

    #[test]
    fn test_references_landmark_joined_shape() {
        let landmark_id = Uuid::new_v4();
        let destination = Destination::new(
            "Marseille".to_string(),
            None,
            None,
            None,
            None,
            Some(vec![DestinationLandmark {
                id: Uuid::new_v4(),
                landmark_id,
                landmark: None,
            }]),
        );
        assert!(references_landmark(&destination, landmark_id));
    }
}
