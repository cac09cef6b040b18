//! Resource entities managed by the back office
//!
//! Each entity is defined with [`impl_resource!`](crate::impl_resource) and
//! pairs with a payload type holding only its editable fields.

pub mod catalog;
pub mod geo;
pub mod hotel;
pub mod macros;
pub mod tags;

pub use catalog::{
    AccommodationType, AccommodationTypePayload, DESTINATION_TYPES, Destination,
    DestinationLandmark, DestinationPayload, LANDMARK_TYPES, Landmark, LandmarkPayload,
};
pub use geo::{Address, AddressPayload, City, CityPayload, Country, CountryPayload};
pub use hotel::{HotelCard, HotelCardPayload};
pub use tags::{
    HotelAmenity, HotelAmenityPayload, HotelHighlight, HotelHighlightPayload, Label, LabelPayload,
};
