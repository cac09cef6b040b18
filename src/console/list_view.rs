//! List views: the read side of the list/detail/form pattern
//!
//! A `ListView` owns the loaded collection plus presentation state (loading
//! flag, dismissable error, active filters, lookup tables for client-side
//! joins). Rendering reads `visible()`, which applies the filters and the
//! display sort without mutating the loaded data, so resetting the filters
//! restores the exact original list.

use crate::client::ApiClient;
use crate::core::field::FieldValue;
use crate::core::query::ListParams;
use crate::core::resource::{Editable, Queryable, Resource, display_cmp};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::warn;
use uuid::Uuid;

/// Numeric range filter over one field (bounds inclusive, either optional)
#[derive(Debug, Clone, PartialEq)]
pub struct RangeFilter {
    pub field: String,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RangeFilter {
    fn matches(&self, value: Option<FieldValue>) -> bool {
        let Some(value) = value.and_then(|v| v.as_float()) else {
            return false;
        };
        if let Some(min) = self.min {
            if value < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if value > max {
                return false;
            }
        }
        true
    }
}

/// AND-composed client-side filters
///
/// An empty search string, an empty exact map and a missing range filter all
/// mean "no constraint": the default filter set passes everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    /// Case-insensitive substring search
    pub search: String,

    /// Exact-match dropdown filters, field -> selected value
    pub exact: IndexMap<String, String>,

    /// Numeric range filter
    pub range: Option<RangeFilter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when any constraint is set (drives the reset-filters offer)
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty() || !self.exact.is_empty() || self.range.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn matches<T: Queryable>(&self, item: &T, joined_names: &[String]) -> bool {
        if !self.search.trim().is_empty() {
            let needle = self.search.trim().to_lowercase();
            let mut haystack = item.search_haystack();
            haystack.extend_from_slice(joined_names);
            if !haystack
                .iter()
                .any(|text| text.to_lowercase().contains(&needle))
            {
                return false;
            }
        }
        for (field, selected) in &self.exact {
            let matched = item
                .field_value(field)
                .is_some_and(|value| value.matches_query(selected));
            if !matched {
                return false;
            }
        }
        if let Some(range) = &self.range {
            if !range.matches(item.field_value(&range.field)) {
                return false;
            }
        }
        true
    }
}

/// Loaded state of one resource list
pub struct ListView<T: Resource> {
    items: Vec<T>,
    pub filters: FilterSet,
    pub loading: bool,
    pub error: Option<String>,

    /// Lookup tables for client-side joins: relation field name -> id -> name
    lookups: IndexMap<String, HashMap<Uuid, String>>,
}

impl<T: Resource> Default for ListView<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Resource> ListView<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            filters: FilterSet::new(),
            loading: false,
            error: None,
            lookups: IndexMap::new(),
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The list holds nothing at all (as opposed to nothing matching)
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Register a lookup table joining a relation field to display names
    /// (e.g. `countryId` -> country names)
    pub fn add_lookup(&mut self, field: impl Into<String>, table: HashMap<Uuid, String>) {
        self.lookups.insert(field.into(), table);
    }

    /// Resolve a joined display name from the registered lookup tables
    pub fn lookup_name(&self, field: &str, id: Uuid) -> Option<&str> {
        self.lookups
            .get(field)
            .and_then(|table| table.get(&id))
            .map(|s| s.as_str())
    }

    pub fn reset_filters(&mut self) {
        self.filters.clear();
    }
}

impl<T: Queryable> ListView<T> {
    /// Names joined from lookup tables for one item, fed into free-text
    /// search so "France" finds cities of France
    fn joined_names(&self, item: &T) -> Vec<String> {
        self.lookups
            .iter()
            .filter_map(|(field, table)| {
                item.field_value(field)
                    .and_then(|value| value.as_uuid())
                    .and_then(|id| table.get(&id).cloned())
            })
            .collect()
    }

    /// The rows to render: filtered, then display-sorted
    pub fn visible(&self) -> Vec<&T> {
        let mut rows: Vec<&T> = self
            .items
            .iter()
            .filter(|item| {
                let joined = self.joined_names(*item);
                self.filters.matches(*item, &joined)
            })
            .collect();
        rows.sort_by(|a, b| display_cmp(*a, *b));
        rows
    }

    /// Loaded items exist but the active filters hide all of them
    pub fn has_no_matches(&self) -> bool {
        !self.items.is_empty() && self.visible().is_empty()
    }

    /// Offer the reset-filters action only when filters are hiding rows
    pub fn can_reset_filters(&self) -> bool {
        self.filters.is_active()
    }
}

impl<T> ListView<T>
where
    T: Editable + Queryable + DeserializeOwned,
{
    /// Load (or re-load) the collection from the API
    ///
    /// Failures land in `error` as a dismissable message; the previously
    /// loaded items are kept so the view can still render.
    pub async fn reload(&mut self, client: &ApiClient, params: &ListParams) {
        self.loading = true;
        self.error = None;
        match client.list::<T>(params).await {
            Ok(page) => {
                self.items = page.items;
            }
            Err(e) => {
                warn!(resource = T::resource_name(), error = %e, "list reload failed");
                self.error = Some(e.to_string());
            }
        }
        self.loading = false;
    }

    /// Compute the adjacent-reorder result for moving a row up or down
    ///
    /// The neighbor is taken from the display-sorted full (unfiltered) list.
    /// Returns the entity with its new order set, or `None` at the list edge.
    /// The caller persists the change with a full update.
    pub fn reorder(&self, id: Uuid, direction: MoveDirection) -> Option<T> {
        let mut sorted: Vec<&T> = self.items.iter().collect();
        sorted.sort_by(|a, b| display_cmp(*a, *b));
        let position = sorted.iter().position(|item| item.id() == id)?;

        let neighbor = match direction {
            MoveDirection::Up => {
                if position == 0 {
                    return None;
                }
                sorted[position - 1]
            }
            MoveDirection::Down => {
                if position + 1 >= sorted.len() {
                    return None;
                }
                sorted[position + 1]
            }
        };

        let new_order = match direction {
            MoveDirection::Up => neighbor.display_order() - 1,
            MoveDirection::Down => neighbor.display_order() + 1,
        };

        let mut moved = sorted[position].clone();
        moved.set_order(Some(new_order));
        Some(moved)
    }

    /// Persist a move-up, then reload
    pub async fn move_up(&mut self, client: &ApiClient, id: Uuid, params: &ListParams) {
        self.apply_move(client, id, MoveDirection::Up, params).await;
    }

    /// Persist a move-down, then reload
    pub async fn move_down(&mut self, client: &ApiClient, id: Uuid, params: &ListParams) {
        self.apply_move(client, id, MoveDirection::Down, params).await;
    }

    async fn apply_move(
        &mut self,
        client: &ApiClient,
        id: Uuid,
        direction: MoveDirection,
        params: &ListParams,
    ) {
        let Some(moved) = self.reorder(id, direction) else {
            return;
        };
        let payload = moved.to_payload();
        if let Err(e) = client.update::<T>(id, &payload).await {
            self.error = Some(e.to_string());
            return;
        }
        self.reload(client, params).await;
    }

    /// Delete after user confirmation, then reload
    ///
    /// Server refusals (dependent records, 409) land in `error` with the
    /// server's message; the list is reloaded either way so the view reflects
    /// what the server actually holds. The refusal message survives the
    /// reload, which would otherwise clear it.
    pub async fn delete_confirmed(&mut self, client: &ApiClient, id: Uuid, params: &ListParams) {
        let refusal = client.remove::<T>(id).await.err().map(|e| e.to_string());
        self.reload(client, params).await;
        if refusal.is_some() {
            self.error = refusal;
        }
    }
}

/// Direction of an adjacent reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{City, HotelCard, HotelCardPayload};

    fn view_with_cities(cities: Vec<City>) -> ListView<City> {
        let mut view = ListView::new();
        view.items = cities;
        view
    }

    fn hotel(name: &str, order: Option<i64>, star_rating: u8, score: Option<f64>) -> HotelCard {
        HotelCard::create_from(HotelCardPayload {
            name: name.to_string(),
            order,
            city_id: Some(Uuid::new_v4()),
            star_rating: Some(star_rating),
            base_price_per_night: Some(100.0),
            score,
            ..Default::default()
        })
        .expect("valid payload")
    }

    #[test]
    fn test_visible_sorted_by_order_then_name() {
        let country_id = Uuid::new_v4();
        let mut riviera = City::new("Riviera".to_string(), None, country_id);
        riviera.order = None;
        let azur = City::new("Azur".to_string(), Some(50), country_id);
        let view = view_with_cities(vec![riviera, azur]);

        let names: Vec<&str> = view.visible().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Azur", "Riviera"]);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let country_id = Uuid::new_v4();
        let view = {
            let mut view = view_with_cities(vec![
                City::new("Marseille".to_string(), None, country_id),
                City::new("Nice".to_string(), None, country_id),
            ]);
            view.filters.search = "mars".to_string();
            view
        };
        let names: Vec<&str> = view.visible().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Marseille"]);
    }

    #[test]
    fn test_search_matches_joined_lookup_names() {
        let country_id = Uuid::new_v4();
        let mut view = view_with_cities(vec![City::new("Nice".to_string(), None, country_id)]);
        let mut countries = HashMap::new();
        countries.insert(country_id, "France".to_string());
        view.add_lookup("countryId", countries);

        view.filters.search = "france".to_string();
        assert_eq!(view.visible().len(), 1);

        view.filters.search = "germany".to_string();
        assert!(view.visible().is_empty());
        assert!(view.has_no_matches());
    }

    #[test]
    fn test_exact_filter_narrows_and_reset_restores() {
        let france = Uuid::new_v4();
        let italy = Uuid::new_v4();
        let mut view = view_with_cities(vec![
            City::new("Nice".to_string(), None, france),
            City::new("Rome".to_string(), None, italy),
        ]);

        view.filters
            .exact
            .insert("countryId".to_string(), france.to_string());
        assert_eq!(view.visible().len(), 1);
        assert!(view.can_reset_filters());

        view.reset_filters();
        assert_eq!(view.visible().len(), 2);
        assert!(!view.can_reset_filters());
    }

    #[test]
    fn test_filters_compose_with_and() {
        let mut view: ListView<HotelCard> = ListView::new();
        view.items = vec![
            hotel("Azur Palace", None, 5, Some(92.0)),
            hotel("Azur Hostel", None, 2, Some(70.0)),
            hotel("Grand Nord", None, 5, Some(95.0)),
        ];
        view.filters.search = "azur".to_string();
        view.filters.range = Some(RangeFilter {
            field: "score".to_string(),
            min: Some(90.0),
            max: None,
        });

        let names: Vec<&str> = view.visible().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Azur Palace"]);
    }

    #[test]
    fn test_range_filter_excludes_missing_values() {
        let mut view: ListView<HotelCard> = ListView::new();
        view.items = vec![
            hotel("Scored", None, 4, Some(80.0)),
            hotel("Unscored", None, 4, None),
        ];
        view.filters.range = Some(RangeFilter {
            field: "score".to_string(),
            min: Some(0.0),
            max: Some(100.0),
        });
        let names: Vec<&str> = view.visible().iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Scored"]);
    }

    #[test]
    fn test_empty_vs_no_matches() {
        let empty: ListView<City> = ListView::new();
        assert!(empty.is_empty());
        assert!(!empty.has_no_matches());

        let mut loaded = view_with_cities(vec![City::new(
            "Nice".to_string(),
            None,
            Uuid::new_v4(),
        )]);
        loaded.filters.search = "zzz".to_string();
        assert!(!loaded.is_empty());
        assert!(loaded.has_no_matches());
    }

    #[test]
    fn test_reorder_up_takes_order_below_neighbor() {
        let country_id = Uuid::new_v4();
        let first = City::new("First".to_string(), Some(10), country_id);
        let second = City::new("Second".to_string(), Some(20), country_id);
        let second_id = second.id;
        let view = view_with_cities(vec![first, second]);

        let moved = view
            .reorder(second_id, MoveDirection::Up)
            .expect("has an upper neighbor");
        assert_eq!(moved.order, Some(9));
    }

    #[test]
    fn test_reorder_down_takes_order_above_neighbor() {
        let country_id = Uuid::new_v4();
        let first = City::new("First".to_string(), Some(10), country_id);
        let first_id = first.id;
        let second = City::new("Second".to_string(), Some(20), country_id);
        let view = view_with_cities(vec![first, second]);

        let moved = view
            .reorder(first_id, MoveDirection::Down)
            .expect("has a lower neighbor");
        assert_eq!(moved.order, Some(21));
    }

    #[test]
    fn test_reorder_at_edges_returns_none() {
        let country_id = Uuid::new_v4();
        let only = City::new("Only".to_string(), Some(10), country_id);
        let id = only.id;
        let view = view_with_cities(vec![only]);

        assert!(view.reorder(id, MoveDirection::Up).is_none());
        assert!(view.reorder(id, MoveDirection::Down).is_none());
    }

    #[test]
    fn test_reorder_unknown_id_returns_none() {
        let view = view_with_cities(vec![]);
        assert!(view.reorder(Uuid::new_v4(), MoveDirection::Up).is_none());
    }
}
