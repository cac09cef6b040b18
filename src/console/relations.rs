//! Client-side relation resolution and dependent pickers
//!
//! Stored data carries relations in more than one shape (a legacy direct
//! array and newer join rows), so reads resolve through an ordered fallback
//! chain instead of assuming a single shape.

use crate::client::ApiClient;
use crate::core::error::TransportError;
use crate::core::query::ListParams;
use crate::core::resource::Resource;
use crate::entities::{City, Destination, DestinationLandmark, Landmark};
use uuid::Uuid;

/// Placeholder rendered when no relation data is present in any shape
pub const UNASSIGNED: &str = "unassigned";

/// Which relation shape a read resolved through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationShape {
    /// Legacy direct array of related entities
    Direct,
    /// Join rows, possibly with the related entity embedded
    Joined,
    /// Neither shape present
    Unassigned,
}

/// Resolve a two-shape relation, first populated shape wins
pub fn resolve_relation<'a>(
    direct: Option<&'a [Landmark]>,
    joined: Option<&'a [DestinationLandmark]>,
) -> (RelationShape, Vec<&'a Landmark>) {
    if let Some(landmarks) = direct {
        if !landmarks.is_empty() {
            return (RelationShape::Direct, landmarks.iter().collect());
        }
    }
    if let Some(rows) = joined {
        let embedded: Vec<&Landmark> = rows.iter().filter_map(|row| row.landmark.as_ref()).collect();
        if !embedded.is_empty() {
            return (RelationShape::Joined, embedded);
        }
    }
    (RelationShape::Unassigned, Vec::new())
}

/// Display names of a destination's landmarks, through whichever shape holds
/// them, with the unassigned placeholder as last resort
pub fn destination_landmark_names(destination: &Destination) -> Vec<String> {
    let (shape, landmarks) = resolve_relation(
        destination.landmarks.as_deref(),
        destination.destination_landmarks.as_deref(),
    );
    match shape {
        RelationShape::Unassigned => vec![UNASSIGNED.to_string()],
        _ => landmarks.iter().map(|l| l.name.clone()).collect(),
    }
}

/// One selectable option of a [`RelationPicker`]
#[derive(Debug, Clone)]
pub struct PickerOption {
    pub id: Uuid,
    pub label: String,
    /// For child options: the parent they belong to
    pub parent_id: Option<Uuid>,
}

/// Dependent parent/child dropdown pair (country -> city)
///
/// Selecting a parent narrows the child options. Changing the parent clears
/// the child selection unless it still belongs to the new parent, so an edit
/// form opening on an existing pair keeps both selections intact.
#[derive(Debug, Clone, Default)]
pub struct RelationPicker {
    options: Vec<PickerOption>,
    parent: Option<Uuid>,
    child: Option<Uuid>,
}

impl RelationPicker {
    pub fn new(options: Vec<PickerOption>) -> Self {
        Self {
            options,
            parent: None,
            child: None,
        }
    }

    /// A picker opening on an existing selection (edit forms)
    pub fn for_edit(options: Vec<PickerOption>, parent: Option<Uuid>, child: Option<Uuid>) -> Self {
        let mut picker = Self::new(options);
        picker.parent = parent;
        picker.child = child.filter(|id| picker.belongs_to_parent(*id, parent));
        picker
    }

    pub fn parent(&self) -> Option<Uuid> {
        self.parent
    }

    pub fn child(&self) -> Option<Uuid> {
        self.child
    }

    /// Select (or clear) the parent
    ///
    /// Identity comparison guards against redundant clears: re-selecting the
    /// same parent leaves the child untouched.
    pub fn select_parent(&mut self, parent: Option<Uuid>) {
        if parent == self.parent {
            return;
        }
        self.parent = parent;
        if let Some(child) = self.child {
            if !self.belongs_to_parent(child, parent) {
                self.child = None;
            }
        }
    }

    /// Child options under the current parent; empty when no parent is set
    pub fn child_options(&self) -> Vec<&PickerOption> {
        let Some(parent) = self.parent else {
            return Vec::new();
        };
        self.options
            .iter()
            .filter(|option| option.parent_id == Some(parent))
            .collect()
    }

    /// Select a child, refused when it does not belong to the current parent
    pub fn select_child(&mut self, child: Option<Uuid>) {
        match child {
            None => self.child = None,
            Some(id) if self.belongs_to_parent(id, self.parent) => self.child = Some(id),
            Some(_) => {}
        }
    }

    fn belongs_to_parent(&self, child: Uuid, parent: Option<Uuid>) -> bool {
        let Some(parent) = parent else {
            return false;
        };
        self.options
            .iter()
            .any(|option| option.id == child && option.parent_id == Some(parent))
    }
}

/// Fetch the city options under one country, as picker options
pub async fn city_options(
    client: &ApiClient,
    country_id: Uuid,
) -> Result<Vec<PickerOption>, TransportError> {
    let params = ListParams::new().with_filter("countryId", country_id.to_string());
    let page = client.list::<City>(&params).await?;
    Ok(page
        .items
        .into_iter()
        .map(|city| PickerOption {
            id: city.id(),
            label: city.name.clone(),
            parent_id: Some(city.country_id),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landmark(name: &str) -> Landmark {
        Landmark::new(name.to_string(), None, None, None)
    }

    fn destination(
        direct: Option<Vec<Landmark>>,
        joined: Option<Vec<DestinationLandmark>>,
    ) -> Destination {
        Destination::new("Marseille".to_string(), None, None, None, direct, joined)
    }

    #[test]
    fn test_direct_shape_wins_when_populated() {
        let d = destination(
            Some(vec![landmark("Old Port")]),
            Some(vec![DestinationLandmark {
                id: Uuid::new_v4(),
                landmark_id: Uuid::new_v4(),
                landmark: Some(landmark("Ignored")),
            }]),
        );
        let (shape, landmarks) =
            resolve_relation(d.landmarks.as_deref(), d.destination_landmarks.as_deref());
        assert_eq!(shape, RelationShape::Direct);
        assert_eq!(landmarks[0].name, "Old Port");
    }

    #[test]
    fn test_joined_shape_used_when_direct_empty() {
        let d = destination(
            Some(vec![]),
            Some(vec![DestinationLandmark {
                id: Uuid::new_v4(),
                landmark_id: Uuid::new_v4(),
                landmark: Some(landmark("Basilica")),
            }]),
        );
        let names = destination_landmark_names(&d);
        assert_eq!(names, vec!["Basilica".to_string()]);
    }

    #[test]
    fn test_unassigned_placeholder() {
        let d = destination(None, None);
        assert_eq!(destination_landmark_names(&d), vec![UNASSIGNED.to_string()]);

        // Join rows without embedded landmarks resolve to unassigned too
        let d = destination(
            None,
            Some(vec![DestinationLandmark {
                id: Uuid::new_v4(),
                landmark_id: Uuid::new_v4(),
                landmark: None,
            }]),
        );
        assert_eq!(destination_landmark_names(&d), vec![UNASSIGNED.to_string()]);
    }

    fn sample_options(france: Uuid, italy: Uuid) -> (Vec<PickerOption>, Uuid, Uuid) {
        let nice = Uuid::new_v4();
        let rome = Uuid::new_v4();
        let options = vec![
            PickerOption {
                id: nice,
                label: "Nice".to_string(),
                parent_id: Some(france),
            },
            PickerOption {
                id: rome,
                label: "Rome".to_string(),
                parent_id: Some(italy),
            },
        ];
        (options, nice, rome)
    }

    #[test]
    fn test_parent_narrows_children() {
        let (france, italy) = (Uuid::new_v4(), Uuid::new_v4());
        let (options, _, _) = sample_options(france, italy);
        let mut picker = RelationPicker::new(options);

        assert!(picker.child_options().is_empty());
        picker.select_parent(Some(france));
        let labels: Vec<&str> = picker
            .child_options()
            .iter()
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Nice"]);
    }

    #[test]
    fn test_parent_change_clears_foreign_child() {
        let (france, italy) = (Uuid::new_v4(), Uuid::new_v4());
        let (options, nice, _) = sample_options(france, italy);
        let mut picker = RelationPicker::new(options);

        picker.select_parent(Some(france));
        picker.select_child(Some(nice));
        assert_eq!(picker.child(), Some(nice));

        picker.select_parent(Some(italy));
        assert_eq!(picker.child(), None);
    }

    #[test]
    fn test_reselecting_same_parent_keeps_child() {
        let (france, italy) = (Uuid::new_v4(), Uuid::new_v4());
        let (options, nice, _) = sample_options(france, italy);
        let mut picker = RelationPicker::new(options);

        picker.select_parent(Some(france));
        picker.select_child(Some(nice));
        picker.select_parent(Some(france));
        assert_eq!(picker.child(), Some(nice));
    }

    #[test]
    fn test_for_edit_preserves_valid_pair() {
        let (france, italy) = (Uuid::new_v4(), Uuid::new_v4());
        let (options, nice, rome) = sample_options(france, italy);

        let picker = RelationPicker::for_edit(options.clone(), Some(france), Some(nice));
        assert_eq!(picker.parent(), Some(france));
        assert_eq!(picker.child(), Some(nice));

        // Mismatched pair drops the child
        let picker = RelationPicker::for_edit(options, Some(france), Some(rome));
        assert_eq!(picker.child(), None);
    }

    #[test]
    fn test_select_child_refuses_foreign_option() {
        let (france, italy) = (Uuid::new_v4(), Uuid::new_v4());
        let (options, _, rome) = sample_options(france, italy);
        let mut picker = RelationPicker::new(options);

        picker.select_parent(Some(france));
        picker.select_child(Some(rome));
        assert_eq!(picker.child(), None);
    }

    #[test]
    fn test_clearing_parent_empties_children() {
        let (france, italy) = (Uuid::new_v4(), Uuid::new_v4());
        let (options, nice, _) = sample_options(france, italy);
        let mut picker = RelationPicker::new(options);

        picker.select_parent(Some(france));
        picker.select_child(Some(nice));
        picker.select_parent(None);
        assert!(picker.child_options().is_empty());
        assert_eq!(picker.child(), None);
    }
}
