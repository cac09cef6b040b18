//! Reusable field validators
//!
//! Each validator appends at most one message per field into a [`FieldErrors`]
//! accumulator. Field names are wire-format (camelCase) so the console can map
//! messages back onto inputs.

use crate::core::error::FieldErrors;

/// Required non-empty string (whitespace-only counts as empty)
pub fn require_non_empty(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(field, "is required");
    }
}

/// Required `Option` field (relation pickers, numeric inputs)
pub fn require_some<T>(errors: &mut FieldErrors, field: &str, value: &Option<T>) {
    if value.is_none() {
        errors.push(field, "is required");
    }
}

/// Number must be strictly positive
pub fn check_positive(errors: &mut FieldErrors, field: &str, value: f64) {
    if value <= 0.0 {
        errors.push(field, "must be positive");
    }
}

/// Number must lie within an inclusive range
pub fn check_range(errors: &mut FieldErrors, field: &str, value: f64, min: f64, max: f64) {
    if value < min || value > max {
        errors.push(field, format!("must be between {} and {}", min, max));
    }
}

/// GPS latitude bounds
pub fn check_latitude(errors: &mut FieldErrors, field: &str, value: f64) {
    check_range(errors, field, value, -90.0, 90.0);
}

/// GPS longitude bounds
pub fn check_longitude(errors: &mut FieldErrors, field: &str, value: f64) {
    check_range(errors, field, value, -180.0, 180.0);
}

/// Cross-field rule: `value` must strictly exceed another field's value
/// (e.g. a strikethrough price vs. the base price)
pub fn check_exceeds(
    errors: &mut FieldErrors,
    field: &str,
    value: f64,
    other_label: &str,
    other: f64,
) {
    if value <= other {
        errors.push(field, format!("must exceed {}", other_label));
    }
}

/// Value must be one of a fixed label set
pub fn check_in_list(errors: &mut FieldErrors, field: &str, value: &str, allowed: &[&str]) {
    if !allowed.contains(&value) {
        errors.push(field, format!("must be one of: {}", allowed.join(", ")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_non_empty_rejects_blank() {
        let mut errors = FieldErrors::new();
        require_non_empty(&mut errors, "name", "");
        require_non_empty(&mut errors, "title", "   ");
        assert_eq!(errors.get("name"), Some("is required"));
        assert_eq!(errors.get("title"), Some("is required"));
    }

    #[test]
    fn test_require_non_empty_accepts_value() {
        let mut errors = FieldErrors::new();
        require_non_empty(&mut errors, "name", "Azur Palace");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_require_some() {
        let mut errors = FieldErrors::new();
        require_some::<u8>(&mut errors, "starRating", &None);
        require_some(&mut errors, "cityId", &Some(uuid::Uuid::new_v4()));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("starRating"), Some("is required"));
    }

    #[test]
    fn test_check_positive() {
        let mut errors = FieldErrors::new();
        check_positive(&mut errors, "basePricePerNight", 0.0);
        assert_eq!(errors.get("basePricePerNight"), Some("must be positive"));

        let mut ok = FieldErrors::new();
        check_positive(&mut ok, "basePricePerNight", 99.5);
        assert!(ok.is_empty());
    }

    #[test]
    fn test_check_range_bounds_inclusive() {
        let mut errors = FieldErrors::new();
        check_range(&mut errors, "starRating", 1.0, 1.0, 5.0);
        check_range(&mut errors, "score", 100.0, 0.0, 100.0);
        assert!(errors.is_empty());

        check_range(&mut errors, "starRating", 6.0, 1.0, 5.0);
        assert_eq!(errors.get("starRating"), Some("must be between 1 and 5"));
    }

    #[test]
    fn test_gps_bounds() {
        let mut errors = FieldErrors::new();
        check_latitude(&mut errors, "latitude", 91.0);
        check_longitude(&mut errors, "longitude", -180.5);
        assert_eq!(errors.len(), 2);

        let mut ok = FieldErrors::new();
        check_latitude(&mut ok, "latitude", -90.0);
        check_longitude(&mut ok, "longitude", 180.0);
        assert!(ok.is_empty());
    }

    #[test]
    fn test_check_exceeds() {
        let mut errors = FieldErrors::new();
        check_exceeds(&mut errors, "regularPrice", 80.0, "base price", 100.0);
        assert_eq!(errors.get("regularPrice"), Some("must exceed base price"));

        let mut ok = FieldErrors::new();
        check_exceeds(&mut ok, "regularPrice", 120.0, "base price", 100.0);
        assert!(ok.is_empty());
    }

    #[test]
    fn test_check_exceeds_equal_is_an_error() {
        let mut errors = FieldErrors::new();
        check_exceeds(&mut errors, "regularPrice", 100.0, "base price", 100.0);
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_check_in_list() {
        let allowed = ["City", "Beach", "Mountain"];
        let mut errors = FieldErrors::new();
        check_in_list(&mut errors, "type", "Desert", &allowed);
        assert!(errors.get("type").expect("error").contains("City"));

        let mut ok = FieldErrors::new();
        check_in_list(&mut ok, "type", "Beach", &allowed);
        assert!(ok.is_empty());
    }
}
