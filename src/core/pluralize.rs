//! Pluralization for kebab-case resource names
//!
//! Route names are derived from the singular resource name
//! (`city` -> `cities`, `hotel-card` -> `hotel-cards`,
//! `hotel-amenity` -> `hotel-amenities`). Only the last segment of a
//! kebab-case name is pluralized.

/// Utility for converting singular resource names to their plural route form
pub struct Pluralizer;

impl Pluralizer {
    /// Convert a singular kebab-case resource name to its plural form
    ///
    /// # Examples
    ///
    /// ```
    /// use stayops::core::pluralize::Pluralizer;
    ///
    /// assert_eq!(Pluralizer::pluralize("destination"), "destinations");
    /// assert_eq!(Pluralizer::pluralize("city"), "cities");
    /// assert_eq!(Pluralizer::pluralize("address"), "addresses");
    /// assert_eq!(Pluralizer::pluralize("hotel-amenity"), "hotel-amenities");
    /// ```
    pub fn pluralize(singular: &str) -> String {
        if singular.is_empty() {
            return singular.to_string();
        }

        match singular.rsplit_once('-') {
            Some((prefix, last)) => format!("{}-{}", prefix, Self::pluralize_word(last)),
            None => Self::pluralize_word(singular),
        }
    }

    fn pluralize_word(word: &str) -> String {
        match word {
            // Consonant + y -> ies
            w if w.ends_with('y')
                && w.len() > 1
                && !matches!(
                    w.as_bytes()[w.len() - 2],
                    b'a' | b'e' | b'i' | b'o' | b'u'
                ) =>
            {
                format!("{}ies", &w[..w.len() - 1])
            }

            // Sibilant endings -> es
            w if w.ends_with('s')
                || w.ends_with("sh")
                || w.ends_with("ch")
                || w.ends_with('x')
                || w.ends_with('z') =>
            {
                format!("{}es", w)
            }

            w => format!("{}s", w),
        }
    }
}
