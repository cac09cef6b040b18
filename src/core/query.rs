//! List query parameters and pagination envelope
//!
//! List endpoints answer a raw JSON array by default and switch to the
//! `{ data, pagination }` envelope only when a `page` parameter is sent.
//! Unknown query parameters are treated as exact-match field filters
//! (e.g. `GET /api/cities?countryId=<uuid>`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Parsed list query parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams {
    /// Eager-load related entities into the response
    pub include: bool,

    /// Requested page (enables the pagination envelope)
    pub page: Option<usize>,

    /// Page size, clamped to [1, 100]
    pub limit: Option<usize>,

    /// Exact-match field filters, applied server-side
    pub filters: IndexMap<String, String>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_include(mut self) -> Self {
        self.include = true;
        self
    }

    pub fn with_page(mut self, page: usize, limit: usize) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }

    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    /// Effective page number, at least 1
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    /// Effective page size
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(20).clamp(1, 100)
    }

    /// Parse from raw query-string pairs
    ///
    /// Reserved keys (`include`, `page`, `limit`) are lifted out; everything
    /// else becomes a filter. Unparseable reserved values are ignored rather
    /// than rejected.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut params = Self::new();
        for (key, value) in pairs {
            match key {
                "include" => params.include = matches!(value, "true" | "1"),
                "page" => params.page = value.parse().ok(),
                "limit" => params.limit = value.parse().ok(),
                _ => {
                    params.filters.insert(key.to_string(), value.to_string());
                }
            }
        }
        params
    }

    /// Serialize into query-string pairs (used by the transport shim)
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if self.include {
            pairs.push(("include".to_string(), "true".to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        for (field, value) in &self.filters {
            pairs.push((field.clone(), value.clone()));
        }
        pairs
    }
}

/// Paginated response envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    pub total_pages: usize,

    pub has_next: bool,

    pub has_prev: bool,
}

impl PaginationMeta {
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total_pages = if total == 0 { 0 } else { total.div_ceil(limit) };
        // Saturating arithmetic: `page` comes straight from the query string
        let start = (page - 1).saturating_mul(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: start.saturating_add(limit) < total,
            has_prev: page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ListParams::new();
        assert!(!params.include);
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 20);
        assert!(params.filters.is_empty());
    }

    #[test]
    fn test_from_pairs_lifts_reserved_keys() {
        let params = ListParams::from_pairs([
            ("include", "true"),
            ("page", "2"),
            ("limit", "10"),
            ("countryId", "abc"),
        ]);
        assert!(params.include);
        assert_eq!(params.page, Some(2));
        assert_eq!(params.limit, Some(10));
        assert_eq!(params.filters.get("countryId").map(String::as_str), Some("abc"));
    }

    #[test]
    fn test_from_pairs_ignores_bad_reserved_values() {
        let params = ListParams::from_pairs([("page", "xyz"), ("include", "maybe")]);
        assert_eq!(params.page, None);
        assert!(!params.include);
    }

    #[test]
    fn test_pairs_roundtrip() {
        let original = ListParams::new()
            .with_include()
            .with_page(3, 25)
            .with_filter("cityId", "some-id");
        let pairs = original.to_pairs();
        let borrowed: Vec<(&str, &str)> =
            pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        assert_eq!(ListParams::from_pairs(borrowed), original);
    }

    #[test]
    fn test_limit_clamped() {
        let params = ListParams::new().with_page(1, 5000);
        assert_eq!(params.limit(), 100);
    }

    #[test]
    fn test_pagination_meta() {
        let meta = PaginationMeta::new(1, 20, 145);
        assert_eq!(meta.total, 145);
        assert_eq!(meta.total_pages, 8);
        assert!(!meta.has_prev);
        assert!(meta.has_next);
    }

    #[test]
    fn test_pagination_meta_last_page() {
        let meta = PaginationMeta::new(8, 20, 145);
        assert!(!meta.has_next);
        assert!(meta.has_prev);
    }

    #[test]
    fn test_pagination_meta_huge_page() {
        let meta = PaginationMeta::new(usize::MAX, 20, 145);
        assert!(!meta.has_next);
        assert!(meta.has_prev);
        assert_eq!(meta.total_pages, 8);
    }

    #[test]
    fn test_pagination_meta_empty() {
        let meta = PaginationMeta::new(1, 20, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
    }
}
