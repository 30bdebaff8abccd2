//! Page-based slicing for list endpoints.
//!
//! Lists are fetched whole from the repository and sliced in memory:
//! page `p` of size `n` covers items `(p - 1) * n .. p * n`.
//!
//! - `page`: Page number (1-indexed, default: 1)
//! - `perPage`: Items per page (1-100, default: 20)
//!
//! A page past the end yields an empty list, never an error.
//!
//! # Example
//!
//! ```ignore
//! use classbook_core::pagination::PageParams;
//!
//! // GET /v1/teachers?page=2&perPage=10
//! async fn list_teachers(
//!     Query(params): Query<PageParams>,
//! ) -> Result<Json<Vec<Teacher>>, AppError> {
//!     let teachers = service.list(params.page(), params.per_page()).await?;
//!     Ok(Json(teachers))
//! }
//! ```

use serde::{Deserialize, Deserializer};
use utoipa::IntoParams;

pub const DEFAULT_PER_PAGE: i64 = 20;
pub const MAX_PER_PAGE: i64 = 100;

/// Deserializes an optional string into an optional i64.
///
/// Handles the case where query parameters may be empty strings,
/// which should be treated as `None`.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Query parameters for page-based listing.
///
/// # Limits
///
/// - `page` is clamped to a minimum of 1
/// - `per_page` is clamped to the range [1, 100]
#[derive(Debug, Clone, Copy, Hash, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Items per page (1-100, default: 20)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub per_page: Option<i64>,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: Some(1),
            per_page: Some(DEFAULT_PER_PAGE),
        }
    }
}

impl PageParams {
    /// Returns the effective page, clamped to a minimum of 1.
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Returns the effective page size, clamped to [1, 100].
    #[must_use]
    pub fn per_page(&self) -> i64 {
        self.per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE)
    }
}

/// Slices `items` to the 1-based `page` of size `per_page`.
///
/// Non-positive arguments are treated as 1; pages past the end are empty.
pub fn slice_page<T>(items: Vec<T>, page: i64, per_page: i64) -> Vec<T> {
    let page = page.max(1) as usize;
    let per_page = per_page.max(1) as usize;
    let start = (page - 1).saturating_mul(per_page);

    items.into_iter().skip(start).take(per_page).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_params_default() {
        let params = PageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), 20);
    }

    #[test]
    fn test_page_params_clamping() {
        let params = PageParams {
            page: Some(-3),
            per_page: Some(500),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), 100);

        let params = PageParams {
            page: Some(2),
            per_page: Some(0),
        };
        assert_eq!(params.per_page(), 1);
    }

    #[test]
    fn test_slice_first_and_second_page() {
        let items: Vec<i32> = (1..=5).collect();
        assert_eq!(slice_page(items.clone(), 1, 2), vec![1, 2]);
        assert_eq!(slice_page(items.clone(), 2, 2), vec![3, 4]);
        assert_eq!(slice_page(items, 3, 2), vec![5]);
    }

    #[test]
    fn test_slice_out_of_range_is_empty() {
        let items: Vec<i32> = (1..=5).collect();
        assert!(slice_page(items, 4, 2).is_empty());
        assert!(slice_page(Vec::<i32>::new(), 1, 20).is_empty());
    }

    #[test]
    fn test_slice_huge_page_does_not_overflow() {
        let items: Vec<i32> = (1..=3).collect();
        assert!(slice_page(items, i64::MAX, i64::MAX).is_empty());
    }

    #[test]
    fn test_page_params_deserialize_camel_case() {
        let json = r#"{"page":"3","perPage":"25"}"#;
        let params: PageParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.page(), 3);
        assert_eq!(params.per_page(), 25);
    }

    #[test]
    fn test_page_params_deserialize_empty_strings() {
        let json = r#"{"page":"","perPage":""}"#;
        let params: PageParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), 20);
    }

    #[test]
    fn test_page_params_deserialize_missing_fields() {
        let params: PageParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page(), 1);
        assert_eq!(params.per_page(), 20);
    }

    #[test]
    fn test_page_params_max_page_slices_to_empty() {
        let json = r#"{"page":"9223372036854775807","perPage":"100"}"#;
        let params: PageParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.page(), i64::MAX);

        let items: Vec<i32> = (1..=10).collect();
        assert!(slice_page(items, params.page(), params.per_page()).is_empty());
    }
}
