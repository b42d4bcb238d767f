//! List query state and query-string encoding.
//!
//! # Design
//! Filters are typed structs of `Option` fields. Encoding goes through
//! `serde_json::Value` so any filter type works, and drops every key whose
//! value is null or a blank string: an absent filter means "no filter", it is
//! never sent as `name=` or `name=null`.

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::page::{offered_page_size, DEFAULT_PAGE_SIZE};

/// Encode a flat serializable value as `k=v&k=v`, keys sorted, absent and
/// blank values dropped.
pub fn encode_query<Q: Serialize + ?Sized>(query: &Q) -> Result<String, ApiError> {
    let value =
        serde_json::to_value(query).map_err(|e| ApiError::Serialization(e.to_string()))?;
    let map = match value {
        Value::Object(map) => map,
        Value::Null => return Ok(String::new()),
        other => {
            return Err(ApiError::Serialization(format!(
                "query must serialize to an object, got {other}"
            )))
        }
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        let rendered = match value {
            Value::Null => continue,
            Value::String(s) if s.trim().is_empty() => continue,
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(ApiError::Serialization(format!(
                    "query field `{key}` is not a scalar"
                )))
            }
        };
        pairs.push(format!(
            "{}={}",
            urlencoding::encode(&key),
            urlencoding::encode(&rendered)
        ));
    }
    Ok(pairs.join("&"))
}

/// Encode `{...filters, page, size}` for a list call.
pub fn encode_list_query<F: Serialize>(filters: &F, page: u32, size: u32) -> Result<String, ApiError> {
    let mut value =
        serde_json::to_value(filters).map_err(|e| ApiError::Serialization(e.to_string()))?;
    match &mut value {
        Value::Object(map) => {
            map.insert("page".to_string(), Value::from(page));
            map.insert("size".to_string(), Value::from(size));
        }
        Value::Null => {
            value = serde_json::json!({ "page": page, "size": size });
        }
        _ => {
            return Err(ApiError::Serialization(
                "filters must serialize to an object".to_string(),
            ))
        }
    }
    encode_query(&value)
}

/// Current filters and pagination for one list view.
///
/// Every mutation bumps `revision`, which is what the list controller
/// watches to decide whether a re-fetch is due. The page size is always one
/// of `PAGE_SIZES`; other requests snap to the next offered size.
#[derive(Debug, Clone)]
pub struct QueryState<F> {
    filters: F,
    page: u32,
    size: u32,
    revision: u64,
}

impl<F: Default> Default for QueryState<F> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<F: Default> QueryState<F> {
    pub fn new(size: u32) -> Self {
        Self {
            filters: F::default(),
            page: 1,
            size: offered_page_size(size),
            revision: 0,
        }
    }

    /// Clear filters and go back to page 1. Page size is kept.
    pub fn reset(&mut self) {
        self.filters = F::default();
        self.page = 1;
        self.revision += 1;
    }
}

impl<F> QueryState<F> {
    pub fn filters(&self) -> &F {
        &self.filters
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the filters. Always lands on page 1.
    pub fn set_filters(&mut self, filters: F) {
        self.filters = filters;
        self.page = 1;
        self.revision += 1;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
        self.revision += 1;
    }

    /// Change the page size. Always lands on page 1.
    pub fn set_size(&mut self, size: u32) {
        self.size = offered_page_size(size);
        self.page = 1;
        self.revision += 1;
    }
}

impl<F: Serialize> QueryState<F> {
    /// The encoded `{...filters, page, size}` query string.
    pub fn to_query_string(&self) -> Result<String, ApiError> {
        encode_list_query(&self.filters, self.page, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Clone, Default, Serialize, PartialEq)]
    struct Filter {
        name: Option<String>,
        status: Option<i32>,
    }

    #[test]
    fn absent_and_blank_filters_are_dropped() {
        let filter = Filter {
            name: Some("  ".to_string()),
            status: None,
        };
        assert_eq!(encode_list_query(&filter, 1, 10).unwrap(), "page=1&size=10");
    }

    #[test]
    fn present_filters_are_encoded_sorted() {
        let filter = Filter {
            name: Some("Line 5 & 6".to_string()),
            status: Some(1),
        };
        assert_eq!(
            encode_list_query(&filter, 2, 20).unwrap(),
            "name=Line%205%20%26%206&page=2&size=20&status=1"
        );
    }

    #[test]
    fn nested_values_are_rejected() {
        let err = encode_query(&serde_json::json!({ "ids": [1, 2] })).unwrap_err();
        assert!(matches!(err, ApiError::Serialization(_)));
    }

    #[test]
    fn set_filters_resets_page() {
        let mut state: QueryState<Filter> = QueryState::default();
        state.set_page(4);
        state.set_filters(Filter {
            name: Some("bus".into()),
            status: None,
        });
        assert_eq!(state.page(), 1);
        assert_eq!(state.filters().name.as_deref(), Some("bus"));
    }

    #[test]
    fn set_size_resets_page_and_set_page_keeps_size() {
        let mut state: QueryState<Filter> = QueryState::new(20);
        state.set_page(3);
        assert_eq!((state.page(), state.size()), (3, 20));
        state.set_size(50);
        assert_eq!((state.page(), state.size()), (1, 50));
    }

    #[test]
    fn reset_clears_filters_but_keeps_size() {
        let mut state: QueryState<Filter> = QueryState::new(50);
        state.set_filters(Filter {
            name: Some("x".into()),
            status: Some(2),
        });
        state.set_page(2);
        state.reset();
        assert_eq!(state.filters(), &Filter::default());
        assert_eq!((state.page(), state.size()), (1, 50));
    }

    #[test]
    fn every_change_bumps_revision() {
        let mut state: QueryState<Filter> = QueryState::default();
        let r0 = state.revision();
        state.set_page(2);
        state.set_size(20);
        state.set_filters(Filter::default());
        state.reset();
        assert_eq!(state.revision(), r0 + 4);
    }

    #[test]
    fn sizes_outside_the_offered_set_are_snapped() {
        let mut state: QueryState<Filter> = QueryState::new(0);
        assert_eq!(state.size(), 10);
        state.set_size(7);
        assert_eq!(state.size(), 10);
        state.set_size(30);
        assert_eq!(state.size(), 50);
        state.set_size(u32::MAX);
        assert_eq!(state.size(), 100);
        assert!(state.to_query_string().unwrap().ends_with("size=100"));
    }

    #[test]
    fn page_zero_is_clamped() {
        let mut state: QueryState<Filter> = QueryState::default();
        state.set_page(0);
        assert_eq!(state.page(), 1);
    }
}
