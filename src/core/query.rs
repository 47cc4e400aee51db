//! Raw query parameters and directive extraction
//!
//! This module turns an untyped HTTP query string into the normalized
//! directives a query layer consumes: pagination, ordering and filter
//! criteria. All extraction functions are total - missing or malformed
//! parameters fall back to defaults rather than producing errors.
//!
//! # Example
//! ```rust,ignore
//! // In handler:
//! pub async fn list_items(query: RequestQuery) -> ... {
//!     let pagination = get_pagination(&query);   // {offset, limit}
//!     let order = get_listing_order(&query);     // [{property, direction}]
//!     let criteria = get_criteria(&query, None); // everything else
//! }
//!
//! // Usage:
//! GET /items?page=2&limit=10
//! GET /items?orderBy=amount:desc,id&status=active
//! ```

use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Parameter names consumed by the directive extractors.
///
/// Everything else in the query string is treated as a filter-criteria key.
/// These names are part of the wire contract and must not be renamed.
pub const RESERVED_PARAMS: [&str; 5] = ["page", "limit", "offset", "orderBy", "transform"];

/// The raw, already-parsed query string of a request
///
/// A single-valued, insertion-ordered map from parameter name to raw value.
/// When a parameter is repeated, the last occurrence wins. Values are kept
/// as strings; the extraction functions below apply defaulting, never
/// validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestQuery(IndexMap<String, String>);

impl RequestQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the raw value of a parameter
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Set a parameter, replacing any previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Iterate parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a parameter as a non-negative integer
    ///
    /// Returns `None` for absent or non-numeric values; callers treat both
    /// the same way they treat an absent parameter.
    fn get_u64(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(|v| v.trim().parse::<u64>().ok())
    }
}

impl FromIterator<(String, String)> for RequestQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for RequestQuery {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

impl From<IndexMap<String, String>> for RequestQuery {
    fn from(map: IndexMap<String, String>) -> Self {
        Self(map)
    }
}

impl<S> FromRequestParts<S> for RequestQuery
where
    S: Send + Sync,
{
    type Rejection = QueryRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Deserializing into pairs keeps the parameter order of the URL.
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state).await?;
        Ok(pairs.into_iter().collect())
    }
}

/// Offset/limit window sent to the query layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

/// Sort direction for a single ordering property
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

/// One parsed entry of the `orderBy` parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSpec {
    pub property: String,
    pub direction: Direction,
}

/// Extract the pagination window from `page`, `limit` and `offset`
///
/// Defaulting rules:
/// - `limit` falls back to 100 when absent, zero or non-numeric.
/// - `offset` is `(page - 1) * limit` when both `page` and a usable raw
///   `limit` are present, else 0. The raw `limit` participates in the
///   product, not the defaulted one: `page=3` without a `limit` lands on
///   offset 0, matching the legacy endpoints this layer replaces.
/// - An explicit non-zero `offset` parameter always overrides the
///   page-derived offset.
///
/// Inputs are never rejected; garbage values behave like absent ones.
pub fn get_pagination(query: &RequestQuery) -> Pagination {
    let raw_limit = query.get_u64("limit").filter(|limit| *limit != 0);
    let limit = raw_limit.unwrap_or(100);

    let mut offset = match (query.get_u64("page"), raw_limit) {
        (Some(page), Some(raw_limit)) => page.saturating_sub(1).saturating_mul(raw_limit),
        _ => 0,
    };

    if let Some(explicit) = query.get_u64("offset").filter(|offset| *offset != 0) {
        offset = explicit;
    }

    Pagination { offset, limit }
}

/// Extract the raw `orderBy` tokens, unparsed
///
/// Each token has the shape `property[:direction]`; callers that want the
/// structured view use [`get_listing_order`] instead. Returns an empty
/// sequence when `orderBy` is absent.
pub fn get_ordering(query: &RequestQuery) -> Vec<String> {
    order_tokens(query)
}

/// Extract the structured ordering directives
///
/// Same comma-split as [`get_ordering`], then each token is split on `:`;
/// the direction is descending only when the second segment is exactly
/// `"desc"`, anything else coerces to ascending.
pub fn get_listing_order(query: &RequestQuery) -> Vec<OrderSpec> {
    order_tokens(query)
        .iter()
        .map(|token| {
            let mut segments = token.split(':');
            OrderSpec {
                property: segments.next().unwrap_or_default().to_string(),
                direction: if segments.next() == Some("desc") {
                    Direction::Desc
                } else {
                    Direction::Asc
                },
            }
        })
        .collect()
}

// Single canonical parse step shared by both ordering views.
fn order_tokens(query: &RequestQuery) -> Vec<String> {
    match query.get("orderBy") {
        Some(raw) => raw.split(',').map(str::to_string).collect(),
        None => Vec::new(),
    }
}

/// Extract the filter criteria: every parameter not claimed by a directive
///
/// Keys and values are copied verbatim, in parameter order; this layer
/// forwards them opaquely to the query layer without knowing the filter
/// schema. Pass `None` to use [`RESERVED_PARAMS`] as the exclusion set.
pub fn get_criteria(query: &RequestQuery, excludes: Option<&[&str]>) -> IndexMap<String, String> {
    let excludes = excludes.unwrap_or(&RESERVED_PARAMS);
    query
        .iter()
        .filter(|(name, _)| !excludes.contains(name))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}
