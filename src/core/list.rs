//! List-result contract and response envelopes
//!
//! [`ListResult`] is the shape this layer consumes from the query-execution
//! layer; the envelope types are the uniform wrappers it produces for the
//! wire. Field names on the envelopes (`totalCount`, `totalCountIsEstimate`)
//! are part of the wire contract.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result set returned by the query-execution layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResult<T> {
    pub rows: Vec<T>,
    pub count: u64,
    pub count_is_estimate: bool,
}

/// Listing options sourced from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOptions {
    pub estimate_total_count: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            estimate_total_count: true,
        }
    }
}

/// Envelope for a single resource: `{"data": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceEnvelope {
    pub data: Value,
}

/// Envelope for a collection: `{"data": [...]}`
///
/// Always well-formed, including for an empty input sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionEnvelope {
    pub data: Vec<Value>,
}

/// Envelope for a paged result set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedEnvelope {
    pub results: Vec<Value>,
    pub total_count: u64,
    pub meta: PageMeta,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_count_is_estimate: bool,
}
