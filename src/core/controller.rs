//! The shared controller surface for read endpoints
//!
//! Every listing, lookup and paginated endpoint goes through the same two
//! steps: translate the raw request query into typed directives, then shape
//! whatever the query layer returned into a response envelope. [`Controller`]
//! is that shared surface; endpoint handlers compose it with their own
//! query execution in between.
//!
//! # Example
//! ```rust,ignore
//! use shaper::prelude::*;
//!
//! async fn list_users(query: RequestQuery, controller: Controller) -> ApiResult<PaginatedEnvelope> {
//!     let pagination = controller.get_pagination(&query);
//!     let criteria = controller.get_criteria(&query, None);
//!     let result = user_store.list(pagination, criteria).await; // external
//!     controller.to_pagination(result, "user", true).await
//! }
//! ```

use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;

use crate::config::ApiConfiguration;
use crate::core::error::{ApiError, ApiResult};
use crate::core::list::{
    CollectionEnvelope, ListOptions, ListResult, PageMeta, PaginatedEnvelope, ResourceEnvelope,
};
use crate::core::query::{self, OrderSpec, Pagination, RequestQuery};
use crate::core::resource::{Resource, ResourceResolver};

/// Request translation and response shaping, shared by all read endpoints
///
/// Stateless per request: the controller owns only its resolver and
/// configuration handles, so concurrent handlers can share one instance
/// freely.
#[derive(Clone)]
pub struct Controller {
    resolver: Arc<dyn ResourceResolver>,
    configuration: Arc<ApiConfiguration>,
}

impl Controller {
    pub fn new(resolver: Arc<dyn ResourceResolver>, configuration: Arc<ApiConfiguration>) -> Self {
        Self {
            resolver,
            configuration,
        }
    }

    // === Query-directive extraction ===

    /// Pagination window from `page`, `limit` and `offset`
    pub fn get_pagination(&self, query: &RequestQuery) -> Pagination {
        query::get_pagination(query)
    }

    /// Raw `orderBy` tokens, unparsed
    pub fn get_ordering(&self, query: &RequestQuery) -> Vec<String> {
        query::get_ordering(query)
    }

    /// Filter criteria: every parameter not claimed by a directive
    pub fn get_criteria(
        &self,
        query: &RequestQuery,
        excludes: Option<&[&str]>,
    ) -> IndexMap<String, String> {
        query::get_criteria(query, excludes)
    }

    /// Listing page window; same derivation as [`Self::get_pagination`]
    pub fn get_listing_page(&self, query: &RequestQuery) -> Pagination {
        query::get_pagination(query)
    }

    /// Structured `orderBy` directives
    pub fn get_listing_order(&self, query: &RequestQuery) -> Vec<OrderSpec> {
        query::get_listing_order(query)
    }

    /// Listing options from configuration
    pub fn get_listing_options(&self) -> ListOptions {
        ListOptions {
            estimate_total_count: self
                .configuration
                .get_optional("options.estimateTotalCount", true),
        }
    }

    // === Response shaping ===

    /// Shape one item through the named transformer
    pub async fn to_resource(
        &self,
        item: &Value,
        transformer: &str,
        transform: bool,
    ) -> ApiResult<Value> {
        let resource = self.resolver.resolve(transformer).await?;
        Ok(apply(resource.as_ref(), item, transform))
    }

    /// Shape a sequence of items, order preserved
    ///
    /// The transformer is resolved once and reused for every item; the
    /// output is identical to shaping each item independently.
    pub async fn to_collection(
        &self,
        items: &[Value],
        transformer: &str,
        transform: bool,
    ) -> ApiResult<Vec<Value>> {
        // An empty sequence never touches the resolver; shaping nothing
        // always succeeds regardless of the transformer identifier.
        if items.is_empty() {
            return Ok(Vec::new());
        }
        let resource = self.resolver.resolve(transformer).await?;
        Ok(items
            .iter()
            .map(|item| apply(resource.as_ref(), item, transform))
            .collect())
    }

    /// Wrap one item in a `{"data": ...}` envelope, or fail with NotFound
    ///
    /// An absent item never produces an envelope. Absence covers `None` and
    /// every falsy JSON scalar (`null`, `false`, `0`, `""`); real items are
    /// objects, but a query layer signalling "nothing" with a falsy scalar
    /// gets the same NotFound as one returning nothing at all.
    pub async fn respond_with_resource(
        &self,
        item: Option<Value>,
        transformer: &str,
        transform: bool,
    ) -> ApiResult<ResourceEnvelope> {
        match item {
            Some(item) if !is_falsy(&item) => Ok(ResourceEnvelope {
                data: self.to_resource(&item, transformer, transform).await?,
            }),
            _ => {
                tracing::debug!(transformer, "item absent, responding not found");
                Err(ApiError::NotFound {
                    resource: transformer.to_string(),
                })
            }
        }
    }

    /// Wrap a sequence of items in a `{"data": [...]}` envelope
    ///
    /// Always succeeds, including on empty input.
    pub async fn respond_with_collection(
        &self,
        items: &[Value],
        transformer: &str,
        transform: bool,
    ) -> ApiResult<CollectionEnvelope> {
        Ok(CollectionEnvelope {
            data: self.to_collection(items, transformer, transform).await?,
        })
    }

    /// Shape a paged result set into the `{results, totalCount, meta}` envelope
    ///
    /// The count fields pass through unchanged from the query layer.
    pub async fn to_pagination(
        &self,
        result: ListResult<Value>,
        transformer: &str,
        transform: bool,
    ) -> ApiResult<PaginatedEnvelope> {
        Ok(PaginatedEnvelope {
            results: self
                .to_collection(&result.rows, transformer, transform)
                .await?,
            total_count: result.count,
            meta: PageMeta {
                total_count_is_estimate: result.count_is_estimate,
            },
        })
    }
}

fn is_falsy(item: &Value) -> bool {
    match item {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn apply(resource: &dyn Resource, item: &Value, transform: bool) -> Value {
    if transform {
        resource.transform(item)
    } else {
        resource.raw(item)
    }
}
