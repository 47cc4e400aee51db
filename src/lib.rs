//! # Shaper-RS
//!
//! The shared request-translation and response-shaping layer for REST read
//! endpoints: listings, single-resource lookups and paginated collections.
//!
//! ## Features
//!
//! - **Directive Extraction**: `page`/`limit`/`offset`/`orderBy` and the
//!   open-ended filter criteria, parsed with total, defaulting semantics
//! - **Response Envelopes**: `{data}` for resources and collections,
//!   `{results, totalCount, meta}` for paged result sets
//! - **Transformer Protocol**: per-item transform/raw dichotomy behind an
//!   async resolver seam
//! - **Axum Integration**: [`core::RequestQuery`] extractor and
//!   404-mapping [`core::ApiError`] responses
//! - **Configuration-Based**: optional-key-with-default reads from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shaper::prelude::*;
//!
//! let registry = ResourceRegistry::new()
//!     .register("user", Arc::new(UserResource));
//! let controller = Controller::new(
//!     Arc::new(registry),
//!     Arc::new(ApiConfiguration::empty()),
//! );
//!
//! // In a handler:
//! let pagination = controller.get_pagination(&query);
//! let criteria = controller.get_criteria(&query, None);
//! let result = store.list(pagination, criteria).await; // external
//! let envelope = controller.to_pagination(result, "user", true).await?;
//! ```

pub mod config;
pub mod core;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        controller::Controller,
        error::{ApiError, ApiResult, ErrorResponse},
        list::{
            CollectionEnvelope, ListOptions, ListResult, PageMeta, PaginatedEnvelope,
            ResourceEnvelope,
        },
        query::{Direction, OrderSpec, Pagination, RequestQuery, RESERVED_PARAMS},
        resource::{PassthroughResource, Resource, ResourceRegistry, ResourceResolver},
    };

    // === Config ===
    pub use crate::config::ApiConfiguration;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use indexmap::IndexMap;
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{Value, json};
    pub use std::sync::Arc;

    // === Axum ===
    pub use axum::{
        Json, Router,
        extract::State,
        response::IntoResponse,
        routing::get,
    };
}
