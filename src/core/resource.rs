//! Transformer capability: per-item conversion of domain data
//!
//! A [`Resource`] turns one raw domain item into one output object, either
//! through its `transform` mapping or as a passthrough via `raw`. Both must
//! be pure; the controller relies on that to resolve a transformer once per
//! collection and reuse it across items.
//!
//! Resolution is a separate, async seam: a [`ResourceResolver`] maps a
//! transformer identifier to a shared [`Resource`] instance. The bundled
//! [`ResourceRegistry`] is an in-process resolver suitable for most
//! deployments and for tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::error::ApiError;

/// Per-item transformer, converting one domain item into one output object
///
/// Implementations must be pure, side-effect-free mappings.
pub trait Resource: Send + Sync {
    /// Convert an item into its transformed external representation
    fn transform(&self, item: &Value) -> Value;

    /// Convert an item into its raw/passthrough representation
    fn raw(&self, item: &Value) -> Value;
}

/// Resolver seam: transformer identifier to shared [`Resource`] instance
///
/// Resolution may be asynchronous (e.g. backed by a remote capability
/// store); the controller simply awaits it before shaping.
#[async_trait]
pub trait ResourceResolver: Send + Sync {
    async fn resolve(&self, transformer: &str) -> Result<Arc<dyn Resource>, ApiError>;
}

/// Identity transformer: both modes return the item unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughResource;

impl Resource for PassthroughResource {
    fn transform(&self, item: &Value) -> Value {
        item.clone()
    }

    fn raw(&self, item: &Value) -> Value {
        item.clone()
    }
}

/// In-process [`ResourceResolver`] backed by a name-to-instance map
#[derive(Default)]
pub struct ResourceRegistry {
    resources: HashMap<String, Arc<dyn Resource>>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transformer under an identifier, builder style
    pub fn register(mut self, name: impl Into<String>, resource: Arc<dyn Resource>) -> Self {
        self.resources.insert(name.into(), resource);
        self
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

#[async_trait]
impl ResourceResolver for ResourceRegistry {
    async fn resolve(&self, transformer: &str) -> Result<Arc<dyn Resource>, ApiError> {
        match self.resources.get(transformer) {
            Some(resource) => Ok(resource.clone()),
            None => {
                tracing::debug!(transformer, "transformer not registered");
                Err(ApiError::UnknownTransformer {
                    name: transformer.to_string(),
                })
            }
        }
    }
}
