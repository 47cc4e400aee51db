//! Core module containing the controller, directives and shaping types

pub mod controller;
pub mod error;
pub mod list;
pub mod query;
pub mod resource;

pub use controller::Controller;
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use list::{
    CollectionEnvelope, ListOptions, ListResult, PageMeta, PaginatedEnvelope, ResourceEnvelope,
};
pub use query::{Direction, OrderSpec, Pagination, RequestQuery, RESERVED_PARAMS};
pub use resource::{PassthroughResource, Resource, ResourceRegistry, ResourceResolver};
