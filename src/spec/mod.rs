//! # OpenAPI Document Module
//!
//! Output side of the exporter. [`types`](self) holds the document shape,
//! [`parameter_schema`] maps graph parameter types onto schema fragments, and
//! the build functions walk a [`GraphIndex`](crate::graph::GraphIndex) depth
//! first to produce the `paths` map before wrapping it in the fixed envelope.
//!
//! ```rust
//! use apigraph_exporter::graph::{ApiGraph, Edge, Operation, ParameterType, PathSegment};
//! use apigraph_exporter::spec::build_openapi;
//!
//! let graph = ApiGraph {
//!     segments: vec![
//!         PathSegment::literal("s1", "users"),
//!         PathSegment::param("p1", "id", ParameterType::Uuid, "abc"),
//!     ],
//!     edges: vec![Edge::new("s1", "p1")],
//!     operations: vec![Operation::new("getUser", "p1", "GET").with_status_codes([200])],
//! };
//! let doc = build_openapi(&graph).unwrap();
//! assert!(doc.paths["/users/{id}"].contains_key("get"));
//! ```

mod build;
mod schema;
mod types;

pub use build::*;
pub use schema::parameter_schema;
pub use types::*;
