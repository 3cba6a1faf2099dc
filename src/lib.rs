//! # apigraph-exporter
//!
//! Turns an **API graph**, a rooted forest of URL path segments with HTTP
//! operations hanging off them, into an [OpenAPI 3.0](https://spec.openapis.org/oas/v3.0.0)
//! document, serialized as compact JSON.
//!
//! ## Overview
//!
//! A graph is three flat lists: segments (literal like `users` or parameter
//! like `{id}`), parent to child edges, and operations pinned to a segment.
//! Every root to segment walk spells a URL path; every operation reachable on
//! that walk becomes an entry in `paths`, inheriting the path parameters of
//! the segments above it.
//!
//! ## Architecture
//!
//! - **[`graph`]** - input model, [`GraphIndex`](graph::GraphIndex) and file loading
//! - **[`spec`]** - output model, parameter schemas and the depth-first path traversal
//! - **[`exporter`]** - the request/response operation `BuildOpenAPISpec`
//! - **[`error`]** - [`BuildError`] and [`MalformedGraph`]
//! - **[`validator`]** - collect every graph problem at once for `apigraph lint`
//! - **[`server`]** - HTTP exposure on `may_minihttp`
//! - **[`config`]**, **[`otel`]** - service configuration and structured logging
//! - **[`static_files`]**, **[`swagger`]** - swagger UI mount and companion schema proxy
//! - **[`cli`]** - the `apigraph` binary
//!
//! ### Build Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Service as server::ExporterService
//!     participant Exporter as exporter::build_openapi_spec
//!     participant Index as graph::GraphIndex
//!     participant Walk as spec::traverse
//!
//!     Client->>Service: POST /v1/openapi/build {"apiGraph": ...}
//!     Service->>Exporter: BuildSpecRequest
//!     Exporter->>Index: GraphIndex::build(&graph)
//!     Index-->>Exporter: segments, children, operations, roots
//!     Exporter->>Walk: traverse(&index)
//!     Walk->>Walk: DFS per root, copy-on-descend<br/>path parts + inherited params
//!     Walk-->>Exporter: paths
//!     Exporter-->>Service: {"specJson": "..."}
//!     Service-->>Client: 200 / 400 / 422
//! ```
//!
//! ## Example
//!
//! ```rust
//! use apigraph_exporter::exporter::{build_openapi_spec, BuildSpecRequest};
//! use apigraph_exporter::graph::{ApiGraph, Operation, PathSegment};
//!
//! let request = BuildSpecRequest {
//!     api_graph: ApiGraph {
//!         segments: vec![PathSegment::literal("s1", "health")],
//!         edges: vec![],
//!         operations: vec![Operation::new("health", "s1", "GET").with_status_codes([200])],
//!     },
//! };
//! let response = build_openapi_spec(&request).unwrap();
//! assert!(response.spec_json.contains("\"/health\""));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod exporter;
pub mod graph;
pub mod otel;
pub mod server;
pub mod spec;
pub mod static_files;
pub mod swagger;
pub mod validator;

pub use error::{BuildError, MalformedGraph};
pub use exporter::{build_openapi_spec, BuildSpecRequest, BuildSpecResponse};
pub use graph::{load_graph, ApiGraph, GraphIndex};
pub use spec::{build_openapi, build_openapi_with, BuildOptions, CollisionPolicy, OpenApiDocument};
