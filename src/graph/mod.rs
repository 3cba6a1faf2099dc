//! # Route Graph Module
//!
//! Input side of the exporter: the graph model as it arrives on the wire, the
//! lookup index the traversal runs over, and helpers for reading graphs from
//! files.
//!
//! ## Wire shape
//!
//! ```json
//! {
//!   "segments": [
//!     { "static": { "id": "s1", "name": "users" } },
//!     { "param":  { "id": "p1", "name": "id", "type": "PARAMETER_TYPE_UUID", "example": "abc" } }
//!   ],
//!   "edges": [ { "from": "s1", "to": "p1" } ],
//!   "operations": [
//!     { "id": "getUser", "pathSegmentId": "p1", "method": "GET",
//!       "queryParameters": [], "statusCodes": [200] }
//!   ]
//! }
//! ```
//!
//! Edges are expected to form a forest. That invariant is not trusted: the
//! index rejects dangling ids and the traversal in [`crate::spec`] rejects
//! cycles and segments reached from more than one parent.

mod index;
mod load;
mod types;

pub use index::GraphIndex;
pub use load::{load_graph, parse_graph_json, parse_graph_yaml};
pub use types::*;
