//! The single request/response operation exposed by the service:
//! `BuildOpenAPISpec(graph) → {specJson}`.
//!
//! Transport layers (the HTTP server, the CLI) deserialize a
//! [`BuildSpecRequest`], call [`build_openapi_spec`] and serialize the
//! [`BuildSpecResponse`] back. Nothing in here logs or retries; the transform
//! is deterministic.

use crate::error::BuildError;
use crate::graph::ApiGraph;
use crate::spec::{build_openapi_with, BuildOptions};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSpecRequest {
    /// A missing graph is treated as an empty one.
    #[serde(default)]
    pub api_graph: ApiGraph,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSpecResponse {
    /// Compact JSON encoding of the generated OpenAPI document.
    pub spec_json: String,
}

/// Encode any document value as compact JSON.
///
/// # Errors
///
/// Returns [`BuildError::Serialization`] if the value's `Serialize` impl fails.
pub fn to_spec_json<T: Serialize + ?Sized>(document: &T) -> Result<String, BuildError> {
    serde_json::to_string(document).map_err(BuildError::Serialization)
}

pub fn build_openapi_spec(request: &BuildSpecRequest) -> Result<BuildSpecResponse, BuildError> {
    build_openapi_spec_with(request, BuildOptions::default())
}

/// Build the document for `request.api_graph` and encode it.
///
/// # Errors
///
/// [`BuildError::MalformedGraph`] for structural problems in the graph,
/// [`BuildError::Serialization`] if encoding fails.
pub fn build_openapi_spec_with(
    request: &BuildSpecRequest,
    options: BuildOptions,
) -> Result<BuildSpecResponse, BuildError> {
    let document = build_openapi_with(&request.api_graph, options)?;
    Ok(BuildSpecResponse {
        spec_json: to_spec_json(&document)?,
    })
}
