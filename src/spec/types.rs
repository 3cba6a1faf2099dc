use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// OpenAPI version written into every generated document.
pub const OPENAPI_VERSION: &str = "3.0.0";
/// Fixed `info.title` of generated documents.
pub const DOCUMENT_TITLE: &str = "Generated API";
/// Fixed `info.version` of generated documents.
pub const DOCUMENT_VERSION: &str = "1.0.0";
/// Description attached to every generated response.
pub const RESPONSE_DESCRIPTION: &str = "response";

/// `path → lower-cased method → entry`. Ordered so output is byte-stable.
pub type Paths = BTreeMap<String, BTreeMap<String, OperationEntry>>;

/// Stringified status code → response object.
pub type Responses = BTreeMap<String, ResponseObject>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiDocument {
    pub openapi: String,
    pub info: Info,
    pub paths: Paths,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub version: String,
}

impl Default for Info {
    fn default() -> Self {
        Info {
            title: DOCUMENT_TITLE.to_string(),
            version: DOCUMENT_VERSION.to_string(),
        }
    }
}

/// One method under one path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationEntry {
    /// Id of the source operation.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    /// Inherited path parameters (root → leaf) followed by the operation's query parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    pub responses: Responses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "path"),
            ParameterLocation::Query => write!(f, "query"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub required: bool,
    pub schema: Schema,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub example: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Schema {
    pub fn of_type(schema_type: impl Into<String>) -> Self {
        Schema {
            schema_type: schema_type.into(),
            format: None,
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseObject {
    pub description: String,
}

impl ResponseObject {
    /// The single placeholder response used for every status code.
    pub fn generic() -> Self {
        ResponseObject {
            description: RESPONSE_DESCRIPTION.to_string(),
        }
    }
}
