use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A route graph as produced by the graph-construction service.
///
/// Segments are the nodes, edges nest a child segment under its parent and
/// operations hang off individual segments. All three collections keep their
/// declaration order, which drives the traversal order of the exporter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGraph {
    #[serde(default)]
    pub segments: Vec<PathSegment>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

/// A single URL path component.
///
/// On the wire this is a one-of: `{"static": {...}}` or `{"param": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathSegment {
    Static(StaticSegment),
    Param(ParamSegment),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticSegment {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSegment {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub param_type: ParameterType,
    #[serde(default)]
    pub example: String,
}

impl PathSegment {
    /// Literal path component.
    pub fn literal(id: impl Into<String>, name: impl Into<String>) -> Self {
        PathSegment::Static(StaticSegment {
            id: id.into(),
            name: name.into(),
        })
    }

    /// Path variable rendered as `{name}`.
    pub fn param(
        id: impl Into<String>,
        name: impl Into<String>,
        param_type: ParameterType,
        example: impl Into<String>,
    ) -> Self {
        PathSegment::Param(ParamSegment {
            id: id.into(),
            name: name.into(),
            param_type,
            example: example.into(),
        })
    }

    pub fn id(&self) -> &str {
        match self {
            PathSegment::Static(s) => &s.id,
            PathSegment::Param(p) => &p.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PathSegment::Static(s) => &s.name,
            PathSegment::Param(p) => &p.name,
        }
    }

    /// The text this segment contributes to a URL path.
    pub fn path_part(&self) -> String {
        match self {
            PathSegment::Static(s) => s.name.clone(),
            PathSegment::Param(p) => format!("{{{}}}", p.name),
        }
    }
}

/// Parent → child nesting between two segment ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Edge {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// An HTTP method bound to one segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub id: String,
    pub path_segment_id: String,
    pub method: String,
    #[serde(default)]
    pub query_parameters: Vec<QueryParameter>,
    #[serde(default)]
    pub status_codes: Vec<i32>,
}

impl Operation {
    pub fn new(
        id: impl Into<String>,
        path_segment_id: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Operation {
            id: id.into(),
            path_segment_id: path_segment_id.into(),
            method: method.into(),
            query_parameters: Vec::new(),
            status_codes: Vec::new(),
        }
    }

    pub fn with_query(mut self, parameter: QueryParameter) -> Self {
        self.query_parameters.push(parameter);
        self
    }

    pub fn with_status_codes(mut self, codes: impl IntoIterator<Item = i32>) -> Self {
        self.status_codes.extend(codes);
        self
    }
}

/// A parameter declared directly on an operation. Never inherited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParameter {
    pub name: String,
    #[serde(rename = "type", default)]
    pub param_type: ParameterType,
    #[serde(default)]
    pub example: String,
}

impl QueryParameter {
    pub fn new(name: impl Into<String>, param_type: ParameterType, example: impl Into<String>) -> Self {
        QueryParameter {
            name: name.into(),
            param_type,
            example: example.into(),
        }
    }
}

/// Abstract parameter type carried by the graph.
///
/// Accepts both the protobuf enum names (`PARAMETER_TYPE_UUID`) and the bare
/// lowercase form (`uuid`). Unknown names are kept verbatim in `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ParameterType {
    #[default]
    Unspecified,
    String,
    Integer,
    Uuid,
    Other(String),
}

impl ParameterType {
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        let bare = trimmed.strip_prefix("PARAMETER_TYPE_").unwrap_or(trimmed);
        match bare.to_ascii_lowercase().as_str() {
            "" | "unspecified" => ParameterType::Unspecified,
            "string" => ParameterType::String,
            "integer" => ParameterType::Integer,
            "uuid" => ParameterType::Uuid,
            _ => ParameterType::Other(trimmed.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ParameterType::Unspecified => "PARAMETER_TYPE_UNSPECIFIED",
            ParameterType::String => "PARAMETER_TYPE_STRING",
            ParameterType::Integer => "PARAMETER_TYPE_INTEGER",
            ParameterType::Uuid => "PARAMETER_TYPE_UUID",
            ParameterType::Other(name) => name,
        }
    }
}

impl std::fmt::Display for ParameterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for ParameterType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ParameterType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ParameterType::parse(&raw))
    }
}
