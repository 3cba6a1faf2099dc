use super::types::ApiGraph;
use anyhow::Context;
use serde_json::Value;
use std::path::Path;

/// Key under which the exporter request carries its graph.
const REQUEST_ENVELOPE_KEY: &str = "apiGraph";

/// Accept a saved request body (`{"apiGraph": {...}}`) wherever a bare graph is expected.
fn unwrap_request_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut obj) if obj.len() == 1 && obj.contains_key(REQUEST_ENVELOPE_KEY) => obj
            .remove(REQUEST_ENVELOPE_KEY)
            .unwrap_or(Value::Object(Default::default())),
        other => other,
    }
}

/// Parse a graph from JSON text. A request envelope is unwrapped transparently.
pub fn parse_graph_json(content: &str) -> anyhow::Result<ApiGraph> {
    let value: Value = serde_json::from_str(content).context("graph is not valid JSON")?;
    serde_json::from_value(unwrap_request_envelope(value)).context("graph has an unexpected shape")
}

/// Parse a graph from YAML text. A request envelope is unwrapped transparently.
pub fn parse_graph_yaml(content: &str) -> anyhow::Result<ApiGraph> {
    let value: Value = serde_yaml::from_str(content).context("graph is not valid YAML")?;
    serde_json::from_value(unwrap_request_envelope(value)).context("graph has an unexpected shape")
}

/// Load a graph from disk; `.yaml`/`.yml` files are read as YAML, anything else as JSON.
pub fn load_graph(file_path: &Path) -> anyhow::Result<ApiGraph> {
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("failed to read graph file: {}", file_path.display()))?;
    let is_yaml = matches!(
        file_path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let parsed = if is_yaml {
        parse_graph_yaml(&content)
    } else {
        parse_graph_json(&content)
    };
    parsed.with_context(|| format!("failed to parse graph file: {}", file_path.display()))
}
