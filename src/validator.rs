//! Graph linting.
//!
//! [`GraphIndex::build`](crate::graph::GraphIndex::build) stops at the first
//! structural problem. The validator instead collects everything it can find
//! in one pass so a graph author sees the whole list, and adds warnings for
//! things the exporter tolerates (repeated segment ids, unknown HTTP methods,
//! path/method collisions).

use crate::error::BuildError;
use crate::graph::{ApiGraph, GraphIndex};
use crate::spec::{traverse, BuildOptions};
use http::Method;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    /// The exporter will refuse this graph.
    Error,
    /// The exporter accepts the graph but the output may surprise.
    Warning,
}

impl std::fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueSeverity::Error => write!(f, "error"),
            IssueSeverity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Where the issue was found, e.g. `edge:s1->p1` or `operation:getUser`.
    pub location: String,
    pub kind: String,
    pub message: String,
    pub severity: IssueSeverity,
}

impl ValidationIssue {
    pub fn new(
        location: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ValidationIssue {
            location: location.into(),
            kind: kind.into(),
            message: message.into(),
            severity: IssueSeverity::Error,
        }
    }

    pub fn warning(
        location: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ValidationIssue {
            severity: IssueSeverity::Warning,
            ..ValidationIssue::new(location, kind, message)
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == IssueSeverity::Error
    }
}

const KNOWN_METHODS: [Method; 8] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::OPTIONS,
    Method::HEAD,
    Method::TRACE,
];

fn check_method(op_id: &str, method: &str, issues: &mut Vec<ValidationIssue>) {
    let location = format!("operation:{op_id}");
    if method.trim().is_empty() {
        issues.push(ValidationIssue::warning(
            location,
            "EmptyMethod",
            "operation has no HTTP method; it will be exported under an empty key",
        ));
        return;
    }
    let upper = method.to_ascii_uppercase();
    let known = Method::from_bytes(upper.as_bytes())
        .map(|m| KNOWN_METHODS.contains(&m))
        .unwrap_or(false);
    if !known {
        issues.push(ValidationIssue::warning(
            location,
            "UnknownMethod",
            format!("'{method}' is not a standard HTTP method"),
        ));
    }
}

/// Collect every issue found in `graph`. An empty result means the graph
/// exports cleanly with no surprises.
pub fn validate_graph(graph: &ApiGraph) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let mut declared = HashSet::with_capacity(graph.segments.len());
    for segment in &graph.segments {
        if !declared.insert(segment.id()) {
            issues.push(ValidationIssue::warning(
                format!("segment:{}", segment.id()),
                "DuplicateSegmentId",
                "segment id is declared more than once; the last definition wins",
            ));
        }
    }

    let mut parents: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in &graph.edges {
        let location = format!("edge:{}->{}", edge.from, edge.to);
        if !declared.contains(edge.from.as_str()) {
            issues.push(ValidationIssue::new(
                location.clone(),
                "UnknownEdgeSource",
                format!("segment '{}' is not declared", edge.from),
            ));
        }
        if !declared.contains(edge.to.as_str()) {
            issues.push(ValidationIssue::new(
                location,
                "UnknownEdgeTarget",
                format!("segment '{}' is not declared", edge.to),
            ));
        }
        parents.entry(edge.to.as_str()).or_default().push(edge.from.as_str());
    }

    let mut reported = HashSet::new();
    for segment in &graph.segments {
        let id = segment.id();
        if let Some(from) = parents.get(id) {
            if from.len() > 1 && reported.insert(id) {
                issues.push(ValidationIssue::new(
                    format!("segment:{id}"),
                    "MultipleParents",
                    format!(
                        "segment has {} parents ({}); edges must form a forest",
                        from.len(),
                        from.join(", ")
                    ),
                ));
            }
        }
    }

    for op in &graph.operations {
        if !declared.contains(op.path_segment_id.as_str()) {
            issues.push(ValidationIssue::new(
                format!("operation:{}", op.id),
                "UnknownOperationSegment",
                format!("segment '{}' is not declared", op.path_segment_id),
            ));
        }
        check_method(&op.id, &op.method, &mut issues);
    }

    // Traversal problems only make sense once every reference resolves.
    if issues.iter().any(ValidationIssue::is_error) {
        return issues;
    }

    let walked = GraphIndex::build(graph).and_then(|index| traverse(&index, BuildOptions::default()));
    match walked {
        Ok(traversal) => {
            for c in traversal.collisions {
                issues.push(ValidationIssue::warning(
                    format!("path:{} {}", c.method, c.path),
                    "DuplicateOperation",
                    format!(
                        "operation '{}' is replaced by '{}' for the same path and method",
                        c.replaced, c.replaced_by
                    ),
                ));
            }
        }
        Err(BuildError::MalformedGraph(err)) => {
            issues.push(ValidationIssue::new("graph", "MalformedGraph", err.to_string()));
        }
        Err(err) => {
            issues.push(ValidationIssue::new("graph", "BuildFailed", err.to_string()));
        }
    }

    issues
}

/// Render issues to stderr, one per line.
pub fn print_issues(issues: &[ValidationIssue]) {
    if issues.is_empty() {
        eprintln!("✅ graph is valid");
        return;
    }
    let errors = issues.iter().filter(|i| i.is_error()).count();
    eprintln!(
        "\n{} issue(s) found ({} error(s), {} warning(s)):\n",
        issues.len(),
        errors,
        issues.len() - errors
    );
    for issue in issues {
        eprintln!(
            "[{}] {} {}: {}",
            issue.severity, issue.kind, issue.location, issue.message
        );
    }
}

/// Fail when any issue is an error; warnings pass.
pub fn fail_if_issues(issues: &[ValidationIssue]) -> anyhow::Result<()> {
    let errors = issues.iter().filter(|i| i.is_error()).count();
    if errors > 0 {
        anyhow::bail!("graph validation failed with {errors} error(s)");
    }
    Ok(())
}
