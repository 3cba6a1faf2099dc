use std::fmt;

/// Failure of the graph → document transformation.
///
/// No partial document is ever returned alongside one of these.
#[derive(Debug)]
pub enum BuildError {
    /// The input graph violates a structural invariant.
    MalformedGraph(MalformedGraph),
    /// The assembled document could not be encoded as JSON.
    Serialization(serde_json::Error),
}

/// The specific structural problem found in a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedGraph {
    /// An edge starts at a segment id that was never declared.
    UnknownEdgeSource { from: String, to: String },
    /// An edge points at a segment id that was never declared.
    UnknownEdgeTarget { from: String, to: String },
    /// An operation is attached to a segment id that was never declared.
    UnknownOperationSegment { operation: String, segment: String },
    /// A segment was reached again while it was still on the active descent.
    ///
    /// `path` lists the segment ids from the root down to the repeated one.
    Cycle { segment: String, path: Vec<String> },
    /// A segment can not be reached from any root; its ancestry loops.
    UnreachableCycle { segment: String },
    /// A segment was reached from a second parent. Edges must form a forest.
    MultipleParents {
        segment: String,
        first: String,
        second: String,
    },
    /// Two operations resolved to the same path and method while duplicates
    /// were configured to be rejected.
    DuplicateOperation { path: String, method: String },
}

impl fmt::Display for MalformedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedGraph::UnknownEdgeSource { from, to } => {
                write!(f, "edge {from} -> {to} starts at unknown segment '{from}'")
            }
            MalformedGraph::UnknownEdgeTarget { from, to } => {
                write!(f, "edge {from} -> {to} points at unknown segment '{to}'")
            }
            MalformedGraph::UnknownOperationSegment { operation, segment } => {
                write!(
                    f,
                    "operation '{operation}' is attached to unknown segment '{segment}'"
                )
            }
            MalformedGraph::Cycle { segment, path } => {
                write!(
                    f,
                    "cycle detected at segment '{segment}' (descent: {})",
                    path.join(" -> ")
                )
            }
            MalformedGraph::UnreachableCycle { segment } => {
                write!(
                    f,
                    "segment '{segment}' is not reachable from any root; its ancestry forms a cycle"
                )
            }
            MalformedGraph::MultipleParents {
                segment,
                first,
                second,
            } => {
                write!(
                    f,
                    "segment '{segment}' has more than one parent ('{first}' and '{second}')"
                )
            }
            MalformedGraph::DuplicateOperation { path, method } => {
                write!(f, "duplicate operation for {method} {path}")
            }
        }
    }
}

impl std::error::Error for MalformedGraph {}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::MalformedGraph(inner) => write!(f, "malformed graph: {inner}"),
            BuildError::Serialization(err) => write!(f, "failed to serialize document: {err}"),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::MalformedGraph(inner) => Some(inner),
            BuildError::Serialization(err) => Some(err),
        }
    }
}

impl From<MalformedGraph> for BuildError {
    fn from(err: MalformedGraph) -> Self {
        BuildError::MalformedGraph(err)
    }
}

impl From<serde_json::Error> for BuildError {
    fn from(err: serde_json::Error) -> Self {
        BuildError::Serialization(err)
    }
}

impl BuildError {
    /// The structural problem, if this is a malformed-graph failure.
    pub fn malformed_graph(&self) -> Option<&MalformedGraph> {
        match self {
            BuildError::MalformedGraph(inner) => Some(inner),
            BuildError::Serialization(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_cycle_message_lists_descent() {
        let err = MalformedGraph::Cycle {
            segment: "a".into(),
            path: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(
            err.to_string(),
            "cycle detected at segment 'a' (descent: a -> b -> a)"
        );
    }

    #[test]
    fn test_multiple_parents_message_names_both() {
        let err = MalformedGraph::MultipleParents {
            segment: "h".into(),
            first: "v1".into(),
            second: "v2".into(),
        };
        assert_eq!(
            err.to_string(),
            "segment 'h' has more than one parent ('v1' and 'v2')"
        );
    }

    #[test]
    fn test_build_error_source_chain() {
        let err: BuildError = MalformedGraph::UnknownEdgeTarget {
            from: "s1".into(),
            to: "ghost".into(),
        }
        .into();
        assert!(err.to_string().starts_with("malformed graph: "));
        assert!(err.source().is_some());
        assert!(err.malformed_graph().is_some());
    }
}
