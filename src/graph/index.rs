use super::types::{ApiGraph, Operation, PathSegment};
use crate::error::{BuildError, MalformedGraph};
use std::collections::{HashMap, HashSet};

/// Lookup structures over a borrowed [`ApiGraph`].
///
/// Built fresh for every export and dropped once traversal finishes. Every id
/// stored in `children` and every key in `operations` is guaranteed to name a
/// declared segment; [`GraphIndex::build`] rejects the graph otherwise.
#[derive(Debug)]
pub struct GraphIndex<'g> {
    segments: HashMap<&'g str, &'g PathSegment>,
    /// Segment ids in first-declaration order, without duplicates.
    order: Vec<&'g str>,
    children: HashMap<&'g str, Vec<&'g str>>,
    operations: HashMap<&'g str, Vec<&'g Operation>>,
    roots: Vec<&'g str>,
}

impl<'g> GraphIndex<'g> {
    /// Index `graph` in a single linear pass over segments, edges and operations.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MalformedGraph`] when an edge endpoint or an
    /// operation's segment id is not among the declared segments. Edges are
    /// checked before operations, each in declaration order.
    pub fn build(graph: &'g ApiGraph) -> Result<Self, BuildError> {
        let mut segments = HashMap::with_capacity(graph.segments.len());
        let mut order = Vec::with_capacity(graph.segments.len());
        for segment in &graph.segments {
            // A repeated id keeps its original position; the later definition wins.
            if segments.insert(segment.id(), segment).is_none() {
                order.push(segment.id());
            }
        }

        let mut children: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut nested = HashSet::with_capacity(graph.edges.len());
        for edge in &graph.edges {
            if !segments.contains_key(edge.from.as_str()) {
                return Err(MalformedGraph::UnknownEdgeSource {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                }
                .into());
            }
            if !segments.contains_key(edge.to.as_str()) {
                return Err(MalformedGraph::UnknownEdgeTarget {
                    from: edge.from.clone(),
                    to: edge.to.clone(),
                }
                .into());
            }
            children
                .entry(edge.from.as_str())
                .or_default()
                .push(edge.to.as_str());
            nested.insert(edge.to.as_str());
        }

        let mut operations: HashMap<&str, Vec<&Operation>> = HashMap::new();
        for op in &graph.operations {
            if !segments.contains_key(op.path_segment_id.as_str()) {
                return Err(MalformedGraph::UnknownOperationSegment {
                    operation: op.id.clone(),
                    segment: op.path_segment_id.clone(),
                }
                .into());
            }
            operations
                .entry(op.path_segment_id.as_str())
                .or_default()
                .push(op);
        }

        let roots = order
            .iter()
            .copied()
            .filter(|id| !nested.contains(id))
            .collect();

        Ok(GraphIndex {
            segments,
            order,
            children,
            operations,
            roots,
        })
    }

    pub fn segment(&self, id: &str) -> Option<&'g PathSegment> {
        self.segments.get(id).copied()
    }

    /// Child ids of `id` in edge declaration order.
    pub fn children(&self, id: &str) -> &[&'g str] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Operations attached to `id` in declaration order.
    pub fn operations(&self, id: &str) -> &[&'g Operation] {
        self.operations.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Segments that are never the target of an edge, in declaration order.
    pub fn roots(&self) -> &[&'g str] {
        &self.roots
    }

    /// All distinct segment ids in declaration order.
    pub fn segment_ids(&self) -> impl Iterator<Item = &'g str> + '_ {
        self.order.iter().copied()
    }

    /// Number of distinct segments.
    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }
}
