use super::schema::parameter_schema;
use super::types::{
    Info, OpenApiDocument, OperationEntry, Parameter, ParameterLocation, Paths, ResponseObject,
    Responses, OPENAPI_VERSION,
};
use crate::error::{BuildError, MalformedGraph};
use crate::graph::{ApiGraph, GraphIndex, Operation, ParamSegment, PathSegment};
use std::collections::{HashMap, HashSet};

/// What to do when two operations land on the same path and method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// The operation visited later replaces the earlier one.
    #[default]
    Overwrite,
    /// Fail with [`MalformedGraph::DuplicateOperation`].
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub collision_policy: CollisionPolicy,
}

impl BuildOptions {
    pub fn rejecting_duplicates() -> Self {
        BuildOptions {
            collision_policy: CollisionPolicy::Reject,
        }
    }
}

/// An overwrite that happened under [`CollisionPolicy::Overwrite`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub path: String,
    pub method: String,
    /// Operation id of the entry that was replaced.
    pub replaced: String,
    /// Operation id of the entry that replaced it.
    pub replaced_by: String,
}

/// Result of walking every root of a graph.
#[derive(Debug, Default)]
pub struct Traversal {
    pub paths: Paths,
    pub collisions: Vec<Collision>,
}

/// Path parameter contributed by a `Param` segment.
pub fn path_parameter(segment: &ParamSegment) -> Parameter {
    Parameter {
        name: segment.name.clone(),
        location: ParameterLocation::Path,
        required: true,
        schema: parameter_schema(&segment.param_type),
        example: segment.example.clone(),
    }
}

/// Build the entry for `op` given the path parameters inherited down its branch.
pub fn operation_entry(op: &Operation, inherited: &[Parameter]) -> OperationEntry {
    let mut parameters = Vec::with_capacity(inherited.len() + op.query_parameters.len());
    parameters.extend_from_slice(inherited);
    parameters.extend(op.query_parameters.iter().map(|qp| Parameter {
        name: qp.name.clone(),
        location: ParameterLocation::Query,
        required: false,
        schema: parameter_schema(&qp.param_type),
        example: qp.example.clone(),
    }));

    let responses: Responses = op
        .status_codes
        .iter()
        .map(|code| (code.to_string(), ResponseObject::generic()))
        .collect();

    OperationEntry {
        summary: op.id.clone(),
        parameters,
        responses,
    }
}

/// One segment on the active descent. Each frame owns its own copy of the
/// path prefix and inherited parameters, so a branch never sees what a
/// sibling appended.
struct Frame<'g> {
    id: &'g str,
    /// `/`-joined path parts from the root down to and including `id`.
    path: String,
    params: Vec<Parameter>,
    /// Position of the next child of `id` to enter.
    next_child: usize,
}

/// Depth-first walk state. The descent lives in a heap-allocated frame stack
/// rather than on the call stack, so graph depth is bounded by memory only.
struct PathWalker<'a, 'g> {
    index: &'a GraphIndex<'g>,
    options: BuildOptions,
    on_stack: HashSet<&'g str>,
    /// Visited segment ids mapped to the parent they were first entered from.
    visited: HashMap<&'g str, Option<&'g str>>,
    out: Traversal,
}

impl<'a, 'g> PathWalker<'a, 'g> {
    fn new(index: &'a GraphIndex<'g>, options: BuildOptions) -> Self {
        PathWalker {
            index,
            options,
            on_stack: HashSet::new(),
            visited: HashMap::with_capacity(index.len()),
            out: Traversal::default(),
        }
    }

    fn walk(&mut self, root: &'g str) -> Result<(), BuildError> {
        let index = self.index;
        let mut stack = vec![self.enter(root, &[])?];
        while let Some(frame) = stack.last_mut() {
            match index.children(frame.id).get(frame.next_child).copied() {
                Some(child) => {
                    frame.next_child += 1;
                    let next = self.enter(child, &stack)?;
                    stack.push(next);
                }
                None => {
                    self.on_stack.remove(frame.id);
                    stack.pop();
                }
            }
        }
        Ok(())
    }

    /// Check `id` against the active descent, emit its operations and return
    /// its frame. The parent is the last frame of `active`.
    fn enter(&mut self, id: &'g str, active: &[Frame<'g>]) -> Result<Frame<'g>, BuildError> {
        let parent = active.last();
        let parent_id = parent.map(|p| p.id);
        if self.on_stack.contains(id) {
            let mut path: Vec<String> = active.iter().map(|f| f.id.to_string()).collect();
            path.push(id.to_string());
            return Err(MalformedGraph::Cycle {
                segment: id.to_string(),
                path,
            }
            .into());
        }
        if let Some(&first) = self.visited.get(id) {
            return Err(MalformedGraph::MultipleParents {
                segment: id.to_string(),
                first: first.unwrap_or_default().to_string(),
                second: parent_id.unwrap_or_default().to_string(),
            }
            .into());
        }

        let index = self.index;
        let segment = index
            .segment(id)
            .ok_or_else(|| MalformedGraph::UnknownEdgeTarget {
                from: parent_id.unwrap_or_default().to_string(),
                to: id.to_string(),
            })?;
        self.visited.insert(id, parent_id);

        let (prefix, inherited) = match parent {
            Some(p) => (p.path.as_str(), p.params.as_slice()),
            None => ("", &[][..]),
        };
        let path = format!("{prefix}/{}", segment.path_part());
        let mut params = inherited.to_vec();
        if let PathSegment::Param(param) = segment {
            params.push(path_parameter(param));
        }

        for op in index.operations(id) {
            self.emit(&path, op, &params)?;
        }

        self.on_stack.insert(id);
        Ok(Frame {
            id,
            path,
            params,
            next_child: 0,
        })
    }

    fn emit(&mut self, path: &str, op: &Operation, inherited: &[Parameter]) -> Result<(), BuildError> {
        let method = op.method.to_lowercase();
        let entry = operation_entry(op, inherited);
        let methods = self.out.paths.entry(path.to_string()).or_default();

        if let Some(previous) = methods.get(&method) {
            if self.options.collision_policy == CollisionPolicy::Reject {
                return Err(MalformedGraph::DuplicateOperation {
                    path: path.to_string(),
                    method,
                }
                .into());
            }
            self.out.collisions.push(Collision {
                path: path.to_string(),
                method: method.clone(),
                replaced: previous.summary.clone(),
                replaced_by: op.id.clone(),
            });
        }
        methods.insert(method, entry);
        Ok(())
    }
}

/// Walk every root of `index` and collect the path/method map.
///
/// # Errors
///
/// * [`MalformedGraph::Cycle`] when a segment is reached while still on the
///   active descent.
/// * [`MalformedGraph::MultipleParents`] when a segment is reached a second
///   time from another parent; edges must form a forest.
/// * [`MalformedGraph::UnreachableCycle`] when some segment is never reached
///   from any root.
/// * [`MalformedGraph::DuplicateOperation`] under [`CollisionPolicy::Reject`].
pub fn traverse(index: &GraphIndex<'_>, options: BuildOptions) -> Result<Traversal, BuildError> {
    let mut walker = PathWalker::new(index, options);
    for root in index.roots() {
        walker.walk(*root)?;
    }

    if let Some(segment) = index.segment_ids().find(|id| !walker.visited.contains_key(*id)) {
        return Err(MalformedGraph::UnreachableCycle {
            segment: segment.to_string(),
        }
        .into());
    }

    Ok(walker.out)
}

pub fn build_paths(index: &GraphIndex<'_>, options: BuildOptions) -> Result<Paths, BuildError> {
    traverse(index, options).map(|t| t.paths)
}

/// Wrap a completed paths map into the document envelope.
pub fn assemble_document(paths: Paths) -> OpenApiDocument {
    OpenApiDocument {
        openapi: OPENAPI_VERSION.to_string(),
        info: Info::default(),
        paths,
    }
}

/// Graph → document with the default (overwrite) collision policy.
pub fn build_openapi(graph: &ApiGraph) -> Result<OpenApiDocument, BuildError> {
    build_openapi_with(graph, BuildOptions::default())
}

pub fn build_openapi_with(
    graph: &ApiGraph,
    options: BuildOptions,
) -> Result<OpenApiDocument, BuildError> {
    let index = GraphIndex::build(graph)?;
    let paths = build_paths(&index, options)?;
    Ok(assemble_document(paths))
}
