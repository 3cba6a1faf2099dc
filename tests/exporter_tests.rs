mod common;

use apigraph_exporter::exporter::{build_openapi_spec, build_openapi_spec_with, BuildSpecRequest};
use apigraph_exporter::graph::{
    load_graph, ApiGraph, Edge, Operation, ParameterType, PathSegment, QueryParameter,
};
use apigraph_exporter::spec::{build_openapi, build_openapi_with, BuildOptions};
use apigraph_exporter::{BuildError, MalformedGraph};
use serde_json::{json, Value};

fn users_graph() -> ApiGraph {
    load_graph(&common::fixture_path(common::USERS_GRAPH)).unwrap()
}

fn spec_value(graph: ApiGraph) -> Value {
    let response = build_openapi_spec(&BuildSpecRequest { api_graph: graph }).unwrap();
    serde_json::from_str(&response.spec_json).unwrap()
}

#[test]
fn test_determinism_same_graph_same_bytes() {
    let graph = users_graph();
    let a = build_openapi_spec(&BuildSpecRequest { api_graph: graph.clone() }).unwrap();
    let b = build_openapi_spec(&BuildSpecRequest { api_graph: graph }).unwrap();
    assert_eq!(a.spec_json, b.spec_json);
}

#[test]
fn test_path_parameter_inheritance() {
    let graph = ApiGraph {
        segments: vec![
            PathSegment::literal("s1", "users"),
            PathSegment::param("p1", "id", ParameterType::Uuid, "abc"),
            PathSegment::literal("s2", "orders"),
        ],
        edges: vec![Edge::new("s1", "p1"), Edge::new("p1", "s2")],
        operations: vec![Operation::new("listOrders", "s2", "GET").with_status_codes([200])],
    };
    let doc = spec_value(graph);
    let get = &doc["paths"]["/users/{id}/orders"]["get"];
    assert_eq!(
        get["parameters"],
        json!([{
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "string", "format": "uuid" },
            "example": "abc"
        }])
    );
    assert_eq!(get["responses"], json!({ "200": { "description": "response" } }));
}

#[test]
fn test_query_parameters_not_inherited() {
    let doc = spec_value(users_graph());
    let paths = &doc["paths"];

    let list_users = paths["/users"]["get"]["parameters"].as_array().unwrap();
    let names: Vec<_> = list_users.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["limit", "cursor"]);
    assert!(list_users.iter().all(|p| p["in"] == "query" && p["required"] == false));

    // Descendant operations carry only path parameters plus their own query parameters.
    let get_user = paths["/users/{id}"]["get"]["parameters"].as_array().unwrap();
    assert_eq!(get_user.len(), 1);
    assert_eq!(get_user[0]["name"], "id");

    let list_orders = paths["/users/{id}/orders"]["get"]["parameters"].as_array().unwrap();
    let names: Vec<_> = list_orders.iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["id", "status"]);

    // Sibling methods on the same segment do not share query parameters.
    assert!(paths["/users"]["post"].get("parameters").is_none());
}

#[test]
fn test_parameter_order_is_root_to_leaf_then_query() {
    let graph = ApiGraph {
        segments: vec![
            PathSegment::param("a", "a", ParameterType::String, ""),
            PathSegment::param("b", "b", ParameterType::Integer, "1"),
        ],
        edges: vec![Edge::new("a", "b")],
        operations: vec![Operation::new("op", "b", "PUT")
            .with_query(QueryParameter::new("q", ParameterType::Integer, "5"))],
    };
    let doc = spec_value(graph);
    let params = doc["paths"]["/{a}/{b}"]["put"]["parameters"].as_array().unwrap();
    let shape: Vec<_> = params
        .iter()
        .map(|p| (p["name"].as_str().unwrap(), p["in"].as_str().unwrap()))
        .collect();
    assert_eq!(shape, vec![("a", "path"), ("b", "path"), ("q", "query")]);
    assert_eq!(params[1]["schema"], json!({ "type": "integer" }));
    // An empty example is omitted.
    assert!(params[0].get("example").is_none());
}

#[test]
fn test_multiple_status_codes() {
    let graph = ApiGraph {
        segments: vec![PathSegment::literal("s", "users")],
        edges: vec![],
        operations: vec![Operation::new("get", "s", "GET").with_status_codes([200, 404])],
    };
    let doc = spec_value(graph);
    let responses = doc["paths"]["/users"]["get"]["responses"].as_object().unwrap();
    assert_eq!(responses.len(), 2);
    assert!(responses.contains_key("200"));
    assert!(responses.contains_key("404"));
}

#[test]
fn test_root_enumeration_two_disjoint_trees() {
    let doc = spec_value(users_graph());
    let paths = doc["paths"].as_object().unwrap();
    let keys: Vec<_> = paths.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "/health",
            "/users",
            "/users/{id}",
            "/users/{id}/orders",
            "/users/{id}/orders/{orderId}"
        ]
    );
    let order_methods: Vec<_> = paths["/users/{id}/orders/{orderId}"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(order_methods, vec!["delete", "get"]);
}

#[test]
fn test_missing_edge_target_is_malformed() {
    let graph = ApiGraph {
        segments: vec![PathSegment::literal("s", "users")],
        edges: vec![Edge::new("s", "ghost")],
        operations: vec![],
    };
    let err = build_openapi(&graph).unwrap_err();
    assert!(matches!(
        err,
        BuildError::MalformedGraph(MalformedGraph::UnknownEdgeTarget { ref to, .. }) if to == "ghost"
    ));
}

#[test]
fn test_operation_on_unknown_segment_is_malformed() {
    let graph = ApiGraph {
        segments: vec![PathSegment::literal("s", "users")],
        edges: vec![],
        operations: vec![Operation::new("lost", "nowhere", "GET")],
    };
    let err = build_openapi(&graph).unwrap_err();
    assert!(matches!(
        err.malformed_graph(),
        Some(MalformedGraph::UnknownOperationSegment { .. })
    ));
}

#[test]
fn test_cycle_is_malformed_not_a_hang() {
    let graph = ApiGraph {
        segments: vec![
            PathSegment::literal("root", "api"),
            PathSegment::literal("a", "a"),
            PathSegment::literal("b", "b"),
        ],
        edges: vec![Edge::new("root", "a"), Edge::new("a", "b"), Edge::new("b", "a")],
        operations: vec![Operation::new("op", "b", "GET")],
    };
    let err = build_openapi(&graph).unwrap_err();
    assert!(matches!(err.malformed_graph(), Some(MalformedGraph::Cycle { .. })));
}

#[test]
fn test_rootless_cycle_is_malformed() {
    let graph = ApiGraph {
        segments: vec![PathSegment::literal("a", "a"), PathSegment::literal("b", "b")],
        edges: vec![Edge::new("a", "b"), Edge::new("b", "a")],
        operations: vec![],
    };
    let err = build_openapi(&graph).unwrap_err();
    assert!(err.malformed_graph().is_some());
}

#[test]
fn test_default_type_mapping_for_query() {
    let doc = spec_value(users_graph());
    let status = &doc["paths"]["/users/{id}/orders"]["get"]["parameters"][1];
    assert_eq!(status["name"], "status");
    assert_eq!(status["schema"], json!({ "type": "string" }));
}

#[test]
fn test_collision_overwrites_by_default() {
    let graph = ApiGraph {
        segments: vec![
            PathSegment::literal("u1", "users"),
            PathSegment::literal("u2", "users"),
        ],
        edges: vec![],
        operations: vec![
            Operation::new("first", "u1", "GET"),
            Operation::new("second", "u2", "GET"),
        ],
    };
    let doc = build_openapi(&graph).unwrap();
    assert_eq!(doc.paths["/users"]["get"].summary, "second");

    let err = build_openapi_with(&graph, BuildOptions::rejecting_duplicates()).unwrap_err();
    assert!(matches!(
        err.malformed_graph(),
        Some(MalformedGraph::DuplicateOperation { path, method }) if path == "/users" && method == "get"
    ));

    let err = build_openapi_spec_with(
        &BuildSpecRequest { api_graph: graph },
        BuildOptions::rejecting_duplicates(),
    )
    .unwrap_err();
    assert!(err.to_string().starts_with("malformed graph:"));
}

#[test]
fn test_empty_graph_has_empty_paths() {
    let doc = spec_value(ApiGraph::default());
    assert_eq!(
        doc,
        json!({
            "openapi": "3.0.0",
            "info": { "title": "Generated API", "version": "1.0.0" },
            "paths": {}
        })
    );
}
