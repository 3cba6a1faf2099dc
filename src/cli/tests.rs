//! Unit tests for CLI commands

use crate::cli::{build_command, lint_command, render_document, Cli, Commands};
use crate::spec::BuildOptions;
use clap::Parser;
use std::io::Write;

const GRAPH: &str = r#"{
  "segments": [
    { "static": { "id": "s1", "name": "users" } },
    { "param": { "id": "p1", "name": "id", "type": "PARAMETER_TYPE_UUID", "example": "abc" } }
  ],
  "edges": [ { "from": "s1", "to": "p1" } ],
  "operations": [
    { "id": "getUser", "pathSegmentId": "p1", "method": "GET", "statusCodes": [200, 404] },
    { "id": "getUserAgain", "pathSegmentId": "p1", "method": "get" }
  ]
}"#;

fn graph_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_build_command_parses() {
    let cli = Cli::try_parse_from(["apigraph", "build", "--graph", "g.json", "--pretty"]).unwrap();
    match cli.command {
        Commands::Build {
            graph,
            output,
            pretty,
            reject_duplicates,
        } => {
            assert_eq!(graph.to_string_lossy(), "g.json");
            assert!(output.is_none());
            assert!(pretty);
            assert!(!reject_duplicates);
        }
        _ => panic!("Expected Build command"),
    }
}

#[test]
fn test_lint_command_with_flags() {
    let cli = Cli::try_parse_from([
        "apigraph",
        "lint",
        "-g",
        "g.yaml",
        "--fail-on-error",
        "--errors-only",
    ])
    .unwrap();
    match cli.command {
        Commands::Lint {
            graph,
            fail_on_error,
            errors_only,
        } => {
            assert_eq!(graph.to_string_lossy(), "g.yaml");
            assert!(fail_on_error);
            assert!(errors_only);
        }
        _ => panic!("Expected Lint command"),
    }
}

#[test]
fn test_serve_command_parses() {
    let cli = Cli::try_parse_from(["apigraph", "serve", "--addr", "127.0.0.1:9000"]).unwrap();
    match cli.command {
        Commands::Serve { addr, .. } => assert_eq!(addr.as_deref(), Some("127.0.0.1:9000")),
        _ => panic!("Expected Serve command"),
    }
}

#[test]
fn test_build_requires_graph() {
    assert!(Cli::try_parse_from(["apigraph", "build"]).is_err());
}

#[test]
fn test_render_document_compact_and_pretty() {
    let file = graph_file(GRAPH);
    let compact = render_document(file.path(), false, BuildOptions::default()).unwrap();
    assert!(!compact.contains('\n'));
    let pretty = render_document(file.path(), true, BuildOptions::default()).unwrap();
    assert!(pretty.contains('\n'));

    let a: serde_json::Value = serde_json::from_str(&compact).unwrap();
    let b: serde_json::Value = serde_json::from_str(&pretty).unwrap();
    assert_eq!(a, b);
    assert_eq!(a["paths"]["/users/{id}"]["get"]["summary"], "getUserAgain");
}

#[test]
fn test_render_document_rejects_duplicates_on_request() {
    let file = graph_file(GRAPH);
    let err = render_document(file.path(), false, BuildOptions::rejecting_duplicates()).unwrap_err();
    assert!(format!("{err:#}").contains("/users/{id}"));
}

#[test]
fn test_build_command_writes_output() {
    let file = graph_file(GRAPH);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("openapi.json");
    build_command(file.path(), Some(&out), false, BuildOptions::default()).unwrap();
    let written = std::fs::read_to_string(&out).unwrap();
    let doc: serde_json::Value = serde_json::from_str(written.trim_end()).unwrap();
    assert_eq!(doc["openapi"], "3.0.0");
}

#[test]
fn test_lint_command_fails_on_errors_only_when_asked() {
    let file = graph_file(r#"{ "segments": [], "edges": [ { "from": "a", "to": "b" } ] }"#);
    assert!(lint_command(file.path(), false, false).is_ok());
    assert!(lint_command(file.path(), true, false).is_err());
}
