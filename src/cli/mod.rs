//! # CLI Module
//!
//! The `apigraph` binary.
//!
//! ## Commands
//!
//! ### `build`
//!
//! ```bash
//! apigraph build --graph users.json --output openapi.json --pretty
//! ```
//!
//! - `--graph <FILE>` - graph file, JSON or YAML (required)
//! - `--output <FILE>` - destination; stdout when omitted
//! - `--pretty` - indented output instead of compact JSON
//! - `--reject-duplicates` - fail when two operations share a path and method
//!
//! ### `lint`
//!
//! ```bash
//! apigraph lint --graph users.json --fail-on-error
//! ```
//!
//! ### `serve`
//!
//! ```bash
//! apigraph serve --config config/config.yaml --addr 127.0.0.1:8080
//! ```
//!
//! Runs until SIGINT or SIGTERM.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{
    build_command, exporter_service, lint_command, render_document, run, run_cli, start_server,
    Cli, Commands,
};
