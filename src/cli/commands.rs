use crate::config::ServiceConfig;
use crate::exporter::to_spec_json;
use crate::graph::load_graph;
use crate::otel::{init_logging_with_config, LogConfig};
use crate::server::{ExporterService, HttpServer, ServerHandle};
use crate::spec::{build_openapi_with, BuildOptions};
use crate::static_files::StaticFiles;
use crate::swagger::SwaggerSource;
use crate::validator::{fail_if_issues, print_issues, validate_graph};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Command-line interface for the API graph exporter
#[derive(Debug, Parser)]
#[command(name = "apigraph")]
#[command(about = "Build OpenAPI 3 documents from API graphs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build an OpenAPI document from a graph file
    Build {
        /// Graph file (JSON or YAML); a `{"apiGraph": ...}` request body is accepted too
        #[arg(short, long)]
        graph: PathBuf,

        /// Write the document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print instead of compact JSON
        #[arg(long, default_value_t = false)]
        pretty: bool,

        /// Fail when two operations share a path and method
        #[arg(long, default_value_t = false)]
        reject_duplicates: bool,
    },
    /// Report every problem in a graph file
    ///
    /// Errors are conditions the exporter refuses (dangling references,
    /// cycles, segments with several parents). Warnings are accepted but
    /// probably unintended (repeated segment ids, unknown methods,
    /// overwritten operations).
    Lint {
        #[arg(short, long)]
        graph: PathBuf,

        /// Exit with error code if any errors are found
        #[arg(long, default_value_t = false)]
        fail_on_error: bool,

        /// Show only errors (hide warnings)
        #[arg(long, default_value_t = false)]
        errors_only: bool,
    },
    /// Run the HTTP service
    Serve {
        /// Config file (YAML or TOML); defaults to ./config.yaml when present
        #[arg(short, long, env = "APIGRAPH_CONFIG")]
        config: Option<PathBuf>,

        /// Bind address, overriding the config file
        #[arg(long)]
        addr: Option<String>,

        /// Fail builds when two operations share a path and method
        #[arg(long, default_value_t = false)]
        reject_duplicates: bool,
    },
}

fn build_options(reject_duplicates: bool) -> BuildOptions {
    if reject_duplicates {
        BuildOptions::rejecting_duplicates()
    } else {
        BuildOptions::default()
    }
}

/// Render the document for `graph` as JSON.
pub fn render_document(graph: &Path, pretty: bool, options: BuildOptions) -> anyhow::Result<String> {
    let api_graph = load_graph(graph)?;
    let document = build_openapi_with(&api_graph, options)
        .with_context(|| format!("failed to build OpenAPI document from {}", graph.display()))?;
    let json = if pretty {
        serde_json::to_string_pretty(&document).context("failed to encode document")?
    } else {
        to_spec_json(&document)?
    };
    Ok(json)
}

pub fn build_command(
    graph: &Path,
    output: Option<&Path>,
    pretty: bool,
    options: BuildOptions,
) -> anyhow::Result<()> {
    let json = render_document(graph, pretty, options)?;
    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(output = %path.display(), bytes = json.len(), "document written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub fn lint_command(graph: &Path, fail_on_error: bool, errors_only: bool) -> anyhow::Result<()> {
    let mut issues = validate_graph(&load_graph(graph)?);
    if errors_only {
        issues.retain(|i| i.is_error());
    }
    print_issues(&issues);
    if fail_on_error {
        fail_if_issues(&issues)?;
    }
    Ok(())
}

/// Assemble the service from config. A missing swagger directory or a bad
/// upstream URL disables that part of the mount instead of failing start-up.
pub fn exporter_service(config: &ServiceConfig, options: BuildOptions) -> ExporterService {
    let mut service = ExporterService::new(options);
    let static_dir = &config.swagger.static_dir;
    if static_dir.is_dir() {
        service = service.with_static_files(StaticFiles::new(static_dir));
    } else {
        warn!(dir = %static_dir.display(), "swagger UI directory not found; /swagger/ disabled");
    }
    match SwaggerSource::from_config(&config.swagger) {
        Ok(source) => {
            info!(url = %source.url(), "swagger upstream configured");
            service = service.with_swagger(source);
        }
        Err(err) => warn!(error = %format!("{err:#}"), "swagger upstream disabled"),
    }
    service
}

/// Start the server on the configured (or overridden) address.
pub fn start_server(
    config: &ServiceConfig,
    addr: Option<&str>,
    options: BuildOptions,
) -> anyhow::Result<ServerHandle> {
    may::config().set_stack_size(config.server.http.stack_size);
    let addr = addr.map(str::to_string).unwrap_or_else(|| config.bind_addr());
    let handle = HttpServer(exporter_service(config, options))
        .start(addr.as_str())
        .with_context(|| format!("failed to start server on {addr}"))?;
    info!(addr = %handle.addr(), "server listening");
    Ok(handle)
}

#[cfg(unix)]
fn wait_for_shutdown(handle: ServerHandle) -> anyhow::Result<()> {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals =
        Signals::new([SIGINT, SIGTERM]).context("failed to register signal handlers")?;
    if let Some(signal) = signals.forever().next() {
        info!(signal, "shutdown signal received");
    }
    handle.stop();
    info!("server stopped");
    Ok(())
}

#[cfg(not(unix))]
fn wait_for_shutdown(handle: ServerHandle) -> anyhow::Result<()> {
    handle
        .join()
        .map_err(|e| anyhow::anyhow!("server coroutine panicked: {e:?}"))
}

/// Execute an already parsed command. Logging must be set up by the caller.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Build {
            graph,
            output,
            pretty,
            reject_duplicates,
        } => build_command(
            &graph,
            output.as_deref(),
            pretty,
            build_options(reject_duplicates),
        ),
        Commands::Lint {
            graph,
            fail_on_error,
            errors_only,
        } => lint_command(&graph, fail_on_error, errors_only),
        Commands::Serve {
            config,
            addr,
            reject_duplicates,
        } => {
            let config = ServiceConfig::resolve(config.as_deref())?;
            let handle = start_server(&config, addr.as_deref(), build_options(reject_duplicates))?;
            wait_for_shutdown(handle)
        }
    }
}

/// Entry point for the `apigraph` binary: parse arguments, set up logging, run.
///
/// `serve` takes its logger settings from the config file; the other
/// commands use defaults patched from `APIGRAPH_LOG_*`.
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_config = match &cli.command {
        Commands::Serve { config, .. } => {
            LogConfig::from_logger_config(&ServiceConfig::resolve(config.as_deref())?.logger)
        }
        _ => LogConfig::from_env(),
    };
    let _guard = init_logging_with_config(&log_config)?;
    run(cli)
}
