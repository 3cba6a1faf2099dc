//! Structured logging initialization
//!
//! Sets up `tracing` with an `EnvFilter`, JSON or pretty formatting and
//! optional non-blocking output. Logs go to stderr so that `apigraph build`
//! can write the generated document to stdout.
//!
//! The transformation itself (graph, spec and exporter modules) never logs;
//! only the server and CLI layers emit events.

use crate::config::{LoggerConfig, ServiceConfig};
use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// trace/debug/info/warn/error
    pub log_level: String,
    pub format: LogFormat,
    /// Write through a background worker instead of blocking the caller
    pub async_logging: bool,
    /// Extra comma-separated filter directives, e.g. `apigraph_exporter::server=debug`
    pub target_filter: Option<String>,
    /// Include file:line location
    pub include_location: bool,
}

impl LogConfig {
    /// Build from the `logger` config section. Environment overrides are
    /// expected to have been applied to the section already.
    pub fn from_logger_config(logger: &LoggerConfig) -> Self {
        Self {
            log_level: logger.level.clone(),
            format: LogFormat::parse(&logger.format),
            async_logging: logger.async_logging,
            target_filter: logger.target_filter.clone(),
            include_location: logger.include_location,
        }
    }

    /// Defaults patched from `APIGRAPH_LOG_*` variables, for commands that run without a config file.
    pub fn from_env() -> Self {
        let mut config = ServiceConfig::default();
        config.apply_env();
        Self::from_logger_config(&config.logger)
    }

    pub fn default_dev() -> Self {
        Self {
            log_level: "debug".to_string(),
            format: LogFormat::Pretty,
            async_logging: false,
            target_filter: None,
            include_location: true,
        }
    }
}

/// Unknown names fall back to `INFO`.
pub fn parse_level(s: &str) -> Level {
    match s.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

/// Build the filter: `RUST_LOG` if set, else the configured level, plus
/// target directives. Invalid directives are reported and skipped.
pub fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let level = parse_level(&config.log_level);
    let mut env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    // Client disconnects are logged by may_minihttp at debug/info; keep warn+.
    if let Ok(directive) = "may_minihttp::http_server=warn".parse() {
        env_filter = env_filter.add_directive(directive);
    }

    if let Some(target_filter) = &config.target_filter {
        for filter in target_filter.split(',') {
            let filter = filter.trim();
            if filter.is_empty() {
                continue;
            }
            match filter.parse() {
                Ok(directive) => env_filter = env_filter.add_directive(directive),
                Err(_) => eprintln!("Warning: Invalid log filter directive: {}", filter),
            }
        }
    }
    env_filter
}

/// Install the global subscriber.
///
/// With `async_logging` the returned guard owns the background writer; keep
/// it alive until exit or buffered events are lost.
///
/// ```no_run
/// use apigraph_exporter::otel::{init_logging_with_config, LogConfig};
///
/// let _guard = init_logging_with_config(&LogConfig::from_env())
///     .expect("Failed to initialize logging");
/// ```
pub fn init_logging_with_config(config: &LogConfig) -> Result<Option<WorkerGuard>> {
    let registry = tracing_subscriber::registry().with(build_env_filter(config));

    if config.async_logging {
        let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
        let fmt_layer = match config.format {
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_writer(writer)
                .boxed(),
            LogFormat::Pretty => tracing_subscriber::fmt::layer()
                .pretty()
                .with_target(true)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_writer(writer)
                .boxed(),
        };
        registry
            .with(fmt_layer)
            .try_init()
            .context("Failed to initialize async logging")?;
        Ok(Some(guard))
    } else {
        let fmt_layer = match config.format {
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_writer(std::io::stderr)
                .boxed(),
            LogFormat::Pretty => tracing_subscriber::fmt::layer()
                .pretty()
                .with_target(true)
                .with_file(config.include_location)
                .with_line_number(config.include_location)
                .with_writer(std::io::stderr)
                .boxed(),
        };
        registry
            .with(fmt_layer)
            .try_init()
            .context("Failed to initialize sync logging")?;
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("PRETTY"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("invalid"), LogFormat::Json);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("TRACE"), Level::TRACE);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("chatty"), Level::INFO);
    }

    #[test]
    fn test_from_logger_config() {
        let logger = LoggerConfig {
            level: "debug".into(),
            format: "pretty".into(),
            target_filter: Some("apigraph_exporter=trace".into()),
            include_location: true,
            async_logging: true,
        };
        let config = LogConfig::from_logger_config(&logger);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.async_logging);
        assert!(config.include_location);
        assert_eq!(config.target_filter.as_deref(), Some("apigraph_exporter=trace"));
    }

    #[test]
    fn test_default_dev() {
        let config = LogConfig::default_dev();
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(!config.async_logging);
    }

    #[test]
    fn test_build_env_filter_skips_bad_directives() {
        let mut config = LogConfig::default_dev();
        config.target_filter = Some("apigraph_exporter=debug, ,not a[directive".into());
        // Must not panic on the malformed entry.
        let _ = build_env_filter(&config);
    }
}
