//! # Service Configuration
//!
//! [`ServiceConfig`] is read from a YAML or TOML file (picked by extension)
//! and then patched from environment variables. Every field has a default, so
//! an empty file, or no file at all, yields a runnable configuration.
//!
//! ## Environment Variables
//!
//! | Variable | Field |
//! |---|---|
//! | `APIGRAPH_HTTP_ADDR` | `server.http.addr` |
//! | `APIGRAPH_HTTP_PORT` | `server.http.port` |
//! | `APIGRAPH_STACK_SIZE` | `server.http.stack_size` (decimal or `0x` hex) |
//! | `APIGRAPH_SCHEMA_VERSION` | `swagger.schema_version` |
//! | `APIGRAPH_LOG_LEVEL` | `logger.level` |
//! | `APIGRAPH_LOG_FORMAT` | `logger.format` |
//! | `APIGRAPH_LOG_TARGET_FILTER` | `logger.target_filter` |
//!
//! ## Example
//!
//! ```yaml
//! server:
//!   http:
//!     addr: "0.0.0.0"
//!     port: 8080
//! swagger:
//!   static_dir: "swagger"
//!   schema_version: "v1.4.2"
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
pub const DEFAULT_STACK_SIZE: usize = 0x8000;
pub const DEFAULT_UPSTREAM_BASE: &str = "https://raw.githubusercontent.com/voikin/apim-proto/gen/go";
pub const DEFAULT_SERVICE_NAME: &str = "apim_openapi_exporter";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub logger: LoggerConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub http: HttpConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub addr: String,
    pub port: u16,
    /// Coroutine stack size in bytes for request handlers.
    pub stack_size: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0".to_string(),
            port: 8080,
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub level: String,
    /// `json` or `pretty`.
    pub format: String,
    /// Extra comma-separated `EnvFilter` directives.
    pub target_filter: Option<String>,
    pub include_location: bool,
    pub async_logging: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "json".to_string(),
            target_filter: None,
            include_location: false,
            async_logging: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwaggerConfig {
    /// Directory served under `/swagger/`.
    pub static_dir: PathBuf,
    /// Version of the companion schema repository; `None` means `latest`.
    pub schema_version: Option<String>,
    pub upstream_base: String,
    pub service_name: String,
    pub fetch_timeout_secs: u64,
}

impl Default for SwaggerConfig {
    fn default() -> Self {
        Self {
            static_dir: PathBuf::from("swagger"),
            schema_version: None,
            upstream_base: DEFAULT_UPSTREAM_BASE.to_string(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            fetch_timeout_secs: 10,
        }
    }
}

/// Parse a size given as decimal or `0x`-prefixed hex.
pub fn parse_size(value: &str) -> Option<usize> {
    let value = value.trim();
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl ServiceConfig {
    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        // An empty document deserializes to unit, not to a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).context("invalid YAML configuration")
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("invalid TOML configuration")
    }

    /// Read a config file; `.toml` files are parsed as TOML, anything else as YAML.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let parsed = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            _ => Self::from_yaml_str(&content),
        };
        parsed.with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load the explicitly requested file, or `config.yaml` when it exists,
    /// or fall back to defaults. Environment overrides are applied last.
    pub fn resolve(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.is_file() {
                    Self::load(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env();
        Ok(config)
    }

    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from any key lookup. Unparseable values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = lookup("APIGRAPH_HTTP_ADDR").and_then(non_empty) {
            self.server.http.addr = addr;
        }
        if let Some(port) = lookup("APIGRAPH_HTTP_PORT").and_then(|v| v.trim().parse().ok()) {
            self.server.http.port = port;
        }
        if let Some(size) = lookup("APIGRAPH_STACK_SIZE").and_then(|v| parse_size(&v)) {
            self.server.http.stack_size = size;
        }
        if let Some(version) = lookup("APIGRAPH_SCHEMA_VERSION").and_then(non_empty) {
            self.swagger.schema_version = Some(version);
        }
        if let Some(level) = lookup("APIGRAPH_LOG_LEVEL").and_then(non_empty) {
            self.logger.level = level;
        }
        if let Some(format) = lookup("APIGRAPH_LOG_FORMAT").and_then(non_empty) {
            self.logger.format = format;
        }
        if let Some(filter) = lookup("APIGRAPH_LOG_TARGET_FILTER").and_then(non_empty) {
            self.logger.target_filter = Some(filter);
        }
    }

    /// `addr:port` as passed to the HTTP server.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.http.addr, self.server.http.port)
    }
}
