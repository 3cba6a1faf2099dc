//! Companion schema lookup for the swagger UI.
//!
//! The hand-written gateway schema for this service is published in a separate
//! repository, one directory per release. `/swagger/swagger.json` proxies the
//! file matching the release this build was paired with.

use crate::config::SwaggerConfig;
use anyhow::Context;
use std::time::Duration;
use url::Url;

pub const LATEST: &str = "latest";

/// Version baked in at compile time, if the build set `APIGRAPH_SCHEMA_VERSION`.
const BUILD_SCHEMA_VERSION: Option<&str> = option_env!("APIGRAPH_SCHEMA_VERSION");

/// Configured version, else the compile-time one, else `latest`.
pub fn schema_version(cfg: &SwaggerConfig) -> String {
    let usable = |v: &&str| !v.is_empty();
    cfg.schema_version
        .as_deref()
        .map(str::trim)
        .filter(usable)
        .or_else(|| BUILD_SCHEMA_VERSION.map(str::trim).filter(usable))
        .unwrap_or(LATEST)
        .to_string()
}

/// `{base}/{version}/gen/openapi/{service}/v1/{service}.swagger.json`
pub fn swagger_url(base: &str, version: &str, service: &str) -> anyhow::Result<Url> {
    let raw = format!(
        "{}/{}/gen/openapi/{}/v1/{}.swagger.json",
        base.trim_end_matches('/'),
        version,
        service,
        service
    );
    Url::parse(&raw).with_context(|| format!("invalid swagger url: {raw}"))
}

#[derive(Debug)]
pub enum FetchError {
    /// Transport failure or unreadable body.
    Request(reqwest::Error),
    /// Upstream answered with something other than 200.
    Status(u16),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Request(e) => write!(f, "swagger request failed: {e}"),
            FetchError::Status(code) => write!(f, "swagger upstream returned status {code}"),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Request(e) => Some(e),
            FetchError::Status(_) => None,
        }
    }
}

/// Upstream swagger document with a reusable blocking client.
#[derive(Debug, Clone)]
pub struct SwaggerSource {
    url: Url,
    client: reqwest::blocking::Client,
}

impl SwaggerSource {
    pub fn new(url: Url, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build swagger http client")?;
        Ok(Self { url, client })
    }

    pub fn from_config(cfg: &SwaggerConfig) -> anyhow::Result<Self> {
        let version = schema_version(cfg);
        let url = swagger_url(&cfg.upstream_base, &version, &cfg.service_name)?;
        Self::new(url, Duration::from_secs(cfg.fetch_timeout_secs))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetch the document body. Only a 200 answer counts as success.
    pub fn fetch(&self) -> Result<Vec<u8>, FetchError> {
        let resp = self
            .client
            .get(self.url.clone())
            .send()
            .map_err(FetchError::Request)?;
        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = resp.bytes().map_err(FetchError::Request)?;
        Ok(body.to_vec())
    }
}
