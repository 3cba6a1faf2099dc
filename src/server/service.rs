use super::request::{parse_request, ParsedRequest};
use super::response::{write_bytes, write_json, write_json_error, write_text};
use crate::error::BuildError;
use crate::exporter::{build_openapi_spec_with, BuildSpecRequest};
use crate::spec::BuildOptions;
use crate::static_files::StaticFiles;
use crate::swagger::SwaggerSource;
use may_minihttp::{HttpService, Request, Response};
use serde_json::json;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

pub const BUILD_PATH: &str = "/v1/openapi/build";
pub const HEALTH_PATH: &str = "/health";
pub const SWAGGER_PREFIX: &str = "/swagger/";
pub const SWAGGER_JSON_PATH: &str = "/swagger/swagger.json";

/// HTTP front of the exporter: the build operation, a health probe and the
/// swagger UI mount.
#[derive(Clone, Default)]
pub struct ExporterService {
    pub options: BuildOptions,
    pub static_files: Option<StaticFiles>,
    pub swagger: Option<Arc<SwaggerSource>>,
}

impl ExporterService {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn with_static_files(mut self, static_files: StaticFiles) -> Self {
        self.static_files = Some(static_files);
        self
    }

    pub fn with_swagger(mut self, swagger: SwaggerSource) -> Self {
        self.swagger = Some(Arc::new(swagger));
        self
    }
}

/// Basic health check endpoint returning `{ "status": "ok" }`.
pub fn health_endpoint(res: &mut Response) -> io::Result<()> {
    write_json(res, 200, &json!({ "status": "ok" }));
    Ok(())
}

/// Whole milliseconds, saturating at `u64::MAX`.
pub(crate) fn duration_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// `POST /v1/openapi/build`
pub fn build_endpoint(res: &mut Response, body: &[u8], options: BuildOptions) -> io::Result<()> {
    let started = Instant::now();
    info!(operation = "BuildOpenAPISpec", "call started");
    debug!(payload_bytes = body.len(), "request payload");

    let request: BuildSpecRequest = match serde_json::from_slice(body) {
        Ok(r) => r,
        Err(err) => {
            warn!(error = %err, "invalid request body");
            write_json_error(
                res,
                400,
                json!({ "error": "invalid request body", "details": err.to_string() }),
            );
            return Ok(());
        }
    };

    let (status, outcome) = match build_openapi_spec_with(&request, options) {
        Ok(response) => {
            debug!(payload_bytes = response.spec_json.len(), "response payload");
            write_json(res, 200, &json!({ "specJson": response.spec_json }));
            (200, "ok")
        }
        Err(BuildError::MalformedGraph(err)) => {
            warn!(error = %err, "malformed graph");
            write_json_error(
                res,
                422,
                json!({ "error": "malformed graph", "details": err.to_string() }),
            );
            (422, "malformed graph")
        }
        Err(err @ BuildError::Serialization(_)) => {
            error!(error = %err, "failed to encode document");
            write_json_error(
                res,
                500,
                json!({ "error": "failed to encode document", "details": err.to_string() }),
            );
            (500, "serialization failed")
        }
    };

    info!(
        operation = "BuildOpenAPISpec",
        status,
        outcome,
        duration_ms = duration_ms(started.elapsed()),
        "call finished"
    );
    Ok(())
}

/// `GET /swagger/swagger.json`: proxy the companion schema.
pub fn swagger_json_endpoint(res: &mut Response, source: Option<&SwaggerSource>) -> io::Result<()> {
    let Some(source) = source else {
        write_json_error(res, 404, json!({ "error": "swagger not configured" }));
        return Ok(());
    };
    match source.fetch() {
        Ok(bytes) => write_bytes(res, 200, "application/json", bytes),
        Err(err) => {
            error!(error = %err, url = %source.url(), "swagger fetch failed");
            write_text(res, 500, "failed to fetch swagger");
        }
    }
    Ok(())
}

/// `GET /swagger/<file>`: swagger UI assets, `index.html` rendered.
pub fn swagger_ui_endpoint(res: &mut Response, files: &StaticFiles, rel_path: &str) -> io::Result<()> {
    let ctx = json!({ "spec_url": SWAGGER_JSON_PATH });
    match files.load(rel_path, Some(&ctx)) {
        Ok((bytes, ct)) => write_bytes(res, 200, ct, bytes),
        Err(err) => {
            debug!(error = %err, path = rel_path, "swagger asset not served");
            write_json_error(res, 404, json!({ "error": "Not Found", "path": rel_path }));
        }
    }
    Ok(())
}

impl HttpService for ExporterService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let ParsedRequest {
            method, path, body, ..
        } = parse_request(req);

        match (method.as_str(), path.as_str()) {
            ("POST", BUILD_PATH) => build_endpoint(res, &body, self.options),
            ("GET", HEALTH_PATH) => health_endpoint(res),
            ("GET", SWAGGER_JSON_PATH) => swagger_json_endpoint(res, self.swagger.as_deref()),
            ("GET", p) if p.starts_with(SWAGGER_PREFIX) => match &self.static_files {
                Some(files) => swagger_ui_endpoint(res, files, &p[SWAGGER_PREFIX.len()..]),
                None => {
                    write_json_error(res, 404, json!({ "error": "swagger not configured" }));
                    Ok(())
                }
            },
            (_, BUILD_PATH) => {
                write_json_error(
                    res,
                    405,
                    json!({ "error": "Method Not Allowed", "method": method, "path": path }),
                );
                Ok(())
            }
            _ => {
                write_json_error(
                    res,
                    404,
                    json!({ "error": "Not Found", "method": method, "path": path }),
                );
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_ms_saturates() {
        assert_eq!(duration_ms(Duration::from_micros(2_500)), 2);
        assert_eq!(duration_ms(Duration::MAX), u64::MAX);
    }
}
