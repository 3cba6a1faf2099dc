use may_minihttp::Request;
use std::io::Read;
use tracing::debug;

/// The parts of a `may_minihttp::Request` the exporter routes on.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequest {
    pub method: String,
    /// Path without the query string
    pub path: String,
    pub body: Vec<u8>,
}

/// Strip the query string; an empty path becomes `/`.
pub fn route_path(raw_path: &str) -> &str {
    match raw_path.split('?').next() {
        Some(p) if !p.is_empty() => p,
        _ => "/",
    }
}

/// Extract method, path and the raw body.
///
/// A body that fails to read is treated as empty; the build endpoint then
/// answers 400.
pub fn parse_request(req: Request) -> ParsedRequest {
    let method = req.method().to_string();
    let path = route_path(req.path()).to_string();

    let headers_count = req.headers().len();

    let mut body = Vec::new();
    if let Err(err) = req.body().read_to_end(&mut body) {
        debug!(error = %err, "request body read failed");
        body.clear();
    }

    debug!(
        method = %method,
        path = %path,
        headers_count,
        body_size_bytes = body.len(),
        "HTTP request parsed"
    );

    ParsedRequest {
        method,
        path,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_path() {
        assert_eq!(route_path("/v1/openapi/build?x=1"), "/v1/openapi/build");
        assert_eq!(route_path("/health"), "/health");
        assert_eq!(route_path(""), "/");
        assert_eq!(route_path("?q"), "/");
    }
}
