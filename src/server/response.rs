use may_minihttp::Response;
use serde_json::Value;

pub fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        _ => "OK",
    }
}

/// `may_minihttp` only takes `'static` header lines.
pub fn content_type_header(content_type: &str) -> &'static str {
    match content_type {
        "application/json" => "Content-Type: application/json",
        "text/html" => "Content-Type: text/html",
        "text/css" => "Content-Type: text/css",
        "application/javascript" => "Content-Type: application/javascript",
        "image/png" => "Content-Type: image/png",
        "image/svg+xml" => "Content-Type: image/svg+xml",
        "image/x-icon" => "Content-Type: image/x-icon",
        "text/plain" => "Content-Type: text/plain",
        _ => "Content-Type: application/octet-stream",
    }
}

pub fn write_bytes(res: &mut Response, status: u16, content_type: &str, body: Vec<u8>) {
    res.status_code(status as usize, status_reason(status));
    res.header(content_type_header(content_type));
    res.body_vec(body);
}

pub fn write_json(res: &mut Response, status: u16, body: &Value) {
    write_bytes(res, status, "application/json", body.to_string().into_bytes());
}

pub fn write_json_error(res: &mut Response, status: u16, body: Value) {
    write_json(res, status, &body);
}

pub fn write_text(res: &mut Response, status: u16, body: &str) {
    write_bytes(res, status, "text/plain", body.as_bytes().to_vec());
}
