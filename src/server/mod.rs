//! HTTP exposure of the exporter.
//!
//! | Route | Handler |
//! |---|---|
//! | `POST /v1/openapi/build` | [`build_endpoint`] |
//! | `GET /health` | [`health_endpoint`] |
//! | `GET /swagger/swagger.json` | [`swagger_json_endpoint`] |
//! | `GET /swagger/<file>` | [`swagger_ui_endpoint`] |

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_request, ParsedRequest};
pub use service::{
    build_endpoint, health_endpoint, swagger_json_endpoint, swagger_ui_endpoint, ExporterService,
};
