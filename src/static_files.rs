//! Files for the swagger UI mount.
//!
//! HTML files are treated as `minijinja` templates when a render context is
//! supplied; everything else is served as raw bytes.

use minijinja::Environment;
use serde_json::Value as JsonValue;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

pub const INDEX_FILE: &str = "index.html";

#[derive(Debug, Clone)]
pub struct StaticFiles {
    base_dir: PathBuf,
}

fn template_error(err: minijinja::Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, err)
}

impl StaticFiles {
    pub fn new<P: Into<PathBuf>>(base: P) -> Self {
        Self { base_dir: base.into() }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve a URL path below the base directory. Anything that would
    /// climb out of it (`..`, absolute or prefixed components) yields `None`.
    /// An empty path or one ending in `/` maps to `index.html`.
    fn map_path(&self, url_path: &str) -> Option<PathBuf> {
        let relative = url_path.trim_start_matches('/');
        let mut pb = self.base_dir.clone();
        for comp in Path::new(relative).components() {
            match comp {
                Component::Normal(s) => {
                    // Windows-style separators are not path separators on unix.
                    if s.to_str().is_some_and(|s| s.contains('\\')) {
                        return None;
                    }
                    pb.push(s)
                }
                Component::CurDir => {}
                _ => return None,
            }
        }
        if relative.is_empty() || relative.ends_with('/') {
            pb.push(INDEX_FILE);
        }
        Some(pb)
    }

    fn content_type(path: &Path) -> &'static str {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase()
            .as_str()
        {
            "html" => "text/html",
            "css" => "text/css",
            "js" => "application/javascript",
            "json" | "map" => "application/json",
            "png" => "image/png",
            "svg" => "image/svg+xml",
            "ico" => "image/x-icon",
            "txt" => "text/plain",
            _ => "application/octet-stream",
        }
    }

    /// Read (and for HTML with `ctx`, render) the file behind `url_path`.
    pub fn load(
        &self,
        url_path: &str,
        ctx: Option<&JsonValue>,
    ) -> io::Result<(Vec<u8>, &'static str)> {
        let path = self
            .map_path(url_path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "invalid path"))?;
        if !path.is_file() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        }
        let content_type = Self::content_type(&path);
        if let (Some(ctx_val), "text/html") = (ctx, content_type) {
            let source = fs::read_to_string(&path)?;
            let mut env = Environment::new();
            env.add_template("page", &source).map_err(template_error)?;
            let rendered = env
                .get_template("page")
                .and_then(|tmpl| tmpl.render(ctx_val))
                .map_err(template_error)?;
            return Ok((rendered.into_bytes(), content_type));
        }
        Ok((fs::read(&path)?, content_type))
    }
}
