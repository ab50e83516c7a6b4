//! Static tile file serving with path sanitization.

use std::path::{Component, Path, PathBuf};

use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::error::{ApiError, Result};

/// Resolve a request path against a root directory.
///
/// Only plain path segments are accepted; `..`, absolute segments and
/// prefix components are rejected so a request can never escape the root.
fn resolve(root: &Path, rel: &str) -> Result<PathBuf> {
    let mut resolved = root.to_path_buf();
    for component in Path::new(rel).components() {
        match component {
            Component::Normal(segment) => resolved.push(segment),
            Component::CurDir => {}
            _ => return Err(ApiError::not_found(format!("no such file: {rel}"))),
        }
    }
    Ok(resolved)
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

/// Serve one file from under `root`. A missing file is a 404, any other
/// read failure a 500.
pub async fn serve(root: &Path, rel: &str) -> Result<Response> {
    let path = resolve(root, rel)?;
    let bytes = tokio::fs::read(&path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ApiError::not_found(format!("no such file: {rel}"))
        } else {
            ApiError::Io(e)
        }
    })?;
    Ok(([(header::CONTENT_TYPE, content_type(&path))], bytes).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_rejects_traversal() {
        let root = Path::new("/data");
        assert!(resolve(root, "../etc/passwd").is_err());
        assert!(resolve(root, "a/../../etc").is_err());
        assert!(resolve(root, "/etc/passwd").is_err());
    }

    #[test]
    fn test_resolve_joins_plain_segments() {
        let root = Path::new("/data");
        let path = resolve(root, "terrain10/0/0/0.terrain").unwrap();
        assert_eq!(path, Path::new("/data/terrain10/0/0/0.terrain"));
    }

    #[test]
    fn test_content_type_by_extension() {
        assert_eq!(content_type(Path::new("layer.json")), "application/json");
        assert_eq!(
            content_type(Path::new("0.terrain")),
            "application/octet-stream"
        );
    }
}
