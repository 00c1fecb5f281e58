use std::path::Path;

use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("could not resolve path '{path}': {source}")]
    Path {
        path: String,
        source: std::io::Error,
    },
    #[error("path '{0}' cannot be expressed as a file:// URL")]
    NotFileUrl(String),
}

/// Resolves the positional target argument to a navigable URL.
///
/// Inputs that parse as absolute URLs are canonicalized and passed through.
/// Everything else is treated as a filesystem path and converted to a
/// percent-encoded `file://` URL. The check is purely syntactic: no
/// filesystem existence test, no network probe. Schemes of a single letter
/// are treated as Windows drive prefixes, not URL schemes.
pub fn resolve_target(input: &str) -> Result<String, TargetError> {
    if let Ok(url) = Url::parse(input) {
        if url.scheme().len() > 1 {
            return Ok(url.into());
        }
    }

    let absolute = std::path::absolute(Path::new(input)).map_err(|source| TargetError::Path {
        path: input.to_string(),
        source,
    })?;
    let url =
        Url::from_file_path(&absolute).map_err(|_| TargetError::NotFileUrl(input.to_string()))?;
    Ok(url.into())
}
