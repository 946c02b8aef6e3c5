//! `file` strategy: read the whole file as UTF-8 text.

use crate::error::{FetchError, FetchErrorKind};
use crate::uri::FileResource;
use std::fs;

pub(crate) fn fetch_file(resource: &FileResource) -> Result<String, FetchError> {
    let path = resource.path();
    let text = fs::read_to_string(path).map_err(|e| {
        FetchError::new(FetchErrorKind::IoFailure, format!("read {}: {}", path, e))
    })?;
    tracing::debug!("read {} bytes from {}", text.len(), path);
    Ok(text)
}
