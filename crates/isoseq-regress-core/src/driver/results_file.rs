//! Results file housekeeping

use std::io::ErrorKind;
use std::path::Path;

use crate::error::{RegressError, RegressResult};

/// Delete `path` if it exists
///
/// Returns whether a file was removed. A missing file is not an error.
pub async fn remove_if_exists(path: &Path) -> RegressResult<bool> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "removed stale results file");
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(RegressError::io_with_path(
            format!("Failed to remove {}: {}", path.display(), e),
            path,
        )),
    }
}
