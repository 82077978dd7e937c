//! Scoped staging directories for external-tool invocations.
//!
//! Each operation stages its inputs in a uniquely-named directory under the
//! configured base, so concurrent calls never share state. The directory is
//! removed on every exit path: on success a removal failure is surfaced as
//! [`LscError::Cleanup`], on failure it is logged and the first error
//! wins.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, warn};

use crate::error::{LscError, Result};

/// A staging directory owned by a single operation.
pub struct Staging {
    dir: TempDir,
}

impl Staging {
    /// Create a uniquely-named staging directory under `base`.
    pub fn new(base: &Path, prefix: &str) -> Result<Self> {
        fs::create_dir_all(base).map_err(|e| LscError::file("create directory", base, e))?;
        let dir = tempfile::Builder::new()
            .prefix(&format!("{prefix}_"))
            .tempdir_in(base)
            .map_err(|e| LscError::file("create staging directory under", base, e))?;
        debug!("staging directory: {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Remove the staging directory, surfacing removal failure.
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir
            .close()
            .map_err(|source| LscError::Cleanup { path, source })
    }

    /// Remove the staging directory on a path that is already failing.
    /// Removal failure is logged, not escalated.
    pub fn discard(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            warn!("failed to remove staging directory {}: {}", path.display(), e);
        }
    }
}

/// Run `f` with a fresh staging directory, removing it on every exit path.
///
/// A removal failure after `f` succeeded turns the call into
/// [`LscError::Cleanup`]; the artifact is dropped rather than returned
/// alongside a failure.
pub fn with_staging<T>(
    base: &Path,
    prefix: &str,
    f: impl FnOnce(&Staging) -> Result<T>,
) -> Result<T> {
    let staging = Staging::new(base, prefix)?;
    match f(&staging) {
        Ok(value) => {
            staging.close()?;
            Ok(value)
        }
        Err(e) => {
            staging.discard();
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_creates_dir_under_base() {
        let base = tempfile::tempdir().unwrap();
        let staging = Staging::new(base.path(), "lsc_test").unwrap();
        assert!(staging.path().is_dir());
        assert!(staging.path().starts_with(base.path()));
        let name = staging.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("lsc_test_"));
    }

    #[test]
    fn test_close_removes_dir() {
        let base = tempfile::tempdir().unwrap();
        let staging = Staging::new(base.path(), "lsc_test").unwrap();
        let path = staging.path().to_path_buf();
        staging.close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_unique_names_for_concurrent_use() {
        let base = tempfile::tempdir().unwrap();
        let a = Staging::new(base.path(), "lsc_test").unwrap();
        let b = Staging::new(base.path(), "lsc_test").unwrap();
        assert_ne!(a.path(), b.path());
    }

    #[test]
    fn test_with_staging_removes_on_success() {
        let base = tempfile::tempdir().unwrap();
        let mut path = PathBuf::new();
        with_staging(base.path(), "lsc_test", |staging| {
            path = staging.path().to_path_buf();
            fs::write(staging.join("input"), b"data").unwrap();
            Ok(())
        })
        .unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_with_staging_removes_on_failure() {
        let base = tempfile::tempdir().unwrap();
        let mut path = PathBuf::new();
        let result: Result<()> = with_staging(base.path(), "lsc_test", |staging| {
            path = staging.path().to_path_buf();
            Err(LscError::invalid("boom"))
        });
        assert!(result.is_err());
        assert!(!path.exists());
    }
}
