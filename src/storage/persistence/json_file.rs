//! JSON file catalog backend.
//!
//! Stores the whole catalog as one pretty-printed JSON document at an
//! injected path. Writes truncate and rewrite the file in place; there is no
//! atomic rename and no backup of the previous content.

use crate::models::Catalog;
use crate::storage::traits::CatalogBackend;
use crate::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum catalog file size (16MB).
/// Prevents memory exhaustion from a runaway or foreign file.
const MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Catalog backend backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    /// Path of the catalog document.
    path: PathBuf,
}

impl JsonFileBackend {
    /// Creates a backend for the file at `path`.
    ///
    /// The file is not touched until the first operation; reading a missing
    /// file fails.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a backend, seeding an empty catalog if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or the seed file cannot be
    /// created.
    pub fn with_create(path: impl Into<PathBuf>) -> Result<Self> {
        let backend = Self::new(path);
        if backend.path.exists() {
            return Ok(backend);
        }

        if let Some(parent) = backend.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::OperationFailed {
                operation: "create_catalog_dir".to_string(),
                cause: format!("{}: {e}", parent.display()),
            })?;
        }

        backend.write(&Catalog::new())?;
        tracing::info!(path = %backend.path.display(), "Created empty catalog");
        Ok(backend)
    }

    /// Returns the catalog path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogBackend for JsonFileBackend {
    fn read(&self) -> Result<Catalog> {
        let metadata = fs::metadata(&self.path).map_err(|e| Error::OperationFailed {
            operation: "read_catalog_metadata".to_string(),
            cause: format!("{}: {e}", self.path.display()),
        })?;

        if metadata.len() > MAX_FILE_SIZE {
            return Err(Error::OperationFailed {
                operation: "read_catalog".to_string(),
                cause: format!(
                    "{} exceeds maximum size of {MAX_FILE_SIZE} bytes",
                    self.path.display()
                ),
            });
        }

        let json = fs::read_to_string(&self.path).map_err(|e| Error::OperationFailed {
            operation: "read_catalog".to_string(),
            cause: format!("{}: {e}", self.path.display()),
        })?;

        let catalog: Catalog = serde_json::from_str(&json).map_err(|e| Error::Parse {
            path: self.path.clone(),
            cause: e.to_string(),
        })?;

        tracing::debug!(path = %self.path.display(), movies = catalog.len(), "Read catalog");
        Ok(catalog)
    }

    fn write(&self, catalog: &Catalog) -> Result<()> {
        let json = serde_json::to_string_pretty(catalog).map_err(|e| Error::OperationFailed {
            operation: "serialize_catalog".to_string(),
            cause: e.to_string(),
        })?;

        fs::write(&self.path, json).map_err(|e| Error::OperationFailed {
            operation: "write_catalog".to_string(),
            cause: format!("{}: {e}", self.path.display()),
        })?;

        tracing::debug!(path = %self.path.display(), movies = catalog.len(), "Wrote catalog");
        Ok(())
    }
}
