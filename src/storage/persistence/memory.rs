//! In-memory catalog backend for tests and dry runs.

use crate::models::Catalog;
use crate::storage::traits::CatalogBackend;
use crate::{Error, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// Catalog backend held in memory.
///
/// Clone-friendly via `Arc`; clones share the same document. The number of
/// writes is tracked so tests can assert that an operation left storage alone.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    catalog: Arc<RwLock<Catalog>>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend holding `catalog`.
    #[must_use]
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times [`CatalogBackend::write`] has been called.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl CatalogBackend for InMemoryBackend {
    fn read(&self) -> Result<Catalog> {
        let catalog = self.catalog.read().map_err(|_| Error::OperationFailed {
            operation: "read_catalog".to_string(),
            cause: "lock poisoned".to_string(),
        })?;
        Ok(catalog.clone())
    }

    fn write(&self, catalog: &Catalog) -> Result<()> {
        let mut stored = self.catalog.write().map_err(|_| Error::OperationFailed {
            operation: "write_catalog".to_string(),
            cause: "lock poisoned".to_string(),
        })?;
        *stored = catalog.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
