//! # moviedb
//!
//! A menu-driven movie catalog manager.
//!
//! The catalog is a single JSON document (`{"movies": [...]}`) that is loaded
//! fresh for every operation and rewritten in full after every mutation. New
//! movies are enriched through the OMDb metadata API, and the catalog can be
//! rendered into a static HTML page.
//!
//! ## Layers
//!
//! - [`storage`]: the catalog store (JSON file or in-memory)
//! - [`metadata`]: the OMDb metadata fetcher
//! - [`services`]: catalog operations (add, delete, update, search, sort, ...)
//! - [`rendering`]: static site generation
//! - [`cli`]: the interactive menu and console boundary
//! - [`commands`]: one handler per menu entry
//! - [`config`]: layered configuration (TOML, environment, flags)
//! - [`observability`]: logging setup
//!
//! ## Example
//!
//! ```rust,ignore
//! use moviedb::services::CatalogService;
//! use moviedb::storage::InMemoryBackend;
//! use moviedb::metadata::OmdbClient;
//!
//! let service = CatalogService::new(InMemoryBackend::new(), OmdbClient::new(&config.omdb));
//! let added = service.add_movie("Inception")?;
//! println!("{}: {}", added.title, added.rating_label());
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;
use thiserror::Error as ThisError;

pub mod cli;
pub mod commands;
pub mod config;
pub mod metadata;
pub mod models;
pub mod observability;
pub mod rendering;
pub mod services;
pub mod storage;

pub use config::{DuplicateCheck, FeatureFlags, MovieDbConfig};
pub use metadata::{FetchedMovie, MetadataProvider, OmdbClient};
pub use models::{Catalog, Movie, Rating, Year};
pub use rendering::{SiteError, SiteGenerator};
pub use services::{CatalogService, UpdateOutcome};
pub use storage::{CatalogBackend, InMemoryBackend, JsonFileBackend};

/// Error type for moviedb operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Empty titles, search queries that are too short |
/// | `NotFound` | A title lookup misses, OMDb has no match |
/// | `AlreadyExists` | The add-flow existence check hits |
/// | `EmptyCatalog` | Sorting or picking from an empty catalog |
/// | `MissingRating` / `InvalidRating` | A rating is absent or not a number |
/// | `Parse` | The catalog file is not valid JSON |
/// | `OperationFailed` | File I/O and HTTP transport failures |
/// | `ExternalService` | OMDb answered with a non-200 status |
/// | `Config` | Missing or invalid configuration |
/// | `Site` | Static site generation failures |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - A title prompt is answered with nothing
    /// - A search query is shorter than the minimum length
    #[error("{0}")]
    InvalidInput(String),

    /// A lookup found nothing.
    #[error("{0}")]
    NotFound(String),

    /// A movie with this title is already in the catalog.
    #[error("The movie '{0}' already exists in the database.")]
    AlreadyExists(String),

    /// The catalog has no movies.
    #[error("no movies found in the database")]
    EmptyCatalog,

    /// A movie has no rating where one is required.
    #[error("missing rating for movie '{title}'")]
    MissingRating {
        /// Title of the offending movie.
        title: String,
    },

    /// A movie rating could not be parsed as a number.
    #[error("invalid rating '{value}' for movie '{title}'")]
    InvalidRating {
        /// Title of the offending movie.
        title: String,
        /// The raw rating value.
        value: String,
    },

    /// The catalog document could not be parsed.
    #[error("failed to parse catalog '{}': {cause}", path.display())]
    Parse {
        /// Path of the document.
        path: PathBuf,
        /// The underlying cause.
        cause: String,
    },

    /// An operation failed.
    ///
    /// Raised when:
    /// - Filesystem I/O errors occur
    /// - The HTTP request to the metadata service fails in transport
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// The external metadata service answered with an error status.
    #[error("metadata service returned {status} {reason}")]
    ExternalService {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase.
        reason: String,
    },

    /// Configuration is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Static site generation failed.
    #[error(transparent)]
    Site(#[from] SiteError),
}

/// Result type alias for moviedb operations.
pub type Result<T> = std::result::Result<T, Error>;
