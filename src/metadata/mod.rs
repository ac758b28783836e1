//! Movie metadata lookup.
//!
//! Provides a small interface over third-party metadata services. The only
//! implementation talks to OMDb.

mod omdb;

pub use omdb::OmdbClient;

use crate::Result;
use crate::config::OmdbConfig;
use crate::models::{Movie, Rating, Year};
use serde::Deserialize;
use std::time::Duration;

/// Trait for metadata providers.
pub trait MetadataProvider: Send + Sync {
    /// The provider name.
    fn name(&self) -> &'static str;

    /// Looks up a movie by title.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ExternalService`] for non-200 responses,
    /// [`crate::Error::NotFound`] when the service has no match, and
    /// [`crate::Error::OperationFailed`] for transport failures.
    fn fetch(&self, title: &str) -> Result<FetchedMovie>;
}

/// A movie as returned by the metadata service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FetchedMovie {
    /// Canonical title.
    #[serde(rename = "Title")]
    pub title: String,
    /// Release year, as reported.
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    /// IMDb rating, as reported (may be `N/A`).
    #[serde(rename = "imdbRating", default)]
    pub rating: Option<String>,
    /// Poster URL.
    #[serde(rename = "Poster", default)]
    pub poster: String,
    /// Lead actors.
    #[serde(rename = "Actors", default)]
    pub actors: String,
    /// IMDb identifier.
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
}

impl FetchedMovie {
    /// Converts the fetched fields into a catalog record.
    #[must_use]
    pub fn into_movie(self) -> Movie {
        let mut movie = Movie::new(self.title)
            .with_poster(self.poster)
            .with_actors(self.actors);
        movie.year = self.year.map(Year::Text);
        movie.rating = self.rating.map(Rating::Text);
        movie.imdb_id = self.imdb_id;
        movie
    }
}

/// HTTP client configuration for metadata providers.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataHttpConfig {
    /// Request timeout in milliseconds (0 to disable).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
}

impl MetadataHttpConfig {
    /// Loads HTTP configuration from OMDb settings.
    #[must_use]
    pub const fn from_config(config: &OmdbConfig) -> Self {
        Self {
            timeout_ms: config.timeout_ms,
            connect_timeout_ms: config.connect_timeout_ms,
        }
    }
}

/// Builds a blocking HTTP client with configured timeouts.
#[must_use]
pub fn build_http_client(config: MetadataHttpConfig) -> reqwest::blocking::Client {
    let mut builder = reqwest::blocking::Client::builder();
    // reqwest's blocking client applies a 30s timeout unless told otherwise.
    builder = if config.timeout_ms > 0 {
        builder.timeout(Duration::from_millis(config.timeout_ms))
    } else {
        builder.timeout(None)
    };
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("Failed to build metadata HTTP client: {err}");
        reqwest::blocking::Client::new()
    })
}
