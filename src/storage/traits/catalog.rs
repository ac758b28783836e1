//! Catalog backend trait.

use crate::models::{Catalog, Movie, Rating};
use crate::{Error, Result};

/// Trait for catalog storage backends.
///
/// A backend owns one catalog document. Every mutation is a full
/// load-mutate-save cycle: the document is read, changed in memory and
/// written back whole. There is no locking; concurrent writers race and the
/// last write wins.
pub trait CatalogBackend: Send + Sync {
    /// Reads the whole catalog document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if the document cannot be read, or
    /// [`Error::Parse`] if it is not valid JSON.
    fn read(&self) -> Result<Catalog>;

    /// Overwrites the stored document with `catalog`.
    fn write(&self, catalog: &Catalog) -> Result<()>;

    /// Appends a movie to the end of the catalog.
    ///
    /// No uniqueness check is done here.
    fn append(&self, movie: Movie) -> Result<()> {
        let mut catalog = self.read()?;
        catalog.movies.push(movie);
        self.write(&catalog)
    }

    /// Removes the first movie whose title is exactly `title`.
    ///
    /// Returns whether a movie was removed. Nothing is written when no title
    /// matches.
    fn remove_by_title(&self, title: &str) -> Result<bool> {
        let mut catalog = self.read()?;
        let Some(index) = catalog.position_exact(title) else {
            tracing::debug!(title, "remove_by_title found no exact match");
            return Ok(false);
        };
        catalog.movies.remove(index);
        self.write(&catalog)?;
        Ok(true)
    }

    /// Sets the rating of the first movie whose title is exactly `title`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] without writing if no title matches.
    fn update_rating(&self, title: &str, rating: Rating) -> Result<()> {
        let mut catalog = self.read()?;
        let Some(index) = catalog.position_exact(title) else {
            tracing::warn!(title, "movie not found in the database");
            return Err(Error::NotFound(format!(
                "Movie '{title}' not found in the database."
            )));
        };
        catalog.movies[index].rating = Some(rating);
        self.write(&catalog)
    }

    /// Returns the number of movies.
    fn count(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }
}
