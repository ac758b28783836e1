//! Catalog operations.
//!
//! Business logic over a [`CatalogBackend`] and a [`MetadataProvider`]. Every
//! operation reads the catalog fresh from the backend; mutations write the
//! whole document back. Nothing here talks to the console.

use crate::config::DuplicateCheck;
use crate::metadata::MetadataProvider;
use crate::models::{Catalog, Movie, Rating};
use crate::rendering::SiteGenerator;
use crate::storage::CatalogBackend;
use crate::{Error, Result};
use rand::seq::IndexedRandom;
use std::path::PathBuf;

/// Minimum number of characters in a search query.
pub const MIN_SEARCH_LENGTH: usize = 5;

/// Result of an update request.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// The rating was changed and persisted.
    Updated {
        /// Stored title of the movie.
        title: String,
        /// The new rating.
        rating: Rating,
    },
    /// No rating was entered; nothing was written.
    Cancelled {
        /// Stored title of the movie.
        title: String,
    },
}

/// Service for catalog operations.
pub struct CatalogService<B, P> {
    backend: B,
    provider: P,
    duplicate_check: DuplicateCheck,
}

impl<B, P> CatalogService<B, P>
where
    B: CatalogBackend,
    P: MetadataProvider,
{
    /// Creates a service with the default duplicate check.
    #[must_use]
    pub fn new(backend: B, provider: P) -> Self {
        Self {
            backend,
            provider,
            duplicate_check: DuplicateCheck::default(),
        }
    }

    /// Sets how the add flow detects existing movies.
    #[must_use]
    pub const fn with_duplicate_check(mut self, duplicate_check: DuplicateCheck) -> Self {
        self.duplicate_check = duplicate_check;
        self
    }

    /// Returns the storage backend.
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Looks a title up on the metadata service and appends the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty title,
    /// [`Error::AlreadyExists`] if the existence check hits, or the fetcher's
    /// error. Storage is not modified on any error.
    pub fn add_movie(&self, title: &str) -> Result<Movie> {
        let title = require_title(title)?;

        let catalog = self.backend.read()?;
        if self.exists(&catalog, title) {
            return Err(Error::AlreadyExists(title.to_string()));
        }

        let fetched = self.provider.fetch(title)?;
        let movie = fetched.into_movie();
        self.backend.append(movie.clone())?;

        tracing::info!(
            query = title,
            title = %movie.title,
            provider = self.provider.name(),
            "Added movie"
        );
        Ok(movie)
    }

    /// Applies the configured existence check.
    fn exists(&self, catalog: &Catalog, title: &str) -> bool {
        match self.duplicate_check {
            DuplicateCheck::Legacy => catalog.has_top_level_key(title),
            DuplicateCheck::Title => catalog.find_ignore_case(title).is_some(),
        }
    }

    /// Deletes the movie whose title matches case-insensitively.
    ///
    /// Returns the removed record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty title or
    /// [`Error::NotFound`] if no title matches.
    pub fn delete_movie(&self, title: &str) -> Result<Movie> {
        let movie = self.find_movie(title)?;
        if !self.backend.remove_by_title(&movie.title)? {
            return Err(not_found(title));
        }

        tracing::info!(title = %movie.title, "Deleted movie");
        Ok(movie)
    }

    /// Finds the movie whose title matches case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty title or
    /// [`Error::NotFound`] if no title matches.
    pub fn find_movie(&self, title: &str) -> Result<Movie> {
        let title = require_title(title)?;
        self.backend
            .read()?
            .find_ignore_case(title)
            .cloned()
            .ok_or_else(|| not_found(title))
    }

    /// Sets the rating of the movie whose title matches case-insensitively.
    ///
    /// A blank `new_rating` cancels the update without writing. Otherwise
    /// the entered text is stored as the rating; no other field changes.
    pub fn update_rating(&self, title: &str, new_rating: &str) -> Result<UpdateOutcome> {
        let movie = self.find_movie(title)?;

        let new_rating = new_rating.trim();
        if new_rating.is_empty() {
            return Ok(UpdateOutcome::Cancelled { title: movie.title });
        }

        let rating = Rating::from(new_rating);
        self.backend.update_rating(&movie.title, rating.clone())?;

        tracing::info!(title = %movie.title, rating = %rating, "Updated rating");
        Ok(UpdateOutcome::Updated {
            title: movie.title,
            rating,
        })
    }

    /// Returns every movie in stored order.
    pub fn list_movies(&self) -> Result<Vec<Movie>> {
        Ok(self.backend.read()?.movies)
    }

    /// Returns every movie sorted by rating, highest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCatalog`], [`Error::MissingRating`] or
    /// [`Error::InvalidRating`]. Storage is never written.
    pub fn sorted_by_rating(&self) -> Result<Vec<Movie>> {
        let movies = self.backend.read()?.movies;
        if movies.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        sort_by_rating(movies)
    }

    /// Returns the first movie whose title contains `query`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for queries shorter than
    /// [`MIN_SEARCH_LENGTH`] characters, before storage is read, or
    /// [`Error::NotFound`] when nothing matches.
    pub fn search(&self, query: &str) -> Result<Movie> {
        let query = query.trim();
        if query.chars().count() < MIN_SEARCH_LENGTH {
            return Err(Error::InvalidInput(format!(
                "Please enter at least {MIN_SEARCH_LENGTH} characters to search."
            )));
        }

        let needle = query.to_lowercase();
        self.backend
            .read()?
            .movies
            .into_iter()
            .find(|m| m.title.to_lowercase().contains(&needle))
            .ok_or_else(|| Error::NotFound(format!("'{query}' not found in the database.")))
    }

    /// Returns the number of movies.
    pub fn status(&self) -> Result<usize> {
        self.backend.count()
    }

    /// Picks a movie uniformly at random.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCatalog`] if there are no movies.
    pub fn random_movie(&self) -> Result<Movie> {
        let catalog = self.backend.read()?;
        catalog
            .movies
            .choose(&mut rand::rng())
            .cloned()
            .ok_or(Error::EmptyCatalog)
    }

    /// Renders the catalog with `generator` and returns the output path.
    pub fn generate_website(&self, generator: &SiteGenerator) -> Result<PathBuf> {
        let catalog = self.backend.read()?;
        generator.generate(&catalog)?;
        Ok(generator.output_path().to_path_buf())
    }
}

/// Sorts movies by numeric rating, highest first.
///
/// The sort is stable: movies with equal ratings keep their relative order.
///
/// # Errors
///
/// Returns the first [`Error::MissingRating`] or [`Error::InvalidRating`]
/// found, in catalog order.
pub fn sort_by_rating(movies: Vec<Movie>) -> Result<Vec<Movie>> {
    let mut keyed = movies
        .into_iter()
        .map(|movie| Ok((movie.numeric_rating()?, movie)))
        .collect::<Result<Vec<_>>>()?;

    keyed.sort_by(|(a, _), (b, _)| b.total_cmp(a));
    Ok(keyed.into_iter().map(|(_, movie)| movie).collect())
}

fn require_title(title: &str) -> Result<&str> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::InvalidInput("You've entered nothing. Please try again.".to_string()));
    }
    Ok(title)
}

fn not_found(title: &str) -> Error {
    Error::NotFound(format!("Movie '{title}' not found in the database."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::FetchedMovie;
    use crate::storage::InMemoryBackend;
    use std::sync::Mutex;

    /// Provider returning canned records and recording requested titles.
    #[derive(Default)]
    struct StubProvider {
        requests: Mutex<Vec<String>>,
        fail_with_status: Option<u16>,
    }

    impl StubProvider {
        fn failing(status: u16) -> Self {
            Self {
                fail_with_status: Some(status),
                ..Self::default()
            }
        }

        fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl MetadataProvider for StubProvider {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn fetch(&self, title: &str) -> Result<FetchedMovie> {
            self.requests.lock().unwrap().push(title.to_string());
            if let Some(status) = self.fail_with_status {
                return Err(Error::ExternalService {
                    status,
                    reason: "Unauthorized".to_string(),
                });
            }
            Ok(FetchedMovie {
                title: format!("{title} (fetched)"),
                year: Some("2010".to_string()),
                rating: Some("8.8".to_string()),
                poster: "https://example.com/poster.jpg".to_string(),
                actors: "Someone".to_string(),
                imdb_id: Some("tt0000001".to_string()),
            })
        }
    }

    fn catalog() -> Catalog {
        Catalog::with_movies(vec![
            Movie::new("Inception").with_year(2010).with_rating("8.8").with_actors("DiCaprio"),
            Movie::new("Heat").with_year(1995).with_rating("8.3"),
            Movie::new("The Matrix").with_year(1999).with_rating(8.7),
        ])
    }

    fn service(catalog: Catalog) -> CatalogService<InMemoryBackend, StubProvider> {
        CatalogService::new(InMemoryBackend::with_catalog(catalog), StubProvider::default())
    }

    #[test]
    fn test_add_movie_appends_fetched_record() {
        let service = service(catalog());

        let added = service.add_movie("  Alien ").unwrap();
        assert_eq!(added.title, "Alien (fetched)");
        assert_eq!(added.imdb_id.as_deref(), Some("tt0000001"));
        assert_eq!(service.provider.requests(), ["Alien"]);

        let movies = service.list_movies().unwrap();
        assert_eq!(movies.len(), 4);
        assert_eq!(movies[3], added);
    }

    #[test]
    fn test_add_movie_rejects_empty_title() {
        let service = service(catalog());
        let err = service.add_movie("   ").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(service.provider.requests().is_empty());
        assert_eq!(service.backend().write_count(), 0);
    }

    #[test]
    fn test_add_movie_fetch_failure_leaves_storage_alone() {
        let service = CatalogService::new(
            InMemoryBackend::with_catalog(catalog()),
            StubProvider::failing(401),
        );

        let err = service.add_movie("Alien").unwrap_err();
        assert!(matches!(err, Error::ExternalService { status: 401, .. }));
        assert_eq!(service.backend().write_count(), 0);
        assert_eq!(service.status().unwrap(), 3);
    }

    #[test]
    fn test_legacy_duplicate_check_only_matches_document_keys() {
        let service = service(catalog());

        // Existing titles are not detected by the legacy check.
        service.add_movie("Inception").unwrap();
        assert_eq!(service.status().unwrap(), 4);

        let err = service.add_movie("movies").unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(ref t) if t == "movies"));
        assert_eq!(service.provider.requests(), ["Inception"]);
    }

    #[test]
    fn test_title_duplicate_check() {
        let service = service(catalog()).with_duplicate_check(DuplicateCheck::Title);

        let err = service.add_movie("inception").unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));
        assert!(service.provider.requests().is_empty());

        service.add_movie("movies").unwrap();
        assert_eq!(service.status().unwrap(), 4);
    }

    #[test]
    fn test_delete_movie_case_insensitive() {
        let service = service(catalog());

        let removed = service.delete_movie("the MATRIX").unwrap();
        assert_eq!(removed.title, "The Matrix");

        let titles: Vec<_> = service.list_movies().unwrap().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, ["Inception", "Heat"]);
    }

    #[test]
    fn test_delete_missing_movie() {
        let service = service(catalog());

        let err = service.delete_movie("Alien").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(service.backend().write_count(), 0);
        assert_eq!(service.list_movies().unwrap(), catalog().movies);
    }

    #[test]
    fn test_delete_empty_title() {
        let err = service(catalog()).delete_movie("").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_update_rating_case_insensitive() {
        let service = service(catalog());

        let outcome = service.update_rating("inception", "9.0").unwrap();
        assert_eq!(
            outcome,
            UpdateOutcome::Updated {
                title: "Inception".to_string(),
                rating: Rating::from("9.0"),
            }
        );

        let movies = service.list_movies().unwrap();
        let mut expected = catalog().movies;
        expected[0].rating = Some(Rating::from("9.0"));
        assert_eq!(movies, expected);
    }

    #[test]
    fn test_update_rating_blank_cancels() {
        let service = service(catalog());

        let outcome = service.update_rating("Heat", "  ").unwrap();
        assert_eq!(outcome, UpdateOutcome::Cancelled { title: "Heat".to_string() });
        assert_eq!(service.backend().write_count(), 0);
    }

    #[test]
    fn test_update_rating_missing_movie() {
        let err = service(catalog()).update_rating("Alien", "5").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_sorted_by_rating() {
        let sorted = service(catalog()).sorted_by_rating().unwrap();
        let titles: Vec<_> = sorted.into_iter().map(|m| m.title).collect();
        assert_eq!(titles, ["Inception", "The Matrix", "Heat"]);
    }

    #[test]
    fn test_sorted_by_rating_two_records() {
        let service = service(Catalog::with_movies(vec![
            Movie::new("Low").with_rating("7.5"),
            Movie::new("High").with_rating("9.0"),
        ]));
        let titles: Vec<_> = service.sorted_by_rating().unwrap().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, ["High", "Low"]);
    }

    #[test]
    fn test_sorted_by_rating_empty_catalog() {
        let service = service(Catalog::new());
        let err = service.sorted_by_rating().unwrap_err();
        assert!(matches!(err, Error::EmptyCatalog));
        assert_eq!(service.backend().write_count(), 0);
    }

    #[test]
    fn test_sorted_by_rating_missing_and_invalid() {
        let service = service(Catalog::with_movies(vec![
            Movie::new("Rated").with_rating("7.5"),
            Movie::new("Unrated"),
        ]));
        assert!(matches!(service.sorted_by_rating().unwrap_err(), Error::MissingRating { ref title } if title == "Unrated"));

        let service = self::service(Catalog::with_movies(vec![Movie::new("Odd").with_rating("N/A")]));
        assert!(matches!(service.sorted_by_rating().unwrap_err(), Error::InvalidRating { .. }));
    }

    #[test]
    fn test_sort_is_stable() {
        let movies = vec![
            Movie::new("A").with_rating("8"),
            Movie::new("B").with_rating("9"),
            Movie::new("C").with_rating(8.0),
            Movie::new("D").with_rating("8.0"),
        ];
        let titles: Vec<_> = sort_by_rating(movies).unwrap().into_iter().map(|m| m.title).collect();
        assert_eq!(titles, ["B", "A", "C", "D"]);
    }

    #[test]
    fn test_search_first_match() {
        let service = service(catalog());
        assert_eq!(service.search("matri").unwrap().title, "The Matrix");
        // "ince" is too short; "incep" matches.
        assert_eq!(service.search("INCEP").unwrap().title, "Inception");
    }

    #[test]
    fn test_search_returns_only_first_of_many() {
        let service = service(Catalog::with_movies(vec![
            Movie::new("Alien"),
            Movie::new("Aliens"),
        ]));
        assert_eq!(service.search("alien").unwrap().title, "Alien");
    }

    #[test]
    fn test_search_not_found() {
        let err = service(catalog()).search("Godfather").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_search_short_query_does_not_touch_storage() {
        // A backend whose read always fails proves storage is never consulted.
        struct Unreadable;
        impl CatalogBackend for Unreadable {
            fn read(&self) -> Result<Catalog> {
                Err(Error::OperationFailed {
                    operation: "read_catalog".to_string(),
                    cause: "should not be called".to_string(),
                })
            }
            fn write(&self, _catalog: &Catalog) -> Result<()> {
                Ok(())
            }
        }

        let service = CatalogService::new(Unreadable, StubProvider::default());
        assert!(matches!(service.search("Heat").unwrap_err(), Error::InvalidInput(_)));
        assert!(matches!(service.search(" abcd ").unwrap_err(), Error::InvalidInput(_)));
        assert!(matches!(service.search("abcde").unwrap_err(), Error::OperationFailed { .. }));
    }

    #[test]
    fn test_status_and_random() {
        let service = service(catalog());
        assert_eq!(service.status().unwrap(), 3);

        let picked = service.random_movie().unwrap();
        assert!(catalog().movies.contains(&picked));

        let err = self::service(Catalog::new()).random_movie().unwrap_err();
        assert!(matches!(err, Error::EmptyCatalog));
    }

    #[test]
    fn test_generate_website() {
        let dir = tempfile::TempDir::new().unwrap();
        let template_path = dir.path().join("index_template.html");
        std::fs::write(&template_path, "<ol>__TEMPLATE_MOVIE_GRID__</ol>").unwrap();
        let generator = SiteGenerator::new(&template_path, dir.path().join("index.html"));

        let written = service(catalog()).generate_website(&generator).unwrap();
        assert_eq!(written, dir.path().join("index.html"));
        assert!(written.exists());
    }

    #[test]
    fn test_generate_website_without_movie_list() {
        let dir = tempfile::TempDir::new().unwrap();
        let template_path = dir.path().join("index_template.html");
        std::fs::write(&template_path, "<ol>__TEMPLATE_MOVIE_GRID__</ol>").unwrap();
        let generator = SiteGenerator::new(&template_path, dir.path().join("index.html"));

        let document: Catalog = serde_json::from_str(r#"{"owner": "sam"}"#).unwrap();
        let err = service(document).generate_website(&generator).unwrap_err();
        assert_eq!(err.to_string(), "No movie data found.");
        assert!(!generator.output_path().exists());
    }
}
