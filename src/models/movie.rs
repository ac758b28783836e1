//! Movie records and the catalog document.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Label used when a movie has no year.
pub const UNKNOWN_YEAR: &str = "Unknown Year";

/// Name of the top-level key holding the movie list.
const MOVIES_KEY: &str = "movies";

/// Release year of a movie.
///
/// OMDb reports years as strings (`"2010"`, `"2008–2013"`), while hand-edited
/// catalogs often use plain integers. Both forms are kept as read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    /// A numeric year.
    Number(i64),
    /// A free-form year string.
    Text(String),
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Year {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Year {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Rating of a movie on a 0-10 scale.
///
/// Stored either as a JSON number or as the string entered by the user or
/// returned by OMDb. Serialization keeps whichever form was stored, and a
/// stored integer stays an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Rating {
    /// A numeric rating.
    Number(Number),
    /// A rating kept as text (`"8.8"`, or `"N/A"` from OMDb).
    Text(String),
}

impl Rating {
    /// Returns the numeric value, if the rating is a finite number.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => n.as_f64()?,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Rating {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or_else(|| Self::Text(n.to_string()), Self::Number)
    }
}

impl From<i64> for Rating {
    fn from(n: i64) -> Self {
        Self::Number(Number::from(n))
    }
}

impl From<&str> for Rating {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Rating {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// A single movie record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Title, the intended unique key.
    pub title: String,
    /// Release year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Year>,
    /// Rating on a 0-10 scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
    /// Poster image URL.
    #[serde(default)]
    pub poster: String,
    /// Comma-separated list of lead actors.
    #[serde(default)]
    pub actors: String,
    /// IMDb identifier (`tt1375666`), used for links on the generated site.
    #[serde(rename = "imdbID", default, skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>,
    /// Any other keys found in the stored record.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Movie {
    /// Creates a movie with only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: None,
            rating: None,
            poster: String::new(),
            actors: String::new(),
            imdb_id: None,
            extra: Map::new(),
        }
    }

    /// Sets the year.
    #[must_use]
    pub fn with_year(mut self, year: impl Into<Year>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Sets the rating.
    #[must_use]
    pub fn with_rating(mut self, rating: impl Into<Rating>) -> Self {
        self.rating = Some(rating.into());
        self
    }

    /// Sets the poster URL.
    #[must_use]
    pub fn with_poster(mut self, poster: impl Into<String>) -> Self {
        self.poster = poster.into();
        self
    }

    /// Sets the actors.
    #[must_use]
    pub fn with_actors(mut self, actors: impl Into<String>) -> Self {
        self.actors = actors.into();
        self
    }

    /// Sets the IMDb identifier.
    #[must_use]
    pub fn with_imdb_id(mut self, imdb_id: impl Into<String>) -> Self {
        self.imdb_id = Some(imdb_id.into());
        self
    }

    /// Returns the year for display, or [`UNKNOWN_YEAR`].
    #[must_use]
    pub fn year_label(&self) -> String {
        self.year
            .as_ref()
            .map_or_else(|| UNKNOWN_YEAR.to_string(), ToString::to_string)
    }

    /// Returns the rating for display, or `N/A`.
    #[must_use]
    pub fn rating_label(&self) -> String {
        self.rating
            .as_ref()
            .map_or_else(|| "N/A".to_string(), ToString::to_string)
    }

    /// Returns the numeric rating.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingRating`] if there is no rating, or
    /// [`Error::InvalidRating`] if it is not a finite number.
    pub fn numeric_rating(&self) -> Result<f64> {
        let rating = self.rating.as_ref().ok_or_else(|| Error::MissingRating {
            title: self.title.clone(),
        })?;
        rating.value().ok_or_else(|| Error::InvalidRating {
            title: self.title.clone(),
            value: rating.to_string(),
        })
    }

    /// Case-insensitive title comparison.
    #[must_use]
    pub fn title_matches(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }
}

/// The catalog document: `{"movies": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredCatalog")]
pub struct Catalog {
    /// Movies in stored order.
    pub movies: Vec<Movie>,
    /// Any other top-level keys found in the document.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Set when a read document had no `movies` key.
    #[serde(skip)]
    movies_key_missing: bool,
}

/// Catalog document as read, before the movie list is defaulted.
#[derive(Deserialize)]
struct StoredCatalog {
    #[serde(default)]
    movies: Option<Vec<Movie>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<StoredCatalog> for Catalog {
    fn from(stored: StoredCatalog) -> Self {
        Self {
            movies_key_missing: stored.movies.is_none(),
            movies: stored.movies.unwrap_or_default(),
            extra: stored.extra,
        }
    }
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog from a list of movies.
    #[must_use]
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self {
            movies,
            ..Self::default()
        }
    }

    /// Whether the document carries a `movies` key.
    ///
    /// Only a read document can lack one; catalogs built in memory and every
    /// written document always have it.
    #[must_use]
    pub const fn has_movies_key(&self) -> bool {
        !self.movies_key_missing
    }

    /// Number of movies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Whether the catalog has no movies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Finds a movie by case-insensitive exact title.
    #[must_use]
    pub fn find_ignore_case(&self, title: &str) -> Option<&Movie> {
        self.movies.iter().find(|m| m.title_matches(title))
    }

    /// Position of the first movie whose title is exactly `title`.
    #[must_use]
    pub fn position_exact(&self, title: &str) -> Option<usize> {
        self.movies.iter().position(|m| m.title == title)
    }

    /// Whether `key` is a top-level key of the stored document.
    ///
    #[must_use]
    pub fn has_top_level_key(&self, key: &str) -> bool {
        (key == MOVIES_KEY && self.has_movies_key()) || self.extra.contains_key(key)
    }
}
