//! Data models for moviedb.
//!
//! The catalog is a single JSON document holding an ordered list of movies.

mod movie;

pub use movie::{Catalog, Movie, Rating, UNKNOWN_YEAR, Year};
