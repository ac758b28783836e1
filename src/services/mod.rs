//! Business logic services.
//!
//! Services orchestrate storage backends and provide high-level operations.

mod catalog;

pub use catalog::{CatalogService, MIN_SEARCH_LENGTH, UpdateOutcome, sort_by_rating};
