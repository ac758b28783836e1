//! Storage layer abstraction.
//!
//! The catalog store owns one JSON document. Backends implement
//! [`CatalogBackend`]:
//! - [`JsonFileBackend`]: the document on disk at an injected path
//! - [`InMemoryBackend`]: the document in memory, for tests

pub mod persistence;
pub mod traits;

pub use persistence::{InMemoryBackend, JsonFileBackend};
pub use traits::CatalogBackend;
