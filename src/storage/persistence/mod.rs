//! Catalog backend implementations.

mod json_file;
mod memory;

pub use json_file::JsonFileBackend;
pub use memory::InMemoryBackend;
