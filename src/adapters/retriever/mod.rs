//! Candidate retriever adapters.

mod in_memory;

pub use in_memory::{CatalogLoadError, CatalogProgram, InMemoryCatalog};
