//! Storage layer for catalog-search
//!
//! Persists products' translatable names and their search documents, and
//! answers ranked lookups. PostgreSQL uses `pg_trgm` for the substring
//! filter and `ts_rank` for relevance; the in-process backend substitutes a
//! trigram inverted index and term-frequency ranking.

mod backend;
pub mod error;
mod memory;
#[cfg(feature = "postgres")]
mod pg_migrations;
#[cfg(feature = "postgres")]
mod pg_storage;
#[cfg(test)]
mod tests;
pub mod traits;

pub use backend::StorageBackend;
pub use error::StorageError;
pub use memory::MemoryStorage;
#[cfg(feature = "postgres")]
pub use pg_migrations::run_pg_migrations;
#[cfg(feature = "postgres")]
pub use pg_storage::PgStorage;
pub use traits::{ProductStore, SearchDocumentStore};
