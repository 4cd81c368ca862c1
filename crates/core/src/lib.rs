//! Core types for catalog-search
//!
//! Domain types shared by the storage, service and CLI crates: product
//! identifiers, language configuration, the per-product search document and
//! normalized search queries.

mod config;
mod constants;
mod document;
mod env_config;
mod error;
mod hook;
mod product;
mod query;

pub use config::*;
pub use constants::*;
pub use document::*;
pub use env_config::*;
pub use error::*;
pub use hook::*;
pub use product::*;
pub use query::*;
