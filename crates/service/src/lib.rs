//! Service layer for catalog-search
//!
//! Keeps search documents in step with product names and turns storefront
//! queries into ranked product restrictions.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod cache_builder;
mod error;
mod product_service;
mod scheduler;
mod search_router;
#[cfg(test)]
mod test_support;

pub use cache_builder::{CacheBuilder, RebuildFailure, RebuildReport};
pub use error::ServiceError;
pub use product_service::ProductService;
pub use scheduler::RebuildScheduler;
pub use search_router::{SearchDomain, SearchRouter};
