//! Storage backend trait abstraction
//!
//! Async domain traits implemented by both backends and dispatched through
//! [`crate::StorageBackend`].

use async_trait::async_trait;
use catalog_search_core::{
    NameChangeHook, NameChanges, ProductId, ProductNames, RankedProduct, SearchDocument,
    SearchQuery,
};

use crate::error::StorageError;

/// Product names and every write that changes them.
///
/// Each name-writing method runs `hook` inside its transaction and persists
/// the returned document before committing.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a product with its initial translations and its document.
    async fn create_product(
        &self,
        names: &NameChanges,
        hook: &dyn NameChangeHook,
    ) -> Result<SearchDocument, StorageError>;

    /// Merge `changes` into the stored translations. Fails with `NotFound`
    /// for an unknown product.
    async fn update_names(
        &self,
        id: ProductId,
        changes: &NameChanges,
        hook: &dyn NameChangeHook,
    ) -> Result<SearchDocument, StorageError>;

    /// Recompute one product's document from its locked live names.
    /// `None` when the product does not exist.
    async fn refresh_document(
        &self,
        id: ProductId,
        hook: &dyn NameChangeHook,
    ) -> Result<Option<SearchDocument>, StorageError>;

    async fn get_product_names(&self, id: ProductId) -> Result<Option<ProductNames>, StorageError>;

    /// Product ids strictly greater than `after`, ascending.
    async fn list_product_ids(
        &self,
        after: Option<ProductId>,
        limit: usize,
    ) -> Result<Vec<ProductId>, StorageError>;

    /// Delete a product and, by cascade, its document. Returns `true` if a row was deleted.
    async fn delete_product(&self, id: ProductId) -> Result<bool, StorageError>;
}

/// Search documents and ranked lookups over them.
#[async_trait]
pub trait SearchDocumentStore: Send + Sync {
    async fn get_document(&self, id: ProductId) -> Result<Option<SearchDocument>, StorageError>;

    /// Products whose `combined_text_lower` contains the query text, ranked
    /// by relevance of `search_tokens` to the query keywords, at most `limit`.
    async fn rank_documents(
        &self,
        query: &SearchQuery,
        limit: usize,
    ) -> Result<Vec<RankedProduct>, StorageError>;

    async fn count_documents(&self) -> Result<usize, StorageError>;
}
