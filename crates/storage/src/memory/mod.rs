//! In-process storage backend.
//!
//! Stands in for PostgreSQL where no text-search extension is available and
//! backs the unit tests. A single `RwLock` serializes writers, so every
//! name write and its document update are applied atomically.

mod rank;
mod trigram;

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use catalog_search_core::{
    NameChangeHook, NameChanges, ProductId, ProductNames, RankedProduct, SearchDocument,
    SearchQuery, sort_by_rank_descending,
};
use tokio::sync::RwLock;

use self::rank::term_frequency_rank;
use self::trigram::TrigramIndex;
use crate::error::StorageError;
use crate::traits::{ProductStore, SearchDocumentStore};

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    state: Arc<RwLock<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    last_id: i64,
    products: BTreeMap<ProductId, ProductNames>,
    documents: BTreeMap<ProductId, SearchDocument>,
    trigrams: TrigramIndex,
}

impl MemoryState {
    fn put_document(&mut self, document: SearchDocument) {
        self.trigrams.insert(document.product_id, &document.combined_text_lower);
        self.documents.insert(document.product_id, document);
    }

    fn remove_product(&mut self, id: ProductId) -> bool {
        self.trigrams.remove(id);
        self.documents.remove(&id);
        self.products.remove(&id).is_some()
    }
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryStorage {
    async fn create_product(
        &self,
        names: &NameChanges,
        hook: &dyn NameChangeHook,
    ) -> Result<SearchDocument, StorageError> {
        let mut state = self.state.write().await;
        let id = ProductId::new(state.last_id.saturating_add(1))?;
        state.last_id = id.get();
        let mut product = ProductNames::new(id);
        product.merge(names);
        let document = hook.on_name_changed(&product);
        state.products.insert(id, product);
        state.put_document(document.clone());
        Ok(document)
    }

    async fn update_names(
        &self,
        id: ProductId,
        changes: &NameChanges,
        hook: &dyn NameChangeHook,
    ) -> Result<SearchDocument, StorageError> {
        let mut state = self.state.write().await;
        let Some(product) = state.products.get_mut(&id) else {
            return Err(StorageError::product_not_found(id));
        };
        product.merge(changes);
        let document = hook.on_name_changed(product);
        state.put_document(document.clone());
        Ok(document)
    }

    async fn refresh_document(
        &self,
        id: ProductId,
        hook: &dyn NameChangeHook,
    ) -> Result<Option<SearchDocument>, StorageError> {
        let mut state = self.state.write().await;
        let Some(product) = state.products.get(&id) else {
            return Ok(None);
        };
        let document = hook.on_name_changed(product);
        state.put_document(document.clone());
        Ok(Some(document))
    }

    async fn get_product_names(&self, id: ProductId) -> Result<Option<ProductNames>, StorageError> {
        Ok(self.state.read().await.products.get(&id).cloned())
    }

    async fn list_product_ids(
        &self,
        after: Option<ProductId>,
        limit: usize,
    ) -> Result<Vec<ProductId>, StorageError> {
        let lower = after.map_or(Bound::Unbounded, Bound::Excluded);
        let state = self.state.read().await;
        Ok(state.products.range((lower, Bound::Unbounded)).map(|(id, _)| *id).take(limit).collect())
    }

    async fn delete_product(&self, id: ProductId) -> Result<bool, StorageError> {
        Ok(self.state.write().await.remove_product(id))
    }
}

#[async_trait]
impl SearchDocumentStore for MemoryStorage {
    async fn get_document(&self, id: ProductId) -> Result<Option<SearchDocument>, StorageError> {
        Ok(self.state.read().await.documents.get(&id).cloned())
    }

    async fn rank_documents(
        &self,
        query: &SearchQuery,
        limit: usize,
    ) -> Result<Vec<RankedProduct>, StorageError> {
        let state = self.state.read().await;
        let text = query.text();
        let rank = |document: &SearchDocument| RankedProduct {
            product_id: document.product_id,
            rank: term_frequency_rank(&document.search_tokens, query.keywords()),
        };
        let mut results: Vec<RankedProduct> = match state.trigrams.candidates(text) {
            Some(ids) => ids
                .iter()
                .filter_map(|id| state.documents.get(id))
                .filter(|document| document.combined_text_lower.contains(text))
                .map(rank)
                .collect(),
            None => state
                .documents
                .values()
                .filter(|document| document.combined_text_lower.contains(text))
                .map(rank)
                .collect(),
        };
        sort_by_rank_descending(&mut results);
        results.truncate(limit);
        Ok(results)
    }

    async fn count_documents(&self) -> Result<usize, StorageError> {
        Ok(self.state.read().await.documents.len())
    }
}
