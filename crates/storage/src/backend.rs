//! Unified storage backend with enum dispatch.

use async_trait::async_trait;
use catalog_search_core::{
    NameChangeHook, NameChanges, ProductId, ProductNames, RankedProduct, SearchDocument,
    SearchQuery,
};

use crate::error::StorageError;
use crate::traits::{ProductStore, SearchDocumentStore};

macro_rules! dispatch {
    ($self:expr, $trait:path, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StorageBackend::Memory(s) => <crate::MemoryStorage as $trait>::$method(s, $($arg),*).await,
            #[cfg(feature = "postgres")]
            StorageBackend::Postgres(s) => <crate::pg_storage::PgStorage as $trait>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    Memory(crate::MemoryStorage),
    #[cfg(feature = "postgres")]
    Postgres(crate::pg_storage::PgStorage),
}

impl StorageBackend {
    #[must_use]
    pub fn new_memory() -> Self {
        Self::Memory(crate::MemoryStorage::new())
    }

    #[cfg(feature = "postgres")]
    pub async fn new_postgres(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self::Postgres(crate::pg_storage::PgStorage::new(database_url).await?))
    }

    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => "postgres",
        }
    }
}

// ── ProductStore ─────────────────────────────────────────────────

#[async_trait]
impl ProductStore for StorageBackend {
    async fn create_product(
        &self,
        names: &NameChanges,
        hook: &dyn NameChangeHook,
    ) -> Result<SearchDocument, StorageError> {
        dispatch!(self, ProductStore, create_product(names, hook))
    }

    async fn update_names(
        &self,
        id: ProductId,
        changes: &NameChanges,
        hook: &dyn NameChangeHook,
    ) -> Result<SearchDocument, StorageError> {
        dispatch!(self, ProductStore, update_names(id, changes, hook))
    }

    async fn refresh_document(
        &self,
        id: ProductId,
        hook: &dyn NameChangeHook,
    ) -> Result<Option<SearchDocument>, StorageError> {
        dispatch!(self, ProductStore, refresh_document(id, hook))
    }

    async fn get_product_names(&self, id: ProductId) -> Result<Option<ProductNames>, StorageError> {
        dispatch!(self, ProductStore, get_product_names(id))
    }

    async fn list_product_ids(
        &self,
        after: Option<ProductId>,
        limit: usize,
    ) -> Result<Vec<ProductId>, StorageError> {
        dispatch!(self, ProductStore, list_product_ids(after, limit))
    }

    async fn delete_product(&self, id: ProductId) -> Result<bool, StorageError> {
        dispatch!(self, ProductStore, delete_product(id))
    }
}

// ── SearchDocumentStore ──────────────────────────────────────────

#[async_trait]
impl SearchDocumentStore for StorageBackend {
    async fn get_document(&self, id: ProductId) -> Result<Option<SearchDocument>, StorageError> {
        dispatch!(self, SearchDocumentStore, get_document(id))
    }

    async fn rank_documents(
        &self,
        query: &SearchQuery,
        limit: usize,
    ) -> Result<Vec<RankedProduct>, StorageError> {
        dispatch!(self, SearchDocumentStore, rank_documents(query, limit))
    }

    async fn count_documents(&self) -> Result<usize, StorageError> {
        dispatch!(self, SearchDocumentStore, count_documents())
    }
}
