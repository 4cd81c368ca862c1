use std::sync::Arc;

use catalog_search_core::{NameChanges, ProductId, ProductNames, SearchDocument};
use catalog_search_storage::StorageBackend;
use catalog_search_storage::traits::{ProductStore, SearchDocumentStore};

use crate::{CacheBuilder, ServiceError};

/// Write path for product names.
///
/// Every write hands the [`CacheBuilder`] to storage as the name-change hook,
/// so the search document is recomputed before the write commits.
pub struct ProductService {
    storage: Arc<StorageBackend>,
    builder: Arc<CacheBuilder>,
}

impl ProductService {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>, builder: Arc<CacheBuilder>) -> Self {
        Self { storage, builder }
    }

    pub async fn create_product(&self, names: &NameChanges) -> Result<SearchDocument, ServiceError> {
        if names.is_empty() {
            return Err(ServiceError::InvalidInput(
                "a product needs a name in at least one language".to_owned(),
            ));
        }
        let document = self.storage.create_product(names, &*self.builder).await?;
        tracing::info!(product_id = %document.product_id, "product created");
        Ok(document)
    }

    pub async fn rename(
        &self,
        id: ProductId,
        changes: &NameChanges,
    ) -> Result<SearchDocument, ServiceError> {
        if changes.is_empty() {
            return Err(ServiceError::InvalidInput("no name changes given".to_owned()));
        }
        let document = self.storage.update_names(id, changes, &*self.builder).await?;
        tracing::info!(product_id = %id, languages = changes.len(), "product renamed");
        Ok(document)
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<bool, ServiceError> {
        let deleted = self.storage.delete_product(id).await?;
        if deleted {
            tracing::info!(product_id = %id, "product deleted");
        }
        Ok(deleted)
    }

    pub async fn get_names(&self, id: ProductId) -> Result<Option<ProductNames>, ServiceError> {
        Ok(self.storage.get_product_names(id).await?)
    }

    pub async fn get_document(&self, id: ProductId) -> Result<Option<SearchDocument>, ServiceError> {
        Ok(self.storage.get_document(id).await?)
    }
}
