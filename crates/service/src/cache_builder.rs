use std::sync::Arc;

use catalog_search_core::{
    LanguageSet, NameChangeHook, ProductId, ProductNames, SearchConfig, SearchDocument,
};
use catalog_search_storage::traits::ProductStore;
use catalog_search_storage::StorageBackend;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::ServiceError;

/// Keeps every product's search document consistent with its names.
///
/// Registered with storage as the [`NameChangeHook`] for every name write,
/// and drives the batch rebuild that repairs documents written around the
/// normal write path.
pub struct CacheBuilder {
    storage: Arc<StorageBackend>,
    languages: LanguageSet,
    batch_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RebuildFailure {
    pub product_id: ProductId,
    pub error: String,
}

/// Outcome of one batch rebuild pass.
#[derive(Debug, Clone, Serialize)]
pub struct RebuildReport {
    pub run_id: String,
    pub scanned: usize,
    pub rebuilt: usize,
    /// Listed, then deleted before its turn came.
    pub missing: usize,
    pub failed: Vec<RebuildFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl RebuildReport {
    fn start() -> Self {
        Self {
            run_id: uuid::Uuid::new_v4().to_string(),
            scanned: 0,
            rebuilt: 0,
            missing: 0,
            failed: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

impl NameChangeHook for CacheBuilder {
    fn on_name_changed(&self, names: &ProductNames) -> SearchDocument {
        SearchDocument::compose(names, &self.languages)
    }
}

impl CacheBuilder {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>, config: &SearchConfig) -> Self {
        Self { storage, languages: config.languages.clone(), batch_size: config.batch_size.max(1) }
    }

    #[must_use]
    pub fn languages(&self) -> &LanguageSet {
        &self.languages
    }

    /// Recomputes and persists one product's document. `None` when the
    /// product does not exist.
    pub async fn rebuild(&self, id: ProductId) -> Result<Option<SearchDocument>, ServiceError> {
        let document = self.storage.refresh_document(id, self).await?;
        tracing::debug!(product_id = %id, found = document.is_some(), "search document rebuilt");
        Ok(document)
    }

    /// Rebuilds up to `limit` products with ids after `after`, recording the
    /// outcome in `report`. Returns the cursor for the next chunk, or `None`
    /// once every product has been visited.
    pub async fn rebuild_chunk(
        &self,
        after: Option<ProductId>,
        limit: usize,
        report: &mut RebuildReport,
    ) -> Result<Option<ProductId>, ServiceError> {
        self.rebuild_chunk_in(&*self.storage, after, limit, report).await
    }

    async fn rebuild_chunk_in(
        &self,
        store: &dyn ProductStore,
        after: Option<ProductId>,
        limit: usize,
        report: &mut RebuildReport,
    ) -> Result<Option<ProductId>, ServiceError> {
        let ids = store.list_product_ids(after, limit).await?;
        let Some(last) = ids.last().copied() else {
            return Ok(None);
        };
        for id in ids {
            report.scanned += 1;
            match store.refresh_document(id, self).await {
                Ok(Some(_)) => report.rebuilt += 1,
                Ok(None) => report.missing += 1,
                Err(err) => {
                    tracing::warn!(run_id = %report.run_id, product_id = %id, "rebuild failed: {err}");
                    report.failed.push(RebuildFailure { product_id: id, error: err.to_string() });
                },
            }
        }
        Ok(Some(last))
    }

    /// Rebuilds every product in chunks of the configured batch size.
    pub async fn rebuild_all(&self) -> Result<RebuildReport, ServiceError> {
        self.rebuild_all_with_batch_size(self.batch_size).await
    }

    /// Each product is rebuilt in its own short transaction, so an
    /// interrupted run leaves only complete documents behind and a rerun
    /// converges on the same state.
    pub async fn rebuild_all_with_batch_size(
        &self,
        batch_size: usize,
    ) -> Result<RebuildReport, ServiceError> {
        let batch_size = batch_size.max(1);
        let mut report = RebuildReport::start();
        tracing::info!(run_id = %report.run_id, batch_size, "batch rebuild started");
        let mut cursor = None;
        while let Some(next) = self.rebuild_chunk(cursor, batch_size, &mut report).await? {
            cursor = Some(next);
        }
        report.finished_at = Some(Utc::now());
        tracing::info!(
            run_id = %report.run_id,
            scanned = report.scanned,
            rebuilt = report.rebuilt,
            missing = report.missing,
            failed = report.failed.len(),
            "batch rebuild finished"
        );
        Ok(report)
    }
}
