use std::sync::Arc;

use catalog_search_core::{
    MAX_RESULT_CAP, ProductId, RankedProduct, SearchConfig, SearchFilters, SearchQuery,
    SearchRequest,
};
use catalog_search_storage::StorageBackend;
use catalog_search_storage::traits::SearchDocumentStore;

use crate::ServiceError;

/// What the storefront should show for a search request.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchDomain<D> {
    /// No free-text query: the host's own domain, untouched.
    Default(D),
    /// Only these products, most relevant first. Empty means no results.
    Ranked(Vec<RankedProduct>),
}

impl<D> SearchDomain<D> {
    /// Ranked product ids in relevance order; `None` for the default domain.
    #[must_use]
    pub fn product_ids(&self) -> Option<Vec<ProductId>> {
        match self {
            Self::Default(_) => None,
            Self::Ranked(ranked) => Some(ranked.iter().map(|r| r.product_id).collect()),
        }
    }

    /// Membership test for hosts that ignore ordering. `None` for the
    /// default domain, which this router does not interpret.
    #[must_use]
    pub fn restricts(&self, id: ProductId) -> Option<bool> {
        match self {
            Self::Default(_) => None,
            Self::Ranked(ranked) => Some(ranked.iter().any(|r| r.product_id == id)),
        }
    }

    #[must_use]
    pub fn into_default(self) -> Option<D> {
        match self {
            Self::Default(domain) => Some(domain),
            Self::Ranked(_) => None,
        }
    }
}

/// Routes storefront searches to the ranked search documents.
pub struct SearchRouter {
    storage: Arc<StorageBackend>,
    result_cap: usize,
}

impl SearchRouter {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>, config: &SearchConfig) -> Self {
        Self { storage, result_cap: config.result_cap.clamp(1, MAX_RESULT_CAP) }
    }

    /// Resolves a search request.
    ///
    /// A blank or missing query returns `default_domain(&request.filters)`
    /// unchanged. Any other query returns the ranked substring matches,
    /// capped at the configured result size; zero matches is a final answer.
    pub async fn resolve<D, F>(
        &self,
        request: &SearchRequest,
        default_domain: F,
    ) -> Result<SearchDomain<D>, ServiceError>
    where
        F: FnOnce(&SearchFilters) -> D,
    {
        let Some(query) = request.query.as_deref().and_then(SearchQuery::parse) else {
            return Ok(SearchDomain::Default(default_domain(&request.filters)));
        };
        Ok(SearchDomain::Ranked(self.rank(&query).await?))
    }

    /// Ranked matches for free text; blank text matches nothing.
    pub async fn search(&self, text: &str) -> Result<Vec<RankedProduct>, ServiceError> {
        match SearchQuery::parse(text) {
            Some(query) => self.rank(&query).await,
            None => Ok(Vec::new()),
        }
    }

    async fn rank(&self, query: &SearchQuery) -> Result<Vec<RankedProduct>, ServiceError> {
        let ranked = self.storage.rank_documents(query, self.result_cap).await?;
        tracing::debug!(query = %query.text(), results = ranked.len(), "ranked search");
        if ranked.len() >= self.result_cap {
            tracing::debug!(query = %query.text(), cap = self.result_cap, "result cap reached");
        }
        Ok(ranked)
    }
}
