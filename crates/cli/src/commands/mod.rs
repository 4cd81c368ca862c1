pub(crate) mod migrate;
pub(crate) mod products;
pub(crate) mod rebuild;
pub(crate) mod search;

use std::sync::Arc;

use anyhow::Result;
use catalog_search_core::{SearchConfig, env_string};
use catalog_search_service::{CacheBuilder, ProductService, SearchRouter};
use catalog_search_storage::StorageBackend;

pub(crate) const DATABASE_URL: &str = "DATABASE_URL";

pub(crate) fn database_url() -> Result<String> {
    env_string(DATABASE_URL)
        .ok_or_else(|| anyhow::anyhow!("{DATABASE_URL} environment variable must be set"))
}

/// Storage plus the services every command builds on.
pub(crate) struct Context {
    pub config: SearchConfig,
    pub storage: Arc<StorageBackend>,
    pub builder: Arc<CacheBuilder>,
}

impl Context {
    pub(crate) async fn connect(config: SearchConfig) -> Result<Self> {
        let storage = Arc::new(StorageBackend::new_postgres(&database_url()?).await?);
        let builder = Arc::new(CacheBuilder::new(Arc::clone(&storage), &config));
        tracing::debug!(backend = storage.kind(), languages = config.languages.len(), "connected");
        Ok(Self { config, storage, builder })
    }

    pub(crate) fn products(&self) -> ProductService {
        ProductService::new(Arc::clone(&self.storage), Arc::clone(&self.builder))
    }

    pub(crate) fn router(&self) -> SearchRouter {
        SearchRouter::new(Arc::clone(&self.storage), &self.config)
    }
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
