use std::sync::Arc;

use catalog_search_core::{LanguageCode, LanguageSet, NameChanges, SearchConfig};
use catalog_search_storage::StorageBackend;

use crate::{CacheBuilder, ProductService, SearchRouter};

pub(crate) fn lang(code: &str) -> LanguageCode {
    LanguageCode::parse(code).unwrap()
}

pub(crate) fn names(pairs: &[(&str, &str)]) -> NameChanges {
    pairs.iter().map(|(code, name)| (lang(code), (*name).to_owned())).collect()
}

pub(crate) fn test_config() -> SearchConfig {
    SearchConfig { batch_size: 2, ..SearchConfig::default() }.with_languages(LanguageSet::new(
        [lang("en_US"), lang("fr_FR"), lang("bn_BD")],
        Some(lang("en_US")),
    ))
}

pub(crate) struct Harness {
    pub storage: Arc<StorageBackend>,
    pub builder: Arc<CacheBuilder>,
    pub products: ProductService,
    pub router: SearchRouter,
}

pub(crate) fn harness() -> Harness {
    let config = test_config();
    let storage = Arc::new(StorageBackend::new_memory());
    let builder = Arc::new(CacheBuilder::new(storage.clone(), &config));
    let products = ProductService::new(storage.clone(), builder.clone());
    let router = SearchRouter::new(storage.clone(), &config);
    Harness { storage, builder, products, router }
}
