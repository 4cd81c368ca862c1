//! Test utilities and module declarations for storage tests.

use catalog_search_core::{
    LanguageCode, LanguageSet, NameChangeHook, NameChanges, ProductNames, SearchDocument,
};

use crate::MemoryStorage;

/// Composes documents over a fixed language list, like the service's cache builder.
pub struct ComposeHook(pub LanguageSet);

impl NameChangeHook for ComposeHook {
    fn on_name_changed(&self, names: &ProductNames) -> SearchDocument {
        SearchDocument::compose(names, &self.0)
    }
}

pub fn lang(code: &str) -> LanguageCode {
    LanguageCode::parse(code).unwrap()
}

pub fn english_french() -> ComposeHook {
    ComposeHook(LanguageSet::new([lang("en_US"), lang("fr_FR")], Some(lang("en_US"))))
}

pub fn names(pairs: &[(&str, &str)]) -> NameChanges {
    pairs.iter().map(|(code, name)| (lang(code), (*name).to_owned())).collect()
}

pub fn create_test_storage() -> MemoryStorage {
    MemoryStorage::new()
}
