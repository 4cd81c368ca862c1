//! The precomputed per-product search document.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::{LanguageSet, LocalizedName, ProductId};

/// Multilingual search representation of one product.
///
/// The three text fields are only ever produced together by
/// [`SearchDocument::compose`] (or [`SearchDocument::from_combined`]), so
/// `combined_text_lower` always equals `combined_text.to_lowercase()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchDocument {
    pub product_id: ProductId,
    /// Every distinct non-blank name, in language order, joined by single spaces.
    pub combined_text: String,
    pub combined_text_lower: String,
    /// `combined_text` with whitespace runs collapsed, fed to the full-text vector.
    pub search_tokens: String,
}

impl SearchDocument {
    /// Resolves the product's name in every configured language and builds
    /// the document. A language whose name cannot be resolved contributes
    /// nothing; it never fails the whole document.
    pub fn compose<P: LocalizedName + ?Sized>(product: &P, languages: &LanguageSet) -> Self {
        let product_id = product.product_id();
        let mut names: Vec<String> = Vec::with_capacity(languages.len());
        for language in languages.iter() {
            let resolved = match product.name_in(language, languages.fallback()) {
                Ok(name) => name,
                Err(err) => {
                    tracing::warn!(product_id = %product_id, language = %language, "{err}");
                    continue;
                },
            };
            let name: String = resolved.trim().nfc().collect();
            if name.is_empty() || names.contains(&name) {
                continue;
            }
            names.push(name);
        }
        Self::from_combined(product_id, names.join(" "))
    }

    /// Derives the lowercase and tokenized forms from already combined text.
    #[must_use]
    pub fn from_combined(product_id: ProductId, combined_text: String) -> Self {
        let combined_text_lower = combined_text.to_lowercase();
        let search_tokens = collapse_whitespace(&combined_text);
        Self { product_id, combined_text, combined_text_lower, search_tokens }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.combined_text.is_empty()
    }
}

/// Collapses every whitespace run into a single ASCII space and trims the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CoreError, LanguageCode, ProductNames};

    fn lang(code: &str) -> LanguageCode {
        LanguageCode::parse(code).unwrap()
    }

    fn languages(codes: &[&str]) -> LanguageSet {
        LanguageSet::new(codes.iter().map(|c| lang(c)), Some(lang("en_US")))
    }

    fn product(id: i64) -> ProductNames {
        ProductNames::new(ProductId::new(id).unwrap())
    }

    #[test]
    fn test_combines_names_in_language_order() {
        let names = product(1)
            .with_name(&lang("en_US"), "Blue Shirt")
            .with_name(&lang("fr_FR"), "Chemise Bleue");
        let doc = SearchDocument::compose(&names, &languages(&["en_US", "fr_FR"]));
        assert_eq!(doc.combined_text, "Blue Shirt Chemise Bleue");
        assert_eq!(doc.combined_text_lower, "blue shirt chemise bleue");
        assert_eq!(doc.search_tokens, "Blue Shirt Chemise Bleue");
    }

    #[test]
    fn test_identical_translations_appear_once() {
        let names = product(1).with_name(&lang("en_US"), "Lampe").with_name(&lang("fr_FR"), "Lampe");
        let doc = SearchDocument::compose(&names, &languages(&["en_US", "fr_FR"]));
        assert_eq!(doc.combined_text, "Lampe");
    }

    #[test]
    fn test_untranslated_fallback_is_deduplicated() {
        let names = product(1).with_name(&lang("en_US"), "Desk");
        let doc = SearchDocument::compose(&names, &languages(&["en_US", "bn_BD", "fr_FR"]));
        assert_eq!(doc.combined_text, "Desk");
    }

    #[test]
    fn test_blank_names_are_discarded_and_trimmed() {
        let names = product(1)
            .with_name(&lang("en_US"), "  Chair ")
            .with_name(&lang("fr_FR"), "   ")
            .with_name(&lang("bn_BD"), "কলম");
        let doc = SearchDocument::compose(&names, &languages(&["en_US", "fr_FR", "bn_BD"]));
        assert_eq!(doc.combined_text, "Chair কলম");
    }

    #[test]
    fn test_trimmed_duplicates_collapse() {
        let names = product(1).with_name(&lang("en_US"), "Lampe").with_name(&lang("fr_FR"), " Lampe  ");
        let doc = SearchDocument::compose(&names, &languages(&["en_US", "fr_FR"]));
        assert_eq!(doc.combined_text, "Lampe");
    }

    #[test]
    fn test_no_names_gives_empty_document() {
        let doc = SearchDocument::compose(&product(9), &languages(&["en_US", "fr_FR"]));
        assert!(doc.is_empty());
        assert_eq!(doc.product_id.get(), 9);
        assert_eq!(doc.combined_text_lower, "");
        assert_eq!(doc.search_tokens, "");
    }

    #[test]
    fn test_inner_whitespace_runs_collapse_in_tokens_only() {
        let names = product(1).with_name(&lang("en_US"), "Blue \t Shirt");
        let doc = SearchDocument::compose(&names, &languages(&["en_US"]));
        assert_eq!(doc.combined_text, "Blue \t Shirt");
        assert_eq!(doc.search_tokens, "Blue Shirt");
    }

    #[test]
    fn test_lowercase_invariant_holds_for_non_ascii() {
        let names = product(1)
            .with_name(&lang("en_US"), "STRASSE")
            .with_name(&lang("de_DE"), "Größe ÄRMEL")
            .with_name(&lang("tr_TR"), "İSTANBUL");
        let doc = SearchDocument::compose(&names, &languages(&["en_US", "de_DE", "tr_TR"]));
        assert_eq!(doc.combined_text_lower, doc.combined_text.to_lowercase());
    }

    #[test]
    fn test_compose_is_deterministic() {
        let names = product(4)
            .with_name(&lang("en_US"), "Table")
            .with_name(&lang("fr_FR"), "Table basse")
            .with_name(&lang("bn_BD"), "টেবিল");
        let set = languages(&["en_US", "fr_FR", "bn_BD"]);
        assert_eq!(SearchDocument::compose(&names, &set), SearchDocument::compose(&names, &set));
    }

    #[test]
    fn test_failing_language_is_skipped() {
        struct Flaky;

        impl LocalizedName for Flaky {
            fn product_id(&self) -> ProductId {
                ProductId::new(5).unwrap()
            }

            fn name_in(&self, language: &LanguageCode, _: Option<&LanguageCode>) -> crate::Result<String> {
                if language.as_str() == "fr_FR" {
                    return Err(CoreError::NameResolution {
                        language: language.to_string(),
                        reason: "translation table unavailable".to_owned(),
                    });
                }
                Ok(format!("Name {language}"))
            }
        }

        let doc = SearchDocument::compose(&Flaky, &languages(&["en_US", "fr_FR", "bn_BD"]));
        assert_eq!(doc.combined_text, "Name en_US Name bn_BD");
    }

    #[test]
    fn test_names_are_nfc_normalized() {
        let decomposed = "Cafe\u{301}";
        let names = product(1).with_name(&lang("en_US"), decomposed).with_name(&lang("fr_FR"), "Caf\u{e9}");
        let doc = SearchDocument::compose(&names, &languages(&["en_US", "fr_FR"]));
        assert_eq!(doc.combined_text, "Caf\u{e9}");
    }
}
