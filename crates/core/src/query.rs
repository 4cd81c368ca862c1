//! Free-text query normalization and ranked results.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::ProductId;

/// A non-blank storefront query, lowercased and split into keywords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    keywords: Vec<String>,
}

impl SearchQuery {
    /// Returns `None` for empty or whitespace-only input: there is no
    /// free-text filter in that case. The text is NFC-normalized like the
    /// names in a search document.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let text = trimmed.nfc().collect::<String>().to_lowercase();
        let keywords = text.split_whitespace().map(str::to_owned).collect();
        Some(Self { text, keywords })
    }

    /// Lowercased query matched as a substring of `combined_text_lower`.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// `LIKE` pattern matching the query anywhere, with wildcards escaped.
    #[must_use]
    pub fn like_pattern(&self) -> String {
        format!("%{}%", escape_like(&self.text))
    }
}

/// Escapes `\`, `%` and `_` for a `LIKE ... ESCAPE '\'` pattern.
#[must_use]
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

/// Host-side catalog filters. Only the host's default search interprets them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub category_id: Option<i64>,
    /// `(attribute_id, value_id)` pairs selected in the storefront.
    pub attribute_values: Vec<(i64, i64)>,
}

/// A storefront search request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: Option<String>,
    pub filters: SearchFilters,
}

impl SearchRequest {
    #[must_use]
    pub fn text(query: impl Into<String>) -> Self {
        Self { query: Some(query.into()), filters: SearchFilters::default() }
    }
}

/// A product matching a query and its relevance rank (higher is better).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankedProduct {
    pub product_id: ProductId,
    pub rank: f32,
}

/// Sorts by rank descending, breaking ties by ascending product id.
pub fn sort_by_rank_descending(results: &mut [RankedProduct]) {
    results.sort_by(|a, b| b.rank.total_cmp(&a.rank).then_with(|| a.product_id.cmp(&b.product_id)));
}
