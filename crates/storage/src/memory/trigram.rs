//! Trigram inverted index over `combined_text_lower`.
//!
//! Any text containing the query as a substring also contains every one of
//! the query's trigrams, so intersecting posting lists yields a candidate
//! superset that the caller then verifies with `str::contains`.

use std::collections::{BTreeSet, HashMap, HashSet};

use catalog_search_core::ProductId;

type Trigram = [char; 3];

#[derive(Debug, Default)]
pub(crate) struct TrigramIndex {
    postings: HashMap<Trigram, BTreeSet<ProductId>>,
    by_product: HashMap<ProductId, HashSet<Trigram>>,
}

fn trigrams(text: &str) -> HashSet<Trigram> {
    let chars: Vec<char> = text.chars().collect();
    chars.windows(3).map(|w| [w[0], w[1], w[2]]).collect()
}

impl TrigramIndex {
    pub(crate) fn insert(&mut self, id: ProductId, text: &str) {
        self.remove(id);
        let grams = trigrams(text);
        for gram in &grams {
            self.postings.entry(*gram).or_default().insert(id);
        }
        self.by_product.insert(id, grams);
    }

    pub(crate) fn remove(&mut self, id: ProductId) {
        let Some(grams) = self.by_product.remove(&id) else {
            return;
        };
        for gram in grams {
            if let Some(ids) = self.postings.get_mut(&gram) {
                ids.remove(&id);
                if ids.is_empty() {
                    self.postings.remove(&gram);
                }
            }
        }
    }

    /// Products that may contain `query`. `None` when the query is shorter
    /// than a trigram and every product is a candidate.
    pub(crate) fn candidates(&self, query: &str) -> Option<BTreeSet<ProductId>> {
        let grams = trigrams(query);
        if grams.is_empty() {
            return None;
        }
        let mut lists = Vec::with_capacity(grams.len());
        for gram in &grams {
            match self.postings.get(gram) {
                Some(ids) => lists.push(ids),
                None => return Some(BTreeSet::new()),
            }
        }
        lists.sort_by_key(|ids| ids.len());
        let (smallest, rest) = lists.split_first()?;
        Some(smallest.iter().copied().filter(|id| rest.iter().all(|ids| ids.contains(id))).collect())
    }

    #[cfg(test)]
    pub(crate) fn trigram_count(&self) -> usize {
        self.postings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: i64) -> ProductId {
        ProductId::new(n).unwrap()
    }

    #[test]
    fn test_candidates_intersect_postings() {
        let mut index = TrigramIndex::default();
        index.insert(id(1), "blue shirt chemise bleue");
        index.insert(id(2), "red shirt");
        index.insert(id(3), "lampe");

        let shirt: Vec<ProductId> = index.candidates("shirt").unwrap().into_iter().collect();
        assert_eq!(shirt, vec![id(1), id(2)]);
        let bleue: Vec<ProductId> = index.candidates("bleue").unwrap().into_iter().collect();
        assert_eq!(bleue, vec![id(1)]);
        assert!(index.candidates("xyz123").unwrap().is_empty());
    }

    #[test]
    fn test_short_query_has_no_trigram_filter() {
        let mut index = TrigramIndex::default();
        index.insert(id(1), "lampe");
        assert!(index.candidates("la").is_none());
    }

    #[test]
    fn test_reinsert_replaces_old_text() {
        let mut index = TrigramIndex::default();
        index.insert(id(1), "old");
        index.insert(id(1), "new");
        assert!(index.candidates("old").unwrap().is_empty());
        assert_eq!(index.candidates("new").unwrap().len(), 1);
        assert_eq!(index.trigram_count(), 1);
    }

    #[test]
    fn test_remove_drops_empty_postings() {
        let mut index = TrigramIndex::default();
        index.insert(id(1), "চেয়ার টেবিল");
        index.remove(id(1));
        assert_eq!(index.trigram_count(), 0);
        index.remove(id(1));
    }
}
