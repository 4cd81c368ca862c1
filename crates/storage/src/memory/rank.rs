use std::collections::HashSet;

/// Term-frequency relevance: occurrences of the distinct query keywords
/// among the document tokens, normalized by document length.
///
/// Returns `0.0` when nothing matches token-for-token; substring-only
/// matches still qualify as candidates, they just rank last.
pub(crate) fn term_frequency_rank(search_tokens: &str, keywords: &[String]) -> f32 {
    let tokens: Vec<String> = search_tokens.split_whitespace().map(str::to_lowercase).collect();
    if tokens.is_empty() {
        return 0.0;
    }
    let mut seen = HashSet::new();
    let hits: usize = keywords
        .iter()
        .filter(|keyword| seen.insert(keyword.as_str()))
        .map(|keyword| tokens.iter().filter(|token| token.as_str() == keyword.as_str()).count())
        .sum();
    hits as f32 / tokens.len() as f32
}
