//! Runtime configuration read from the environment.

use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_LANGUAGE, DEFAULT_REBUILD_BATCH_SIZE, DEFAULT_REBUILD_INTERVAL_SECS,
    DEFAULT_RESULT_CAP, LanguageCode, LanguageSet, MAX_RESULT_CAP, env_parse_with_default,
    env_string,
};

pub const ENV_LANGUAGES: &str = "CATALOG_SEARCH_LANGUAGES";
pub const ENV_FALLBACK_LANGUAGE: &str = "CATALOG_SEARCH_FALLBACK_LANGUAGE";
pub const ENV_RESULT_CAP: &str = "CATALOG_SEARCH_RESULT_CAP";
pub const ENV_BATCH_SIZE: &str = "CATALOG_SEARCH_BATCH_SIZE";
pub const ENV_REBUILD_INTERVAL_SECS: &str = "CATALOG_SEARCH_REBUILD_INTERVAL_SECS";

/// Settings shared by the cache builder, search router and scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub languages: LanguageSet,
    pub result_cap: usize,
    pub batch_size: usize,
    pub rebuild_interval_secs: u64,
}

impl SearchConfig {
    /// Reads `CATALOG_SEARCH_*` variables; anything unset or invalid keeps
    /// its default.
    #[must_use]
    pub fn from_env() -> Self {
        let fallback = match std::env::var(ENV_FALLBACK_LANGUAGE) {
            Ok(raw) if raw.trim().is_empty() => None,
            Ok(raw) => LanguageCode::parse(&raw)
                .inspect_err(|err| {
                    tracing::warn!(var = ENV_FALLBACK_LANGUAGE, "{err}, disabling fallback");
                })
                .ok(),
            Err(_) => LanguageCode::parse(DEFAULT_LANGUAGE).ok(),
        };
        let languages = match env_string(ENV_LANGUAGES) {
            Some(list) => LanguageSet::from_list(&list, fallback),
            None => LanguageSet::new(LanguageCode::parse(DEFAULT_LANGUAGE).ok(), fallback),
        };
        Self {
            languages,
            result_cap: env_parse_with_default(ENV_RESULT_CAP, DEFAULT_RESULT_CAP),
            batch_size: env_parse_with_default(ENV_BATCH_SIZE, DEFAULT_REBUILD_BATCH_SIZE),
            rebuild_interval_secs: env_parse_with_default(
                ENV_REBUILD_INTERVAL_SECS,
                DEFAULT_REBUILD_INTERVAL_SECS,
            ),
        }
        .clamped()
    }

    #[must_use]
    pub fn with_languages(mut self, languages: LanguageSet) -> Self {
        self.languages = languages;
        self
    }

    /// Keeps the result cap within `1..=MAX_RESULT_CAP` and the batch size and
    /// interval non-zero.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.result_cap = self.result_cap.clamp(1, MAX_RESULT_CAP);
        self.batch_size = self.batch_size.max(1);
        self.rebuild_interval_secs = self.rebuild_interval_secs.max(1);
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            languages: LanguageSet::default(),
            result_cap: DEFAULT_RESULT_CAP,
            batch_size: DEFAULT_REBUILD_BATCH_SIZE,
            rebuild_interval_secs: DEFAULT_REBUILD_INTERVAL_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_bounds_result_cap() {
        let config = SearchConfig { result_cap: 50_000, batch_size: 0, ..SearchConfig::default() };
        let config = config.clamped();
        assert_eq!(config.result_cap, MAX_RESULT_CAP);
        assert_eq!(config.batch_size, 1);

        let config = SearchConfig { result_cap: 0, ..SearchConfig::default() }.clamped();
        assert_eq!(config.result_cap, 1);
    }

    #[test]
    fn test_default_covers_default_language() {
        let config = SearchConfig::default();
        let codes: Vec<&str> = config.languages.iter().map(LanguageCode::as_str).collect();
        assert_eq!(codes, vec![DEFAULT_LANGUAGE]);
        assert_eq!(config.result_cap, DEFAULT_RESULT_CAP);
    }
}
