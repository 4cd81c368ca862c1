//! Products, language codes and per-language name resolution.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{CoreError, DEFAULT_LANGUAGE, Result};

/// Identifier of a catalog product. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    pub fn new(raw: i64) -> Result<Self> {
        if raw > 0 { Ok(Self(raw)) } else { Err(CoreError::InvalidProductId(raw.to_string())) }
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let raw: i64 = s.trim().parse().map_err(|_| CoreError::InvalidProductId(s.to_owned()))?;
        Self::new(raw).map_err(|_| CoreError::InvalidProductId(s.to_owned()))
    }
}

/// Locale code such as `en_US`, `bn_BD`, `fr`, `es_419` or `sr@latin`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if is_valid_language_code(raw) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(CoreError::InvalidLanguageCode(raw.to_owned()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_language_code(raw: &str) -> bool {
    let (locale, variant) = match raw.split_once('@') {
        Some((locale, variant)) => (locale, Some(variant)),
        None => (raw, None),
    };
    if let Some(variant) = variant {
        if variant.is_empty() || !variant.chars().all(|c| c.is_ascii_alphanumeric()) {
            return false;
        }
    }
    let (lang, region) = match locale.split_once('_') {
        Some((lang, region)) => (lang, Some(region)),
        None => (locale, None),
    };
    let lang_ok = (2..=3).contains(&lang.len()) && lang.chars().all(|c| c.is_ascii_lowercase());
    let region_ok = region.is_none_or(|r| {
        (r.len() == 2 && r.chars().all(|c| c.is_ascii_uppercase()))
            || (r.len() == 3 && r.chars().all(|c| c.is_ascii_digit()))
    });
    lang_ok && region_ok
}

impl Display for LanguageCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl FromStr for LanguageCode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

/// Ordered set of languages a search document covers, plus the language the
/// host falls back to when a translation is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSet {
    languages: Vec<LanguageCode>,
    fallback: Option<LanguageCode>,
}

impl LanguageSet {
    /// Builds a set, dropping repeated codes while keeping first-seen order.
    pub fn new(languages: impl IntoIterator<Item = LanguageCode>, fallback: Option<LanguageCode>) -> Self {
        let mut unique: Vec<LanguageCode> = Vec::new();
        for code in languages {
            if !unique.contains(&code) {
                unique.push(code);
            }
        }
        Self { languages: unique, fallback }
    }

    /// Parses a comma separated list. Malformed codes are skipped with a warning.
    #[must_use]
    pub fn from_list(list: &str, fallback: Option<LanguageCode>) -> Self {
        let codes = list.split(',').map(str::trim).filter(|s| !s.is_empty()).filter_map(|raw| {
            match LanguageCode::parse(raw) {
                Ok(code) => Some(code),
                Err(err) => {
                    tracing::warn!(language = %raw, "skipping configured language: {err}");
                    None
                },
            }
        });
        let set = Self::new(codes, fallback);
        if set.is_empty() { Self::default() } else { set }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageCode> {
        self.languages.iter()
    }

    #[must_use]
    pub fn fallback(&self) -> Option<&LanguageCode> {
        self.fallback.as_ref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

impl Default for LanguageSet {
    fn default() -> Self {
        let code = LanguageCode(DEFAULT_LANGUAGE.to_owned());
        Self { languages: vec![code.clone()], fallback: Some(code) }
    }
}

/// Anything that can render a product's display name in a given language.
pub trait LocalizedName {
    fn product_id(&self) -> ProductId;

    /// Name in `language`, falling back to `fallback` when no translation
    /// exists. A missing name in both is `Ok("")`.
    fn name_in(&self, language: &LanguageCode, fallback: Option<&LanguageCode>) -> Result<String>;
}

/// Per-language name changes applied by a single write.
pub type NameChanges = BTreeMap<LanguageCode, String>;

/// A product's translatable name column: `{"en_US": "Blue Shirt", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductNames {
    pub product_id: ProductId,
    pub translations: Map<String, Value>,
}

impl ProductNames {
    #[must_use]
    pub fn new(product_id: ProductId) -> Self {
        Self { product_id, translations: Map::new() }
    }

    /// Wraps a stored JSON value. Anything but an object is treated as no
    /// translations at all.
    #[must_use]
    pub fn from_json(product_id: ProductId, value: Value) -> Self {
        match value {
            Value::Object(translations) => Self { product_id, translations },
            Value::Null => Self::new(product_id),
            other => {
                tracing::warn!(product_id = %product_id, value = %other, "name column is not a JSON object");
                Self::new(product_id)
            },
        }
    }

    #[must_use]
    pub fn with_name(mut self, language: &LanguageCode, name: impl Into<String>) -> Self {
        self.translations.insert(language.as_str().to_owned(), Value::String(name.into()));
        self
    }

    pub fn merge(&mut self, changes: &NameChanges) {
        for (language, name) in changes {
            self.translations.insert(language.as_str().to_owned(), Value::String(name.clone()));
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Object(self.translations.clone())
    }

    fn stored(&self, language: &LanguageCode) -> Result<Option<&str>> {
        match self.translations.get(language.as_str()) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(name)) => Ok(Some(name)),
            Some(other) => Err(CoreError::NameResolution {
                language: language.to_string(),
                reason: format!("expected text, found {other}"),
            }),
        }
    }
}

impl LocalizedName for ProductNames {
    fn product_id(&self) -> ProductId {
        self.product_id
    }

    fn name_in(&self, language: &LanguageCode, fallback: Option<&LanguageCode>) -> Result<String> {
        if let Some(name) = self.stored(language)? {
            return Ok(name.to_owned());
        }
        match fallback {
            Some(fallback) if fallback != language => {
                Ok(self.stored(fallback)?.unwrap_or_default().to_owned())
            },
            _ => Ok(String::new()),
        }
    }
}

/// Serializes name changes into the JSON object merged into the name column.
#[must_use]
pub fn name_changes_to_json(changes: &NameChanges) -> Value {
    Value::Object(
        changes
            .iter()
            .map(|(language, name)| (language.as_str().to_owned(), Value::String(name.clone())))
            .collect(),
    )
}
