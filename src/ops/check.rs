use std::collections::HashMap;

use serde::Serialize;

use crate::model::catalog::{Catalog, TomlCatalog};
use crate::util::locale;
use crate::util::template;

/// Placeholders a greeting template may use.
pub const KNOWN_PLACEHOLDERS: [&str; 3] = ["weekday", "month", "hoursLeft"];

/// Structured result from `greet check`, suitable for --json output.
#[derive(Debug, Default, Serialize)]
pub struct CheckResult {
    pub valid: bool,
    pub errors: Vec<CheckError>,
    pub warnings: Vec<CheckWarning>,
}

/// A validation error (something that should be fixed).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum CheckError {
    /// The catalog defines no languages at all
    #[serde(rename = "no_languages")]
    NoLanguages,
    /// A template uses a placeholder that is never filled in
    #[serde(rename = "unknown_placeholder")]
    UnknownPlaceholder {
        language: String,
        index: usize,
        name: String,
    },
    /// A template renders to nothing visible
    #[serde(rename = "blank_greeting")]
    BlankGreeting { language: String, index: usize },
}

/// A validation warning (non-critical issue).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum CheckWarning {
    /// Language has no greetings; the fallback is always shown
    #[serde(rename = "empty_list")]
    EmptyList { language: String },
    /// List is no longer than the history window, so repeats come quickly
    #[serde(rename = "short_list")]
    ShortList {
        language: String,
        len: usize,
        max_recent: usize,
    },
    /// Same template appears more than once
    #[serde(rename = "duplicate_greeting")]
    DuplicateGreeting {
        language: String,
        indices: Vec<usize>,
    },
    /// Language has no fallback of its own
    #[serde(rename = "missing_fallback")]
    MissingFallback { language: String },
    /// No date locale; weekday and month names use the fallback tables
    #[serde(rename = "no_date_locale")]
    NoDateLocale { language: String },
}

// ---------------------------------------------------------------------------
// Main check entry point
// ---------------------------------------------------------------------------

/// Validate a catalog and return structured results.
///
/// Checks performed:
/// 1. Every placeholder is one of `weekday`, `month`, `hoursLeft`
/// 2. No template is blank
/// 3. Warnings for empty or short lists, duplicates, missing fallbacks
///    and languages without date names
pub fn check_catalog(catalog: &TomlCatalog, max_recent: usize) -> CheckResult {
    let mut result = CheckResult::default();

    if catalog.languages.is_empty() {
        result.errors.push(CheckError::NoLanguages);
    }

    for (language, entry) in &catalog.languages {
        check_language(language, &entry.greetings, max_recent, &mut result);

        if entry.fallback.as_deref().is_none_or(|f| f.trim().is_empty()) {
            result.warnings.push(CheckWarning::MissingFallback {
                language: language.clone(),
            });
        }
        if locale::chrono_locale(language).is_none() && !locale::is_chinese(language) {
            result.warnings.push(CheckWarning::NoDateLocale {
                language: language.clone(),
            });
        }
    }

    result.valid = result.errors.is_empty();
    result
}

fn check_language(language: &str, greetings: &[String], max_recent: usize, result: &mut CheckResult) {
    if greetings.is_empty() {
        result.warnings.push(CheckWarning::EmptyList {
            language: language.to_string(),
        });
        return;
    }
    if greetings.len() <= max_recent {
        result.warnings.push(CheckWarning::ShortList {
            language: language.to_string(),
            len: greetings.len(),
            max_recent,
        });
    }

    let mut seen: HashMap<&str, Vec<usize>> = HashMap::new();
    for (index, greeting) in greetings.iter().enumerate() {
        if greeting.trim().is_empty() {
            result.errors.push(CheckError::BlankGreeting {
                language: language.to_string(),
                index,
            });
        }
        for name in template::placeholders(greeting) {
            if !KNOWN_PLACEHOLDERS.contains(&name.as_str()) {
                result.errors.push(CheckError::UnknownPlaceholder {
                    language: language.to_string(),
                    index,
                    name,
                });
            }
        }
        seen.entry(greeting.as_str()).or_default().push(index);
    }

    let mut duplicates: Vec<Vec<usize>> = seen.into_values().filter(|v| v.len() > 1).collect();
    duplicates.sort();
    for indices in duplicates {
        result.warnings.push(CheckWarning::DuplicateGreeting {
            language: language.to_string(),
            indices,
        });
    }
}

/// Languages with their greeting counts, in catalog order.
pub fn language_counts(catalog: &TomlCatalog) -> Vec<(String, usize)> {
    catalog
        .languages()
        .into_iter()
        .map(|lang| {
            let count = catalog.list_for(&lang).map_or(0, <[String]>::len);
            (lang, count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog(src: &str) -> TomlCatalog {
        toml::from_str(src).unwrap()
    }

    #[test]
    fn builtin_catalog_is_clean() {
        let result = check_catalog(&TomlCatalog::builtin(), 8);
        assert!(result.valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn empty_catalog_is_invalid() {
        let result = check_catalog(&TomlCatalog::new(), 8);
        assert!(!result.valid);
        assert_eq!(result.errors, vec![CheckError::NoLanguages]);
    }

    #[test]
    fn unknown_placeholder() {
        let c = catalog(
            r#"[en]
fallback = "Morning"
greetings = ["It is {{year}}", "{{weekday}}", "a", "b", "c", "d", "e", "f", "g"]
"#,
        );
        let result = check_catalog(&c, 8);
        assert!(!result.valid);
        assert_eq!(
            result.errors,
            vec![CheckError::UnknownPlaceholder {
                language: "en".into(),
                index: 0,
                name: "year".into(),
            }]
        );
    }

    #[test]
    fn blank_greeting() {
        let c = catalog("[en]\nfallback = \"Hi\"\ngreetings = [\"ok\", \"  \"]\n");
        let result = check_catalog(&c, 1);
        assert_eq!(
            result.errors,
            vec![CheckError::BlankGreeting {
                language: "en".into(),
                index: 1,
            }]
        );
    }

    #[test]
    fn warnings_for_weak_lists() {
        let c = catalog(
            r#"[en]
greetings = ["Hi", "Hello", "Hi"]

[fr]
fallback = "Bonjour"
greetings = []
"#,
        );
        let result = check_catalog(&c, 8);
        assert!(result.valid);
        assert_eq!(
            result.warnings,
            vec![
                CheckWarning::ShortList {
                    language: "en".into(),
                    len: 3,
                    max_recent: 8,
                },
                CheckWarning::DuplicateGreeting {
                    language: "en".into(),
                    indices: vec![0, 2],
                },
                CheckWarning::MissingFallback {
                    language: "en".into(),
                },
                CheckWarning::EmptyList {
                    language: "fr".into(),
                },
            ]
        );
    }

    #[test]
    fn language_without_date_locale() {
        let c = catalog("[tlh]\nfallback = \"nuqneH\"\ngreetings = [\"Qapla'\"]\n");
        let result = check_catalog(&c, 0);
        assert_eq!(
            result.warnings,
            vec![CheckWarning::NoDateLocale {
                language: "tlh".into(),
            }]
        );
    }

    #[test]
    fn json_shape() {
        let result = check_catalog(&TomlCatalog::new(), 8);
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"valid":false,"errors":[{"type":"no_languages"}],"warnings":[]}"#
        );
    }

    #[test]
    fn counts_per_language() {
        let c = catalog("[en]\ngreetings = [\"a\", \"b\"]\n\n[de]\ngreetings = []\n");
        assert_eq!(
            language_counts(&c),
            vec![("en".to_string(), 2), ("de".to_string(), 0)]
        );
    }
}
