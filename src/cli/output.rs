use serde::Serialize;

use crate::model::catalog::{Catalog, TomlCatalog};
use crate::model::config::GreeterConfig;
use crate::ops::check::{CheckError, CheckWarning, language_counts};
use crate::util::locale;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct LanguageJson {
    pub language: String,
    pub greetings: usize,
    pub fallback: String,
    pub date_locale: bool,
}

#[derive(Serialize)]
pub struct ConfigJson<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub language: String,
    #[serde(flatten)]
    pub config: &'a GreeterConfig,
}

pub fn languages_json(catalog: &TomlCatalog) -> Vec<LanguageJson> {
    language_counts(catalog)
        .into_iter()
        .map(|(language, greetings)| LanguageJson {
            fallback: catalog.fallback_for(&language),
            date_locale: locale::chrono_locale(&language).is_some(),
            language,
            greetings,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One line per language: `zh-CN  10 greetings  (早上好)`
pub fn format_languages(catalog: &TomlCatalog) -> Vec<String> {
    let counts = language_counts(catalog);
    let width = counts.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    counts
        .into_iter()
        .map(|(lang, n)| {
            let noun = if n == 1 { "greeting" } else { "greetings" };
            format!(
                "{:<width$}  {:>3} {}  ({})",
                lang,
                n,
                noun,
                catalog.fallback_for(&lang),
                width = width
            )
        })
        .collect()
}

pub fn format_check_error(err: &CheckError) -> String {
    match err {
        CheckError::NoLanguages => "catalog has no languages".to_string(),
        CheckError::UnknownPlaceholder {
            language,
            index,
            name,
        } => format!("[{}] #{} uses unknown placeholder {{{{{}}}}}", language, index, name),
        CheckError::BlankGreeting { language, index } => {
            format!("[{}] #{} is blank", language, index)
        }
    }
}

pub fn format_check_warning(warn: &CheckWarning) -> String {
    match warn {
        CheckWarning::EmptyList { language } => {
            format!("[{}] no greetings, fallback is always shown", language)
        }
        CheckWarning::ShortList {
            language,
            len,
            max_recent,
        } => format!(
            "[{}] only {} greetings for a history of {}, repeats are likely",
            language, len, max_recent
        ),
        CheckWarning::DuplicateGreeting { language, indices } => {
            let list: Vec<String> = indices.iter().map(|i| format!("#{}", i)).collect();
            format!("[{}] duplicate greetings: {}", language, list.join(", "))
        }
        CheckWarning::MissingFallback { language } => {
            format!("[{}] no fallback greeting", language)
        }
        CheckWarning::NoDateLocale { language } => {
            format!("[{}] no date locale, weekday and month names are in English", language)
        }
    }
}
