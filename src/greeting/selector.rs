use std::collections::HashMap;
use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::greeting::history::RecentHistory;
use crate::model::catalog::Catalog;
use crate::model::config::GreetingConfig;
use crate::util::locale::{self, DateNames};
use crate::util::template;

/// Tuning for a [`GreetingSelector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOptions {
    /// Indices remembered per language
    pub max_recent: usize,
    /// Random draws per selection before a repeat is accepted
    pub max_attempts: usize,
    /// Language used when no active language is set
    pub default_language: String,
}

impl Default for SelectorOptions {
    fn default() -> Self {
        SelectorOptions::from(&GreetingConfig::default())
    }
}

impl From<&GreetingConfig> for SelectorOptions {
    fn from(config: &GreetingConfig) -> Self {
        SelectorOptions {
            max_recent: config.max_recent,
            max_attempts: config.max_attempts.max(1),
            default_language: config.default_language.clone(),
        }
    }
}

/// One selected greeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Greeting {
    pub language: String,
    /// Catalog index, or `None` when the fallback greeting was used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub text: String,
}

/// Picks localized greetings at random while avoiding the ones shown
/// recently. History is tracked separately per language and lives only as
/// long as the selector.
pub struct GreetingSelector<C, R = StdRng> {
    catalog: C,
    rng: R,
    options: SelectorOptions,
    language: Option<String>,
    history: HashMap<String, RecentHistory>,
}

impl<C: Catalog> GreetingSelector<C, StdRng> {
    pub fn new(catalog: C, options: SelectorOptions) -> Self {
        Self::with_rng(catalog, options, StdRng::from_entropy())
    }

    /// Deterministic selector for reproducible output.
    pub fn seeded(catalog: C, options: SelectorOptions, seed: u64) -> Self {
        Self::with_rng(catalog, options, StdRng::seed_from_u64(seed))
    }
}

impl<C: Catalog, R: Rng> GreetingSelector<C, R> {
    pub fn with_rng(catalog: C, options: SelectorOptions, rng: R) -> Self {
        GreetingSelector {
            catalog,
            rng,
            options,
            language: None,
            history: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn options(&self) -> &SelectorOptions {
        &self.options
    }

    /// Set the active language. `None` reverts to the configured default.
    pub fn set_language(&mut self, language: Option<String>) {
        self.language = language;
    }

    /// The language greetings are currently drawn in.
    pub fn language(&self) -> String {
        locale::resolve_language(
            self.language.as_deref(),
            Some(self.options.default_language.as_str()),
        )
    }

    /// Recent history for `lang`, if any greeting has been drawn for it.
    pub fn recent(&self, lang: &str) -> Option<&RecentHistory> {
        self.history.get(lang)
    }

    /// A greeting in the active language for the current local time.
    pub fn select_greeting(&mut self) -> String {
        self.select_at(&Local::now())
    }

    /// A greeting in the active language for `now`.
    pub fn select_at<Tz>(&mut self, now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let lang = self.language();
        self.select_for(&lang, now)
    }

    /// A greeting in `lang` for `now`.
    pub fn select_for<Tz>(&mut self, lang: &str, now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        self.choose(lang, now).text
    }

    /// Select a greeting and report which catalog entry it came from.
    pub fn choose<Tz>(&mut self, lang: &str, now: &DateTime<Tz>) -> Greeting
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let list = match self.catalog.list_for(lang) {
            Some(list) if !list.is_empty() => list,
            _ => {
                log::debug!("no greetings for {:?}, using fallback", lang);
                return Greeting {
                    language: lang.to_string(),
                    index: None,
                    text: self.catalog.fallback_for(lang),
                };
            }
        };

        let names = DateNames::at(now, lang);
        let max_recent = self.options.max_recent;
        let history = self
            .history
            .entry(lang.to_string())
            .or_insert_with(|| RecentHistory::new(max_recent));
        let index = draw_index(&mut self.rng, history, list.len(), self.options.max_attempts);
        history.push(index);

        Greeting {
            language: lang.to_string(),
            index: Some(index),
            text: template::render(&list[index], |name| names.get(name)),
        }
    }

    /// Draw and record an index into a list of `len` greetings for `lang`,
    /// without rendering anything. `None` for an empty list.
    pub fn pick_index(&mut self, lang: &str, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let max_recent = self.options.max_recent;
        let history = self
            .history
            .entry(lang.to_string())
            .or_insert_with(|| RecentHistory::new(max_recent));
        let index = draw_index(&mut self.rng, history, len, self.options.max_attempts);
        history.push(index);
        Some(index)
    }
}

/// Uniform draw in `0..len` that avoids `history`. Once the history covers
/// as many entries as the list holds, the first draw is taken. After
/// `max_attempts` draws the last one is taken even if it is recent.
fn draw_index<R: Rng + ?Sized>(
    rng: &mut R,
    history: &RecentHistory,
    len: usize,
    max_attempts: usize,
) -> usize {
    let saturated = history.len() >= len;
    let mut index = rng.gen_range(0..len);
    let mut attempts = 1;
    while !saturated && history.contains(index) && attempts < max_attempts {
        index = rng.gen_range(0..len);
        attempts += 1;
    }
    if !saturated && history.contains(index) {
        log::debug!(
            "no unused greeting after {} draws, repeating index {}",
            attempts,
            index
        );
    }
    index
}
