use std::fmt::Display;

use chrono::{DateTime, Datelike, Locale, TimeZone, Timelike};

/// Language used when neither an active nor a default language is set.
pub const DEFAULT_LANGUAGE: &str = "en";

const ZH_WEEKDAYS: [&str; 7] = [
    "星期一", "星期二", "星期三", "星期四", "星期五", "星期六", "星期日",
];

const ZH_MONTHS: [&str; 12] = [
    "一月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "十一月",
    "十二月",
];

/// Region used for a bare language code when `xx_XX` is not a real locale.
const DEFAULT_REGIONS: &[(&str, &str)] = &[
    ("ar", "SA"),
    ("cs", "CZ"),
    ("da", "DK"),
    ("el", "GR"),
    ("en", "US"),
    ("he", "IL"),
    ("hi", "IN"),
    ("ja", "JP"),
    ("ko", "KR"),
    ("nb", "NO"),
    ("sv", "SE"),
    ("uk", "UA"),
    ("vi", "VN"),
    ("zh", "CN"),
];

/// Pick the language to greet in: active setting, then configured default,
/// then English. Blank values are skipped.
pub fn resolve_language(active: Option<&str>, default: Option<&str>) -> String {
    [active, default]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_LANGUAGE)
        .to_string()
}

/// "zh-CN" -> "zh", "en_US" -> "en", "fr" -> "fr"
pub fn primary_subtag(lang: &str) -> &str {
    lang.split(['-', '_']).next().unwrap_or(lang)
}

/// True for "zh", "zh-CN", "zh-Hant-TW" and friends.
pub fn is_chinese(lang: &str) -> bool {
    primary_subtag(lang).eq_ignore_ascii_case("zh")
}

/// Map a BCP 47 style tag to one of chrono's POSIX locales.
pub fn chrono_locale(lang: &str) -> Option<Locale> {
    let mut parts = lang.split(['-', '_']).filter(|p| !p.is_empty());
    let language = parts.next()?.to_ascii_lowercase();
    // Skip script subtags ("Hans"); the first two-letter part is the region.
    let region = parts
        .find(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_alphabetic()))
        .map(|p| p.to_ascii_uppercase());

    let mut candidates = Vec::new();
    if let Some(region) = region {
        candidates.push(format!("{}_{}", language, region));
    }
    if let Some((_, r)) = DEFAULT_REGIONS.iter().find(|(l, _)| *l == language) {
        candidates.push(format!("{}_{}", language, r));
    }
    candidates.push(format!("{}_{}", language, language.to_ascii_uppercase()));
    candidates.push(language);

    candidates
        .iter()
        .find_map(|c| Locale::try_from(c.as_str()).ok())
}

/// Long-form weekday name of `now` in `lang`.
pub fn weekday_name<Tz>(now: &DateTime<Tz>, lang: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match chrono_locale(lang) {
        Some(locale) => now.format_localized("%A", locale).to_string(),
        None => {
            log::debug!("no date locale for {:?}, using fallback weekday names", lang);
            fallback_weekday(now, lang)
        }
    }
}

/// Weekday name without a date locale: Chinese for `zh*`, English otherwise.
pub fn fallback_weekday<Tz>(now: &DateTime<Tz>, lang: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if is_chinese(lang) {
        ZH_WEEKDAYS[now.weekday().num_days_from_monday() as usize].to_string()
    } else {
        now.format("%A").to_string()
    }
}

/// Long-form month name of `now` in `lang`.
pub fn month_name<Tz>(now: &DateTime<Tz>, lang: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match chrono_locale(lang) {
        Some(locale) => now.format_localized("%B", locale).to_string(),
        None => {
            log::debug!("no date locale for {:?}, using fallback month names", lang);
            fallback_month(now, lang)
        }
    }
}

/// Month name without a date locale: Chinese for `zh*`, English otherwise.
pub fn fallback_month<Tz>(now: &DateTime<Tz>, lang: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if is_chinese(lang) {
        ZH_MONTHS[now.month0() as usize].to_string()
    } else {
        now.format("%B").to_string()
    }
}

/// Hours remaining in the day, counting the current one: `24 - hour`.
pub fn hours_left<Tz: TimeZone>(now: &DateTime<Tz>) -> u32 {
    24 - now.hour()
}

/// Values substituted into greeting templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateNames {
    pub weekday: String,
    pub month: String,
    pub hours_left: u32,
}

impl DateNames {
    pub fn at<Tz>(now: &DateTime<Tz>, lang: &str) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        DateNames {
            weekday: weekday_name(now, lang),
            month: month_name(now, lang),
            hours_left: hours_left(now),
        }
    }

    /// Lookup by template placeholder name.
    pub fn get(&self, name: &str) -> Option<String> {
        match name {
            "weekday" => Some(self.weekday.clone()),
            "month" => Some(self.month.clone()),
            "hoursLeft" => Some(self.hours_left.to_string()),
            _ => None,
        }
    }
}
