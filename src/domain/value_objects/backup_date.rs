//! Calendar day stamped into backup file names.
//!
//! Backups follow the naming convention `<prefix>-MM-DD-YYYY_<suffix>`, for
//! example `postgres-01-15-2023_0300.sql.gz`. The day lookup selects every key
//! containing the `-MM-DD-YYYY_` marker for the requested day.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::domain::errors::DateParseError;

const KEY_PATTERN_FORMAT: &str = "-%m-%d-%Y_";
const DISPLAY_FORMAT: &str = "%A, %b. %d %Y";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

// Two-digit year forms come first: `%Y` would happily read "23" as year 23.
// Numeric dates are month first; the day-first dotted form only applies when
// the leading field cannot be a month.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%m.%d.%Y",
    "%d.%m.%Y",
    "%B %d %Y",
    "%d %B %Y",
    "%Y %B %d",
];

const YEARLESS_FORMATS: &[&str] = &["%B %d %Y", "%d %B %Y"];

const WEEKDAYS: &[&str] = &[
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// A calendar day used to look up backups by the date in their name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BackupDate(NaiveDate);

impl BackupDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Parse a free-form, human written date.
    ///
    /// Accepts ISO dates (with or without a time part), slash and dot
    /// separated numeric dates (month first), month names with an optional
    /// weekday and ordinal suffixes, and the words `today`, `yesterday` and
    /// `tomorrow`. `today` is used for relative words and for month-name dates
    /// given without a year.
    pub fn parse(input: &str, today: NaiveDate) -> Result<Self, DateParseError> {
        let unparseable = || DateParseError {
            input: input.to_string(),
        };

        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(unparseable());
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "today" => return Ok(Self(today)),
            "yesterday" => return today.pred_opt().map(Self).ok_or_else(unparseable),
            "tomorrow" => return today.succ_opt().map(Self).ok_or_else(unparseable),
            _ => {}
        }

        if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self(timestamp.date_naive()));
        }

        if trimmed.len() == 8 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            let dashed = format!("{}-{}-{}", &trimmed[..4], &trimmed[4..6], &trimmed[6..]);
            return NaiveDate::parse_from_str(&dashed, "%Y-%m-%d")
                .map(Self)
                .map_err(|_| unparseable());
        }

        let normalized = normalize(trimmed);
        if normalized.is_empty() {
            return Err(unparseable());
        }

        if let Some(timestamp) = DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(&normalized, fmt).ok())
        {
            return Ok(Self(timestamp.date()));
        }

        if let Some(date) = DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(&normalized, fmt).ok())
        {
            return Ok(Self(date));
        }

        let with_year = format!("{} {}", normalized, today.year());
        YEARLESS_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(&with_year, fmt).ok())
            .map(Self)
            .ok_or_else(unparseable)
    }

    /// The `-MM-DD-YYYY_` marker embedded in backup names for this day
    pub fn key_pattern(&self) -> String {
        self.0.format(KEY_PATTERN_FORMAT).to_string()
    }

    /// Whether the key carries this day's marker anywhere in it
    pub fn matches(&self, key: &str) -> bool {
        key.contains(&self.key_pattern())
    }

    /// Build a conforming backup name: `<prefix>-MM-DD-YYYY_<suffix>`
    pub fn stamp(&self, prefix: &str, suffix: &str) -> String {
        format!("{}{}{}", prefix, self.key_pattern(), suffix)
    }

    /// Recover the first valid day marker embedded in a key
    pub fn from_key(key: &str) -> Option<Self> {
        key.as_bytes()
            .windows(12)
            .filter(|window| is_marker_shaped(window))
            .find_map(|window| {
                let marker = std::str::from_utf8(window).ok()?;
                NaiveDate::parse_from_str(marker, KEY_PATTERN_FORMAT).ok()
            })
            .map(Self)
    }
}

impl std::fmt::Display for BackupDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DISPLAY_FORMAT))
    }
}

impl From<NaiveDate> for BackupDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

fn is_marker_shaped(window: &[u8]) -> bool {
    window.iter().enumerate().all(|(i, b)| match i {
        0 | 3 | 6 => *b == b'-',
        11 => *b == b'_',
        _ => b.is_ascii_digit(),
    })
}

/// Drop commas, weekday names, abbreviation dots and ordinal suffixes
fn normalize(input: &str) -> String {
    input
        .replace(',', " ")
        .split_whitespace()
        .map(|token| token.trim_end_matches('.'))
        .filter(|token| !token.is_empty() && !is_weekday(token))
        .map(strip_ordinal)
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_weekday(token: &str) -> bool {
    let token = token.to_ascii_lowercase();
    token.len() >= 3
        && WEEKDAYS
            .iter()
            .any(|day| *day == token || (token.len() == 3 && day.starts_with(&token)))
}

fn strip_ordinal(token: &str) -> &str {
    let lower = token.to_ascii_lowercase();
    for suffix in ["st", "nd", "rd", "th"] {
        if lower.ends_with(suffix) {
            let digits = &token[..token.len() - suffix.len()];
            if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
                return digits;
            }
        }
    }
    token
}
