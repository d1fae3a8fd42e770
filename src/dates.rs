//! Flexible due-date parsing.
//!
//! Callers send dates in whatever shape their UI produced. Accepted forms:
//!
//! | Form | Example |
//! |------|---------|
//! | ISO date | `2025-03-05` |
//! | RFC 3339 / ISO datetime | `2025-03-05T14:30:00Z`, `2025-03-05 14:30` |
//! | Compact offsets | `2025-03-05T14:30:00+0530` |
//! | Slashed | `2025/03/05`, `03/05/2025`, `03/05/25` (month first) |
//! | Dotted | `05.03.2025`, `05.03.25` (day first) |
//! | Compact | `20250305` |
//! | Month names | `March 5, 2025`, `Mar 5 2025`, `5 March 2025`, `March 5th, 2025` |
//!
//! Two-digit years follow `%y`: 00-68 → 20xx, 69-99 → 19xx. Anything else,
//! including blank input and dates without a year, yields `None` (no due
//! date).

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// `%Y` also reads one to three digits; earlier years are rejected so that
/// `03/05/25` falls through to the `%y` forms.
const MIN_YEAR: i32 = 1000;

const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%z",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%d.%m.%y",
    "%d.%m.%Y",
    "%Y%m%d",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses a due date, returning `None` for blank or unrecognized input.
///
/// Datetimes are truncated to their calendar date in the offset they were
/// written in.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(dt) = DateTime::parse_from_rfc3339(s).ok().or_else(|| {
        OFFSET_DATETIME_FORMATS
            .iter()
            .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    }) {
        return Some(dt.date_naive());
    }

    let s = strip_ordinals(s);
    DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(&s, fmt).ok())
        .chain(
            DATETIME_FORMATS
                .iter()
                .filter_map(|fmt| NaiveDateTime::parse_from_str(&s, fmt).ok())
                .map(|dt| dt.date()),
        )
        .find(|date| date.year() >= MIN_YEAR)
}

/// Drops English ordinal suffixes after a day number (`5th` → `5`).
fn strip_ordinals(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(c) = rest.chars().next() {
        let after = &rest[c.len_utf8()..];
        if c.is_ascii_digit() {
            let suffix = ["st", "nd", "rd", "th"].into_iter().find(|suffix| {
                after.get(..2).is_some_and(|head| head.eq_ignore_ascii_case(suffix))
                    && !after[2..].starts_with(|n: char| n.is_alphabetic())
            });
            out.push(c);
            rest = if suffix.is_some() { &after[2..] } else { after };
        } else {
            out.push(c);
            rest = after;
        }
    }
    out
}
