// File: ./src/model/resolve.rs
// Interprets raw date tokens ("30 AUG", "Every Friday", freeform prose) and
// answers occurrence / day-type questions against concrete calendar dates.
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

/// Full weekday names, Monday first. Recurrence tokens are matched against
/// these by substring, so "Every Friday" and "every friday evening" both hit.
const WEEKDAY_NAMES: &[(&str, Weekday)] = &[
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun),
];

const MONTH_ABBREVS: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// The interpretation of an event's date token.
///
/// Three-way on purpose: a weekly recurrence is not "no date", and an
/// unparseable token is neither. `Unresolvable` covers prose like "TBD" and
/// multi-day ranges ("30 AUG - 2 SEP"); such events stay visible in
/// unfiltered views but cannot be matched to a selected date or exported.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ResolvedDate {
    Specific(NaiveDate),
    Recurring(Weekday),
    Unresolvable,
}

impl ResolvedDate {
    /// Does this event occur on `day`?
    pub fn occurs_on(&self, day: NaiveDate) -> bool {
        match self {
            ResolvedDate::Specific(d) => *d == day,
            ResolvedDate::Recurring(w) => day.weekday() == *w,
            ResolvedDate::Unresolvable => false,
        }
    }

    pub fn is_specific(&self) -> bool {
        matches!(self, ResolvedDate::Specific(_))
    }
}

/// Resolves a raw date token against the fixed reference year.
///
/// Recognized shapes, in order:
/// 1. "every <weekday>" (case-insensitive, weekday matched as substring)
/// 2. "<1-2 digit day> <3-letter month>", with an optional leading weekday
///    word ("SAT 30 AUG")
///
/// Everything else is `Unresolvable`, including ranges; the day/month match
/// requires exactly two remaining words so "30 AUG - 2 SEP" never
/// half-resolves to its first date.
pub fn resolve_date(token: &str, reference_year: i32) -> ResolvedDate {
    let lower = token.trim().to_lowercase();

    if lower.starts_with("every") {
        for (name, weekday) in WEEKDAY_NAMES {
            if lower.contains(name) {
                return ResolvedDate::Recurring(*weekday);
            }
        }
        return ResolvedDate::Unresolvable;
    }

    let mut words: Vec<&str> = lower.split_whitespace().collect();
    if let Some(first) = words.first()
        && is_weekday_word(first)
    {
        words.remove(0);
    }
    if words.len() != 2 {
        return ResolvedDate::Unresolvable;
    }

    let day_str = words[0];
    if day_str.is_empty() || day_str.len() > 2 {
        return ResolvedDate::Unresolvable;
    }
    let Ok(day) = day_str.parse::<u32>() else {
        return ResolvedDate::Unresolvable;
    };
    let Some(month) = parse_month_abbrev(words[1]) else {
        return ResolvedDate::Unresolvable;
    };

    match NaiveDate::from_ymd_opt(reference_year, month, day) {
        Some(date) => ResolvedDate::Specific(date),
        // e.g. "31 FEB"
        None => ResolvedDate::Unresolvable,
    }
}

fn parse_month_abbrev(word: &str) -> Option<u32> {
    let word = word.trim_end_matches('.');
    if word.len() < 3 {
        return None;
    }
    MONTH_ABBREVS
        .iter()
        .position(|m| word.starts_with(m))
        .map(|idx| idx as u32 + 1)
}

/// "sat", "sat." and "saturday" all count; bare numbers do not.
fn is_weekday_word(word: &str) -> bool {
    let word = word.trim_end_matches('.');
    word.len() >= 3 && WEEKDAY_NAMES.iter().any(|(name, _)| name.starts_with(word))
}

/// True when the token textually names a weekend day.
///
/// This test deliberately works on the raw token, not on `ResolvedDate`:
/// day-type filtering must also cover recurring tokens ("Every Saturday")
/// and prose tokens whose weekday appears textually but never resolves.
pub fn is_weekend_token(token: &str) -> bool {
    let lower = token.to_lowercase();
    lower.contains("sat") || lower.contains("sun")
}

/// The day-type axis of the event filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumIter)]
pub enum DayFilter {
    #[default]
    All,
    Weekdays,
    Weekend,
}

impl DayFilter {
    /// Applies the textual day-type test to a raw date token. Tokens with no
    /// day name at all ("30 AUG") count as weekday so they stay visible
    /// under the default-leaning filter instead of vanishing under both.
    pub fn matches_token(&self, token: &str) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Weekend => is_weekend_token(token),
            DayFilter::Weekdays => !is_weekend_token(token),
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => write!(f, "All"),
            DayFilter::Weekdays => write!(f, "Weekdays"),
            DayFilter::Weekend => write!(f, "Weekend"),
        }
    }
}
