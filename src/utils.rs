use crate::error::{Result, SalesInsightError};
use crate::schema::{MonthOrdering, SalesRecord};
use chrono::{Datelike, Month, NaiveDate};
use log::warn;
use std::cmp::Ordering;

/// Calendar position of a month label. Labels without a year sort before
/// labels that carry one.
pub type CalendarKey = (Option<i32>, u32);

const INDONESIAN_MONTHS: [(&str, u32); 17] = [
    ("januari", 1),
    ("februari", 2),
    ("maret", 3),
    ("mei", 5),
    ("juni", 6),
    ("juli", 7),
    ("agustus", 8),
    ("agu", 8),
    ("agt", 8),
    ("ags", 8),
    ("oktober", 10),
    ("okt", 10),
    ("desember", 12),
    ("des", 12),
    ("nopember", 11),
    ("nop", 11),
    ("peb", 2),
];

/// Parses a month name in English (full or three-letter) or Indonesian.
pub fn month_number_from_name(name: &str) -> Option<u32> {
    let lowered = name.trim().trim_end_matches('.').to_lowercase();
    if lowered.is_empty() {
        return None;
    }

    if let Ok(month) = lowered.parse::<Month>() {
        return Some(month.number_from_month());
    }

    INDONESIAN_MONTHS
        .iter()
        .find(|(candidate, _)| *candidate == lowered)
        .map(|(_, number)| *number)
}

fn month_number(value: &str) -> Option<u32> {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|m| (1..=12).contains(m))
}

fn year_number(value: &str) -> Option<i32> {
    let value = value.trim();
    if value.len() != 4 {
        return None;
    }
    value.parse::<i32>().ok()
}

/// Parses a month label into its calendar position.
///
/// Accepted forms:
/// - `YYYY-MM` and `YYYY-MM-DD`
/// - `MM/YYYY`
/// - bare month numbers `1` to `12`
/// - month names with an optional trailing year (`Mar`, `March 2024`, `Agustus 2023`)
pub fn parse_month_label(label: &str) -> Option<CalendarKey> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(label, "%Y-%m-%d") {
        return Some((Some(date.year()), date.month()));
    }

    let month_start = format!("{}-01", label);
    if let Ok(date) = NaiveDate::parse_from_str(&month_start, "%Y-%m-%d") {
        return Some((Some(date.year()), date.month()));
    }

    if let Some((month, year)) = label.split_once('/') {
        return match (month_number(month), year_number(year)) {
            (Some(m), Some(y)) => Some((Some(y), m)),
            _ => None,
        };
    }

    if let Some(m) = month_number(label) {
        return Some((None, m));
    }

    let mut parts = label.split_whitespace();
    let name = parts.next()?;
    let year = parts.next();
    if parts.next().is_some() {
        return None;
    }

    let m = month_number_from_name(name)?;
    match year {
        None => Some((None, m)),
        Some(y) => year_number(y).map(|y| (Some(y), m)),
    }
}

/// Compares two month labels under an already resolved ordering.
///
/// Calendar comparison falls back to string order for labels that do not
/// parse, so it stays total.
pub fn compare_months(a: &str, b: &str, ordering: &MonthOrdering) -> Ordering {
    match ordering {
        MonthOrdering::Lexical => a.cmp(b),
        MonthOrdering::Calendar | MonthOrdering::Auto => {
            match (parse_month_label(a), parse_month_label(b)) {
                (Some(ka), Some(kb)) => ka.cmp(&kb),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => a.cmp(b),
            }
        }
    }
}

/// Turns the requested ordering into the one actually applied to a set of
/// labels. `Auto` becomes `Calendar` when every label parses and `Lexical`
/// otherwise; `Calendar` rejects the first label it cannot place.
pub fn resolve_month_ordering<'a, I>(labels: I, requested: &MonthOrdering) -> Result<MonthOrdering>
where
    I: IntoIterator<Item = &'a str>,
{
    match requested {
        MonthOrdering::Lexical => Ok(MonthOrdering::Lexical),
        MonthOrdering::Calendar => {
            for label in labels {
                if parse_month_label(label).is_none() {
                    return Err(SalesInsightError::InvalidMonth(label.to_string()));
                }
            }
            Ok(MonthOrdering::Calendar)
        }
        MonthOrdering::Auto => {
            for label in labels {
                if parse_month_label(label).is_none() {
                    warn!(
                        "Month label '{}' is not a calendar month, falling back to lexical ordering",
                        label
                    );
                    return Ok(MonthOrdering::Lexical);
                }
            }
            Ok(MonthOrdering::Calendar)
        }
    }
}

/// Stable sort of records by month.
pub fn sort_by_month(records: &mut [SalesRecord], ordering: &MonthOrdering) {
    records.sort_by(|a, b| compare_months(&a.month, &b.month, ordering));
}

/// Parses a decimal that may use a comma as its decimal separator ("4,5").
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Formats an amount the way the summary shows it: whole numbers without
/// decimals, everything else with two.
pub fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}
