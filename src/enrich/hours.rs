//! Selecting and cleaning today's opening-hours text.

use chrono::Weekday;

use crate::models::place::HOURS_UNAVAILABLE;

/// Number of entries in a complete weekday text array.
const DAYS_PER_WEEK: usize = 7;

/// Map a calendar day to its slot in a Monday-first weekday array.
///
/// Sunday (day 0 of a Sunday-first week) lands on slot 6, Monday through
/// Saturday on slots 0 to 5.
pub fn weekday_index(day: Weekday) -> usize {
    match day.num_days_from_sunday() {
        0 => 6,
        n => (n - 1) as usize,
    }
}

/// Strip the leading "Monday:" style label from one weekday entry.
///
/// Everything after the first colon is kept, trimmed. Entries without a colon
/// are trimmed as a whole; if that leaves nothing the hours are unavailable.
pub fn strip_day_label(entry: &str) -> String {
    match entry.split_once(':') {
        Some((_, rest)) => rest.trim().to_string(),
        None => match entry.trim() {
            "" => HOURS_UNAVAILABLE.to_string(),
            trimmed => trimmed.to_string(),
        },
    }
}

/// Today's hours from a Monday-first weekday array.
///
/// Arrays that do not hold exactly one entry per day cannot be indexed
/// reliably and yield "Hours unavailable", as does a missing array.
pub fn today_hours(weekday_text: Option<&[String]>, today: Weekday) -> String {
    weekday_text
        .filter(|days| days.len() == DAYS_PER_WEEK)
        .and_then(|days| days.get(weekday_index(today)))
        .map(|entry| strip_day_label(entry))
        .unwrap_or_else(|| HOURS_UNAVAILABLE.to_string())
}
