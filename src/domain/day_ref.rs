//! Day references used to select entries ("today", "last friday", "17-01-2025")

use crate::error::{Result, SereneError};
use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// A day relative to a base date. Journal entries only look backwards, so
/// every reference resolves to the base date or earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DayReference {
    Today,
    Yesterday,
    /// Most recent occurrence, today included
    Weekday(Weekday),
    /// Most recent occurrence strictly before today
    LastWeekday(Weekday),
    Date(NaiveDate),
}

impl DayReference {
    pub fn parse(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();

        if let Some(day) = parse_weekday(&normalized) {
            return Ok(DayReference::Weekday(day));
        }

        match normalized.as_str() {
            "today" | "now" => Ok(DayReference::Today),
            "yesterday" => Ok(DayReference::Yesterday),
            _ if normalized.starts_with("last ") => parse_weekday(&normalized[5..])
                .map(DayReference::LastWeekday)
                .ok_or_else(|| invalid(input)),
            _ => parse_date(&normalized).map(DayReference::Date),
        }
    }

    pub fn resolve(&self, base_date: NaiveDate) -> NaiveDate {
        match self {
            DayReference::Today => base_date,
            DayReference::Yesterday => base_date - Duration::days(1),
            DayReference::Weekday(target) => base_date - Duration::days(days_back(base_date, *target)),
            DayReference::LastWeekday(target) => {
                let back = match days_back(base_date, *target) {
                    0 => 7,
                    n => n,
                };
                base_date - Duration::days(back)
            }
            DayReference::Date(date) => *date,
        }
    }
}

/// Parse a DD-MM-YYYY date
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%d-%m-%Y").map_err(|_| invalid(input))
}

fn invalid(input: &str) -> SereneError {
    SereneError::Validation(format!(
        "Invalid date format: '{}'. Use today, yesterday, a weekday or DD-MM-YYYY",
        input
    ))
}

fn parse_weekday(name: &str) -> Option<Weekday> {
    match name {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

fn days_back(base_date: NaiveDate, target: Weekday) -> i64 {
    ((base_date.weekday().num_days_from_monday() + 7 - target.num_days_from_monday()) % 7) as i64
}
