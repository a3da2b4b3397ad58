//! Calendar and dashboard aggregation over entries

use crate::domain::entry::Entry;
use crate::domain::mood::Mood;
use crate::domain::sentiment::SentimentLabel;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Entries written on one day
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarDay {
    pub count: usize,
    pub moods: Vec<Mood>,
}

/// Group entries by UTC day within `from..=to`.
///
/// Moods keep the order in which entries are given.
pub fn build_calendar(
    entries: &[Entry],
    from: NaiveDate,
    to: NaiveDate,
) -> BTreeMap<NaiveDate, CalendarDay> {
    let mut days: BTreeMap<NaiveDate, CalendarDay> = BTreeMap::new();

    for entry in entries {
        let day = entry.date.date_naive();
        if day < from || day > to {
            continue;
        }
        let slot = days.entry(day).or_default();
        slot.count += 1;
        slot.moods.push(entry.mood);
    }

    days
}

pub fn mood_counts(entries: &[Entry]) -> BTreeMap<Mood, usize> {
    let mut counts = BTreeMap::new();
    for entry in entries {
        *counts.entry(entry.mood).or_insert(0) += 1;
    }
    counts
}

pub fn sentiment_counts(entries: &[Entry]) -> BTreeMap<SentimentLabel, usize> {
    let mut counts = BTreeMap::new();
    for entry in entries {
        *counts.entry(entry.sentiment).or_insert(0) += 1;
    }
    counts
}
