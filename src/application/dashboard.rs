//! Dashboard and calendar views

use crate::domain::{
    build_calendar, mood_counts, sentiment_counts, Access, CalendarDay, Entry, Mood,
    SentimentLabel, User,
};
use crate::error::{Result, SereneError};
use crate::infrastructure::FileSystemRepository;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use std::collections::BTreeMap;

/// Entries shown on the dashboard
pub const RECENT_ENTRIES: usize = 5;

/// Default calendar window in days
pub const CALENDAR_DAYS: i64 = 30;

/// Widest calendar window, about ten years
pub const MAX_CALENDAR_DAYS: i64 = 3650;

#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub user: User,
    pub access: Access,
    pub total_entries: usize,
    pub recent: Vec<Entry>,
    pub moods: BTreeMap<Mood, usize>,
    pub sentiments: BTreeMap<SentimentLabel, usize>,
    /// Mood the suggestions are for: the latest entry's, or Neutral
    pub current_mood: Mood,
    pub activities: &'static [&'static str],
}

pub struct DashboardService {
    repository: FileSystemRepository,
}

impl DashboardService {
    pub fn new(repository: FileSystemRepository) -> Self {
        DashboardService { repository }
    }

    pub fn summary(&self, username: &str, now: DateTime<Utc>) -> Result<DashboardSummary> {
        let user = self.repository.load_user(username)?;
        let subscriptions = self.repository.load_subscriptions(username)?;
        let mut entries = self.repository.list_entries(username)?;
        entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

        let current_mood = entries.first().map_or(Mood::Neutral, |e| e.mood);

        Ok(DashboardSummary {
            access: user.access(&subscriptions, now),
            current_mood,
            activities: current_mood.activities(),
            user,
            total_entries: entries.len(),
            moods: mood_counts(&entries),
            sentiments: sentiment_counts(&entries),
            recent: entries.into_iter().take(RECENT_ENTRIES).collect(),
        })
    }

    /// Per-day entry counts and moods for the last `days` days, today included.
    /// `days` must be within `1..=MAX_CALENDAR_DAYS`.
    pub fn calendar(
        &self,
        username: &str,
        days: i64,
        now: DateTime<Utc>,
    ) -> Result<BTreeMap<NaiveDate, CalendarDay>> {
        let out_of_range = || {
            SereneError::Validation(format!(
                "Calendar window must be 1 to {} days, got {}",
                MAX_CALENDAR_DAYS, days
            ))
        };
        if !(1..=MAX_CALENDAR_DAYS).contains(&days) {
            return Err(out_of_range());
        }
        let start = TimeDelta::try_days(days)
            .and_then(|window| now.checked_sub_signed(window))
            .ok_or_else(out_of_range)?;

        self.repository.load_user(username)?;
        let entries = self.repository.list_entries(username)?;

        Ok(build_calendar(&entries, start.date_naive(), now.date_naive()))
    }
}
