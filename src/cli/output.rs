//! Output formatting utilities

use crate::application::DashboardSummary;
use crate::domain::{CalendarDay, Entry, Mood, SentimentLabel, Subscription};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;

const PREVIEW_CHARS: usize = 48;

/// Format a list of entries for display
pub fn format_entry_list(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&format!(
            "{:>4}  {}  {} {:<7}  {:<8}  {}\n",
            entry.id,
            entry.date.format("%d-%m-%Y %H:%M"),
            entry.mood.emoji(),
            entry.mood,
            entry.sentiment,
            entry.preview(PREVIEW_CHARS)
        ));
    }
    output
}

/// Format a single entry with its full text
pub fn format_entry(entry: &Entry) -> String {
    format!(
        "Entry {}\nDate:      {}\nMood:      {} {}\nSentiment: {}\n\n{}\n",
        entry.id,
        entry.date.format("%d-%m-%Y %H:%M UTC"),
        entry.mood.emoji(),
        entry.mood,
        entry.sentiment,
        entry.text.trim_end()
    )
}

pub fn format_calendar(calendar: &BTreeMap<NaiveDate, CalendarDay>) -> String {
    if calendar.is_empty() {
        return "No entries in this period".to_string();
    }

    let mut output = String::new();
    for (day, slot) in calendar.iter().rev() {
        let moods: Vec<&str> = slot.moods.iter().map(Mood::emoji).collect();
        output.push_str(&format!(
            "{}  {} {}  {}\n",
            day.format("%d-%m-%Y"),
            slot.count,
            if slot.count == 1 { "entry  " } else { "entries" },
            moods.join(" ")
        ));
    }
    output
}

/// Suggested activities for a mood, one per line
pub fn format_activities(mood: Mood, activities: &[&str]) -> String {
    let mut output = format!("Suggestions for feeling {} {}:\n", mood.emoji(), mood);
    for activity in activities {
        output.push_str(&format!("  - {}\n", activity));
    }
    output
}

/// Subscription history, oldest first, with status as of `now`
pub fn format_subscriptions(subscriptions: &[Subscription], now: DateTime<Utc>) -> String {
    if subscriptions.is_empty() {
        return "No subscriptions".to_string();
    }

    let mut output = String::new();
    for subscription in subscriptions {
        output.push_str(&format!(
            "{:<8} {:<9} {} - {}\n",
            subscription.plan,
            subscription.status_at(now),
            subscription.current_period_start.format("%d-%m-%Y"),
            subscription.current_period_end.format("%d-%m-%Y")
        ));
    }
    output
}

pub fn format_dashboard(summary: &DashboardSummary) -> String {
    let user = &summary.user;
    let display_name = if user.name.is_empty() {
        user.username.as_str()
    } else {
        user.name.as_str()
    };

    let mut output = format!(
        "{}  ({})\nStatus: {}\nEntries: {}\n",
        display_name,
        user.email,
        summary.access.describe(),
        summary.total_entries
    );

    if !summary.moods.is_empty() {
        output.push_str("\nMoods:\n");
        for (mood, count) in &summary.moods {
            output.push_str(&format!("  {} {:<7} {}\n", mood.emoji(), mood, count));
        }
    }

    if !summary.sentiments.is_empty() {
        output.push_str("\nSentiment:\n");
        for label in [
            SentimentLabel::Positive,
            SentimentLabel::Neutral,
            SentimentLabel::Negative,
        ] {
            let count = summary.sentiments.get(&label).copied().unwrap_or(0);
            output.push_str(&format!("  {:<8} {}\n", label, count));
        }
    }

    output.push('\n');
    output.push_str(&format_activities(summary.current_mood, summary.activities));

    output.push_str("\nRecent:\n");
    output.push_str(&format_entry_list(&summary.recent));
    output
}
