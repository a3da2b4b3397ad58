//! Journal entry use cases
//!
//! Sentiment is derived from the entry text when an entry is created without
//! an explicit label, and always recomputed when the text is edited. Stored
//! labels are otherwise left alone, so a lexicon change only affects entries
//! written or edited afterwards.

use crate::domain::{validate_entry_text, Entry, Lexicon, Mood, SentimentLabel};
use crate::error::{Result, SereneError};
use crate::infrastructure::{FileSystemRepository, JournalRepository};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info};

pub struct JournalService {
    repository: FileSystemRepository,
    lexicon: Lexicon,
}

impl JournalService {
    /// Create a service using the lexicon from the journal config
    pub fn new(repository: FileSystemRepository) -> Result<Self> {
        let lexicon = repository.load_config()?.lexicon()?;
        Ok(Self::with_lexicon(repository, lexicon))
    }

    pub fn with_lexicon(repository: FileSystemRepository, lexicon: Lexicon) -> Self {
        JournalService {
            repository,
            lexicon,
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Write a new entry for `username`.
    ///
    /// Fails with `AccessDenied` once the user's trial has ended without a
    /// subscription.
    pub fn create(
        &self,
        username: &str,
        mood: Mood,
        text: &str,
        sentiment: Option<SentimentLabel>,
        now: DateTime<Utc>,
    ) -> Result<Entry> {
        let user = self.repository.load_user(username)?;
        let subscriptions = self.repository.load_subscriptions(username)?;
        if !user.access(&subscriptions, now).allows_journaling() {
            return Err(SereneError::AccessDenied(format!(
                "'{}' has no active trial or subscription (trial ended {})",
                username,
                user.trial_end_date.format("%d-%m-%Y")
            )));
        }

        // Rejected text must not consume an id
        validate_entry_text(text)?;
        let id = self.repository.next_entry_id()?;
        let entry = Entry::new(id, username, mood, text, sentiment, &self.lexicon, now)?;
        self.repository.save_entry(&entry)?;

        info!(
            username,
            entry_id = entry.id,
            mood = %entry.mood,
            sentiment = %entry.sentiment,
            overridden = sentiment.is_some(),
            "entry_created"
        );
        Ok(entry)
    }

    /// Replace the text (and optionally the mood) of an entry.
    /// The sentiment is recomputed from the new text.
    pub fn edit(&self, username: &str, id: u64, mood: Option<Mood>, text: &str) -> Result<Entry> {
        let mut entry = self.repository.load_entry(username, id)?;
        let previous = entry.sentiment;

        let mood = mood.unwrap_or(entry.mood);
        entry.revise(mood, text, &self.lexicon)?;
        self.repository.save_entry(&entry)?;

        info!(
            username,
            entry_id = id,
            from = %previous,
            to = %entry.sentiment,
            "entry_edited"
        );
        Ok(entry)
    }

    pub fn get(&self, username: &str, id: u64) -> Result<Entry> {
        self.repository.load_entry(username, id)
    }

    pub fn delete(&self, username: &str, id: u64) -> Result<()> {
        self.repository.delete_entry(username, id)?;
        info!(username, entry_id = id, "entry_deleted");
        Ok(())
    }

    /// Entries newest first, optionally restricted to an inclusive date range
    pub fn list(
        &self,
        username: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        limit: Option<usize>,
    ) -> Result<Vec<Entry>> {
        // Listing an unknown user is an error, not an empty journal
        self.repository.load_user(username)?;

        let mut entries = self.repository.list_entries(username)?;

        if let Some(from_date) = from {
            entries.retain(|e| e.date.date_naive() >= from_date);
        }
        if let Some(to_date) = to {
            entries.retain(|e| e.date.date_naive() <= to_date);
        }

        entries.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

        if let Some(n) = limit {
            entries.truncate(n);
        }

        debug!(username, count = entries.len(), "entries_listed");
        Ok(entries)
    }

    /// Entries written on one UTC day
    pub fn entries_on(&self, username: &str, date: NaiveDate) -> Result<Vec<Entry>> {
        self.list(username, Some(date), Some(date), None)
    }
}
