//! Journal entries

use crate::domain::mood::Mood;
use crate::domain::sentiment::{Lexicon, SentimentLabel};
use crate::error::{Result, SereneError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest accepted entry body, in characters
pub const MAX_ENTRY_CHARS: usize = 5000;

/// A user-authored journal record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: u64,
    pub username: String,
    pub date: DateTime<Utc>,
    pub mood: Mood,
    pub text: String,
    pub sentiment: SentimentLabel,
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Create an entry, classifying the text unless `sentiment` overrides it
    pub fn new(
        id: u64,
        username: &str,
        mood: Mood,
        text: &str,
        sentiment: Option<SentimentLabel>,
        lexicon: &Lexicon,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        validate_entry_text(text)?;

        Ok(Entry {
            id,
            username: username.to_string(),
            date: now,
            mood,
            text: text.to_string(),
            sentiment: sentiment.unwrap_or_else(|| lexicon.classify(text)),
            created_at: now,
        })
    }

    /// Replace mood and text; the sentiment is always recomputed
    pub fn revise(&mut self, mood: Mood, text: &str, lexicon: &Lexicon) -> Result<()> {
        validate_entry_text(text)?;

        self.mood = mood;
        self.text = text.to_string();
        self.sentiment = lexicon.classify(text);
        Ok(())
    }

    /// First line of the text, shortened to `max` characters
    pub fn preview(&self, max: usize) -> String {
        let first_line = self.text.lines().next().unwrap_or("").trim();
        if first_line.chars().count() <= max {
            first_line.to_string()
        } else {
            let cut: String = first_line.chars().take(max).collect();
            format!("{}…", cut.trim_end())
        }
    }
}

/// Entry text must be non-blank and at most 5000 characters
pub fn validate_entry_text(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(SereneError::Validation(
            "Journal entry must not be empty".to_string(),
        ));
    }

    let len = text.chars().count();
    if len > MAX_ENTRY_CHARS {
        return Err(SereneError::Validation(format!(
            "Journal entry must be between 1 and {} characters (got {})",
            MAX_ENTRY_CHARS, len
        )));
    }

    Ok(())
}
