//! Mood tags chosen by the user for an entry

use crate::error::SereneError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the user says they feel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
    Angry,
    Tired,
}

impl Mood {
    pub const ALL: [Mood; 5] = [Mood::Happy, Mood::Neutral, Mood::Sad, Mood::Angry, Mood::Tired];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Neutral => "Neutral",
            Mood::Sad => "Sad",
            Mood::Angry => "Angry",
            Mood::Tired => "Tired",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Neutral => "😐",
            Mood::Sad => "😔",
            Mood::Angry => "😠",
            Mood::Tired => "😴",
        }
    }

    /// Suggested things to do when feeling this way
    pub fn activities(&self) -> &'static [&'static str] {
        match self {
            Mood::Happy => &[
                "Share your happiness",
                "Practice gratitude",
                "Do something creative",
                "Compliment someone",
                "Try something new",
            ],
            Mood::Neutral => &[
                "Take a short walk",
                "Read a book",
                "Listen to music",
                "Connect with a friend",
                "Try mindfulness",
            ],
            Mood::Sad => &[
                "Practice self-care",
                "Take a walk outside",
                "Call a friend",
                "Listen to uplifting music",
                "Practice gratitude",
            ],
            Mood::Angry => &[
                "Take deep breaths",
                "Write down your feelings",
                "Exercise",
                "Practice meditation",
                "Talk to someone",
            ],
            Mood::Tired => &[
                "Take a power nap",
                "Drink some water",
                "Stretch your body",
                "Get some fresh air",
                "Listen to energizing music",
            ],
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = SereneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "happy" => Ok(Mood::Happy),
            "neutral" => Ok(Mood::Neutral),
            "sad" => Ok(Mood::Sad),
            "angry" => Ok(Mood::Angry),
            "tired" => Ok(Mood::Tired),
            _ => {
                let valid: Vec<&str> = Mood::ALL.iter().map(Mood::as_str).collect();
                Err(SereneError::Validation(format!(
                    "Invalid mood: '{}'. Valid moods are: {}",
                    s,
                    valid.join(", ")
                )))
            }
        }
    }
}
