//! Lexicon-based sentiment classification
//!
//! Text is lowercased, stripped of every character that is neither a word
//! character nor a separator, and split on separators. Separators are Unicode
//! whitespace plus the ASCII information separators U+001C..U+001F. Each token found in the
//! positive or negative word list counts once per occurrence; the larger count
//! wins and a tie (including no hits at all) is neutral.

use crate::error::{Result, SereneError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

const POSITIVE_WORDS: &[&str] = &[
    "happy",
    "joy",
    "love",
    "excited",
    "grateful",
    "thankful",
    "good",
    "great",
    "excellent",
    "amazing",
    "wonderful",
    "beautiful",
    "accomplished",
    "peaceful",
    "calm",
    "relaxed",
    "content",
    "pleased",
    "delighted",
    "cheerful",
    "hopeful",
];

const NEGATIVE_WORDS: &[&str] = &[
    "sad",
    "angry",
    "upset",
    "depressed",
    "anxious",
    "worried",
    "hate",
    "dislike",
    "bad",
    "terrible",
    "awful",
    "miserable",
    "stressed",
    "frustrated",
    "annoyed",
    "disappointed",
    "unhappy",
    "hurt",
    "lonely",
    "grief",
    "pain",
    "fear",
    "scared",
];

const fn same_word(a: &str, b: &str) -> bool {
    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}

const fn disjoint(left: &[&str], right: &[&str]) -> bool {
    let mut i = 0;
    while i < left.len() {
        let mut j = 0;
        while j < right.len() {
            if same_word(left[i], right[j]) {
                return false;
            }
            j += 1;
        }
        i += 1;
    }
    true
}

const _: () = assert!(
    disjoint(POSITIVE_WORDS, NEGATIVE_WORDS),
    "a word cannot be both positive and negative"
);

/// Matches anything that is not a word character or separator
fn punctuation_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[^\w\s\x1C-\x1F]").unwrap())
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1C}'..='\u{1F}').contains(&c)
}

/// Split text into case-folded tokens with punctuation removed.
///
/// Punctuation is deleted before splitting, so `"don't"` is the single token
/// `"dont"`.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    punctuation_regex()
        .replace_all(&lowered, "")
        .split(is_separator)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Coarse sentiment of a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = SereneError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(SentimentLabel::Positive),
            "neutral" => Ok(SentimentLabel::Neutral),
            "negative" => Ok(SentimentLabel::Negative),
            _ => Err(SereneError::Validation(format!(
                "Invalid sentiment: '{}'. Valid sentiments are: Positive, Neutral, Negative",
                s
            ))),
        }
    }
}

/// Positive and negative word sets; a token never belongs to both
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexicon {
    positive: HashSet<String>,
    negative: HashSet<String>,
}

impl Lexicon {
    /// The built-in word lists, created once per process
    pub fn builtin() -> &'static Lexicon {
        static LEXICON: OnceLock<Lexicon> = OnceLock::new();
        LEXICON.get_or_init(|| Lexicon {
            positive: POSITIVE_WORDS.iter().map(|w| w.to_string()).collect(),
            negative: NEGATIVE_WORDS.iter().map(|w| w.to_string()).collect(),
        })
    }

    /// Built-in lexicon extended with extra words.
    ///
    /// Extra words are normalized like journal text. Each must reduce to
    /// exactly one token, and the result must keep the two sets disjoint.
    pub fn with_extra(positive: &[String], negative: &[String]) -> Result<Lexicon> {
        let mut lexicon = Self::builtin().clone();

        for word in positive {
            lexicon.positive.insert(Self::normalize_word(word)?);
        }
        for word in negative {
            lexicon.negative.insert(Self::normalize_word(word)?);
        }

        if let Some(word) = lexicon.positive.intersection(&lexicon.negative).min() {
            return Err(SereneError::Lexicon(format!(
                "'{}' is listed as both positive and negative",
                word
            )));
        }

        Ok(lexicon)
    }

    fn normalize_word(word: &str) -> Result<String> {
        let mut tokens = tokenize(word);
        match tokens.len() {
            1 => Ok(tokens.remove(0)),
            _ => Err(SereneError::Lexicon(format!(
                "'{}' does not normalize to a single word",
                word
            ))),
        }
    }

    pub fn is_positive(&self, token: &str) -> bool {
        self.positive.contains(token)
    }

    pub fn is_negative(&self, token: &str) -> bool {
        self.negative.contains(token)
    }

    /// Classify text against this lexicon
    pub fn classify(&self, text: &str) -> SentimentLabel {
        let (positive, negative) = self.tally(text);

        match positive.cmp(&negative) {
            Ordering::Greater => SentimentLabel::Positive,
            Ordering::Less => SentimentLabel::Negative,
            Ordering::Equal => SentimentLabel::Neutral,
        }
    }

    fn tally(&self, text: &str) -> (usize, usize) {
        tokenize(text)
            .iter()
            .fold((0, 0), |(pos, neg), token| {
                if self.is_positive(token) {
                    (pos + 1, neg)
                } else if self.is_negative(token) {
                    (pos, neg + 1)
                } else {
                    (pos, neg)
                }
            })
    }
}

/// Classify text with the built-in lexicon
pub fn classify(text: &str) -> SentimentLabel {
    Lexicon::builtin().classify(text)
}
