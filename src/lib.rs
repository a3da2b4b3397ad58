//! serene - Mood journal with lexicon-based sentiment tagging
//!
//! Users write short journal entries tagged with a mood. Each entry also gets
//! a Positive / Neutral / Negative label derived from its text, and writing
//! entries is gated behind a free trial or a subscription.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod server;

pub use domain::{classify, SentimentLabel};
pub use error::SereneError;
