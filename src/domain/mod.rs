//! Domain layer - Business logic and domain models

pub mod calendar;
pub mod day_ref;
pub mod entry;
pub mod mood;
pub mod sentiment;
pub mod subscription;
pub mod user;

pub use calendar::{build_calendar, mood_counts, sentiment_counts, CalendarDay};
pub use day_ref::{parse_date, DayReference};
pub use entry::{validate_entry_text, Entry, MAX_ENTRY_CHARS};
pub use mood::Mood;
pub use sentiment::{classify, tokenize, Lexicon, SentimentLabel};
pub use subscription::{Plan, Subscription, SubscriptionStatus};
pub use user::{Access, User};
