//! User profiles and trial bookkeeping

use crate::domain::subscription::Subscription;
use crate::error::{Result, SereneError};
use chrono::{DateTime, TimeDelta, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

fn username_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.-]{3,64}$").unwrap())
}

fn email_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

/// Whether a user may currently write entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Subscribed,
    Trial { days_left: i64 },
    Expired,
}

impl Access {
    pub fn allows_journaling(&self) -> bool {
        !matches!(self, Access::Expired)
    }

    pub fn describe(&self) -> String {
        match self {
            Access::Subscribed => "subscribed".to_string(),
            Access::Trial { days_left: 1 } => "trial (1 day left)".to_string(),
            Access::Trial { days_left } => format!("trial ({} days left)", days_left),
            Access::Expired => "trial expired".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub is_in_trial: bool,
    pub trial_end_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a validated user whose trial runs `trial_days` from `now`
    pub fn new(
        username: &str,
        email: &str,
        name: &str,
        trial_days: i64,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        validate_username(username)?;
        validate_email(email)?;
        validate_name(name)?;

        let trial_end_date = TimeDelta::try_days(trial_days)
            .and_then(|trial| now.checked_add_signed(trial))
            .ok_or_else(|| {
                SereneError::Validation(format!("Trial of {} days is out of range", trial_days))
            })?;

        Ok(User {
            username: username.to_string(),
            email: email.trim().to_lowercase(),
            name: name.trim().to_string(),
            is_in_trial: true,
            trial_end_date,
            created_at: now,
        })
    }

    /// Access at `now`. Only a subscription inside its current period counts,
    /// so a lapsed monthly plan falls back to the trial state.
    pub fn access(&self, subscriptions: &[Subscription], now: DateTime<Utc>) -> Access {
        if subscriptions.iter().any(|s| s.is_current(now)) {
            return Access::Subscribed;
        }
        if self.is_in_trial && self.trial_end_date > now {
            return Access::Trial {
                days_left: self.trial_days_left(now),
            };
        }
        Access::Expired
    }

    /// Whole days until the trial ends, never negative
    pub fn trial_days_left(&self, now: DateTime<Utc>) -> i64 {
        (self.trial_end_date - now).num_days().max(0)
    }
}

pub fn validate_username(username: &str) -> Result<()> {
    if username_regex().is_match(username) {
        Ok(())
    } else {
        Err(SereneError::Validation(format!(
            "Invalid username: '{}'. Use 3 to 64 letters, digits, '.', '_' or '-'",
            username
        )))
    }
}

pub fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    if email.chars().count() <= 120 && email_regex().is_match(email) {
        Ok(())
    } else {
        Err(SereneError::Validation(format!(
            "Invalid email address: '{}'",
            email
        )))
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().chars().count() > 120 {
        return Err(SereneError::Validation(
            "Name must be less than 120 characters".to_string(),
        ));
    }
    Ok(())
}
