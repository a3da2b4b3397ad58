//! Subscription periods

use crate::error::{Result, SereneError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Monthly,
    Annual,
}

impl Plan {
    /// Length of one billing period
    pub fn period(&self) -> Duration {
        match self {
            Plan::Monthly => Duration::days(30),
            Plan::Annual => Duration::days(365),
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Plan::Monthly => f.pad("monthly"),
            Plan::Annual => f.pad("annual"),
        }
    }
}

impl FromStr for Plan {
    type Err = SereneError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(Plan::Monthly),
            "annual" | "yearly" => Ok(Plan::Annual),
            _ => Err(SereneError::Validation(format!(
                "Invalid plan: '{}'. Valid plans are: monthly, annual",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Canceled,
    PastDue,
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionStatus::Active => f.pad("active"),
            SubscriptionStatus::Canceled => f.pad("canceled"),
            SubscriptionStatus::PastDue => f.pad("past_due"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub plan: Plan,
    pub status: SubscriptionStatus,
    pub current_period_start: DateTime<Utc>,
    pub current_period_end: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    /// Open an active subscription whose first period starts now
    pub fn start(plan: Plan, now: DateTime<Utc>) -> Self {
        Subscription {
            plan,
            status: SubscriptionStatus::Active,
            current_period_start: now,
            current_period_end: now + plan.period(),
            created_at: now,
        }
    }

    pub fn cancel(&mut self) {
        self.status = SubscriptionStatus::Canceled;
    }

    /// Status as seen at `now`. Nothing renews a period, so an active
    /// subscription whose period has ended is past due.
    pub fn status_at(&self, now: DateTime<Utc>) -> SubscriptionStatus {
        match self.status {
            SubscriptionStatus::Active if now >= self.current_period_end => {
                SubscriptionStatus::PastDue
            }
            status => status,
        }
    }

    /// Active and inside its current period
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.status_at(now) == SubscriptionStatus::Active && self.current_period_start <= now
    }
}
