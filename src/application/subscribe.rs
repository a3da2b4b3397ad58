//! Subscription use cases

use crate::domain::{Plan, Subscription, SubscriptionStatus};
use crate::error::{Result, SereneError};
use crate::infrastructure::FileSystemRepository;
use chrono::{DateTime, Utc};
use tracing::info;

pub struct SubscriptionService {
    repository: FileSystemRepository,
}

impl SubscriptionService {
    pub fn new(repository: FileSystemRepository) -> Self {
        SubscriptionService { repository }
    }

    /// Start a subscription; ends the user's trial
    pub fn subscribe(&self, username: &str, plan: Plan, now: DateTime<Utc>) -> Result<Subscription> {
        let mut user = self.repository.load_user(username)?;
        let mut subscriptions = self.repository.load_subscriptions(username)?;

        if subscriptions.iter().any(|s| s.is_current(now)) {
            return Err(SereneError::AlreadyExists(format!(
                "'{}' already has an active subscription",
                username
            )));
        }

        let subscription = Subscription::start(plan, now);
        subscriptions.push(subscription.clone());
        self.repository.save_subscriptions(username, &subscriptions)?;

        user.is_in_trial = false;
        self.repository.save_user(&user)?;

        info!(
            username,
            plan = %plan,
            period_end = %subscription.current_period_end.to_rfc3339(),
            "subscription_started"
        );
        Ok(subscription)
    }

    /// Cancel every subscription still in its paid period. Returns how many
    /// were canceled; past-due ones keep their status.
    pub fn cancel(&self, username: &str, now: DateTime<Utc>) -> Result<usize> {
        self.repository.load_user(username)?;
        let mut subscriptions = self.repository.load_subscriptions(username)?;

        let mut canceled = 0;
        for subscription in subscriptions
            .iter_mut()
            .filter(|s| s.status_at(now) == SubscriptionStatus::Active)
        {
            subscription.cancel();
            canceled += 1;
        }

        if canceled == 0 {
            return Err(SereneError::Validation(format!(
                "'{}' has no active subscription",
                username
            )));
        }

        self.repository.save_subscriptions(username, &subscriptions)?;

        info!(username, canceled, "subscription_canceled");
        Ok(canceled)
    }

    /// All subscriptions, oldest first
    pub fn history(&self, username: &str) -> Result<Vec<Subscription>> {
        self.repository.load_user(username)?;
        self.repository.load_subscriptions(username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Access, User};
    use crate::infrastructure::{Config, JournalRepository};
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    fn setup() -> (TempDir, FileSystemRepository, SubscriptionService) {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        repo.save_config(&Config::new(30)).unwrap();
        repo.save_user(&User::new("ada", "ada@example.com", "", 30, now()).unwrap())
            .unwrap();
        let service = SubscriptionService::new(repo.clone());
        (temp, repo, service)
    }

    #[test]
    fn test_subscribe_ends_trial() {
        let (_temp, repo, service) = setup();

        let sub = service.subscribe("ada", Plan::Annual, now()).unwrap();
        assert_eq!(sub.current_period_end, now() + Duration::days(365));

        let user = repo.load_user("ada").unwrap();
        let subscriptions = service.history("ada").unwrap();
        assert!(!user.is_in_trial);
        assert_eq!(
            user.access(&subscriptions, now() + Duration::days(90)),
            Access::Subscribed
        );
    }

    #[test]
    fn test_monthly_access_ends_after_period() {
        let (_temp, repo, service) = setup();
        service.subscribe("ada", Plan::Monthly, now()).unwrap();

        let user = repo.load_user("ada").unwrap();
        let subscriptions = service.history("ada").unwrap();
        let later = now() + Duration::days(31);
        assert_eq!(user.access(&subscriptions, later), Access::Expired);
        assert_eq!(subscriptions[0].status_at(later), SubscriptionStatus::PastDue);

        // A lapsed plan neither blocks a new one nor can be canceled
        assert!(matches!(
            service.cancel("ada", later),
            Err(SereneError::Validation(_))
        ));
        service.subscribe("ada", Plan::Monthly, later).unwrap();
    }

    #[test]
    fn test_subscribe_twice_rejected() {
        let (_temp, _repo, service) = setup();
        service.subscribe("ada", Plan::Monthly, now()).unwrap();

        assert!(matches!(
            service.subscribe("ada", Plan::Monthly, now() + Duration::days(1)),
            Err(SereneError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_cancel_revokes_access() {
        let (_temp, repo, service) = setup();
        service.subscribe("ada", Plan::Monthly, now()).unwrap();

        assert_eq!(service.cancel("ada", now()).unwrap(), 1);

        let user = repo.load_user("ada").unwrap();
        let history = service.history("ada").unwrap();
        assert_eq!(user.access(&history, now()), Access::Expired);

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, SubscriptionStatus::Canceled);
    }

    #[test]
    fn test_cancel_without_subscription() {
        let (_temp, _repo, service) = setup();
        assert!(matches!(
            service.cancel("ada", now()),
            Err(SereneError::Validation(_))
        ));
    }

    #[test]
    fn test_resubscribe_after_cancel() {
        let (_temp, _repo, service) = setup();
        service.subscribe("ada", Plan::Monthly, now()).unwrap();
        service.cancel("ada", now()).unwrap();
        service.subscribe("ada", Plan::Annual, now()).unwrap();

        assert_eq!(service.history("ada").unwrap().len(), 2);
    }
}
