//! User registration use case

use crate::domain::User;
use crate::error::{Result, SereneError};
use crate::infrastructure::{FileSystemRepository, JournalRepository};
use chrono::{DateTime, Utc};
use tracing::info;

pub struct RegisterService {
    repository: FileSystemRepository,
}

impl RegisterService {
    pub fn new(repository: FileSystemRepository) -> Self {
        RegisterService { repository }
    }

    /// Register a user with a trial of the configured length.
    /// Usernames and email addresses are unique.
    pub fn register(
        &self,
        username: &str,
        email: &str,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<User> {
        let config = self.repository.load_config()?;
        let user = User::new(username, email, name, config.trial_days, now)?;

        if self.repository.user_exists(&user.username) {
            return Err(SereneError::AlreadyExists(format!(
                "Username already exists: {}",
                user.username
            )));
        }
        if self
            .repository
            .list_users()?
            .iter()
            .any(|existing| existing.email == user.email)
        {
            return Err(SereneError::AlreadyExists(format!(
                "Email already registered: {}",
                user.email
            )));
        }

        self.repository.save_user(&user)?;
        info!(
            username = %user.username,
            trial_end = %user.trial_end_date.to_rfc3339(),
            "user_registered"
        );
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::Config;
    use chrono::{Duration, TimeZone};
    use tempfile::TempDir;

    fn setup(trial_days: i64) -> (TempDir, RegisterService) {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        repo.save_config(&Config::new(trial_days)).unwrap();
        (temp, RegisterService::new(repo))
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_register_uses_configured_trial() {
        let (_temp, service) = setup(7);
        let user = service.register("ada", "ada@example.com", "Ada", now()).unwrap();
        assert_eq!(user.trial_end_date, now() + Duration::days(7));
        assert!(user.is_in_trial);
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let (_temp, service) = setup(30);
        service.register("ada", "ada@example.com", "", now()).unwrap();

        let err = service
            .register("ada", "other@example.com", "", now())
            .unwrap_err();
        assert!(err.to_string().contains("Username already exists"));
    }

    #[test]
    fn test_duplicate_email_rejected_case_insensitively() {
        let (_temp, service) = setup(30);
        service.register("ada", "ada@example.com", "", now()).unwrap();

        let err = service
            .register("bob", "ADA@example.com", "", now())
            .unwrap_err();
        assert!(err.to_string().contains("Email already registered"));
    }

    #[test]
    fn test_invalid_input_rejected() {
        let (_temp, service) = setup(30);
        assert!(matches!(
            service.register("x", "ada@example.com", "", now()),
            Err(SereneError::Validation(_))
        ));
        assert!(matches!(
            service.register("ada", "nope", "", now()),
            Err(SereneError::Validation(_))
        ));
    }
}
