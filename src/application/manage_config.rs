//! Config management use case

use crate::error::{Result, SereneError};
use crate::infrastructure::{Config, FileSystemRepository, JournalRepository};

const VALID_KEYS: &str = "trial_days, server.host, server.port, created";

/// Service for managing journal configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "trial_days" => Ok(config.trial_days.to_string()),
            "server.host" => Ok(config.server.host),
            "server.port" => Ok(config.server.port.to_string()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(SereneError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: {}",
                key, VALID_KEYS
            ))),
        }
    }

    /// Set a config value. Existing users keep their trial end date.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "trial_days" => {
                config.trial_days = value.parse().map_err(|_| {
                    SereneError::Config(format!("trial_days must be a number, got '{}'", value))
                })?;
            }
            "server.host" => {
                config.server.host = value.to_string();
            }
            "server.port" => {
                config.server.port = value.parse().map_err(|_| {
                    SereneError::Config(format!("server.port must be 0-65535, got '{}'", value))
                })?;
            }
            "created" => {
                return Err(SereneError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(SereneError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: {}",
                    key, VALID_KEYS
                )));
            }
        }

        config.validate()?;
        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ConfigService) {
        let temp = TempDir::new().unwrap();
        let repo = FileSystemRepository::new(temp.path().to_path_buf());
        repo.initialize().unwrap();
        repo.save_config(&Config::new(30)).unwrap();
        (temp, ConfigService::new(repo))
    }

    #[test]
    fn test_get_values() {
        let (_temp, service) = setup();
        assert_eq!(service.get("trial_days").unwrap(), "30");
        assert_eq!(service.get("server.port").unwrap(), "5000");
        assert!(service.get("mode").is_err());
    }

    #[test]
    fn test_set_values() {
        let (_temp, service) = setup();
        service.set("trial_days", "14").unwrap();
        service.set("server.port", "8080").unwrap();
        service.set("server.host", "0.0.0.0").unwrap();

        let config = service.list().unwrap();
        assert_eq!(config.trial_days, 14);
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let (_temp, service) = setup();
        assert!(service.set("trial_days", "soon").is_err());
        assert!(service.set("trial_days", "-1").is_err());
        assert!(service.set("server.port", "70000").is_err());
        assert!(service.set("created", "2025-01-01T00:00:00Z").is_err());
        assert_eq!(service.get("trial_days").unwrap(), "30");
    }
}
