//! Configuration management

use crate::domain::Lexicon;
use crate::error::{Result, SereneError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_TRIAL_DAYS: i64 = 30;

/// Longest configurable trial, roughly a century
pub const MAX_TRIAL_DAYS: i64 = 36_500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_trial_days")]
    pub trial_days: i64,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub lexicon: LexiconConfig,
}

/// Address the preview service listens on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Words added on top of the built-in lexicon. Only affects entries
/// classified after the change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconConfig {
    #[serde(default)]
    pub extra_positive: Vec<String>,
    #[serde(default)]
    pub extra_negative: Vec<String>,
}

fn default_trial_days() -> i64 {
    DEFAULT_TRIAL_DAYS
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Create a new config with default values
    pub fn new(trial_days: i64) -> Self {
        Config {
            trial_days,
            created: Utc::now(),
            server: ServerConfig::default(),
            lexicon: LexiconConfig::default(),
        }
    }

    /// Load config from .serene/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(".serene").join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SereneError::NotSereneDirectory(path.to_path_buf())
            } else {
                SereneError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| SereneError::Config(format!("Failed to parse config.toml: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to .serene/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let serene_dir = path.join(".serene");
        let config_path = serene_dir.join("config.toml");

        if !serene_dir.exists() {
            fs::create_dir(&serene_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| SereneError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !(0..=MAX_TRIAL_DAYS).contains(&self.trial_days) {
            return Err(SereneError::Config(format!(
                "trial_days must be between 0 and {} (got {})",
                MAX_TRIAL_DAYS, self.trial_days
            )));
        }
        self.lexicon()?;
        Ok(())
    }

    /// The classifier lexicon, including configured extra words
    pub fn lexicon(&self) -> Result<Lexicon> {
        if self.lexicon.extra_positive.is_empty() && self.lexicon.extra_negative.is_empty() {
            return Ok(Lexicon::builtin().clone());
        }
        Lexicon::with_extra(&self.lexicon.extra_positive, &self.lexicon.extra_negative)
    }

    /// "host:port" for the preview service
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
