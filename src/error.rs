//! Error types for serene

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for serene application
#[derive(Debug, Error)]
pub enum SereneError {
    #[error("Not a serene directory: {0}")]
    NotSereneDirectory(PathBuf),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Entry not found: {0}")]
    EntryNotFound(u64),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Lexicon error: {0}")]
    Lexicon(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl SereneError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SereneError::NotSereneDirectory(_) => 2,
            SereneError::Validation(_) | SereneError::AlreadyExists(_) => 3,
            SereneError::UserNotFound(_) | SereneError::EntryNotFound(_) => 4,
            SereneError::AccessDenied(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            SereneError::NotSereneDirectory(path) => {
                format!(
                    "Not a serene directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'serene init' in this directory to create a new journal\n\
                    • Navigate to an existing serene directory\n\
                    • Set SERENE_ROOT environment variable to your journal path",
                    path.display()
                )
            }
            SereneError::UserNotFound(name) => {
                format!(
                    "User not found: '{}'\n\n\
                    Suggestions:\n\
                    • Register first: serene register {} --email you@example.com\n\
                    • Pass --user or set SERENE_USER to an existing username",
                    name, name
                )
            }
            SereneError::EntryNotFound(id) => {
                format!(
                    "Entry not found: {}\n\n\
                    Suggestions:\n\
                    • Use 'serene list' to see your entries and their ids",
                    id
                )
            }
            SereneError::AccessDenied(msg) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Your trial has ended; subscribe to keep journaling\n\
                    • serene subscribe --plan monthly",
                    msg
                )
            }
            SereneError::Validation(msg) => {
                if msg.contains("Invalid mood") {
                    format!(
                        "Invalid input: {}\n\n\
                        Example: serene add --mood happy \"a calm morning\"",
                        msg
                    )
                } else if msg.contains("date format") {
                    format!(
                        "Invalid input: {}\n\n\
                        Expected format: DD-MM-YYYY\n\
                        Example: serene list --from 17-01-2025 --to 31-01-2025",
                        msg
                    )
                } else {
                    self.to_string()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using SereneError
pub type Result<T> = std::result::Result<T, SereneError>;
