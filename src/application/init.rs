//! Initialize journal use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, JournalRepository};
use std::fs;
use std::path::Path;
use tracing::info;

/// Initialize a new journal at the specified path.
pub fn init(path: &Path, trial_days: i64) -> Result<Config> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let config = Config::new(trial_days);
    config.validate()?;

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;
    repo.save_config(&config)?;

    info!(path = %repo.root().display(), trial_days, "journal_initialized");
    Ok(config)
}
