//! File system repository
//!
//! Layout under the journal root:
//!
//! ```text
//! .serene/config.toml
//! users/<username>/profile.toml
//! users/<username>/subscriptions.toml
//! users/<username>/entries/<id>.toml
//! ```
//!
//! `.serene/state.toml` holds the last entry id handed out.

use crate::domain::user::validate_username;
use crate::domain::{Entry, Subscription, User};
use crate::error::{Result, SereneError};
use crate::infrastructure::Config;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Abstract repository for journal operations
pub trait JournalRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .serene/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .serene/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .serene directory exists
    fn is_initialized(&self) -> bool;

    /// Create .serene directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of JournalRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct JournalState {
    #[serde(default)]
    last_entry_id: u64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SubscriptionFile {
    #[serde(default, rename = "subscription")]
    subscriptions: Vec<Subscription>,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover journal root by walking up from current directory
    /// First checks SERENE_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("SERENE_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_serene_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(SereneError::Config(format!(
                    "SERENE_ROOT is set to '{}' but no .serene directory found. \
                    Run 'serene init' in that directory or unset SERENE_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover journal root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_serene_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(SereneError::NotSereneDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_serene_dir(path: &Path) -> bool {
        path.join(".serene").is_dir()
    }
}

impl JournalRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_serene_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let serene_dir = self.root.join(".serene");

        if serene_dir.exists() {
            return Err(SereneError::AlreadyExists(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&serene_dir)?;
        fs::create_dir_all(self.users_dir())?;
        Ok(())
    }
}

// Users
impl FileSystemRepository {
    fn users_dir(&self) -> PathBuf {
        self.root.join("users")
    }

    /// Directory of one user. Names that could never be registered are
    /// rejected before they reach the filesystem.
    fn user_dir(&self, username: &str) -> Result<PathBuf> {
        validate_username(username)
            .map_err(|_| SereneError::UserNotFound(username.to_string()))?;
        Ok(self.users_dir().join(username))
    }

    fn profile_path(&self, username: &str) -> Result<PathBuf> {
        Ok(self.user_dir(username)?.join("profile.toml"))
    }

    pub fn user_exists(&self, username: &str) -> bool {
        self.profile_path(username).is_ok_and(|path| path.is_file())
    }

    pub fn load_user(&self, username: &str) -> Result<User> {
        let path = self.profile_path(username)?;
        if !path.is_file() {
            return Err(SereneError::UserNotFound(username.to_string()));
        }
        read_toml(&path)
    }

    pub fn save_user(&self, user: &User) -> Result<()> {
        write_toml_atomic(&self.profile_path(&user.username)?, user)
    }

    /// All registered users, sorted by username
    pub fn list_users(&self) -> Result<Vec<User>> {
        let dir = self.users_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut users = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let Ok(entry) = entry else {
                continue;
            };
            let profile = entry.path().join("profile.toml");
            if profile.is_file() {
                users.push(read_toml::<User>(&profile)?);
            }
        }

        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    pub fn load_subscriptions(&self, username: &str) -> Result<Vec<Subscription>> {
        let path = self.user_dir(username)?.join("subscriptions.toml");
        if !path.is_file() {
            return Ok(Vec::new());
        }
        let file: SubscriptionFile = read_toml(&path)?;
        Ok(file.subscriptions)
    }

    pub fn save_subscriptions(&self, username: &str, subscriptions: &[Subscription]) -> Result<()> {
        let path = self.user_dir(username)?.join("subscriptions.toml");
        let file = SubscriptionFile {
            subscriptions: subscriptions.to_vec(),
        };
        write_toml_atomic(&path, &file)
    }
}

// Entries
impl FileSystemRepository {
    fn entries_dir(&self, username: &str) -> Result<PathBuf> {
        Ok(self.user_dir(username)?.join("entries"))
    }

    fn entry_path(&self, username: &str, id: u64) -> Result<PathBuf> {
        Ok(self.entries_dir(username)?.join(format!("{}.toml", id)))
    }

    fn state_path(&self) -> PathBuf {
        self.root.join(".serene").join("state.toml")
    }

    /// Id of an entry file, if the path looks like one
    fn entry_id_from_path(path: &Path) -> Option<u64> {
        if path.extension()?.to_str()? != "toml" {
            return None;
        }
        path.file_stem()?.to_str()?.parse().ok()
    }

    /// Entry files below `dir`
    fn entry_files(dir: &Path) -> Vec<(u64, PathBuf)> {
        if !dir.is_dir() {
            return Vec::new();
        }

        WalkDir::new(dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .path()
                    .parent()
                    .and_then(|p| p.file_name())
                    .is_some_and(|name| name == "entries")
            })
            .filter_map(|entry| {
                Self::entry_id_from_path(entry.path()).map(|id| (id, entry.into_path()))
            })
            .collect()
    }

    /// Reserve the next entry id. Ids are global across users and a
    /// deleted id is never handed out again.
    pub fn next_entry_id(&self) -> Result<u64> {
        let path = self.state_path();
        let mut state: JournalState = if path.is_file() {
            read_toml(&path)?
        } else {
            JournalState::default()
        };

        // Entry files the counter has not seen still count
        let highest_on_disk = Self::entry_files(&self.users_dir())
            .iter()
            .map(|(id, _)| *id)
            .max()
            .unwrap_or(0);

        let id = state.last_entry_id.max(highest_on_disk) + 1;
        state.last_entry_id = id;
        write_toml_atomic(&path, &state)?;
        Ok(id)
    }

    pub fn save_entry(&self, entry: &Entry) -> Result<()> {
        write_toml_atomic(&self.entry_path(&entry.username, entry.id)?, entry)
    }

    pub fn load_entry(&self, username: &str, id: u64) -> Result<Entry> {
        let path = self.entry_path(username, id)?;
        if !path.is_file() {
            return Err(SereneError::EntryNotFound(id));
        }
        read_toml(&path)
    }

    pub fn delete_entry(&self, username: &str, id: u64) -> Result<()> {
        let path = self.entry_path(username, id)?;
        if !path.is_file() {
            return Err(SereneError::EntryNotFound(id));
        }
        fs::remove_file(path)?;
        Ok(())
    }

    /// All entries of one user, unordered
    pub fn list_entries(&self, username: &str) -> Result<Vec<Entry>> {
        let files = Self::entry_files(&self.entries_dir(username)?);
        debug!(username, count = files.len(), "entries_scanned");

        files.iter().map(|(_, path)| read_toml(path)).collect()
    }
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// Write using a best-effort atomic replace:
/// write to a temp file in the same directory, then rename into place.
fn write_toml_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let contents = toml::to_string_pretty(value)?;

    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_name = format!(
        "{}.serene-tmp-{}",
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("record.toml"),
        std::process::id()
    );
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, contents)?;

    // rename does not overwrite on Windows
    if cfg!(windows) && path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&tmp_path, path)?;
    Ok(())
}
