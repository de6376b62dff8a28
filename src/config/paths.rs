use crate::config::ConfigError;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_STATE_ROOT_DIR: &str = ".retrochat";
pub const STATE_ROOT_ENV: &str = "RETROCHAT_HOME";
pub const SETTINGS_FILE_NAME: &str = "config.yaml";
pub const CHAT_DB_FILE_NAME: &str = "chats.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePaths {
    pub root: PathBuf,
}

impl StatePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn required_directories(&self) -> Vec<PathBuf> {
        vec![self.data_dir(), self.logs_dir()]
    }

    pub fn settings_file(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE_NAME)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join("data")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    pub fn default_chat_db_path(&self) -> PathBuf {
        self.data_dir().join(CHAT_DB_FILE_NAME)
    }

    pub fn event_log_path(&self) -> PathBuf {
        self.logs_dir().join("retrochat.log")
    }

    pub fn bootstrap(&self) -> Result<(), ConfigError> {
        for path in self.required_directories() {
            fs::create_dir_all(&path).map_err(|source| ConfigError::CreateDir {
                path: path.display().to_string(),
                source,
            })?;
        }
        Ok(())
    }
}

pub fn default_state_root_path() -> Result<PathBuf, ConfigError> {
    if let Some(root) = std::env::var_os(STATE_ROOT_ENV).filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(root));
    }
    let home = std::env::var_os("HOME").ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(PathBuf::from(home).join(DEFAULT_STATE_ROOT_DIR))
}
