use super::{ConfigError, StatePaths};
use crate::chat::ChatPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct IdentityConfig {
    pub principal: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
    #[serde(default)]
    pub policy: ChatPolicy,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(principal) = &self.identity.principal {
            validate_principal("identity.principal", principal)?;
        }
        if let Some(path) = &self.store.path {
            if self.store.backend == StoreBackend::Memory {
                return Err(ConfigError::Settings(
                    "`store.path` is only valid with the sqlite backend".to_string(),
                ));
            }
            if !path.is_absolute() {
                return Err(ConfigError::Settings(
                    "`store.path` must be an absolute path".to_string(),
                ));
            }
        }
        Ok(())
    }

    pub fn resolve_store_path(&self, paths: &StatePaths) -> PathBuf {
        self.store
            .path
            .clone()
            .unwrap_or_else(|| paths.default_chat_db_path())
    }
}

/// A principal is one non-empty token.
pub fn validate_principal(field: &str, principal: &str) -> Result<(), ConfigError> {
    if principal.trim().is_empty() {
        return Err(ConfigError::Settings(format!(
            "`{field}` must be non-empty when set"
        )));
    }
    if principal.chars().any(char::is_whitespace) {
        return Err(ConfigError::Settings(format!(
            "`{field}` must not contain whitespace"
        )));
    }
    Ok(())
}

fn default_true() -> bool {
    true
}
