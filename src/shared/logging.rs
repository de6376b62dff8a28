use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only JSON-lines event log. A disabled log drops every event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    path: Option<PathBuf>,
}

impl EventLog {
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn info(&self, event: &str, fields: &[(&str, Value)]) {
        self.append("info", event, fields);
    }

    pub fn error(&self, event: &str, fields: &[(&str, Value)]) {
        self.append("error", event, fields);
    }

    fn append(&self, level: &str, event: &str, fields: &[(&str, Value)]) {
        let Some(path) = &self.path else {
            return;
        };
        let _ = append_event(path, level, event, fields);
    }
}

pub fn append_event(
    path: &Path,
    level: &str,
    event: &str,
    fields: &[(&str, Value)],
) -> Result<(), std::io::Error> {
    let mut payload = Map::new();
    payload.insert("timestamp".to_string(), Value::from(super::now_secs()));
    payload.insert("level".to_string(), Value::String(level.to_string()));
    payload.insert("event".to_string(), Value::String(event.to_string()));
    for (key, value) in fields {
        payload.insert((*key).to_string(), value.clone());
    }

    let line = serde_json::to_string(&payload)
        .map_err(|source| std::io::Error::other(source.to_string()))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    writeln!(file, "{line}")
}
