use super::{ConfigError, Settings};
use std::path::Path;

pub fn load_settings_from_path(path: &Path) -> Result<Settings, ConfigError> {
    let settings = Settings::from_path(path)?;
    settings.validate()?;
    Ok(settings)
}

/// Like [`load_settings_from_path`], but an absent file means defaults.
pub fn load_settings_or_default(path: &Path) -> Result<Settings, ConfigError> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    load_settings_from_path(path)
}
