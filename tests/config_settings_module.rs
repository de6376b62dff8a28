use retrochat::config::{
    load_settings_from_path, load_settings_or_default, ChatPolicy, ConfigError, Settings,
    StatePaths, StoreBackend,
};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn settings_parse_every_section_from_yaml() {
    let settings: Settings = serde_yaml::from_str(
        r#"
store:
  backend: memory
identity:
  principal: ada@example.com
  display_name: Ada
policy:
  require_membership_to_post: false
  unique_members: false
logging:
  enabled: false
"#,
    )
    .expect("parse settings");

    assert_eq!(settings.store.backend, StoreBackend::Memory);
    assert_eq!(settings.identity.principal.as_deref(), Some("ada@example.com"));
    assert_eq!(settings.identity.display_name.as_deref(), Some("Ada"));
    assert_eq!(settings.policy, ChatPolicy::permissive());
    assert!(!settings.logging.enabled);
    settings.validate().expect("valid");
}

#[test]
fn settings_partial_sections_fall_back_to_defaults() {
    let settings: Settings = serde_yaml::from_str(
        r#"
policy:
  unique_members: false
"#,
    )
    .expect("parse settings");

    assert_eq!(settings.store.backend, StoreBackend::Sqlite);
    assert!(settings.policy.require_membership_to_post);
    assert!(!settings.policy.unique_members);
    assert!(settings.logging.enabled);
}

#[test]
fn settings_validation_rejects_bad_principal_and_store_path() {
    let mut settings = Settings::default();
    settings.identity.principal = Some("ada lovelace".to_string());
    assert!(matches!(settings.validate(), Err(ConfigError::Settings(_))));

    let mut settings = Settings::default();
    settings.store.path = Some(PathBuf::from("relative/chats.sqlite3"));
    assert!(matches!(settings.validate(), Err(ConfigError::Settings(_))));

    let mut settings = Settings::default();
    settings.store.backend = StoreBackend::Memory;
    settings.store.path = Some(PathBuf::from("/tmp/chats.sqlite3"));
    assert!(matches!(settings.validate(), Err(ConfigError::Settings(_))));
}

#[test]
fn settings_load_validates_file_contents() {
    let temp = tempdir().expect("tempdir");
    let paths = StatePaths::new(temp.path());
    fs::write(paths.settings_file(), "identity:\n  principal: \"   \"\n").expect("write");

    let err = load_settings_from_path(&paths.settings_file()).expect_err("invalid");
    assert!(err.to_string().contains("identity.principal"));
    assert!(load_settings_or_default(&paths.settings_file()).is_err());
}

#[test]
fn state_paths_bootstrap_creates_data_and_log_directories() {
    let temp = tempdir().expect("tempdir");
    let paths = StatePaths::new(temp.path().join("state"));
    paths.bootstrap().expect("bootstrap");

    assert!(paths.data_dir().is_dir());
    assert!(paths.logs_dir().is_dir());
    assert_eq!(
        paths.event_log_path(),
        temp.path().join("state/logs/retrochat.log")
    );
}
