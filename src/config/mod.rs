pub mod error;
pub mod load;
pub mod paths;
pub mod settings;

pub use crate::chat::ChatPolicy;
pub use error::ConfigError;
pub use load::{load_settings_from_path, load_settings_or_default};
pub use paths::{
    default_state_root_path, StatePaths, CHAT_DB_FILE_NAME, DEFAULT_STATE_ROOT_DIR,
    SETTINGS_FILE_NAME, STATE_ROOT_ENV,
};
pub use settings::{
    validate_principal, IdentityConfig, LoggingConfig, Settings, StoreBackend, StoreConfig,
};
