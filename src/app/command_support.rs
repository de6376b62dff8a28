use crate::chat::ChatService;
use crate::config::{
    default_state_root_path, load_settings_or_default, Settings, StatePaths, StoreBackend,
};
use crate::identity::{principal_override_from_env, resolve_configured_identity};
use crate::interpreter::Interpreter;
use crate::shared::logging::EventLog;
use crate::store::{ChatStore, InMemoryChatStore, SqliteChatStore};
use std::sync::Arc;

/// Everything a CLI command needs to run chat commands.
pub struct ChatRuntime {
    pub paths: StatePaths,
    pub settings: Settings,
    pub interpreter: Interpreter,
    pub log: EventLog,
}

pub fn ensure_state_root() -> Result<StatePaths, String> {
    let root = default_state_root_path().map_err(|e| e.to_string())?;
    let paths = StatePaths::new(root);
    paths.bootstrap().map_err(|e| e.to_string())?;
    Ok(paths)
}

pub fn load_settings(paths: &StatePaths) -> Result<Settings, String> {
    load_settings_or_default(&paths.settings_file()).map_err(|e| e.to_string())
}

pub fn open_store(settings: &Settings, paths: &StatePaths) -> Result<Arc<dyn ChatStore>, String> {
    match settings.store.backend {
        StoreBackend::Memory => Ok(Arc::new(InMemoryChatStore::new())),
        StoreBackend::Sqlite => {
            let path = settings.resolve_store_path(paths);
            let store = SqliteChatStore::open(&path).map_err(|e| e.to_string())?;
            Ok(Arc::new(store))
        }
    }
}

pub fn event_log(settings: &Settings, paths: &StatePaths) -> EventLog {
    if settings.logging.enabled {
        EventLog::to_file(paths.event_log_path())
    } else {
        EventLog::disabled()
    }
}

pub fn build_runtime(
    paths: StatePaths,
    settings: Settings,
    principal_override: Option<String>,
) -> Result<ChatRuntime, String> {
    let store = open_store(&settings, &paths)?;
    let identity = resolve_configured_identity(&settings.identity, principal_override)
        .map_err(|e| e.to_string())?;
    let identity = Arc::new(identity);
    let log = event_log(&settings, &paths);
    let service = ChatService::new(store, identity, settings.policy).with_log(log.clone());
    let interpreter = Interpreter::new(service).with_log(log.clone());
    Ok(ChatRuntime {
        paths,
        settings,
        interpreter,
        log,
    })
}

/// Runtime for the current environment: default state root, its settings
/// file, and the `RETROCHAT_PRINCIPAL` override.
pub fn load_runtime() -> Result<ChatRuntime, String> {
    let paths = ensure_state_root()?;
    let settings = load_settings(&paths)?;
    build_runtime(paths, settings, principal_override_from_env())
}
