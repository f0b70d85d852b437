use std::sync::Arc;

use anyhow::Result;

use crate::config::AppConfig;
use crate::core::persistence::database::sqlite_store::SqliteStore;
use crate::core::registry::static_module_registry::StaticModuleRegistry;
use crate::core::state::log_buffer::memory_log_buffer::MemoryLogBuffer;
use crate::domain::log_data::service::log_data_service::LogDataService;
use crate::domain::tags::service::tags_service::TagsService;

#[derive(Clone)]
pub struct AppState {
    pub log_data_service: Arc<LogDataService<SqliteStore, MemoryLogBuffer>>,
    pub tags_service: Arc<TagsService<SqliteStore, StaticModuleRegistry>>,
}

/// Opens the database and wires services; `log_buffer` is the one the
/// tracing layer writes into.
pub fn build_app_state(config: &AppConfig, log_buffer: Arc<MemoryLogBuffer>) -> Result<AppState> {
    let store = Arc::new(SqliteStore::new(&config.db_path)?);
    let registry = Arc::new(StaticModuleRegistry::new(config.modules.clone()));

    Ok(assemble(store, log_buffer, registry))
}

fn assemble(
    store: Arc<SqliteStore>,
    log_buffer: Arc<MemoryLogBuffer>,
    registry: Arc<StaticModuleRegistry>,
) -> AppState {
    AppState {
        log_data_service: Arc::new(LogDataService::new(store.clone(), log_buffer)),
        tags_service: Arc::new(TagsService::new(store, registry)),
    }
}

/// In-memory state plus handles to seed the store and the log buffer.
#[cfg(test)]
pub(crate) fn test_state() -> (AppState, Arc<SqliteStore>, Arc<MemoryLogBuffer>) {
    use crate::config::ModuleKeysConfig;

    let store = Arc::new(SqliteStore::new_in_memory().expect("in-memory store"));
    let buffer = Arc::new(MemoryLogBuffer::new(100));
    let registry = Arc::new(StaticModuleRegistry::new(ModuleKeysConfig {
        compression: vec!["zip".into()],
        encryption: vec!["aes".into()],
        backend: vec!["file".into()],
        generic: vec!["sendmail".into()],
    }));

    (assemble(store.clone(), buffer.clone(), registry), store, buffer)
}
