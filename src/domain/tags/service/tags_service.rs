use std::collections::BTreeSet;
use std::sync::Arc;

use crate::core::persistence::database::backing_store_trait::BackingStore;
use crate::core::registry::module_registry_trait::ModuleRegistry;
use crate::errors::{database_error, AppError};

pub struct TagsService<S: BackingStore, R: ModuleRegistry> {
    store: Arc<S>,
    registry: Arc<R>,
}

impl<S: BackingStore, R: ModuleRegistry> TagsService<S, R> {
    pub fn new(store: Arc<S>, registry: Arc<R>) -> Self {
        Self { store, registry }
    }

    /// Lower-cased union of every module key and every backup tag.
    pub async fn get_tags(&self) -> Result<Vec<String>, AppError> {
        let backup_tags = self.store.backup_tags().map_err(database_error)?;

        let tags: BTreeSet<String> = self
            .registry
            .all_module_keys()
            .into_iter()
            .chain(backup_tags.into_iter().flatten())
            .map(|t| t.to_lowercase())
            .collect();

        Ok(tags.into_iter().collect())
    }
}
