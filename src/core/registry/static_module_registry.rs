use crate::config::ModuleKeysConfig;

use super::module_registry_trait::ModuleRegistry;

/// Module keys fixed at startup from configuration.
pub struct StaticModuleRegistry {
    keys: ModuleKeysConfig,
}

impl StaticModuleRegistry {
    pub fn new(keys: ModuleKeysConfig) -> Self {
        Self { keys }
    }
}

impl ModuleRegistry for StaticModuleRegistry {
    fn compression_modules(&self) -> Vec<String> {
        self.keys.compression.clone()
    }

    fn encryption_modules(&self) -> Vec<String> {
        self.keys.encryption.clone()
    }

    fn backend_modules(&self) -> Vec<String> {
        self.keys.backend.clone()
    }

    fn generic_modules(&self) -> Vec<String> {
        self.keys.generic.clone()
    }
}
