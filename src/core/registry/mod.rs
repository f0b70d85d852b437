//! Registered pluggable modules, by category

pub mod module_registry_trait;
pub mod static_module_registry;
