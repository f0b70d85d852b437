/// Read-only view of the loaded module keys.
pub trait ModuleRegistry {
    fn compression_modules(&self) -> Vec<String>;
    fn encryption_modules(&self) -> Vec<String>;
    fn backend_modules(&self) -> Vec<String>;
    fn generic_modules(&self) -> Vec<String>;

    /// Keys of all four categories, in category order.
    fn all_module_keys(&self) -> Vec<String> {
        let mut keys = self.compression_modules();
        keys.extend(self.encryption_modules());
        keys.extend(self.backend_modules());
        keys.extend(self.generic_modules());
        keys
    }
}
