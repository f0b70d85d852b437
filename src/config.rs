//! Environment-driven server configuration (`.env` is honoured via dotenvy).

use std::env;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "0.0.0.0:8200";
pub const DEFAULT_DB_PATH: &str = "data/server.sqlite";
pub const DEFAULT_LOG_BUFFER_CAPACITY: usize = 2000;

const DEFAULT_COMPRESSION_MODULES: &[&str] = &["zip", "7z"];
const DEFAULT_ENCRYPTION_MODULES: &[&str] = &["aes", "gpg"];
const DEFAULT_BACKEND_MODULES: &[&str] = &[
    "file", "ftp", "ssh", "webdav", "s3", "azure", "googledrive", "onedrive", "b2",
];
const DEFAULT_GENERIC_MODULES: &[&str] = &["sendmail", "sendhttp", "runscript", "console-password-input"];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: String,
    pub db_path: String,
    pub log_dir: Option<PathBuf>,
    pub log_buffer_capacity: usize,
    pub modules: ModuleKeysConfig,
    /// Fallbacks taken while reading the environment. Logging is not up yet
    /// at that point, so `main` reports them once the subscriber is installed.
    pub warnings: Vec<String>,
}

/// Registered module keys per category.
#[derive(Debug, Clone, Default)]
pub struct ModuleKeysConfig {
    pub compression: Vec<String>,
    pub encryption: Vec<String>,
    pub backend: Vec<String>,
    pub generic: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut warnings = Vec::new();
        let log_buffer_capacity =
            parse_capacity(env::var("BACKUP_API_LOG_BUFFER_CAPACITY").ok(), &mut warnings);

        Self {
            bind: env::var("BACKUP_API_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string()),
            db_path: env::var("BACKUP_API_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string()),
            log_dir: env::var("BACKUP_API_LOG_DIR")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            log_buffer_capacity,
            modules: ModuleKeysConfig {
                compression: module_keys("BACKUP_API_MODULES_COMPRESSION", DEFAULT_COMPRESSION_MODULES),
                encryption: module_keys("BACKUP_API_MODULES_ENCRYPTION", DEFAULT_ENCRYPTION_MODULES),
                backend: module_keys("BACKUP_API_MODULES_BACKEND", DEFAULT_BACKEND_MODULES),
                generic: module_keys("BACKUP_API_MODULES_GENERIC", DEFAULT_GENERIC_MODULES),
            },
            warnings,
        }
    }
}

fn parse_capacity(raw: Option<String>, warnings: &mut Vec<String>) -> usize {
    let Some(raw) = raw else {
        return DEFAULT_LOG_BUFFER_CAPACITY;
    };

    match raw.trim().parse::<usize>() {
        Ok(v) if v > 0 => v,
        _ => {
            warnings.push(format!(
                "Invalid BACKUP_API_LOG_BUFFER_CAPACITY {raw:?}, using default {DEFAULT_LOG_BUFFER_CAPACITY}"
            ));
            DEFAULT_LOG_BUFFER_CAPACITY
        }
    }
}

fn module_keys(var: &str, defaults: &[&str]) -> Vec<String> {
    match env::var(var) {
        Ok(raw) => split_list(&raw),
        Err(_) => defaults.iter().map(|s| s.to_string()).collect(),
    }
}

/// Splits a comma-separated list, dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}
