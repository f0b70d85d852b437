//! Tracing setup: stdout, optional daily log file, and the in-memory buffer
//! served by the log poll endpoint.

use std::sync::Arc;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::AppConfig;
use crate::core::state::log_buffer::log_buffer_layer::LogBufferLayer;
use crate::core::state::log_buffer::memory_log_buffer::MemoryLogBuffer;

/// Installs the global subscriber. Keep the guard alive for the file writer
/// to flush.
pub fn init_logging(config: &AppConfig, buffer: Arc<MemoryLogBuffer>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "server.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(file_layer)
        .with(LogBufferLayer::new(buffer))
        .init();

    guard
}
