//! In-memory log collector polled by the log endpoint

pub mod log_buffer_layer;
pub mod log_buffer_trait;
pub mod log_entry;
pub mod memory_log_buffer;
