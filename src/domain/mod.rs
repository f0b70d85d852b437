//! Endpoint use cases

pub mod log_data;
pub mod tags;
