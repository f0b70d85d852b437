//! Controllers: connect routes to domain services

pub mod endpoints;
pub mod log_data;
pub mod tags;
