//! API route declarations (e.g., /api/v1/*)

pub mod endpoints_routes;
pub mod log_data_routes;
pub mod tags_routes;
