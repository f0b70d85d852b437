//! Web API response layer for the backup server: JSON/JSONP framing with a
//! single header commit, log polling and listing, and tag aggregation.

pub mod api;
pub mod app_state;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod routes;
