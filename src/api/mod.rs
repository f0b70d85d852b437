//! HTTP surface: controllers, query DTOs, routes, response framing

pub mod controller;
pub mod dto;
pub mod routes;
pub mod util;
