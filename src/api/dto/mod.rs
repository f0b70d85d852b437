//! Query-string DTOs; every field is a raw optional string

pub mod log_data_dto;
