pub mod log_data_service;
