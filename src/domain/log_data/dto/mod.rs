pub mod log_poll_request;
