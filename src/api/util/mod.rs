pub mod endpoint_doc;
pub mod json;
pub mod response_writer;
