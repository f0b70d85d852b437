pub mod database;
pub mod dump;
