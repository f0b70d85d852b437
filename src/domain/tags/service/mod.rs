pub mod tags_service;
