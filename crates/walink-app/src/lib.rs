pub mod config;
pub mod error;
pub mod generation_service;
pub mod history_store;
pub mod messages;
