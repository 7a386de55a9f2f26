pub mod config;
pub mod database;
pub mod dump;
pub mod engine;
pub mod error;
