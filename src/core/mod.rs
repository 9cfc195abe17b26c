pub mod config;
pub mod error;
pub mod mapper;
pub mod models;
