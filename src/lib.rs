pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod mapping;
pub mod matcher;
pub mod store;
