pub mod config;
pub mod date_range;
pub mod error;
pub mod ingest;
pub mod kitting;
pub mod pour;
