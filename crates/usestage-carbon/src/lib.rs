pub mod config;
pub mod error;
pub mod reporting;
pub mod sources;
pub mod telemetry;
