pub mod api;
pub mod config;
pub mod db;
pub mod repo;
pub mod sampler;
pub mod telemetry;
