pub mod adapters;
pub mod config;
pub mod domain;
pub mod form;
pub mod telemetry;
