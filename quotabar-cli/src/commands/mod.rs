//! CLI command implementations.

pub mod config;
pub mod pace;
pub mod providers;
pub mod status;
