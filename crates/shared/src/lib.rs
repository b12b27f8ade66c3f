//! Ambient concerns shared by the workspace binaries.

pub mod config;
pub mod telemetry;
