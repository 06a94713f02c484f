//! Schema module - Configuration and reporting types for evolution runs.

mod config;
mod evolution;

pub use config::*;
pub use evolution::*;
