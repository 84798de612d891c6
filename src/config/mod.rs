//! Configuration loading and management for a summary run.
//!
//! This module provides the run parameters (invoice id, overtime fallback
//! multiplier, earning category labels, output location) and loading them
//! from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use timesheet_summary::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./summary.yaml").unwrap();
//! println!("Invoice: {}", config.invoice_id);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DEFAULT_OUTPUT_PATH, SummaryConfig};
