//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading run
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{SummaryError, SummaryResult};

use super::types::SummaryConfig;

/// Loads summary run configuration.
///
/// # Example
///
/// ```no_run
/// use timesheet_summary::config::ConfigLoader;
///
/// let config = ConfigLoader::load("./summary.yaml")?;
/// println!("Invoice: {}", config.invoice_id);
/// # Ok::<(), timesheet_summary::error::SummaryError>(())
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// The loaded configuration is not validated here, since command line
    /// flags may still fill in or override fields. Call
    /// [`SummaryConfig::validate`] once the configuration is complete.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if the file cannot be read
    /// - `ConfigParseError` if the file is not valid YAML for [`SummaryConfig`]
    pub fn load<P: AsRef<Path>>(path: P) -> SummaryResult<SummaryConfig> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| SummaryError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: SummaryConfig =
            serde_yaml::from_str(&content).map_err(|e| SummaryError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        debug!(path = %path_str, invoice_id = %config.invoice_id, "Loaded configuration");
        Ok(config)
    }
}
