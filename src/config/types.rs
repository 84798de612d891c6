//! Configuration types for a summary run.
//!
//! This module contains the strongly-typed run parameters that are
//! deserialized from a YAML configuration file or assembled from the
//! command line.

use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{SummaryError, SummaryResult};

/// Default output file name.
pub const DEFAULT_OUTPUT_PATH: &str = "timesheet_summary.xlsx";

/// Parameters for one summary run.
///
/// Every field except `invoice_id` has a default, so a configuration file
/// may be as small as:
///
/// ```yaml
/// invoice_id: "2277"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SummaryConfig {
    /// Invoice identifier stamped on every row.
    #[serde(default)]
    pub invoice_id: String,
    /// Multiplier applied to the regular rate when a group has no overtime
    /// entry to take an overtime rate from.
    #[serde(default = "default_overtime_multiplier")]
    pub overtime_fallback_multiplier: Decimal,
    /// Earning category text identifying regular entries.
    #[serde(default = "default_regular_label")]
    pub regular_label: String,
    /// Earning category text identifying overtime entries.
    #[serde(default = "default_overtime_label")]
    pub overtime_label: String,
    /// Where the summary is written.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// Worksheet to read from spreadsheet input; the first sheet when unset.
    #[serde(default)]
    pub sheet: Option<String>,
}

fn default_overtime_multiplier() -> Decimal {
    Decimal::new(15, 1)
}

fn default_regular_label() -> String {
    "Regular".to_string()
}

fn default_overtime_label() -> String {
    "Overtime".to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

impl SummaryConfig {
    /// Creates a configuration for the given invoice with default settings.
    ///
    /// # Example
    ///
    /// ```
    /// use timesheet_summary::config::SummaryConfig;
    /// use rust_decimal::Decimal;
    ///
    /// let config = SummaryConfig::new("2277");
    /// assert_eq!(config.invoice_id, "2277");
    /// assert_eq!(config.overtime_fallback_multiplier, Decimal::new(15, 1));
    /// ```
    pub fn new(invoice_id: impl Into<String>) -> Self {
        Self {
            invoice_id: invoice_id.into(),
            overtime_fallback_multiplier: default_overtime_multiplier(),
            regular_label: default_regular_label(),
            overtime_label: default_overtime_label(),
            output_path: default_output_path(),
            sheet: None,
        }
    }

    /// Checks that the configuration can drive a run.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when the invoice id or a category label is
    /// blank, the two labels are equal, or the multiplier is not positive.
    pub fn validate(&self) -> SummaryResult<()> {
        if self.invoice_id.trim().is_empty() {
            return Err(invalid(
                "invoice_id",
                "must not be empty; set it in the configuration file or pass --invoice",
            ));
        }
        if self.overtime_fallback_multiplier <= Decimal::ZERO {
            return Err(invalid(
                "overtime_fallback_multiplier",
                &format!("must be positive, got {}", self.overtime_fallback_multiplier),
            ));
        }
        if self.regular_label.is_empty() {
            return Err(invalid("regular_label", "must not be empty"));
        }
        if self.overtime_label.is_empty() {
            return Err(invalid("overtime_label", "must not be empty"));
        }
        if self.regular_label == self.overtime_label {
            return Err(invalid(
                "overtime_label",
                "must differ from regular_label",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> SummaryError {
    SummaryError::InvalidConfig {
        field: field.to_string(),
        message: message.to_string(),
    }
}
