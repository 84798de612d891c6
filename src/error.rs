//! Error types for the timesheet summary generator.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while reading, aggregating and
//! writing a timesheet summary.

use thiserror::Error;

/// The main error type for the timesheet summary generator.
///
/// Every failure aborts the whole run; no partial summary is ever produced.
///
/// # Example
///
/// ```
/// use timesheet_summary::error::SummaryError;
///
/// let error = SummaryError::SchemaError {
///     column: "Rate".to_string(),
/// };
/// assert_eq!(error.to_string(), "Missing required column: Rate");
/// ```
#[derive(Debug, Error)]
pub enum SummaryError {
    /// A cell value could not be interpreted (currency, hours or date).
    #[error("Invalid {column} value '{value}' on row {row}")]
    ParseError {
        /// The column the value came from.
        column: String,
        /// The raw text that failed to parse.
        value: String,
        /// The 1-based sheet row of the entry (header is row 1).
        row: usize,
    },

    /// A required column is absent from the input.
    #[error("Missing required column: {column}")]
    SchemaError {
        /// The name of the missing column.
        column: String,
    },

    /// The input contained no time entries.
    #[error("No time entries to process")]
    EmptyInput,

    /// A sum or product left the range a decimal amount can hold.
    #[error("Amount overflow: {context}")]
    Overflow {
        /// What was being computed when the overflow happened.
        context: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was missing or out of range.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The input or output path has an extension we cannot handle.
    #[error("Unsupported file format: {path}")]
    UnsupportedFormat {
        /// The path with the unsupported extension.
        path: String,
    },

    /// The input file could not be opened or decoded.
    #[error("Failed to read input '{path}': {message}")]
    InputRead {
        /// The input path.
        path: String,
        /// A description of the read failure.
        message: String,
    },

    /// The summary could not be written.
    #[error("Failed to write output '{path}': {message}")]
    OutputWrite {
        /// The output path.
        path: String,
        /// A description of the write failure.
        message: String,
    },
}

/// A type alias for Results that return SummaryError.
pub type SummaryResult<T> = Result<T, SummaryError>;
