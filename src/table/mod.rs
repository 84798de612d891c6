//! Tabular input and output.
//!
//! Reads time entries from CSV files and spreadsheets, and writes the
//! finished summary as an `.xlsx` workbook, CSV or JSON.

mod reader;
mod writer;

pub use reader::{InputFormat, REQUIRED_COLUMNS, read_csv, read_entries};
pub use writer::{OutputFormat, SUMMARY_SHEET, write_csv, write_json, write_summary, write_xlsx};
