//! Core data models for the timesheet summary generator.
//!
//! This module contains the raw time entries read from an export and the
//! summary rows produced from them.

mod entry;
mod summary_row;

pub use entry::{GroupKey, RawEntry, RawRate};
pub use summary_row::{PayType, SUMMARY_COLUMNS, SummaryRecord, SummaryRow, SummaryTotals};
