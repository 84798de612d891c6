//! Calculation logic for the timesheet summary.
//!
//! This module contains the aggregation pipeline: currency parsing and
//! formatting, grouping entries by employee and activity, resolving hours and
//! rates per group (with the overtime rate fallback), and ordering the
//! resulting summary rows.

mod aggregator;
mod currency;
mod grouping;
mod ordering;
mod pay_resolution;

pub use aggregator::TimesheetAggregator;
pub use currency::{clean_currency, format_currency, format_hours, format_total};
pub use grouping::group_entries;
pub use ordering::sort_rows;
pub use pay_resolution::{PayResolution, RateSource, resolve_pay};
