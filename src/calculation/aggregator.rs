//! The timesheet aggregator.
//!
//! Turns raw time entries into sorted summary rows: one Overtime row and one
//! Regular row per employee/activity group.

use std::collections::BTreeSet;
use std::time::Instant;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::SummaryConfig;
use crate::error::{SummaryError, SummaryResult};
use crate::models::{GroupKey, PayType, RawEntry, SummaryRecord, SummaryRow, SummaryTotals};

use super::grouping::group_entries;
use super::ordering::sort_rows;
use super::pay_resolution::{PayResolution, resolve_pay};

/// Aggregates time entries into billing summary rows.
///
/// # Example
///
/// ```
/// use timesheet_summary::calculation::TimesheetAggregator;
/// use timesheet_summary::config::SummaryConfig;
/// use timesheet_summary::models::{RawEntry, RawRate};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let entry = RawEntry {
///     row: 2,
///     last_name: "Doe".to_string(),
///     first_name: "Jane".to_string(),
///     job_description: "Plant Expansion".to_string(),
///     activity_code: "100;EXT".to_string(),
///     activity_description: "Exterior".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
///     earning_category: "Regular".to_string(),
///     hours: Decimal::new(8, 0),
///     rate: RawRate::from("$25.00"),
/// };
///
/// let aggregator = TimesheetAggregator::new(SummaryConfig::new("2277"));
/// let records = aggregator.summarize(&[entry]).unwrap();
///
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[0].pay_type, "Overtime");
/// assert_eq!(records[1].total, " $200.00");
/// ```
#[derive(Debug, Clone)]
pub struct TimesheetAggregator {
    config: SummaryConfig,
}

impl TimesheetAggregator {
    /// Creates an aggregator for one run.
    pub fn new(config: SummaryConfig) -> Self {
        Self { config }
    }

    /// Returns the run configuration.
    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    /// Aggregates entries into sorted summary rows.
    ///
    /// # Errors
    ///
    /// - `EmptyInput` when `entries` is empty, or every entry has a blank
    ///   grouping column
    /// - `ParseError` when a representative rate is not a currency amount
    /// - `Overflow` when hours, rates or totals exceed the decimal range
    ///
    /// Any error aborts the whole aggregation; no rows are returned.
    pub fn aggregate(&self, entries: &[RawEntry]) -> SummaryResult<Vec<SummaryRow>> {
        if entries.is_empty() {
            return Err(SummaryError::EmptyInput);
        }

        let start_time = Instant::now();
        self.warn_unknown_categories(entries);

        let groups = group_entries(entries);
        if groups.is_empty() {
            return Err(SummaryError::EmptyInput);
        }
        let mut rows = Vec::with_capacity(groups.len() * 2);

        for (key, group) in &groups {
            let pay = resolve_pay(group, &self.config)?;
            debug!(
                employee = %key.employee_name(),
                activity_code = %key.activity_code,
                entries = group.len(),
                regular_rate = %pay.regular_rate,
                regular_rate_source = ?pay.regular_rate_source,
                overtime_rate = %pay.overtime_rate,
                overtime_rate_source = ?pay.overtime_rate_source,
                "Resolved group pay"
            );

            let [overtime, regular] = self.build_rows(key, group, &pay)?;
            rows.push(overtime);
            rows.push(regular);
        }

        sort_rows(&mut rows);

        let totals = SummaryTotals::from_rows(&rows)?;
        info!(
            invoice_id = %self.config.invoice_id,
            entries = entries.len(),
            groups = totals.group_count,
            rows = totals.row_count,
            regular_hours = %totals.regular_hours,
            overtime_hours = %totals.overtime_hours,
            billed_amount = %totals.billed_amount,
            duration_us = start_time.elapsed().as_micros(),
            "Aggregated timesheet"
        );

        Ok(rows)
    }

    /// Aggregates entries and renders the rows for output.
    pub fn summarize(&self, entries: &[RawEntry]) -> SummaryResult<Vec<SummaryRecord>> {
        Ok(self
            .aggregate(entries)?
            .iter()
            .map(SummaryRow::to_record)
            .collect())
    }

    /// Builds the Overtime row then the Regular row for one group.
    fn build_rows(
        &self,
        key: &GroupKey,
        group: &[&RawEntry],
        pay: &PayResolution,
    ) -> SummaryResult<[SummaryRow; 2]> {
        // A group always has at least one entry.
        let week_ending = group
            .iter()
            .map(|e| e.date)
            .max()
            .unwrap_or(NaiveDate::MIN);

        let base = SummaryRow {
            invoice_id: self.config.invoice_id.clone(),
            employee: key.employee_name(),
            job_name: key.job_description.clone(),
            activity_code: key.activity_code.clone(),
            activity_description: key.activity_description.clone(),
            job_number: key.job_number().to_string(),
            week_ending,
            pay_type: PayType::Overtime,
            hours: pay.overtime_hours,
            burdened_rate: pay.overtime_rate,
            total: line_total(key, PayType::Overtime, pay.overtime_hours, pay.overtime_rate)?,
        };

        let regular = SummaryRow {
            pay_type: PayType::Regular,
            hours: pay.regular_hours,
            burdened_rate: pay.regular_rate,
            total: line_total(key, PayType::Regular, pay.regular_hours, pay.regular_rate)?,
            ..base.clone()
        };

        Ok([base, regular])
    }

    fn warn_unknown_categories(&self, entries: &[RawEntry]) {
        let unknown: BTreeSet<&str> = entries
            .iter()
            .map(|e| e.earning_category.as_str())
            .filter(|c| *c != self.config.regular_label && *c != self.config.overtime_label)
            .collect();

        for category in unknown {
            warn!(
                category = %category,
                "Earning category is neither regular nor overtime; its hours are not billed"
            );
        }
    }
}

fn line_total(
    key: &GroupKey,
    pay_type: PayType,
    hours: Decimal,
    rate: Decimal,
) -> SummaryResult<Decimal> {
    hours
        .checked_mul(rate)
        .ok_or_else(|| SummaryError::Overflow {
            context: format!(
                "{pay_type} total of {}, activity {}",
                key.employee_name(),
                key.activity_code
            ),
        })
}
