//! Summary row models.
//!
//! This module contains the [`SummaryRow`] produced for every group and pay
//! type, its rendered form [`SummaryRecord`], and the run-level
//! [`SummaryTotals`].

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{format_currency, format_hours, format_total};
use crate::error::{SummaryError, SummaryResult};

/// The pay type of a summary row.
///
/// # Example
///
/// ```
/// use timesheet_summary::models::PayType;
///
/// assert_eq!(PayType::Overtime.to_string(), "Overtime");
/// assert!(PayType::Overtime.sort_rank() < PayType::Regular.sort_rank());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayType {
    /// Overtime hours.
    Overtime,
    /// Regular hours.
    Regular,
}

impl PayType {
    /// Returns the text written to the `PAY TYPE` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            PayType::Overtime => "Overtime",
            PayType::Regular => "Regular",
        }
    }

    /// Overtime rows sort before Regular rows.
    pub fn sort_rank(&self) -> u8 {
        match self {
            PayType::Overtime => 0,
            PayType::Regular => 1,
        }
    }
}

impl fmt::Display for PayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One billed line: a group's Overtime or Regular hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Invoice identifier for the run.
    pub invoice_id: String,
    /// Employee display name, `"First Last"`.
    pub employee: String,
    /// Job name (the entries' job description).
    pub job_name: String,
    /// Activity code.
    pub activity_code: String,
    /// Activity description.
    pub activity_description: String,
    /// Job number derived from the activity code.
    pub job_number: String,
    /// Latest date worked in the group.
    pub week_ending: NaiveDate,
    /// Overtime or Regular.
    pub pay_type: PayType,
    /// Hours of this pay type.
    pub hours: Decimal,
    /// Burdened hourly rate.
    pub burdened_rate: Decimal,
    /// `hours * burdened_rate`, unrounded.
    pub total: Decimal,
}

impl SummaryRow {
    /// Returns the ordering key: invoice, employee, activity code, pay type.
    pub fn sort_key(&self) -> (&str, &str, &str, u8) {
        (
            &self.invoice_id,
            &self.employee,
            &self.activity_code,
            self.pay_type.sort_rank(),
        )
    }

    /// Renders the row with the presentation formatting of each column.
    pub fn to_record(&self) -> SummaryRecord {
        SummaryRecord {
            invoice_id: self.invoice_id.clone(),
            employee: self.employee.clone(),
            job_name: self.job_name.clone(),
            activity_code: self.activity_code.clone(),
            activity_description: self.activity_description.clone(),
            job_number: self.job_number.clone(),
            week_ending: self.week_ending.format("%Y-%m-%d").to_string(),
            pay_type: self.pay_type.to_string(),
            hours: format_hours(self.hours),
            burdened_rate: format_currency(self.burdened_rate),
            total: format_total(self.total),
        }
    }
}

/// A summary row as written to the output table.
///
/// Field names serialize to the exact column headers of the summary sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// `INV #`
    #[serde(rename = "INV #")]
    pub invoice_id: String,
    /// `EMPLOYEE`
    #[serde(rename = "EMPLOYEE")]
    pub employee: String,
    /// `JOB NAME`
    #[serde(rename = "JOB NAME")]
    pub job_name: String,
    /// `Activity Code`
    #[serde(rename = "Activity Code")]
    pub activity_code: String,
    /// `Activity Description`
    #[serde(rename = "Activity Description")]
    pub activity_description: String,
    /// `JOB NUMBER`
    #[serde(rename = "JOB NUMBER")]
    pub job_number: String,
    /// `WEEK ENDING`, as `YYYY-MM-DD`.
    #[serde(rename = "WEEK ENDING")]
    pub week_ending: String,
    /// `PAY TYPE`
    #[serde(rename = "PAY TYPE")]
    pub pay_type: String,
    /// `HOURS`, two decimals.
    #[serde(rename = "HOURS")]
    pub hours: String,
    /// `BURDENED RATE`, e.g. `$1,234.56`.
    #[serde(rename = "BURDENED RATE")]
    pub burdened_rate: String,
    /// `TOTAL`, e.g. ` $1,234.56` (leading space kept for compatibility).
    #[serde(rename = "TOTAL")]
    pub total: String,
}

impl SummaryRecord {
    /// Column values in [`SUMMARY_COLUMNS`] order.
    pub fn values(&self) -> [&str; 11] {
        [
            self.invoice_id.as_str(),
            self.employee.as_str(),
            self.job_name.as_str(),
            self.activity_code.as_str(),
            self.activity_description.as_str(),
            self.job_number.as_str(),
            self.week_ending.as_str(),
            self.pay_type.as_str(),
            self.hours.as_str(),
            self.burdened_rate.as_str(),
            self.total.as_str(),
        ]
    }
}

/// The output column headers, in order.
pub const SUMMARY_COLUMNS: [&str; 11] = [
    "INV #",
    "EMPLOYEE",
    "JOB NAME",
    "Activity Code",
    "Activity Description",
    "JOB NUMBER",
    "WEEK ENDING",
    "PAY TYPE",
    "HOURS",
    "BURDENED RATE",
    "TOTAL",
];

/// Aggregated totals for a summary run.
///
/// # Example
///
/// ```
/// use timesheet_summary::models::SummaryTotals;
///
/// let totals = SummaryTotals::from_rows(&[]).unwrap();
/// assert_eq!(totals.row_count, 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryTotals {
    /// Number of groups (employee/activity combinations).
    pub group_count: usize,
    /// Number of summary rows.
    pub row_count: usize,
    /// Sum of Regular hours.
    pub regular_hours: Decimal,
    /// Sum of Overtime hours.
    pub overtime_hours: Decimal,
    /// Sum of all row totals.
    pub billed_amount: Decimal,
}

impl SummaryTotals {
    /// Computes totals over a set of summary rows.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` when a running sum leaves the decimal range.
    pub fn from_rows(rows: &[SummaryRow]) -> SummaryResult<Self> {
        let mut totals = Self::default();
        for row in rows {
            totals.row_count += 1;
            totals.billed_amount = add(totals.billed_amount, row.total, "billed amount")?;
            match row.pay_type {
                PayType::Regular => {
                    totals.group_count += 1;
                    totals.regular_hours = add(totals.regular_hours, row.hours, "regular hours")?;
                }
                PayType::Overtime => {
                    totals.overtime_hours =
                        add(totals.overtime_hours, row.hours, "overtime hours")?;
                }
            }
        }
        Ok(totals)
    }
}

fn add(total: Decimal, amount: Decimal, what: &str) -> SummaryResult<Decimal> {
    total
        .checked_add(amount)
        .ok_or_else(|| SummaryError::Overflow {
            context: format!("run total of {what}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_row(pay_type: PayType, hours: &str, rate: &str) -> SummaryRow {
        SummaryRow {
            invoice_id: "2277".to_string(),
            employee: "Jane Doe".to_string(),
            job_name: "Plant Expansion".to_string(),
            activity_code: "100;EXT".to_string(),
            activity_description: "Exterior".to_string(),
            job_number: "100".to_string(),
            week_ending: NaiveDate::from_ymd_opt(2025, 2, 7).unwrap(),
            pay_type,
            hours: dec(hours),
            burdened_rate: dec(rate),
            total: dec(hours) * dec(rate),
        }
    }

    #[test]
    fn test_to_record_formats_every_column() {
        let record = make_row(PayType::Overtime, "2", "37.5").to_record();

        assert_eq!(record.invoice_id, "2277");
        assert_eq!(record.employee, "Jane Doe");
        assert_eq!(record.job_number, "100");
        assert_eq!(record.week_ending, "2025-02-07");
        assert_eq!(record.pay_type, "Overtime");
        assert_eq!(record.hours, "2.00");
        assert_eq!(record.burdened_rate, "$37.50");
        assert_eq!(record.total, " $75.00");
    }

    #[test]
    fn test_sort_key_ranks_overtime_first() {
        let overtime = make_row(PayType::Overtime, "0", "30");
        let regular = make_row(PayType::Regular, "10", "20");
        assert!(overtime.sort_key() < regular.sort_key());
    }

    #[test]
    fn test_record_serializes_with_column_headers() {
        let record = make_row(PayType::Regular, "8", "25").to_record();
        let json = serde_json::to_value(&record).unwrap();

        for column in SUMMARY_COLUMNS {
            assert!(json.get(column).is_some(), "missing column {}", column);
        }
        assert_eq!(json["TOTAL"], " $200.00");
    }

    #[test]
    fn test_totals_sum_hours_by_pay_type() {
        let rows = vec![
            make_row(PayType::Overtime, "2", "37.50"),
            make_row(PayType::Regular, "8", "25.00"),
        ];
        let totals = SummaryTotals::from_rows(&rows).unwrap();

        assert_eq!(totals.group_count, 1);
        assert_eq!(totals.row_count, 2);
        assert_eq!(totals.overtime_hours, dec("2"));
        assert_eq!(totals.regular_hours, dec("8"));
        assert_eq!(totals.billed_amount, dec("275.00"));
    }

    #[test]
    fn test_totals_overflow_is_an_error() {
        let mut first = make_row(PayType::Regular, "1", "1");
        first.total = Decimal::MAX;
        let second = make_row(PayType::Regular, "1", "1");

        match SummaryTotals::from_rows(&[first, second]) {
            Err(SummaryError::Overflow { context }) => {
                assert_eq!(context, "run total of billed amount")
            }
            other => panic!("Expected Overflow, got {:?}", other),
        }
    }

    #[test]
    fn test_record_values_follow_column_order() {
        let record = make_row(PayType::Overtime, "2", "37.5").to_record();
        let values = record.values();

        assert_eq!(values[0], "2277");
        assert_eq!(values[7], "Overtime");
        assert_eq!(values[10], " $75.00");
    }
}
