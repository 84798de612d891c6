//! Raw time entry model and related types.
//!
//! This module defines the [`RawEntry`] struct read from a timesheet export,
//! the [`RawRate`] cell it carries, and the [`GroupKey`] entries are
//! aggregated under.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::clean_currency;
use crate::error::{SummaryError, SummaryResult};

/// A pay rate as it appeared in the timesheet export.
///
/// Spreadsheet exports carry rates either as numeric cells or as
/// currency-formatted text such as `"$12.50"` or `"1,200.00"`. Text is kept
/// as-is and only parsed when the rate is actually needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawRate {
    /// A numeric rate cell.
    Amount(Decimal),
    /// A currency-formatted text cell.
    Text(String),
}

impl RawRate {
    /// Resolves the rate to a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` for the `Rate` column when the text is not a
    /// number once `$` and `,` are stripped.
    ///
    /// # Examples
    ///
    /// ```
    /// use timesheet_summary::models::RawRate;
    /// use rust_decimal::Decimal;
    ///
    /// let rate = RawRate::Text("$1,200.50".to_string());
    /// assert_eq!(rate.amount(2).unwrap(), Decimal::new(120050, 2));
    /// ```
    pub fn amount(&self, row: usize) -> SummaryResult<Decimal> {
        match self {
            RawRate::Amount(amount) => Ok(*amount),
            RawRate::Text(text) => clean_currency(text).ok_or_else(|| SummaryError::ParseError {
                column: "Rate".to_string(),
                value: text.clone(),
                row,
            }),
        }
    }
}

impl From<Decimal> for RawRate {
    fn from(amount: Decimal) -> Self {
        RawRate::Amount(amount)
    }
}

impl From<&str> for RawRate {
    fn from(text: &str) -> Self {
        RawRate::Text(text.to_string())
    }
}

/// A single time entry from a timesheet export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntry {
    /// The 1-based sheet row this entry was read from (header is row 1).
    pub row: usize,
    /// Employee last name.
    pub last_name: String,
    /// Employee first name.
    pub first_name: String,
    /// Distributed job description (`Dist Job Desc`).
    pub job_description: String,
    /// Distributed activity code (`Dist Activity Code`), e.g. `"100;EXT"`.
    pub activity_code: String,
    /// Distributed activity description (`Dist Activity Desc`).
    pub activity_description: String,
    /// The date the time was worked.
    pub date: NaiveDate,
    /// Earning category (`Earning Desc`), e.g. `"Regular"` or `"Overtime"`.
    pub earning_category: String,
    /// Hours worked.
    pub hours: Decimal,
    /// Pay rate as exported.
    pub rate: RawRate,
}

impl RawEntry {
    /// Returns the key this entry is aggregated under.
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            last_name: self.last_name.clone(),
            first_name: self.first_name.clone(),
            job_description: self.job_description.clone(),
            activity_code: self.activity_code.clone(),
            activity_description: self.activity_description.clone(),
        }
    }
}

/// Identifies one aggregation group: one employee on one job activity.
///
/// Field order defines the ordering used when iterating groups.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    /// Employee last name.
    pub last_name: String,
    /// Employee first name.
    pub first_name: String,
    /// Job description.
    pub job_description: String,
    /// Activity code.
    pub activity_code: String,
    /// Activity description.
    pub activity_description: String,
}

impl GroupKey {
    /// Returns the employee's display name, `"First Last"`.
    pub fn employee_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns the job number: the activity code up to the first `;`.
    ///
    /// # Examples
    ///
    /// ```
    /// use timesheet_summary::models::GroupKey;
    ///
    /// let key = GroupKey {
    ///     last_name: "Doe".to_string(),
    ///     first_name: "Jane".to_string(),
    ///     job_description: "Plant Expansion".to_string(),
    ///     activity_code: "100;EXT".to_string(),
    ///     activity_description: "Exterior".to_string(),
    /// };
    /// assert_eq!(key.job_number(), "100");
    /// ```
    pub fn job_number(&self) -> &str {
        self.activity_code
            .split(';')
            .next()
            .unwrap_or(&self.activity_code)
    }

    /// Returns the input column of the first blank key field, if any.
    ///
    /// Entries with a blank key field cannot be attributed to an employee
    /// activity and are left out of the summary.
    pub fn blank_column(&self) -> Option<&'static str> {
        [
            ("Last Name", &self.last_name),
            ("First Name", &self.first_name),
            ("Dist Job Desc", &self.job_description),
            ("Dist Activity Code", &self.activity_code),
            ("Dist Activity Desc", &self.activity_description),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(column, _)| column)
    }
}
