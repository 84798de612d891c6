//! Hours and rate resolution for a group of time entries.
//!
//! ## Policy
//!
//! - Regular hours are the sum of all Regular entries; the regular rate is
//!   the rate of the first Regular entry, or zero when there is none.
//! - Overtime hours are the sum of all Overtime entries; the overtime rate is
//!   the rate of the first Overtime entry, or the regular rate times the
//!   configured fallback multiplier (1.5 by default) when there is none.
//!
//! The first entry's rate stands for the whole group even if later entries
//! carry a different rate. Rates of later entries are never read.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::SummaryConfig;
use crate::error::{SummaryError, SummaryResult};
use crate::models::RawEntry;

/// Where a resolved rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// Taken from the first entry of the pay type.
    Entry,
    /// Overtime rate derived from the regular rate.
    RegularFallback,
    /// No entries of the pay type; the rate is zero.
    NoEntries,
}

/// Resolved hours and rates for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayResolution {
    /// Sum of Regular hours.
    pub regular_hours: Decimal,
    /// Regular rate.
    pub regular_rate: Decimal,
    /// Where the regular rate came from.
    pub regular_rate_source: RateSource,
    /// Sum of Overtime hours.
    pub overtime_hours: Decimal,
    /// Overtime rate.
    pub overtime_rate: Decimal,
    /// Where the overtime rate came from.
    pub overtime_rate_source: RateSource,
}

/// Resolves hours and rates for one group of entries.
///
/// Entries whose earning category matches neither configured label do not
/// contribute hours or rates.
///
/// # Errors
///
/// Returns `ParseError` when a representative (first) rate is not a valid
/// currency amount, and `Overflow` when summed hours or the fallback rate
/// exceed the decimal range.
///
/// # Examples
///
/// ```
/// use timesheet_summary::calculation::{resolve_pay, RateSource};
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
///     hours: Decimal::new(10, 0),
///     rate: RawRate::from("$20.00"),
/// };
///
/// let pay = resolve_pay(&[&entry], &SummaryConfig::new("2277")).unwrap();
/// assert_eq!(pay.overtime_rate, Decimal::new(30, 0));
/// assert_eq!(pay.overtime_rate_source, RateSource::RegularFallback);
/// ```
pub fn resolve_pay(entries: &[&RawEntry], config: &SummaryConfig) -> SummaryResult<PayResolution> {
    let regular: Vec<&RawEntry> = entries
        .iter()
        .copied()
        .filter(|e| e.earning_category == config.regular_label)
        .collect();
    let overtime: Vec<&RawEntry> = entries
        .iter()
        .copied()
        .filter(|e| e.earning_category == config.overtime_label)
        .collect();

    let regular_hours =
        sum_hours(&regular).ok_or_else(|| overflow("regular hours", entries))?;
    let (regular_rate, regular_rate_source) = match regular.first() {
        Some(first) => (first.rate.amount(first.row)?, RateSource::Entry),
        None => (Decimal::ZERO, RateSource::NoEntries),
    };

    let overtime_hours =
        sum_hours(&overtime).ok_or_else(|| overflow("overtime hours", entries))?;
    let (overtime_rate, overtime_rate_source) = match overtime.first() {
        Some(first) => (first.rate.amount(first.row)?, RateSource::Entry),
        None => (
            regular_rate
                .checked_mul(config.overtime_fallback_multiplier)
                .ok_or_else(|| overflow("overtime fallback rate", entries))?,
            RateSource::RegularFallback,
        ),
    };

    Ok(PayResolution {
        regular_hours,
        regular_rate,
        regular_rate_source,
        overtime_hours,
        overtime_rate,
        overtime_rate_source,
    })
}

fn sum_hours(entries: &[&RawEntry]) -> Option<Decimal> {
    entries
        .iter()
        .try_fold(Decimal::ZERO, |total, e| total.checked_add(e.hours))
}

fn overflow(quantity: &str, entries: &[&RawEntry]) -> SummaryError {
    let context = match entries.first() {
        Some(e) => format!(
            "{quantity} of {}, activity {}",
            e.group_key().employee_name(),
            e.activity_code
        ),
        None => quantity.to_string(),
    };
    SummaryError::Overflow { context }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawRate;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_entry(row: usize, category: &str, hours: &str, rate: &str) -> RawEntry {
        RawEntry {
            row,
            last_name: "Doe".to_string(),
            first_name: "Jane".to_string(),
            job_description: "Plant Expansion".to_string(),
            activity_code: "100;EXT".to_string(),
            activity_description: "Exterior".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
            earning_category: category.to_string(),
            hours: dec(hours),
            rate: RawRate::from(rate),
        }
    }

    fn config() -> SummaryConfig {
        SummaryConfig::new("2277")
    }

    #[test]
    fn test_regular_and_overtime_from_entries() {
        let regular = make_entry(2, "Regular", "8", "$25.00");
        let overtime = make_entry(3, "Overtime", "2", "$37.50");

        let pay = resolve_pay(&[&regular, &overtime], &config()).unwrap();

        assert_eq!(pay.regular_hours, dec("8"));
        assert_eq!(pay.regular_rate, dec("25.00"));
        assert_eq!(pay.regular_rate_source, RateSource::Entry);
        assert_eq!(pay.overtime_hours, dec("2"));
        assert_eq!(pay.overtime_rate, dec("37.50"));
        assert_eq!(pay.overtime_rate_source, RateSource::Entry);
    }

    #[test]
    fn test_overtime_rate_falls_back_to_one_and_a_half_regular() {
        let regular = make_entry(2, "Regular", "10", "$20.00");

        let pay = resolve_pay(&[&regular], &config()).unwrap();

        assert_eq!(pay.overtime_hours, Decimal::ZERO);
        assert_eq!(pay.overtime_rate, dec("30.00"));
        assert_eq!(pay.overtime_rate_source, RateSource::RegularFallback);
    }

    #[test]
    fn test_fallback_uses_configured_multiplier() {
        let mut config = config();
        config.overtime_fallback_multiplier = dec("2");
        let regular = make_entry(2, "Regular", "10", "$20.00");

        let pay = resolve_pay(&[&regular], &config).unwrap();
        assert_eq!(pay.overtime_rate, dec("40.00"));
    }

    #[test]
    fn test_overtime_only_group_has_zero_regular_rate() {
        let overtime = make_entry(2, "Overtime", "3", "$45.00");

        let pay = resolve_pay(&[&overtime], &config()).unwrap();

        assert_eq!(pay.regular_hours, Decimal::ZERO);
        assert_eq!(pay.regular_rate, Decimal::ZERO);
        assert_eq!(pay.regular_rate_source, RateSource::NoEntries);
        assert_eq!(pay.overtime_rate, dec("45.00"));
    }

    #[test]
    fn test_first_entry_rate_represents_group() {
        let first = make_entry(2, "Regular", "4", "$20.00");
        let second = make_entry(3, "Regular", "4", "$22.00");

        let pay = resolve_pay(&[&first, &second], &config()).unwrap();

        assert_eq!(pay.regular_hours, dec("8"));
        assert_eq!(pay.regular_rate, dec("20.00"));
    }

    #[test]
    fn test_hours_sum_across_entries() {
        let a = make_entry(2, "Overtime", "1.25", "$30");
        let b = make_entry(3, "Overtime", "0.5", "$30");
        let c = make_entry(4, "Overtime", "2.25", "$30");

        let pay = resolve_pay(&[&a, &b, &c], &config()).unwrap();
        assert_eq!(pay.overtime_hours, dec("4.00"));
    }

    #[test]
    fn test_other_categories_are_ignored() {
        let regular = make_entry(2, "Regular", "8", "$20.00");
        let holiday = make_entry(3, "Holiday", "8", "$99.00");

        let pay = resolve_pay(&[&holiday, &regular], &config()).unwrap();

        assert_eq!(pay.regular_hours, dec("8"));
        assert_eq!(pay.regular_rate, dec("20.00"));
        assert_eq!(pay.overtime_rate, dec("30.00"));
    }

    #[test]
    fn test_category_match_is_exact() {
        let lower = make_entry(2, "regular", "8", "$20.00");

        let pay = resolve_pay(&[&lower], &config()).unwrap();
        assert_eq!(pay.regular_hours, Decimal::ZERO);
    }

    #[test]
    fn test_malformed_representative_rate_fails() {
        let regular = make_entry(5, "Regular", "8", "abc");

        match resolve_pay(&[&regular], &config()) {
            Err(SummaryError::ParseError { column, value, row }) => {
                assert_eq!(column, "Rate");
                assert_eq!(value, "abc");
                assert_eq!(row, 5);
            }
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_rate_after_first_entry_is_not_read() {
        let first = make_entry(2, "Regular", "8", "$20.00");
        let second = make_entry(3, "Regular", "2", "n/a");

        let pay = resolve_pay(&[&first, &second], &config()).unwrap();
        assert_eq!(pay.regular_hours, dec("10"));
    }

    #[test]
    fn test_custom_labels() {
        let mut config = config();
        config.regular_label = "REG".to_string();
        config.overtime_label = "OT".to_string();
        let regular = make_entry(2, "REG", "8", "$20.00");
        let overtime = make_entry(3, "OT", "1", "$35.00");

        let pay = resolve_pay(&[&regular, &overtime], &config).unwrap();

        assert_eq!(pay.regular_hours, dec("8"));
        assert_eq!(pay.overtime_rate, dec("35.00"));
    }

    const MAX_RATE: &str = "$79,228,162,514,264,337,593,543,950,335";

    #[test]
    fn test_fallback_rate_overflow_is_an_error() {
        let regular = make_entry(2, "Regular", "2", MAX_RATE);

        match resolve_pay(&[&regular], &config()) {
            Err(SummaryError::Overflow { context }) => {
                assert_eq!(context, "overtime fallback rate of Jane Doe, activity 100;EXT");
            }
            other => panic!("Expected Overflow, got {:?}", other),
        }
    }

    #[test]
    fn test_hours_sum_overflow_is_an_error() {
        let first = make_entry(2, "Overtime", "79228162514264337593543950335", "$1.00");
        let second = make_entry(3, "Overtime", "1", "$1.00");

        assert!(matches!(
            resolve_pay(&[&first, &second], &config()),
            Err(SummaryError::Overflow { .. })
        ));
    }
}
