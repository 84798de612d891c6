//! Currency parsing and formatting.
//!
//! Parsing strips `$` and `,` before reading the number. Formatting is
//! locale independent: amounts are rounded half-to-even to cents and grouped
//! with `,` every three digits, so output is identical on every platform.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Parses a currency-formatted string such as `"$1,234.56"`.
///
/// Returns `None` when the remaining text is not a number.
///
/// # Examples
///
/// ```
/// use timesheet_summary::calculation::clean_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(clean_currency("$1,234.56"), Some(Decimal::new(123456, 2)));
/// assert_eq!(clean_currency(" 12.5 "), Some(Decimal::new(125, 1)));
/// assert_eq!(clean_currency("abc"), None);
/// ```
pub fn clean_currency(value: &str) -> Option<Decimal> {
    let cleaned = value.replace(['$', ','], "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(cleaned).ok()
}

/// Formats an amount as `$1,234.56`.
///
/// Negative amounts keep the sign after the dollar symbol (`$-500.00`).
///
/// # Examples
///
/// ```
/// use timesheet_summary::calculation::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(123456, 2)), "$1,234.56");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    format!("${}", group_thousands(round_cents(amount)))
}

/// Formats a row total: a leading space, then [`format_currency`].
pub fn format_total(amount: Decimal) -> String {
    format!(" {}", format_currency(amount))
}

/// Formats hours with exactly two decimals, e.g. `8.00`.
pub fn format_hours(hours: Decimal) -> String {
    format!("{:.2}", round_cents(hours))
}

fn round_cents(amount: Decimal) -> Decimal {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    // -0.00 prints as 0.00
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

fn group_thousands(amount: Decimal) -> String {
    let negative = amount.is_sign_negative();
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((&fixed, "00"));

    let mut with_commas = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-{with_commas}.{dec_part}")
    } else {
        format!("{with_commas}.{dec_part}")
    }
}
