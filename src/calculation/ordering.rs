//! Output ordering of summary rows.

use crate::models::SummaryRow;

/// Sorts rows by invoice, employee, activity code, then Overtime before
/// Regular.
///
/// The sort is stable, so rows that tie on all four keys keep the order in
/// which they were built.
pub fn sort_rows(rows: &mut [SummaryRow]) {
    rows.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PayType;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn make_row(employee: &str, code: &str, job: &str, pay_type: PayType) -> SummaryRow {
        SummaryRow {
            invoice_id: "2277".to_string(),
            employee: employee.to_string(),
            job_name: job.to_string(),
            activity_code: code.to_string(),
            activity_description: "Exterior".to_string(),
            job_number: code.to_string(),
            week_ending: NaiveDate::from_ymd_opt(2025, 2, 7).unwrap(),
            pay_type,
            hours: Decimal::ZERO,
            burdened_rate: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }

    fn labels(rows: &[SummaryRow]) -> Vec<String> {
        rows.iter()
            .map(|r| format!("{}|{}|{}|{}", r.employee, r.activity_code, r.job_name, r.pay_type))
            .collect()
    }

    #[test]
    fn test_sort_by_employee_then_activity_code() {
        let mut rows = vec![
            make_row("Jane Doe", "200", "A", PayType::Overtime),
            make_row("Al Smith", "100", "A", PayType::Overtime),
            make_row("Jane Doe", "100", "A", PayType::Overtime),
        ];

        sort_rows(&mut rows);

        assert_eq!(
            labels(&rows),
            vec![
                "Al Smith|100|A|Overtime",
                "Jane Doe|100|A|Overtime",
                "Jane Doe|200|A|Overtime",
            ]
        );
    }

    #[test]
    fn test_overtime_precedes_regular() {
        let mut rows = vec![
            make_row("Jane Doe", "100", "A", PayType::Regular),
            make_row("Jane Doe", "100", "A", PayType::Overtime),
        ];

        sort_rows(&mut rows);

        assert_eq!(rows[0].pay_type, PayType::Overtime);
        assert_eq!(rows[1].pay_type, PayType::Regular);
    }

    #[test]
    fn test_ties_keep_construction_order() {
        let mut rows = vec![
            make_row("Jane Doe", "100", "Job B", PayType::Overtime),
            make_row("Jane Doe", "100", "Job B", PayType::Regular),
            make_row("Jane Doe", "100", "Job A", PayType::Overtime),
            make_row("Jane Doe", "100", "Job A", PayType::Regular),
        ];

        sort_rows(&mut rows);

        assert_eq!(
            labels(&rows),
            vec![
                "Jane Doe|100|Job B|Overtime",
                "Jane Doe|100|Job A|Overtime",
                "Jane Doe|100|Job B|Regular",
                "Jane Doe|100|Job A|Regular",
            ]
        );
    }

    #[test]
    fn test_uppercase_sorts_before_lowercase() {
        let mut rows = vec![
            make_row("amy Lee", "100", "A", PayType::Overtime),
            make_row("Zed Ray", "100", "A", PayType::Overtime),
        ];

        sort_rows(&mut rows);
        assert_eq!(rows[0].employee, "Zed Ray");
    }
}
