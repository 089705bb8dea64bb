//! Year-to-date and period aggregation.
//!
//! Aggregates are derived by folding payroll run history each time they are
//! needed. Both functions support excluding a single run, used when a run is
//! being recalculated and must not double-count its own prior result.

use std::collections::HashMap;

use crate::models::{
    PayrollRunRecord, PeriodStatutoryAmounts, TypeAmounts, YtdStatutoryAmounts,
};

use super::tax_year::{TaxYear, tax_year_for_date};

fn fold_deductions(by_type: &mut HashMap<String, TypeAmounts>, run: &PayrollRunRecord) {
    for line in &run.deductions {
        let entry = by_type.entry(line.type_code.clone()).or_default();
        entry.employee += line.employee_amount;
        entry.employer += line.employer_amount;
    }
}

/// Computes YTD statutory amounts for a tax year from run history.
///
/// Runs whose pay date falls outside the tax year are ignored, as is the
/// run named by `exclude_run_id` (recalculation support). An employee with
/// no qualifying runs yields an all-zero aggregate, never an error.
pub fn aggregate_ytd(
    runs: &[PayrollRunRecord],
    tax_year: TaxYear,
    exclude_run_id: Option<&str>,
) -> YtdStatutoryAmounts {
    let mut ytd = YtdStatutoryAmounts::default();
    for run in runs {
        if tax_year_for_date(run.pay_date) != tax_year {
            continue;
        }
        if exclude_run_id.is_some_and(|id| id == run.run_id) {
            continue;
        }
        ytd.taxable_income += run.taxable_income;
        ytd.relief_amount += run.relief_amount;
        fold_deductions(&mut ytd.by_type, run);
    }
    ytd
}

/// Computes the amounts already processed within a single pay period.
///
/// Only runs belonging to `pay_period_id` count; the run named by
/// `exclude_run_id` is skipped.
pub fn aggregate_period(
    runs: &[PayrollRunRecord],
    pay_period_id: &str,
    exclude_run_id: Option<&str>,
) -> PeriodStatutoryAmounts {
    let mut period = PeriodStatutoryAmounts::default();
    for run in runs {
        if run.pay_period_id != pay_period_id {
            continue;
        }
        if exclude_run_id.is_some_and(|id| id == run.run_id) {
            continue;
        }
        period.taxable_income += run.taxable_income;
        period.relief_amount += run.relief_amount;
        fold_deductions(&mut period.by_type, run);
    }
    period
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordedDeduction;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn run(
        run_id: &str,
        pay_period_id: &str,
        pay_date: (i32, u32, u32),
        taxable: &str,
        income_tax: &str,
    ) -> PayrollRunRecord {
        PayrollRunRecord {
            run_id: run_id.to_string(),
            employee_id: "emp_001".to_string(),
            pay_period_id: pay_period_id.to_string(),
            pay_date: NaiveDate::from_ymd_opt(pay_date.0, pay_date.1, pay_date.2).unwrap(),
            taxable_income: dec(taxable),
            relief_amount: Decimal::ZERO,
            deductions: vec![RecordedDeduction {
                type_code: "INCOME_TAX".to_string(),
                employee_amount: dec(income_tax),
                employer_amount: Decimal::ZERO,
            }],
        }
    }

    #[test]
    fn test_no_history_yields_all_zero() {
        let ytd = aggregate_ytd(&[], TaxYear::new(2024), None);
        assert_eq!(ytd.taxable_income, Decimal::ZERO);
        assert!(ytd.by_type.is_empty());

        let period = aggregate_period(&[], "pp_2024_07", None);
        assert_eq!(period.taxable_income, Decimal::ZERO);
        assert!(period.by_type.is_empty());
    }

    #[test]
    fn test_ytd_sums_runs_in_tax_year() {
        let runs = vec![
            run("run_1", "pp_2024_06", (2024, 6, 25), "60000", "7000"),
            run("run_2", "pp_2024_07", (2024, 7, 25), "40000", "8000"),
        ];

        let ytd = aggregate_ytd(&runs, TaxYear::new(2024), None);
        assert_eq!(ytd.taxable_income, dec("100000"));
        assert_eq!(ytd.employee_for("INCOME_TAX"), dec("15000"));
    }

    #[test]
    fn test_ytd_ignores_runs_from_other_years() {
        let runs = vec![
            run("run_1", "pp_2023_12", (2023, 12, 22), "55000", "6000"),
            run("run_2", "pp_2024_01", (2024, 1, 25), "60000", "7000"),
        ];

        let ytd = aggregate_ytd(&runs, TaxYear::new(2024), None);
        assert_eq!(ytd.taxable_income, dec("60000"));
        assert_eq!(ytd.employee_for("INCOME_TAX"), dec("7000"));
    }

    #[test]
    fn test_ytd_excludes_named_run() {
        let runs = vec![
            run("run_1", "pp_2024_06", (2024, 6, 25), "60000", "7000"),
            run("run_2", "pp_2024_07", (2024, 7, 25), "40000", "8000"),
        ];

        let ytd = aggregate_ytd(&runs, TaxYear::new(2024), Some("run_2"));
        assert_eq!(ytd.taxable_income, dec("60000"));
        assert_eq!(ytd.employee_for("INCOME_TAX"), dec("7000"));
    }

    #[test]
    fn test_period_sums_only_matching_period() {
        let runs = vec![
            run("run_1", "pp_2024_06", (2024, 6, 25), "60000", "7000"),
            run("run_2", "pp_2024_07", (2024, 7, 25), "40000", "8000"),
            run("run_3", "pp_2024_07", (2024, 7, 28), "10000", "2000"),
        ];

        let period = aggregate_period(&runs, "pp_2024_07", None);
        assert_eq!(period.taxable_income, dec("50000"));
        assert_eq!(period.employee_for("INCOME_TAX"), dec("10000"));
    }

    #[test]
    fn test_period_excludes_named_run() {
        let runs = vec![
            run("run_2", "pp_2024_07", (2024, 7, 25), "40000", "8000"),
            run("run_3", "pp_2024_07", (2024, 7, 28), "10000", "2000"),
        ];

        let period = aggregate_period(&runs, "pp_2024_07", Some("run_3"));
        assert_eq!(period.taxable_income, dec("40000"));
        assert_eq!(period.employee_for("INCOME_TAX"), dec("8000"));
    }

    #[test]
    fn test_multiple_types_accumulate_independently() {
        let mut r = run("run_1", "pp_2024_07", (2024, 7, 25), "60000", "7000");
        r.deductions.push(RecordedDeduction {
            type_code: "NIS".to_string(),
            employee_amount: dec("1800"),
            employer_amount: dec("1800"),
        });

        let ytd = aggregate_ytd(&[r], TaxYear::new(2024), None);
        assert_eq!(ytd.employee_for("INCOME_TAX"), dec("7000"));
        assert_eq!(ytd.employee_for("NIS"), dec("1800"));
        assert_eq!(ytd.employer_for("NIS"), dec("1800"));
    }
}
