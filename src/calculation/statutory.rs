//! Cumulative statutory deduction calculation.
//!
//! The core algorithm: for a single gross-pay amount, computes every
//! applicable statutory deduction's employee and employer portions. Bracket
//! placement is cumulative (year-to-date aware) or non-cumulative
//! (period-scoped, annualized) per the country's method; off-cycle runs are
//! computed as the incremental amount needed to bring the cumulative
//! position in line with the schedule, never recomputed from scratch.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{
    CalculationWarning, CumulativeCalculationContext, DeductionResult, RateBand,
    StatutoryDeductionType, TaxCalculationMethod,
};

use super::brackets;
use super::relief::ReliefContext;
use super::rounding::round_money;

/// Warning code for a statutory type skipped due to missing rate bands.
pub const WARN_MISSING_RATE_BANDS: &str = "MISSING_RATE_BANDS";

/// Warning code for a statutory type skipped due to an invalid schedule.
pub const WARN_INVALID_RATE_BANDS: &str = "INVALID_RATE_BANDS";

/// Everything the calculator needs for one synchronous calculation pass.
#[derive(Debug)]
pub struct CalculationInput<'a> {
    /// Gross pay for the run (non-negative).
    pub gross_pay: Decimal,
    /// The statutory types active for the country and effective date.
    pub types: &'a [StatutoryDeductionType],
    /// Rate bands per statutory type code, effective for the same date.
    pub bands: &'a HashMap<String, Vec<RateBand>>,
    /// The resolved relief context.
    pub relief: &'a ReliefContext,
    /// The assembled calculation context.
    pub context: &'a CumulativeCalculationContext,
    /// The employee's age, when known; gates age-limited types.
    pub employee_age: Option<u32>,
    /// Number of Mondays in the pay period, for weekly-aligned types.
    pub monday_count: Option<u32>,
}

/// The calculator's output: one result per evaluated type, plus totals and
/// any warnings raised along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationOutcome {
    /// Per-statutory-type results.
    pub deductions: Vec<DeductionResult>,
    /// Warnings raised during calculation.
    pub warnings: Vec<CalculationWarning>,
    /// Sum of the per-type employee amounts.
    pub total_employee_deductions: Decimal,
    /// Sum of the per-type employer amounts.
    pub total_employer_contributions: Decimal,
}

struct TypeComputation {
    employee: Decimal,
    employer: Decimal,
    is_refund: bool,
    ytd_taxable: Decimal,
    ytd_paid_after: Decimal,
}

fn paid_to_date(
    context: &CumulativeCalculationContext,
    code: &str,
) -> (Decimal, Decimal) {
    let employee = context.opening_balances.employee_for(code)
        + context.ytd_amounts.employee_for(code);
    let employer = context.opening_balances.employer_for(code)
        + context.ytd_amounts.employer_for(code);
    (employee, employer)
}

fn compute_cumulative(
    ty: &StatutoryDeductionType,
    schedule: &[RateBand],
    taxable: Decimal,
    credit: Decimal,
    context: &CumulativeCalculationContext,
) -> TypeComputation {
    let cum_taxable = context.opening_balances.taxable_income
        + context.ytd_amounts.taxable_income
        + taxable;
    let (paid_employee, paid_employer) = paid_to_date(context, &ty.code);

    let mut employee = Decimal::ZERO;
    if ty.has_employee_portion {
        let mut target = brackets::employee_amount_for_income(schedule, cum_taxable);
        if let Some(cap) = ty.annual_cap_employee {
            target = target.min(cap);
        }
        let mut raw = target - paid_employee;
        if raw > Decimal::ZERO {
            raw = (raw - credit).max(Decimal::ZERO);
        } else if raw < Decimal::ZERO && !context.allow_mid_year_refunds {
            raw = Decimal::ZERO;
        }
        employee = round_money(raw);
    }

    let mut employer = Decimal::ZERO;
    if ty.has_employer_portion {
        let mut target = brackets::employer_amount_for_income(schedule, cum_taxable);
        if let Some(cap) = ty.annual_cap_employer {
            target = target.min(cap);
        }
        let mut raw = target - paid_employer;
        if raw < Decimal::ZERO && !context.allow_mid_year_refunds {
            raw = Decimal::ZERO;
        }
        employer = round_money(raw);
    }

    TypeComputation {
        employee,
        employer,
        is_refund: employee < Decimal::ZERO || employer < Decimal::ZERO,
        ytd_taxable: cum_taxable,
        ytd_paid_after: paid_employee + employee,
    }
}

fn period_due<F>(
    schedule: &[RateBand],
    period_taxable: Decimal,
    weekly_basis: bool,
    monday_count: Option<u32>,
    pay_periods_per_year: u32,
    amount_for_income: F,
) -> Decimal
where
    F: Fn(&[RateBand], Decimal) -> Decimal,
{
    if weekly_basis {
        if let Some(mondays) = monday_count.filter(|n| *n > 0) {
            let weeks = Decimal::from(mondays);
            return amount_for_income(schedule, period_taxable / weeks) * weeks;
        }
    }
    let periods = Decimal::from(pay_periods_per_year.max(1));
    amount_for_income(schedule, period_taxable * periods) / periods
}

fn compute_non_cumulative(
    ty: &StatutoryDeductionType,
    schedule: &[RateBand],
    taxable: Decimal,
    credit: Decimal,
    context: &CumulativeCalculationContext,
    monday_count: Option<u32>,
) -> TypeComputation {
    let period_taxable = context.period_amounts.taxable_income + taxable;
    let (paid_employee, paid_employer) = paid_to_date(context, &ty.code);

    let mut employee = Decimal::ZERO;
    if ty.has_employee_portion {
        let due = period_due(
            schedule,
            period_taxable,
            ty.weekly_basis,
            monday_count,
            context.pay_periods_per_year,
            brackets::employee_amount_for_income,
        );
        let mut raw = (due - context.period_amounts.employee_for(&ty.code))
            .max(Decimal::ZERO);
        raw = (raw - credit).max(Decimal::ZERO);
        if let Some(cap) = ty.annual_cap_employee {
            raw = raw.min((cap - paid_employee).max(Decimal::ZERO));
        }
        employee = round_money(raw);
    }

    let mut employer = Decimal::ZERO;
    if ty.has_employer_portion {
        let due = period_due(
            schedule,
            period_taxable,
            ty.weekly_basis,
            monday_count,
            context.pay_periods_per_year,
            brackets::employer_amount_for_income,
        );
        let mut raw = (due - context.period_amounts.employer_for(&ty.code))
            .max(Decimal::ZERO);
        if let Some(cap) = ty.annual_cap_employer {
            raw = raw.min((cap - paid_employer).max(Decimal::ZERO));
        }
        employer = round_money(raw);
    }

    TypeComputation {
        employee,
        employer,
        is_refund: false,
        ytd_taxable: context.opening_balances.taxable_income
            + context.ytd_amounts.taxable_income
            + taxable,
        ytd_paid_after: paid_employee + employee,
    }
}

/// Computes every applicable statutory deduction for one gross-pay amount.
///
/// Exactly one [`DeductionResult`] is produced per evaluated type (amounts
/// may be zero, e.g. for age-gated types); types whose rate band schedule
/// is missing or malformed are skipped with a warning instead of failing
/// the run. Results are ordered by statutory type code for determinism.
pub fn calculate_statutory_deductions(input: &CalculationInput<'_>) -> CalculationOutcome {
    let context = input.context;
    let mut deductions = Vec::new();
    let mut warnings = Vec::new();

    let mut types: Vec<&StatutoryDeductionType> = input.types.iter().collect();
    types.sort_by(|a, b| a.code.cmp(&b.code));

    for ty in types {
        let reduction = input
            .relief
            .income_reduction_for(&ty.code)
            .min(input.gross_pay)
            .max(Decimal::ZERO);
        let taxable = (input.gross_pay - reduction).max(Decimal::ZERO);

        if !ty.applies_to_age(input.employee_age) {
            let (paid_employee, _) = paid_to_date(context, &ty.code);
            deductions.push(DeductionResult {
                code: ty.code.clone(),
                name: ty.name.clone(),
                kind: ty.kind,
                employee_amount: Decimal::ZERO,
                employer_amount: Decimal::ZERO,
                calculation_method: context.tax_calculation_method,
                ytd_taxable_income: context.opening_balances.taxable_income
                    + context.ytd_amounts.taxable_income
                    + taxable,
                ytd_tax_paid: paid_employee,
                is_refund: false,
                tax_relief_amount: reduction,
            });
            continue;
        }

        let Some(raw_schedule) = input.bands.get(&ty.code) else {
            warnings.push(CalculationWarning {
                code: WARN_MISSING_RATE_BANDS.to_string(),
                message: format!("no rate bands for statutory type '{}'; type skipped", ty.code),
            });
            continue;
        };
        if raw_schedule.is_empty() {
            warnings.push(CalculationWarning {
                code: WARN_MISSING_RATE_BANDS.to_string(),
                message: format!("no rate bands for statutory type '{}'; type skipped", ty.code),
            });
            continue;
        }

        let schedule = brackets::sorted_schedule(raw_schedule);
        if let Err(error) = brackets::validate_schedule(&ty.code, &schedule) {
            warnings.push(CalculationWarning {
                code: WARN_INVALID_RATE_BANDS.to_string(),
                message: format!("{}; type skipped", error),
            });
            continue;
        }

        let credit = input.relief.tax_credit_for(&ty.code);
        let computed = match context.tax_calculation_method {
            TaxCalculationMethod::Cumulative => {
                compute_cumulative(ty, &schedule, taxable, credit, context)
            }
            TaxCalculationMethod::NonCumulative => {
                compute_non_cumulative(ty, &schedule, taxable, credit, context, input.monday_count)
            }
        };

        deductions.push(DeductionResult {
            code: ty.code.clone(),
            name: ty.name.clone(),
            kind: ty.kind,
            employee_amount: computed.employee,
            employer_amount: computed.employer,
            calculation_method: context.tax_calculation_method,
            ytd_taxable_income: computed.ytd_taxable,
            ytd_tax_paid: computed.ytd_paid_after,
            is_refund: computed.is_refund,
            tax_relief_amount: reduction,
        });
    }

    let total_employee_deductions: Decimal =
        deductions.iter().map(|d| d.employee_amount).sum();
    let total_employer_contributions: Decimal =
        deductions.iter().map(|d| d.employer_amount).sum();

    CalculationOutcome {
        deductions,
        warnings,
        total_employee_deductions,
        total_employer_contributions,
    }
}
