//! Calculation context and result models.
//!
//! [`CumulativeCalculationContext`] is the ephemeral, immutable bundle
//! assembled per calculation; it exists only for the duration of one call
//! and is echoed back in the result for audit. The result types capture
//! every per-deduction outcome, the relief summary, totals, and warnings.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::TaxYear;

use super::amounts::{OpeningBalances, PeriodStatutoryAmounts, YtdStatutoryAmounts};
use super::statutory_type::DeductionKind;
use super::tax_settings::TaxCalculationMethod;

/// The immutable context bundle assembled for one calculation call.
///
/// Assembled by the orchestration entry points from opening balances, YTD
/// and period aggregates, resolved country settings, and the off-cycle
/// flag; consumed by the cumulative statutory calculator and returned in
/// the result for audit. Never persisted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeCalculationContext {
    /// YTD aggregates for the employee and tax year.
    pub ytd_amounts: YtdStatutoryAmounts,
    /// Amounts already processed within the current pay period.
    pub period_amounts: PeriodStatutoryAmounts,
    /// Carried-forward opening balances for the tax year.
    pub opening_balances: OpeningBalances,
    /// The tax year the calculation falls in.
    pub tax_year: TaxYear,
    /// The tax calculation method in force for the country.
    pub tax_calculation_method: TaxCalculationMethod,
    /// Whether cumulative overpayment may be refunded mid-year.
    pub allow_mid_year_refunds: bool,
    /// The number of pay periods per year used for non-cumulative placement.
    pub pay_periods_per_year: u32,
    /// True for off-cycle (supplemental) runs sharing a period with a
    /// regular run.
    pub is_off_cycle: bool,
}

/// The source of an applied relief.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliefSource {
    /// A country-level statutory rule, applied automatically.
    Statutory,
    /// A relief scheme the employee is enrolled in.
    Scheme,
}

/// One relief applied during a calculation, for the result summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedRelief {
    /// The rule or scheme id the relief came from.
    pub relief_id: String,
    /// Human-readable name of the rule or scheme.
    pub name: String,
    /// Whether the relief came from a statutory rule or an enrolled scheme.
    pub source: ReliefSource,
    /// Taxable-income reduction granted this calculation.
    pub income_reduction: Decimal,
    /// Tax credit granted this calculation.
    pub tax_credit: Decimal,
}

/// The outcome for a single statutory deduction type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionResult {
    /// The statutory type code.
    pub code: String,
    /// The statutory type name.
    pub name: String,
    /// Whether the deduction is a tax or a contribution.
    pub kind: DeductionKind,
    /// The employee amount for this run; negative only when `is_refund`.
    pub employee_amount: Decimal,
    /// The employer amount for this run; negative only when `is_refund`.
    pub employer_amount: Decimal,
    /// The calculation method used for this type.
    pub calculation_method: TaxCalculationMethod,
    /// Cumulative taxable income including this run.
    pub ytd_taxable_income: Decimal,
    /// Cumulative employee amount for this type including this run.
    pub ytd_tax_paid: Decimal,
    /// True when the amounts represent a credit back to the employee.
    #[serde(default)]
    pub is_refund: bool,
    /// Taxable-income reduction applied to this type in this run.
    pub tax_relief_amount: Decimal,
}

/// A warning generated during calculation.
///
/// Warnings indicate conditions that do not fail the run but require
/// attention, such as a statutory type skipped for missing rate bands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
}

/// The complete result of a statutory deduction calculation.
///
/// Owned by the caller once returned; the engine persists nothing and holds
/// no reference after returning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatutoryCalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The employee the calculation is for.
    pub employee_id: String,
    /// The country whose statutory rules were applied.
    pub country_code: String,
    /// The gross pay the calculation was run against.
    pub gross_pay: Decimal,
    /// Per-statutory-type outcomes.
    pub deductions: Vec<DeductionResult>,
    /// Sum of the per-type employee amounts.
    pub total_employee_deductions: Decimal,
    /// Sum of the per-type employer amounts.
    pub total_employer_contributions: Decimal,
    /// Reliefs applied during the calculation.
    pub reliefs: Vec<AppliedRelief>,
    /// Total taxable-income reduction granted by reliefs.
    pub total_taxable_income_reduction: Decimal,
    /// Total tax credits granted by reliefs.
    pub total_tax_credits: Decimal,
    /// Gross pay after relief income reductions, floored at zero.
    pub adjusted_taxable_income: Decimal,
    /// Warnings raised during calculation (e.g., skipped statutory types).
    pub warnings: Vec<CalculationWarning>,
    /// The context the calculation ran against, echoed for audit.
    pub context: CumulativeCalculationContext,
}
