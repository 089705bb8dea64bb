//! Accumulated amount models.
//!
//! Year-to-date and period aggregates are derived data: they are recomputed
//! by summing prior payroll run records whenever they are needed, never
//! stored as first-class mutable entities. Opening balances carry figures
//! from before the employee's current engagement (mid-year hires) and are
//! read-only after onboarding.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employee and employer amounts accumulated for one statutory type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeAmounts {
    /// Accumulated employee amount.
    pub employee: Decimal,
    /// Accumulated employer amount.
    pub employer: Decimal,
}

/// Cumulative taxable income and statutory amounts recorded for an employee
/// within a tax year.
///
/// Scoped to (employee, tax year). Always non-negative; a fresh employee
/// with no prior runs yields an all-zero aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YtdStatutoryAmounts {
    /// Total taxable income recorded so far this tax year.
    pub taxable_income: Decimal,
    /// Total relief amount recorded against runs so far this tax year.
    pub relief_amount: Decimal,
    /// Per-statutory-type accumulated amounts, keyed by type code.
    pub by_type: HashMap<String, TypeAmounts>,
}

impl YtdStatutoryAmounts {
    /// Returns the accumulated employee amount for a statutory type code.
    pub fn employee_for(&self, code: &str) -> Decimal {
        self.by_type.get(code).map_or(Decimal::ZERO, |a| a.employee)
    }

    /// Returns the accumulated employer amount for a statutory type code.
    pub fn employer_for(&self, code: &str) -> Decimal {
        self.by_type.get(code).map_or(Decimal::ZERO, |a| a.employer)
    }
}

/// Amounts already calculated for an employee within a single pay period.
///
/// Relevant for off-cycle runs, where a regular run and a supplemental run
/// land in the same period and must not double-count. Scoped to
/// (employee, pay period).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodStatutoryAmounts {
    /// Taxable income already processed within the pay period.
    pub taxable_income: Decimal,
    /// Relief amount already granted within the pay period.
    pub relief_amount: Decimal,
    /// Per-statutory-type amounts already withheld within the pay period.
    pub by_type: HashMap<String, TypeAmounts>,
}

impl PeriodStatutoryAmounts {
    /// Returns the employee amount already withheld for a statutory type.
    pub fn employee_for(&self, code: &str) -> Decimal {
        self.by_type.get(code).map_or(Decimal::ZERO, |a| a.employee)
    }

    /// Returns the employer amount already withheld for a statutory type.
    pub fn employer_for(&self, code: &str) -> Decimal {
        self.by_type.get(code).map_or(Decimal::ZERO, |a| a.employer)
    }
}

/// Carried-forward year-to-date figures as of the start of the employee's
/// current tax-year engagement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpeningBalances {
    /// Taxable income carried forward from a prior employer or system.
    pub taxable_income: Decimal,
    /// Per-statutory-type amounts carried forward, keyed by type code.
    pub by_type: HashMap<String, TypeAmounts>,
}

impl OpeningBalances {
    /// Returns the carried-forward employee amount for a statutory type.
    pub fn employee_for(&self, code: &str) -> Decimal {
        self.by_type.get(code).map_or(Decimal::ZERO, |a| a.employee)
    }

    /// Returns the carried-forward employer amount for a statutory type.
    pub fn employer_for(&self, code: &str) -> Decimal {
        self.by_type.get(code).map_or(Decimal::ZERO, |a| a.employer)
    }
}

/// One statutory deduction line recorded against a historical payroll run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedDeduction {
    /// The statutory type code the amounts belong to.
    pub type_code: String,
    /// The employee amount withheld by the run.
    pub employee_amount: Decimal,
    /// The employer amount charged by the run.
    pub employer_amount: Decimal,
}

/// A persisted payroll run, as read back from the run-history store.
///
/// The aggregation functions in
/// [`calculation::ytd`](crate::calculation) fold these records into
/// [`YtdStatutoryAmounts`] and [`PeriodStatutoryAmounts`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRunRecord {
    /// Identifier of the payroll run.
    pub run_id: String,
    /// The employee the run was processed for.
    pub employee_id: String,
    /// The pay period the run belongs to.
    pub pay_period_id: String,
    /// The run's pay date; determines the tax year it counts toward.
    pub pay_date: NaiveDate,
    /// Taxable income processed by the run.
    pub taxable_income: Decimal,
    /// Relief amount granted by the run.
    #[serde(default)]
    pub relief_amount: Decimal,
    /// Per-statutory-type amounts withheld by the run.
    pub deductions: Vec<RecordedDeduction>,
}
