//! Data-access abstractions for the statutory deduction engine.
//!
//! The engine reads reference data, payroll run history, and pay periods
//! through these traits; it never writes. Implementations are expected to
//! return only records whose validity window contains the requested
//! effective date, and to propagate underlying failures without retrying.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::calculation::TaxYear;
use crate::error::EngineResult;
use crate::models::{
    CountryTaxSettings, EmployeeReliefEnrollment, OpeningBalances, PayPeriod, PayrollRunRecord,
    RateBand, StatutoryDeductionType, TaxReliefRule, TaxReliefScheme,
};

mod memory;

pub use memory::{
    InMemoryPayPeriodRepository, InMemoryPayrollHistoryRepository, InMemoryReferenceRepository,
};

/// Read-only access to country statutory reference data.
///
/// All lookups are effective-dated: returned records are valid as of the
/// given date, and records outside their validity window are excluded at
/// the repository boundary rather than filtered downstream.
#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    /// The statutory deduction types active for a country on a date.
    async fn statutory_types(
        &self,
        country_code: &str,
        as_of: NaiveDate,
    ) -> EngineResult<Vec<StatutoryDeductionType>>;

    /// The rate bands active for a country on a date, keyed by statutory
    /// type code.
    async fn rate_bands(
        &self,
        country_code: &str,
        as_of: NaiveDate,
    ) -> EngineResult<HashMap<String, Vec<RateBand>>>;

    /// The country's tax settings on a date, if configured.
    ///
    /// Absence is not an error; the engine falls back to documented
    /// defaults.
    async fn country_tax_settings(
        &self,
        country_code: &str,
        as_of: NaiveDate,
    ) -> EngineResult<Option<CountryTaxSettings>>;

    /// The statutory relief rules active for a country on a date.
    async fn relief_rules(
        &self,
        country_code: &str,
        as_of: NaiveDate,
    ) -> EngineResult<Vec<TaxReliefRule>>;

    /// The relief schemes active for a country on a date.
    async fn relief_schemes(
        &self,
        country_code: &str,
        as_of: NaiveDate,
    ) -> EngineResult<Vec<TaxReliefScheme>>;

    /// An employee's scheme enrollments active on a date.
    async fn employee_enrollments(
        &self,
        employee_id: &str,
        as_of: NaiveDate,
    ) -> EngineResult<Vec<EmployeeReliefEnrollment>>;
}

/// Read-only access to payroll run history for YTD/period aggregation.
#[async_trait]
pub trait PayrollHistoryRepository: Send + Sync {
    /// All of an employee's payroll runs falling in a tax year.
    async fn runs_for_tax_year(
        &self,
        employee_id: &str,
        tax_year: TaxYear,
    ) -> EngineResult<Vec<PayrollRunRecord>>;

    /// An employee's payroll runs within one pay period.
    async fn runs_for_period(
        &self,
        employee_id: &str,
        pay_period_id: &str,
    ) -> EngineResult<Vec<PayrollRunRecord>>;

    /// Carried-forward opening balances for an employee and tax year.
    async fn opening_balances(
        &self,
        employee_id: &str,
        tax_year: TaxYear,
    ) -> EngineResult<Option<OpeningBalances>>;

    /// The relief ledger: amounts already granted this tax year, keyed by
    /// relief rule or scheme id.
    async fn relief_claimed(
        &self,
        employee_id: &str,
        tax_year: TaxYear,
    ) -> EngineResult<HashMap<String, Decimal>>;
}

/// Read-only pay period lookup.
#[async_trait]
pub trait PayPeriodRepository: Send + Sync {
    /// Resolves a pay period by id, if it exists.
    async fn pay_period(&self, pay_period_id: &str) -> EngineResult<Option<PayPeriod>>;
}
