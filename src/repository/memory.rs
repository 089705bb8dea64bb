//! In-memory repository implementations.
//!
//! Back the YAML configuration loader and the test suites. Filtering
//! honors the same effective-dating contract as a production store: only
//! records whose validity window contains the requested date are returned.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::calculation::{TaxYear, tax_year_for_date};
use crate::error::EngineResult;
use crate::models::{
    CountryTaxSettings, EffectiveDated, EmployeeReliefEnrollment, OpeningBalances, PayPeriod,
    PayrollRunRecord, RateBand, StatutoryDeductionType, TaxReliefRule, TaxReliefScheme,
};

use super::{PayPeriodRepository, PayrollHistoryRepository, ReferenceRepository};

/// In-memory statutory reference data store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReferenceRepository {
    types: Vec<StatutoryDeductionType>,
    bands: Vec<RateBand>,
    settings: Vec<CountryTaxSettings>,
    rules: Vec<TaxReliefRule>,
    schemes: Vec<TaxReliefScheme>,
    enrollments: Vec<EmployeeReliefEnrollment>,
}

impl InMemoryReferenceRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a statutory deduction type.
    pub fn add_statutory_type(&mut self, ty: StatutoryDeductionType) {
        self.types.push(ty);
    }

    /// Adds a rate band.
    pub fn add_rate_band(&mut self, band: RateBand) {
        self.bands.push(band);
    }

    /// Adds a country settings record.
    pub fn add_country_tax_settings(&mut self, settings: CountryTaxSettings) {
        self.settings.push(settings);
    }

    /// Adds a statutory relief rule.
    pub fn add_relief_rule(&mut self, rule: TaxReliefRule) {
        self.rules.push(rule);
    }

    /// Adds a relief scheme.
    pub fn add_relief_scheme(&mut self, scheme: TaxReliefScheme) {
        self.schemes.push(scheme);
    }

    /// Adds an employee scheme enrollment.
    pub fn add_enrollment(&mut self, enrollment: EmployeeReliefEnrollment) {
        self.enrollments.push(enrollment);
    }
}

#[async_trait]
impl ReferenceRepository for InMemoryReferenceRepository {
    async fn statutory_types(
        &self,
        country_code: &str,
        as_of: NaiveDate,
    ) -> EngineResult<Vec<StatutoryDeductionType>> {
        Ok(self
            .types
            .iter()
            .filter(|t| t.country_code == country_code && t.is_effective_at(as_of))
            .cloned()
            .collect())
    }

    async fn rate_bands(
        &self,
        country_code: &str,
        as_of: NaiveDate,
    ) -> EngineResult<HashMap<String, Vec<RateBand>>> {
        let mut by_type: HashMap<String, Vec<RateBand>> = HashMap::new();
        for band in self
            .bands
            .iter()
            .filter(|b| b.country_code == country_code && b.is_effective_at(as_of))
        {
            by_type
                .entry(band.type_code.clone())
                .or_default()
                .push(band.clone());
        }
        Ok(by_type)
    }

    async fn country_tax_settings(
        &self,
        country_code: &str,
        as_of: NaiveDate,
    ) -> EngineResult<Option<CountryTaxSettings>> {
        Ok(self
            .settings
            .iter()
            .find(|s| s.country_code == country_code && s.is_effective_at(as_of))
            .cloned())
    }

    async fn relief_rules(
        &self,
        country_code: &str,
        as_of: NaiveDate,
    ) -> EngineResult<Vec<TaxReliefRule>> {
        Ok(self
            .rules
            .iter()
            .filter(|r| r.country_code == country_code && r.is_effective_at(as_of))
            .cloned()
            .collect())
    }

    async fn relief_schemes(
        &self,
        country_code: &str,
        as_of: NaiveDate,
    ) -> EngineResult<Vec<TaxReliefScheme>> {
        Ok(self
            .schemes
            .iter()
            .filter(|s| s.country_code == country_code && s.is_effective_at(as_of))
            .cloned()
            .collect())
    }

    async fn employee_enrollments(
        &self,
        employee_id: &str,
        as_of: NaiveDate,
    ) -> EngineResult<Vec<EmployeeReliefEnrollment>> {
        Ok(self
            .enrollments
            .iter()
            .filter(|e| e.employee_id == employee_id && e.is_effective_at(as_of))
            .cloned()
            .collect())
    }
}

/// In-memory payroll run history store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPayrollHistoryRepository {
    runs: Vec<PayrollRunRecord>,
    opening_balances: HashMap<(String, i32), OpeningBalances>,
    relief_claimed: HashMap<(String, i32), HashMap<String, Decimal>>,
}

impl InMemoryPayrollHistoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a historical payroll run.
    pub fn add_run(&mut self, run: PayrollRunRecord) {
        self.runs.push(run);
    }

    /// Sets opening balances for an employee and tax year.
    pub fn set_opening_balances(
        &mut self,
        employee_id: &str,
        tax_year: TaxYear,
        balances: OpeningBalances,
    ) {
        self.opening_balances
            .insert((employee_id.to_string(), tax_year.year()), balances);
    }

    /// Records relief already claimed for an employee and tax year.
    pub fn set_relief_claimed(
        &mut self,
        employee_id: &str,
        tax_year: TaxYear,
        claimed: HashMap<String, Decimal>,
    ) {
        self.relief_claimed
            .insert((employee_id.to_string(), tax_year.year()), claimed);
    }
}

#[async_trait]
impl PayrollHistoryRepository for InMemoryPayrollHistoryRepository {
    async fn runs_for_tax_year(
        &self,
        employee_id: &str,
        tax_year: TaxYear,
    ) -> EngineResult<Vec<PayrollRunRecord>> {
        Ok(self
            .runs
            .iter()
            .filter(|r| {
                r.employee_id == employee_id && tax_year_for_date(r.pay_date) == tax_year
            })
            .cloned()
            .collect())
    }

    async fn runs_for_period(
        &self,
        employee_id: &str,
        pay_period_id: &str,
    ) -> EngineResult<Vec<PayrollRunRecord>> {
        Ok(self
            .runs
            .iter()
            .filter(|r| r.employee_id == employee_id && r.pay_period_id == pay_period_id)
            .cloned()
            .collect())
    }

    async fn opening_balances(
        &self,
        employee_id: &str,
        tax_year: TaxYear,
    ) -> EngineResult<Option<OpeningBalances>> {
        Ok(self
            .opening_balances
            .get(&(employee_id.to_string(), tax_year.year()))
            .cloned())
    }

    async fn relief_claimed(
        &self,
        employee_id: &str,
        tax_year: TaxYear,
    ) -> EngineResult<HashMap<String, Decimal>> {
        Ok(self
            .relief_claimed
            .get(&(employee_id.to_string(), tax_year.year()))
            .cloned()
            .unwrap_or_default())
    }
}

/// In-memory pay period store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPayPeriodRepository {
    periods: HashMap<String, PayPeriod>,
}

impl InMemoryPayPeriodRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a pay period.
    pub fn add_pay_period(&mut self, period: PayPeriod) {
        self.periods.insert(period.id.clone(), period);
    }
}

#[async_trait]
impl PayPeriodRepository for InMemoryPayPeriodRepository {
    async fn pay_period(&self, pay_period_id: &str) -> EngineResult<Option<PayPeriod>> {
        Ok(self.periods.get(pay_period_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeductionKind, Validity};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn statutory_type(code: &str, from: NaiveDate, to: Option<NaiveDate>) -> StatutoryDeductionType {
        StatutoryDeductionType {
            code: code.to_string(),
            name: code.to_string(),
            country_code: "JM".to_string(),
            kind: DeductionKind::Tax,
            has_employee_portion: true,
            has_employer_portion: false,
            annual_cap_employee: None,
            annual_cap_employer: None,
            min_age: None,
            max_age: None,
            weekly_basis: false,
            validity: Validity::new(from, to),
        }
    }

    #[tokio::test]
    async fn test_statutory_types_filtered_by_country_and_date() {
        let mut repo = InMemoryReferenceRepository::new();
        repo.add_statutory_type(statutory_type(
            "INCOME_TAX",
            date(2024, 1, 1),
            None,
        ));
        repo.add_statutory_type(statutory_type(
            "OLD_TAX",
            date(2020, 1, 1),
            Some(date(2023, 12, 31)),
        ));

        let found = repo
            .statutory_types("JM", date(2024, 7, 1))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].code, "INCOME_TAX");

        let none = repo.statutory_types("TT", date(2024, 7, 1)).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_rate_bands_grouped_by_type_code() {
        let mut repo = InMemoryReferenceRepository::new();
        let band = RateBand {
            type_code: "INCOME_TAX".to_string(),
            country_code: "JM".to_string(),
            lower: Decimal::ZERO,
            upper: None,
            employee_rate: dec("0.10"),
            employer_rate: Decimal::ZERO,
            flat_employee: None,
            flat_employer: None,
            validity: Validity::unbounded(date(2024, 1, 1)),
        };
        repo.add_rate_band(band.clone());
        repo.add_rate_band(RateBand {
            type_code: "NIS".to_string(),
            ..band
        });

        let bands = repo.rate_bands("JM", date(2024, 7, 1)).await.unwrap();
        assert_eq!(bands.len(), 2);
        assert_eq!(bands["INCOME_TAX"].len(), 1);
        assert_eq!(bands["NIS"].len(), 1);
    }

    #[tokio::test]
    async fn test_missing_settings_returns_none() {
        let repo = InMemoryReferenceRepository::new();
        let settings = repo
            .country_tax_settings("JM", date(2024, 7, 1))
            .await
            .unwrap();
        assert!(settings.is_none());
    }

    #[tokio::test]
    async fn test_runs_scoped_to_employee_and_tax_year() {
        let mut repo = InMemoryPayrollHistoryRepository::new();
        repo.add_run(PayrollRunRecord {
            run_id: "run_1".to_string(),
            employee_id: "emp_001".to_string(),
            pay_period_id: "pp_2024_06".to_string(),
            pay_date: date(2024, 6, 25),
            taxable_income: dec("60000"),
            relief_amount: Decimal::ZERO,
            deductions: vec![],
        });
        repo.add_run(PayrollRunRecord {
            run_id: "run_2".to_string(),
            employee_id: "emp_002".to_string(),
            pay_period_id: "pp_2024_06".to_string(),
            pay_date: date(2024, 6, 25),
            taxable_income: dec("50000"),
            relief_amount: Decimal::ZERO,
            deductions: vec![],
        });

        let runs = repo
            .runs_for_tax_year("emp_001", TaxYear::new(2024))
            .await
            .unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].run_id, "run_1");

        let runs_2023 = repo
            .runs_for_tax_year("emp_001", TaxYear::new(2023))
            .await
            .unwrap();
        assert!(runs_2023.is_empty());
    }

    #[tokio::test]
    async fn test_relief_claimed_defaults_to_empty() {
        let repo = InMemoryPayrollHistoryRepository::new();
        let claimed = repo
            .relief_claimed("emp_001", TaxYear::new(2024))
            .await
            .unwrap();
        assert!(claimed.is_empty());
    }

    #[tokio::test]
    async fn test_pay_period_lookup() {
        let mut repo = InMemoryPayPeriodRepository::new();
        repo.add_pay_period(PayPeriod {
            id: "pp_2024_07".to_string(),
            start_date: date(2024, 7, 1),
            end_date: date(2024, 7, 31),
        });

        assert!(repo.pay_period("pp_2024_07").await.unwrap().is_some());
        assert!(repo.pay_period("pp_missing").await.unwrap().is_none());
    }
}
