//! Orchestration entry points for statutory calculations.
//!
//! [`StatutoryEngine`] assembles the calculation context (YTD and period
//! aggregates, opening balances, reference data, relief) with a concurrent
//! fan-out over its repositories, invokes the synchronous cumulative
//! calculator once, and returns the full audited result. The engine never
//! writes: persisting the resulting payroll run is the caller's
//! responsibility.
//!
//! The engine performs no mutual exclusion between concurrent calculations.
//! Callers must serialize calculations per (employee, tax year) — e.g., via
//! a per-employee lock or single-writer queue — or two concurrent runs may
//! both read stale YTD amounts and under-withhold. This is a hard external
//! precondition.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    CalculationInput, aggregate_period, aggregate_ytd, calculate_statutory_deductions,
    resolve_country_tax_settings, resolve_relief, tax_year_for_date,
};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CumulativeCalculationContext, PayrollRunRecord, PeriodStatutoryAmounts,
    StatutoryCalculationResult,
};
use crate::repository::{PayPeriodRepository, PayrollHistoryRepository, ReferenceRepository};

/// Parameters for an off-cycle (supplemental) statutory calculation.
#[derive(Debug, Clone)]
pub struct OffCycleCalculationParams {
    /// The employee to calculate for.
    pub employee_id: String,
    /// The existing pay period the off-cycle run falls in.
    pub pay_period_id: String,
    /// Gross pay for the run (non-negative).
    pub gross_pay: Decimal,
    /// The country whose statutory rules apply (ISO code).
    pub country_code: String,
    /// A run to exclude from aggregation, for recalculations.
    pub exclude_run_id: Option<String>,
    /// Number of Mondays in the pay period, for weekly-aligned types.
    pub monday_count: Option<u32>,
    /// The employee's age, when known; gates age-limited types.
    pub employee_age: Option<u32>,
}

/// Parameters for a regular statutory calculation.
#[derive(Debug, Clone)]
pub struct RegularCalculationParams {
    /// The employee to calculate for.
    pub employee_id: String,
    /// The start date of the pay period being processed.
    pub pay_period_start: NaiveDate,
    /// Gross pay for the run (non-negative).
    pub gross_pay: Decimal,
    /// The country whose statutory rules apply (ISO code).
    pub country_code: String,
    /// A run to exclude from aggregation, for recalculations.
    pub exclude_run_id: Option<String>,
    /// Number of Mondays in the pay period, for weekly-aligned types.
    pub monday_count: Option<u32>,
    /// The employee's age, when known; gates age-limited types.
    pub employee_age: Option<u32>,
}

struct CalculationRequest {
    employee_id: String,
    country_code: String,
    gross_pay: Decimal,
    effective_date: NaiveDate,
    pay_period_id: Option<String>,
    exclude_run_id: Option<String>,
    monday_count: Option<u32>,
    employee_age: Option<u32>,
    is_off_cycle: bool,
}

/// The statutory calculation engine.
///
/// Holds read-only handles to the reference, history, and pay period
/// stores. Cheap to clone and share.
#[derive(Clone)]
pub struct StatutoryEngine {
    reference: Arc<dyn ReferenceRepository>,
    history: Arc<dyn PayrollHistoryRepository>,
    periods: Arc<dyn PayPeriodRepository>,
}

impl StatutoryEngine {
    /// Creates an engine over the given repositories.
    pub fn new(
        reference: Arc<dyn ReferenceRepository>,
        history: Arc<dyn PayrollHistoryRepository>,
        periods: Arc<dyn PayPeriodRepository>,
    ) -> Self {
        Self {
            reference,
            history,
            periods,
        }
    }

    /// Calculates statutory deductions for an off-cycle run.
    ///
    /// Resolves the pay period, derives the tax year and effective date
    /// from its start, and computes the run as the incremental amount on
    /// top of what the period has already withheld.
    ///
    /// # Errors
    ///
    /// [`EngineError::PayPeriodNotFound`] when the pay period does not
    /// exist; [`EngineError::InvalidInput`] for a negative gross pay or an
    /// empty country code; repository failures propagate as-is. On error,
    /// no deduction amounts were computed.
    pub async fn calculate_off_cycle(
        &self,
        params: OffCycleCalculationParams,
    ) -> EngineResult<StatutoryCalculationResult> {
        validate_params(&params.country_code, params.gross_pay)?;

        let period = self
            .periods
            .pay_period(&params.pay_period_id)
            .await?
            .ok_or_else(|| EngineError::PayPeriodNotFound {
                id: params.pay_period_id.clone(),
            })?;

        self.calculate(CalculationRequest {
            employee_id: params.employee_id,
            country_code: params.country_code,
            gross_pay: params.gross_pay,
            effective_date: period.start_date,
            pay_period_id: Some(params.pay_period_id),
            exclude_run_id: params.exclude_run_id,
            monday_count: params.monday_count,
            employee_age: params.employee_age,
            is_off_cycle: true,
        })
        .await
    }

    /// Calculates statutory deductions for a regular run.
    ///
    /// Takes the period start date directly; regular runs do not share a
    /// period with another run, so period amounts are empty by definition.
    ///
    /// # Errors
    ///
    /// Same contract as [`calculate_off_cycle`](Self::calculate_off_cycle),
    /// minus the pay period lookup.
    pub async fn calculate_regular(
        &self,
        params: RegularCalculationParams,
    ) -> EngineResult<StatutoryCalculationResult> {
        validate_params(&params.country_code, params.gross_pay)?;

        self.calculate(CalculationRequest {
            employee_id: params.employee_id,
            country_code: params.country_code,
            gross_pay: params.gross_pay,
            effective_date: params.pay_period_start,
            pay_period_id: None,
            exclude_run_id: params.exclude_run_id,
            monday_count: params.monday_count,
            employee_age: params.employee_age,
            is_off_cycle: false,
        })
        .await
    }

    async fn calculate(
        &self,
        request: CalculationRequest,
    ) -> EngineResult<StatutoryCalculationResult> {
        let as_of = request.effective_date;
        let tax_year = tax_year_for_date(as_of);

        type RunsFuture<'a> =
            Pin<Box<dyn Future<Output = EngineResult<Vec<PayrollRunRecord>>> + Send + 'a>>;
        let period_runs: RunsFuture<'_> = match &request.pay_period_id {
            Some(period_id) => Box::pin(
                self.history
                    .runs_for_period(&request.employee_id, period_id),
            ),
            None => Box::pin(async { Ok::<_, EngineError>(Vec::new()) }),
        };

        let (
            types,
            bands,
            settings,
            rules,
            schemes,
            enrollments,
            year_runs,
            opening_balances,
            relief_claimed,
            period_run_records,
        ) = tokio::try_join!(
            self.reference.statutory_types(&request.country_code, as_of),
            self.reference.rate_bands(&request.country_code, as_of),
            self.reference
                .country_tax_settings(&request.country_code, as_of),
            self.reference.relief_rules(&request.country_code, as_of),
            self.reference.relief_schemes(&request.country_code, as_of),
            self.reference
                .employee_enrollments(&request.employee_id, as_of),
            self.history
                .runs_for_tax_year(&request.employee_id, tax_year),
            self.history
                .opening_balances(&request.employee_id, tax_year),
            self.history
                .relief_claimed(&request.employee_id, tax_year),
            period_runs,
        )?;

        let settings = resolve_country_tax_settings(settings, &request.country_code);
        let exclude = request.exclude_run_id.as_deref();
        let ytd_amounts = aggregate_ytd(&year_runs, tax_year, exclude);
        let period_amounts = match &request.pay_period_id {
            Some(period_id) => aggregate_period(&period_run_records, period_id, exclude),
            None => PeriodStatutoryAmounts::default(),
        };
        let relief = resolve_relief(
            &rules,
            &schemes,
            &enrollments,
            &relief_claimed,
            request.gross_pay,
        );

        let context = CumulativeCalculationContext {
            ytd_amounts,
            period_amounts,
            opening_balances: opening_balances.unwrap_or_default(),
            tax_year,
            tax_calculation_method: settings.method,
            allow_mid_year_refunds: settings.allow_mid_year_refunds,
            pay_periods_per_year: settings.pay_periods_per_year,
            is_off_cycle: request.is_off_cycle,
        };

        let outcome = calculate_statutory_deductions(&CalculationInput {
            gross_pay: request.gross_pay,
            types: &types,
            bands: &bands,
            relief: &relief,
            context: &context,
            employee_age: request.employee_age,
            monday_count: request.monday_count,
        });

        for warning in &outcome.warnings {
            warn!(
                employee_id = %request.employee_id,
                country = %request.country_code,
                code = %warning.code,
                "{}",
                warning.message
            );
        }

        let total_income_reduction = relief.total_income_reduction();
        let result = StatutoryCalculationResult {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            employee_id: request.employee_id,
            country_code: request.country_code,
            gross_pay: request.gross_pay,
            deductions: outcome.deductions,
            total_employee_deductions: outcome.total_employee_deductions,
            total_employer_contributions: outcome.total_employer_contributions,
            reliefs: relief.applied(),
            total_taxable_income_reduction: total_income_reduction,
            total_tax_credits: relief.total_tax_credits(),
            adjusted_taxable_income: (request.gross_pay - total_income_reduction)
                .max(Decimal::ZERO),
            warnings: outcome.warnings,
            context,
        };

        info!(
            calculation_id = %result.calculation_id,
            employee_id = %result.employee_id,
            country = %result.country_code,
            tax_year = %tax_year,
            off_cycle = result.context.is_off_cycle,
            total_employee = %result.total_employee_deductions,
            "statutory calculation complete"
        );

        Ok(result)
    }
}

fn validate_params(country_code: &str, gross_pay: Decimal) -> EngineResult<()> {
    if country_code.trim().is_empty() {
        return Err(EngineError::InvalidInput {
            field: "country_code".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    if gross_pay < Decimal::ZERO {
        return Err(EngineError::InvalidInput {
            field: "gross_pay".to_string(),
            message: "must not be negative".to_string(),
        });
    }
    Ok(())
}
