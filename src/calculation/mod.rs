//! Calculation logic for the statutory deduction engine.
//!
//! This module contains the pure calculation functions: tax year boundary
//! determination, the monetary rounding policy, the progressive rate band
//! engine, YTD/period aggregation over run history, tax relief resolution,
//! country settings defaults, and the cumulative statutory calculator that
//! ties them together.

mod brackets;
mod relief;
mod rounding;
mod settings;
mod statutory;
mod tax_year;
mod ytd;

pub use brackets::{
    employee_amount_for_income, employer_amount_for_income, marginal_band, sorted_schedule,
    validate_schedule,
};
pub use relief::{ReliefContext, ReliefGrant, resolve_relief};
pub use rounding::{MONEY_DECIMAL_PLACES, round_money};
pub use settings::{
    DEFAULT_ALLOW_MID_YEAR_REFUNDS, DEFAULT_PAY_PERIODS_PER_YEAR,
    DEFAULT_TAX_CALCULATION_METHOD, resolve_country_tax_settings,
};
pub use statutory::{
    CalculationInput, CalculationOutcome, WARN_INVALID_RATE_BANDS, WARN_MISSING_RATE_BANDS,
    calculate_statutory_deductions,
};
pub use tax_year::{TaxYear, tax_year_for_date};
pub use ytd::{aggregate_period, aggregate_ytd};
