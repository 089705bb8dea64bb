//! Country tax settings resolution.
//!
//! The fallback-to-defaults behavior lives in one place so the default
//! policy is a single auditable source of truth rather than scattered
//! null-coalescing at call sites.

use chrono::NaiveDate;

use crate::models::{CountryTaxSettings, TaxCalculationMethod, Validity};

/// Default tax calculation method when a country has no settings record.
pub const DEFAULT_TAX_CALCULATION_METHOD: TaxCalculationMethod = TaxCalculationMethod::Cumulative;

/// Default mid-year refund policy when a country has no settings record.
pub const DEFAULT_ALLOW_MID_YEAR_REFUNDS: bool = false;

/// Default number of pay periods per year (monthly payroll).
pub const DEFAULT_PAY_PERIODS_PER_YEAR: u32 = 12;

/// Resolves a country's tax settings, falling back to the documented
/// defaults when none are configured.
///
/// Absence of settings is not an error: countries without explicit
/// configuration get cumulative calculation, no mid-year refunds, and a
/// monthly period convention.
pub fn resolve_country_tax_settings(
    configured: Option<CountryTaxSettings>,
    country_code: &str,
) -> CountryTaxSettings {
    configured.unwrap_or_else(|| CountryTaxSettings {
        country_code: country_code.to_string(),
        method: DEFAULT_TAX_CALCULATION_METHOD,
        allow_mid_year_refunds: DEFAULT_ALLOW_MID_YEAR_REFUNDS,
        pay_periods_per_year: DEFAULT_PAY_PERIODS_PER_YEAR,
        validity: Validity::unbounded(NaiveDate::MIN),
    })
}
