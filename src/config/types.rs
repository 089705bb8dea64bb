//! Configuration file schema for country statutory data.
//!
//! These structures are deserialized from per-country YAML files and
//! converted into the engine's reference models by the loader. Bands may
//! omit their validity window, in which case they inherit the window of the
//! statutory type they belong to.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{DeductionKind, ReliefBenefit, ReliefScope, TaxCalculationMethod, Validity};

/// A complete country configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct CountryConfigFile {
    /// The country the file configures (ISO code).
    pub country_code: String,
    /// Tax settings records, effective-dated.
    #[serde(default)]
    pub settings: Vec<SettingsEntry>,
    /// Statutory deduction types with their rate bands.
    #[serde(default)]
    pub statutory_types: Vec<StatutoryTypeEntry>,
    /// Statutory relief rules.
    #[serde(default)]
    pub relief_rules: Vec<ReliefEntry>,
    /// Relief schemes employees may enroll in.
    #[serde(default)]
    pub relief_schemes: Vec<ReliefEntry>,
}

/// One tax settings record in a country file.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsEntry {
    /// The tax calculation method.
    pub method: TaxCalculationMethod,
    /// Whether mid-year refunds are allowed.
    #[serde(default)]
    pub allow_mid_year_refunds: bool,
    /// Pay periods per year for non-cumulative annualization.
    #[serde(default = "default_pay_periods_per_year")]
    pub pay_periods_per_year: u32,
    /// The window during which these settings are effective.
    pub validity: Validity,
}

fn default_pay_periods_per_year() -> u32 {
    crate::calculation::DEFAULT_PAY_PERIODS_PER_YEAR
}

/// One statutory deduction type in a country file.
#[derive(Debug, Clone, Deserialize)]
pub struct StatutoryTypeEntry {
    /// Identifying code, unique within the country.
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Whether this is a tax or a contribution.
    pub kind: DeductionKind,
    /// Whether an employee portion applies.
    #[serde(default = "default_true")]
    pub has_employee_portion: bool,
    /// Whether an employer portion applies.
    #[serde(default)]
    pub has_employer_portion: bool,
    /// Annual cap on the employee amount, if any.
    #[serde(default)]
    pub annual_cap_employee: Option<Decimal>,
    /// Annual cap on the employer amount, if any.
    #[serde(default)]
    pub annual_cap_employer: Option<Decimal>,
    /// Minimum employee age (inclusive), if gated.
    #[serde(default)]
    pub min_age: Option<u32>,
    /// Maximum employee age (inclusive), if gated.
    #[serde(default)]
    pub max_age: Option<u32>,
    /// Marks weekly-aligned contribution types.
    #[serde(default)]
    pub weekly_basis: bool,
    /// The window during which this type is effective.
    pub validity: Validity,
    /// The type's progressive rate bands.
    #[serde(default)]
    pub bands: Vec<BandEntry>,
}

fn default_true() -> bool {
    true
}

/// One rate band in a country file.
#[derive(Debug, Clone, Deserialize)]
pub struct BandEntry {
    /// Lower income bound (inclusive).
    pub lower: Decimal,
    /// Upper income bound (exclusive); omitted for the open top band.
    #[serde(default)]
    pub upper: Option<Decimal>,
    /// Employee rate for income inside the band.
    pub employee_rate: Decimal,
    /// Employer rate for income inside the band.
    #[serde(default)]
    pub employer_rate: Decimal,
    /// Flat employee amount charged once when income enters the band.
    #[serde(default)]
    pub flat_employee: Option<Decimal>,
    /// Flat employer amount charged once when income enters the band.
    #[serde(default)]
    pub flat_employer: Option<Decimal>,
    /// The band's validity window; inherits the type's window when omitted.
    #[serde(default)]
    pub validity: Option<Validity>,
}

/// One relief rule or scheme in a country file.
#[derive(Debug, Clone, Deserialize)]
pub struct ReliefEntry {
    /// Identifying code, unique within the country.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// The benefit granted.
    pub benefit: ReliefBenefit,
    /// The statutory types the relief applies to.
    #[serde(default)]
    pub scope: ReliefScope,
    /// Annual cap on the total relief grantable, if any.
    #[serde(default)]
    pub annual_cap: Option<Decimal>,
    /// The window during which the relief is effective.
    pub validity: Validity,
}
