//! Country tax settings.
//!
//! Per-country configuration governing how statutory tax is placed against
//! the progressive schedule. Exactly one settings record is active per
//! country per effective period; when none is configured the engine falls
//! back to the documented defaults (see
//! [`resolve_country_tax_settings`](crate::calculation::resolve_country_tax_settings)).

use serde::{Deserialize, Serialize};

use super::effective::{EffectiveDated, Validity};

/// How tax is computed relative to the tax year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxCalculationMethod {
    /// Tax is computed against year-to-date income and tax paid, so each pay
    /// period catches up to the correct annual progressive-bracket position.
    Cumulative,
    /// Tax is computed independently each pay period based only on that
    /// period's income, annualized per the country's period convention.
    NonCumulative,
}

/// Per-country tax calculation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryTaxSettings {
    /// The country these settings apply to (ISO code).
    pub country_code: String,
    /// The tax calculation method in force.
    pub method: TaxCalculationMethod,
    /// Whether cumulative overpayment may be refunded mid-year.
    pub allow_mid_year_refunds: bool,
    /// The number of pay periods per year used to annualize non-cumulative
    /// placements.
    pub pay_periods_per_year: u32,
    /// The window during which these settings are effective.
    pub validity: Validity,
}

impl EffectiveDated for CountryTaxSettings {
    fn validity(&self) -> &Validity {
        &self.validity
    }
}
