//! Statutory deduction type and rate band models.
//!
//! A [`StatutoryDeductionType`] is a named deduction category for a country
//! (income tax, national insurance, pension contribution). Its progressive
//! schedule is a list of [`RateBand`] records forming an ordered,
//! contiguous partition of income ranges. Both are immutable, effective-dated
//! reference data maintained by country configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::effective::{EffectiveDated, Validity};

/// Whether a statutory deduction is a tax or a contribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionKind {
    /// A tax withheld from the employee (e.g., income tax).
    Tax,
    /// A contribution, typically with an employer portion (e.g., social security).
    Contribution,
}

/// A named statutory deduction category for a country.
///
/// # Example
///
/// ```
/// use statutory_engine::models::{DeductionKind, StatutoryDeductionType, Validity};
/// use chrono::NaiveDate;
///
/// let income_tax = StatutoryDeductionType {
///     code: "INCOME_TAX".to_string(),
///     name: "Income Tax".to_string(),
///     country_code: "JM".to_string(),
///     kind: DeductionKind::Tax,
///     has_employee_portion: true,
///     has_employer_portion: false,
///     annual_cap_employee: None,
///     annual_cap_employer: None,
///     min_age: None,
///     max_age: None,
///     weekly_basis: false,
///     validity: Validity::unbounded(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
/// };
/// assert!(income_tax.applies_to_age(Some(30)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatutoryDeductionType {
    /// Identifying code, unique per country (e.g., "INCOME_TAX", "NIS").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// The country this deduction type belongs to (ISO code).
    pub country_code: String,
    /// Whether this is a tax or a contribution.
    pub kind: DeductionKind,
    /// Whether an employee portion applies.
    #[serde(default = "default_true")]
    pub has_employee_portion: bool,
    /// Whether an employer portion applies.
    #[serde(default)]
    pub has_employer_portion: bool,
    /// Annual cap on the employee amount for a tax year, if any.
    #[serde(default)]
    pub annual_cap_employee: Option<Decimal>,
    /// Annual cap on the employer amount for a tax year, if any.
    #[serde(default)]
    pub annual_cap_employer: Option<Decimal>,
    /// Minimum employee age (inclusive) for the deduction to apply, if gated.
    #[serde(default)]
    pub min_age: Option<u32>,
    /// Maximum employee age (inclusive) for the deduction to apply, if gated.
    #[serde(default)]
    pub max_age: Option<u32>,
    /// Marks weekly-aligned contribution types whose non-cumulative
    /// placement is computed per week and scaled by the period's Monday count.
    #[serde(default)]
    pub weekly_basis: bool,
    /// The window during which this type is effective.
    pub validity: Validity,
}

fn default_true() -> bool {
    true
}

impl StatutoryDeductionType {
    /// Returns true if the deduction applies to an employee of the given age.
    ///
    /// An unknown age (`None`) never gates: age limits only take effect when
    /// the caller actually supplies an age.
    pub fn applies_to_age(&self, age: Option<u32>) -> bool {
        let Some(age) = age else {
            return true;
        };
        if let Some(min) = self.min_age {
            if age < min {
                return false;
            }
        }
        if let Some(max) = self.max_age {
            if age > max {
                return false;
            }
        }
        true
    }
}

impl EffectiveDated for StatutoryDeductionType {
    fn validity(&self) -> &Validity {
        &self.validity
    }
}

/// One bracket of a progressive statutory schedule.
///
/// Bands for a given type and date form a contiguous, monotonically
/// increasing partition of income: each band covers `[lower, upper)`, with
/// `upper = None` marking the open top band. Income falling inside a band is
/// charged at the band's rate; a flat amount, if present, is charged once
/// when income reaches the band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateBand {
    /// The statutory type this band belongs to.
    pub type_code: String,
    /// The country this band belongs to (ISO code).
    pub country_code: String,
    /// Lower income bound (inclusive).
    pub lower: Decimal,
    /// Upper income bound (exclusive); `None` for the open top band.
    #[serde(default)]
    pub upper: Option<Decimal>,
    /// Employee rate applied to income inside this band.
    pub employee_rate: Decimal,
    /// Employer rate applied to income inside this band.
    #[serde(default)]
    pub employer_rate: Decimal,
    /// Flat employee amount charged once when income reaches this band.
    #[serde(default)]
    pub flat_employee: Option<Decimal>,
    /// Flat employer amount charged once when income reaches this band.
    #[serde(default)]
    pub flat_employer: Option<Decimal>,
    /// The window during which this band is effective.
    pub validity: Validity,
}

impl RateBand {
    /// Returns true if the given income amount falls inside this band.
    pub fn contains_income(&self, income: Decimal) -> bool {
        if income < self.lower {
            return false;
        }
        match self.upper {
            Some(upper) => income < upper,
            None => true,
        }
    }
}

impl EffectiveDated for RateBand {
    fn validity(&self) -> &Validity {
        &self.validity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn validity() -> Validity {
        Validity::unbounded(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    fn pension_type() -> StatutoryDeductionType {
        StatutoryDeductionType {
            code: "PENSION".to_string(),
            name: "Pension Contribution".to_string(),
            country_code: "JM".to_string(),
            kind: DeductionKind::Contribution,
            has_employee_portion: true,
            has_employer_portion: true,
            annual_cap_employee: Some(dec("15000")),
            annual_cap_employer: Some(dec("15000")),
            min_age: Some(18),
            max_age: Some(65),
            weekly_basis: false,
            validity: validity(),
        }
    }

    #[test]
    fn test_age_gate_inside_range() {
        let t = pension_type();
        assert!(t.applies_to_age(Some(18)));
        assert!(t.applies_to_age(Some(40)));
        assert!(t.applies_to_age(Some(65)));
    }

    #[test]
    fn test_age_gate_outside_range() {
        let t = pension_type();
        assert!(!t.applies_to_age(Some(17)));
        assert!(!t.applies_to_age(Some(66)));
    }

    #[test]
    fn test_unknown_age_never_gates() {
        let t = pension_type();
        assert!(t.applies_to_age(None));
    }

    #[test]
    fn test_band_contains_income_boundaries() {
        let band = RateBand {
            type_code: "INCOME_TAX".to_string(),
            country_code: "JM".to_string(),
            lower: dec("50000"),
            upper: Some(dec("100000")),
            employee_rate: dec("0.25"),
            employer_rate: Decimal::ZERO,
            flat_employee: None,
            flat_employer: None,
            validity: validity(),
        };

        assert!(!band.contains_income(dec("49999.99")));
        assert!(band.contains_income(dec("50000")));
        assert!(band.contains_income(dec("99999.99")));
        assert!(!band.contains_income(dec("100000")));
    }

    #[test]
    fn test_open_top_band_contains_everything_above_lower() {
        let band = RateBand {
            type_code: "INCOME_TAX".to_string(),
            country_code: "JM".to_string(),
            lower: dec("100000"),
            upper: None,
            employee_rate: dec("0.30"),
            employer_rate: Decimal::ZERO,
            flat_employee: None,
            flat_employer: None,
            validity: validity(),
        };

        assert!(band.contains_income(dec("100000")));
        assert!(band.contains_income(dec("9999999")));
        assert!(!band.contains_income(dec("99999")));
    }

    #[test]
    fn test_deduction_kind_serialization() {
        assert_eq!(serde_json::to_string(&DeductionKind::Tax).unwrap(), "\"tax\"");
        assert_eq!(
            serde_json::to_string(&DeductionKind::Contribution).unwrap(),
            "\"contribution\""
        );
    }

    #[test]
    fn test_type_deserialization_defaults() {
        let json = r#"{
            "code": "INCOME_TAX",
            "name": "Income Tax",
            "country_code": "JM",
            "kind": "tax",
            "validity": { "from": "2024-01-01" }
        }"#;

        let parsed: StatutoryDeductionType = serde_json::from_str(json).unwrap();
        assert!(parsed.has_employee_portion);
        assert!(!parsed.has_employer_portion);
        assert!(parsed.annual_cap_employee.is_none());
        assert!(!parsed.weekly_basis);
    }
}
