//! Tax relief reference models.
//!
//! Statutory relief rules are country-level and automatic; relief schemes
//! are optional programs an employee enrolls in. Both grant a
//! [`ReliefBenefit`]: a taxable-income reduction or a tax credit. All three
//! record kinds are effective-dated; enrollments are created when the
//! employee joins a scheme and are read-only during calculation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::effective::{EffectiveDated, Validity};

/// The benefit granted by a relief rule or scheme.
///
/// A closed sum type rather than an open parameter map, so the calculator
/// can handle each benefit kind exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReliefBenefit {
    /// Reduces taxable income by a flat amount per pay period.
    FlatIncomeReduction {
        /// The per-period reduction amount.
        amount: Decimal,
    },
    /// Reduces taxable income by a percentage of gross pay, optionally capped
    /// per pay period.
    PercentOfGross {
        /// The fraction of gross pay to deduct (e.g., 0.05 for 5%).
        percent: Decimal,
        /// Optional per-period cap on the reduction.
        #[serde(default)]
        cap: Option<Decimal>,
    },
    /// Subtracts a flat amount from the computed tax per pay period.
    FlatTaxCredit {
        /// The per-period credit amount.
        amount: Decimal,
    },
}

/// Which statutory deduction types a relief applies to.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliefScope {
    /// The relief applies to every statutory type.
    #[default]
    AllTypes,
    /// The relief applies only to the listed type codes.
    Types(Vec<String>),
}

impl ReliefScope {
    /// Returns true if the relief applies to the given statutory type code.
    ///
    /// # Example
    ///
    /// ```
    /// use statutory_engine::models::ReliefScope;
    ///
    /// let scope = ReliefScope::Types(vec!["INCOME_TAX".to_string()]);
    /// assert!(scope.includes("INCOME_TAX"));
    /// assert!(!scope.includes("NIS"));
    /// assert!(ReliefScope::AllTypes.includes("NIS"));
    /// ```
    pub fn includes(&self, code: &str) -> bool {
        match self {
            ReliefScope::AllTypes => true,
            ReliefScope::Types(codes) => codes.iter().any(|c| c == code),
        }
    }
}

/// A country-level statutory relief rule, applied automatically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxReliefRule {
    /// Identifying code, unique per country.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// The country this rule belongs to (ISO code).
    pub country_code: String,
    /// The benefit granted by the rule.
    pub benefit: ReliefBenefit,
    /// The statutory types the rule applies to.
    #[serde(default)]
    pub scope: ReliefScope,
    /// Annual cap on the total relief grantable under this rule, if any.
    #[serde(default)]
    pub annual_cap: Option<Decimal>,
    /// The window during which this rule is effective.
    pub validity: Validity,
}

impl EffectiveDated for TaxReliefRule {
    fn validity(&self) -> &Validity {
        &self.validity
    }
}

/// An optional relief program an employee may enroll in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxReliefScheme {
    /// Identifying code, unique per country.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// The country this scheme belongs to (ISO code).
    pub country_code: String,
    /// The benefit granted to enrolled employees.
    pub benefit: ReliefBenefit,
    /// The statutory types the scheme applies to.
    #[serde(default)]
    pub scope: ReliefScope,
    /// Annual cap on the total relief grantable under this scheme, if any.
    #[serde(default)]
    pub annual_cap: Option<Decimal>,
    /// The window during which this scheme is effective.
    pub validity: Validity,
}

impl EffectiveDated for TaxReliefScheme {
    fn validity(&self) -> &Validity {
        &self.validity
    }
}

/// Links an employee to a relief scheme.
///
/// Scheme-based reliefs apply only while an enrollment is effective. The
/// optional override replaces the scheme benefit's amount (flat benefits) or
/// percentage (percent-of-gross benefits) for this employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeReliefEnrollment {
    /// The enrolled employee.
    pub employee_id: String,
    /// The scheme the employee is enrolled in.
    pub scheme_id: String,
    /// Enrollment-specific override of the scheme's benefit amount/percent.
    #[serde(default)]
    pub amount_override: Option<Decimal>,
    /// The window during which the enrollment is active.
    pub validity: Validity,
}

impl EffectiveDated for EmployeeReliefEnrollment {
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

    #[test]
    fn test_benefit_tagged_serialization() {
        let benefit = ReliefBenefit::FlatIncomeReduction {
            amount: dec("2500"),
        };
        let json = serde_json::to_string(&benefit).unwrap();
        assert!(json.contains("\"kind\":\"flat_income_reduction\""));

        let benefit = ReliefBenefit::PercentOfGross {
            percent: dec("0.05"),
            cap: Some(dec("1000")),
        };
        let json = serde_json::to_string(&benefit).unwrap();
        assert!(json.contains("\"kind\":\"percent_of_gross\""));
    }

    #[test]
    fn test_benefit_deserialization() {
        let json = r#"{ "kind": "flat_tax_credit", "amount": "150" }"#;
        let benefit: ReliefBenefit = serde_json::from_str(json).unwrap();
        assert_eq!(benefit, ReliefBenefit::FlatTaxCredit { amount: dec("150") });

        let json = r#"{ "kind": "percent_of_gross", "percent": "0.05" }"#;
        let benefit: ReliefBenefit = serde_json::from_str(json).unwrap();
        assert_eq!(
            benefit,
            ReliefBenefit::PercentOfGross {
                percent: dec("0.05"),
                cap: None,
            }
        );
    }

    #[test]
    fn test_scope_defaults_to_all_types() {
        let json = r#"{
            "id": "personal_allowance",
            "name": "Personal Allowance",
            "country_code": "JM",
            "benefit": { "kind": "flat_income_reduction", "amount": "125000" },
            "validity": { "from": "2024-01-01" }
        }"#;

        let rule: TaxReliefRule = serde_json::from_str(json).unwrap();
        assert_eq!(rule.scope, ReliefScope::AllTypes);
        assert!(rule.annual_cap.is_none());
    }

    #[test]
    fn test_scoped_relief_includes_only_listed_types() {
        let scope = ReliefScope::Types(vec!["INCOME_TAX".to_string(), "ED_TAX".to_string()]);
        assert!(scope.includes("INCOME_TAX"));
        assert!(scope.includes("ED_TAX"));
        assert!(!scope.includes("NIS"));
    }

    #[test]
    fn test_enrollment_effective_window() {
        let enrollment = EmployeeReliefEnrollment {
            employee_id: "emp_001".to_string(),
            scheme_id: "approved_pension".to_string(),
            amount_override: Some(dec("0.10")),
            validity: Validity::new(
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                Some(NaiveDate::from_ymd_opt(2024, 8, 31).unwrap()),
            ),
        };

        assert!(enrollment.is_effective_at(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()));
        assert!(!enrollment.is_effective_at(NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()));
    }
}
