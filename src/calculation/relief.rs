//! Tax relief resolution.
//!
//! Produces the per-calculation relief context from statutory rules
//! (automatic) and schemes (require an active enrollment). Each grant is
//! capped by the rule's annual cap net of relief already claimed this tax
//! year, and the aggregate income reduction is clamped so adjusted taxable
//! income can never go negative.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{
    AppliedRelief, EmployeeReliefEnrollment, ReliefBenefit, ReliefScope, ReliefSource,
    TaxReliefRule, TaxReliefScheme,
};

/// One relief granted for the current calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReliefGrant {
    /// The rule or scheme id the grant came from.
    pub relief_id: String,
    /// Human-readable name of the rule or scheme.
    pub name: String,
    /// Whether the grant came from a statutory rule or an enrolled scheme.
    pub source: ReliefSource,
    /// The statutory types the grant applies to.
    pub scope: ReliefScope,
    /// Taxable-income reduction granted.
    pub income_reduction: Decimal,
    /// Tax credit granted.
    pub tax_credit: Decimal,
}

/// The resolved relief context consulted by the statutory calculator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReliefContext {
    /// The grants applicable to the current calculation.
    pub grants: Vec<ReliefGrant>,
}

impl ReliefContext {
    /// A context with no reliefs.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Total income reduction applicable to a statutory type code.
    pub fn income_reduction_for(&self, code: &str) -> Decimal {
        self.grants
            .iter()
            .filter(|g| g.scope.includes(code))
            .map(|g| g.income_reduction)
            .sum()
    }

    /// Total tax credit applicable to a statutory type code.
    pub fn tax_credit_for(&self, code: &str) -> Decimal {
        self.grants
            .iter()
            .filter(|g| g.scope.includes(code))
            .map(|g| g.tax_credit)
            .sum()
    }

    /// Total income reduction across all grants.
    pub fn total_income_reduction(&self) -> Decimal {
        self.grants.iter().map(|g| g.income_reduction).sum()
    }

    /// Total tax credits across all grants.
    pub fn total_tax_credits(&self) -> Decimal {
        self.grants.iter().map(|g| g.tax_credit).sum()
    }

    /// The grants shaped for the calculation result summary.
    pub fn applied(&self) -> Vec<AppliedRelief> {
        self.grants
            .iter()
            .map(|g| AppliedRelief {
                relief_id: g.relief_id.clone(),
                name: g.name.clone(),
                source: g.source,
                income_reduction: g.income_reduction,
                tax_credit: g.tax_credit,
            })
            .collect()
    }
}

fn evaluate_benefit(
    benefit: &ReliefBenefit,
    amount_override: Option<Decimal>,
    gross_pay: Decimal,
) -> (Decimal, Decimal) {
    match benefit {
        ReliefBenefit::FlatIncomeReduction { amount } => {
            (amount_override.unwrap_or(*amount), Decimal::ZERO)
        }
        ReliefBenefit::PercentOfGross { percent, cap } => {
            let mut reduction = gross_pay * amount_override.unwrap_or(*percent);
            if let Some(cap) = cap {
                reduction = reduction.min(*cap);
            }
            (reduction, Decimal::ZERO)
        }
        ReliefBenefit::FlatTaxCredit { amount } => {
            (Decimal::ZERO, amount_override.unwrap_or(*amount))
        }
    }
}

fn remaining_annual_cap(
    annual_cap: Option<Decimal>,
    relief_id: &str,
    claimed: &HashMap<String, Decimal>,
) -> Decimal {
    match annual_cap {
        Some(cap) => {
            let used = claimed.get(relief_id).copied().unwrap_or(Decimal::ZERO);
            (cap - used).max(Decimal::ZERO)
        }
        None => Decimal::MAX,
    }
}

/// Resolves the relief context for one calculation.
///
/// Statutory rules apply unconditionally; a scheme applies only when the
/// employee holds an enrollment for it (the inputs are expected to be
/// pre-filtered to the employee and effective date by the repository).
/// `claimed` is the relief ledger: the amount already granted per rule or
/// scheme id this tax year, which annual caps are enforced against. Grants
/// that evaluate to zero are omitted. The aggregate income reduction is
/// clamped at `gross_pay`.
pub fn resolve_relief(
    rules: &[TaxReliefRule],
    schemes: &[TaxReliefScheme],
    enrollments: &[EmployeeReliefEnrollment],
    claimed: &HashMap<String, Decimal>,
    gross_pay: Decimal,
) -> ReliefContext {
    let mut grants = Vec::new();
    let mut reducible_income = gross_pay.max(Decimal::ZERO);

    let mut push_grant = |relief_id: &str,
                          name: &str,
                          source: ReliefSource,
                          scope: &ReliefScope,
                          benefit: &ReliefBenefit,
                          annual_cap: Option<Decimal>,
                          amount_override: Option<Decimal>| {
        let (reduction, credit) = evaluate_benefit(benefit, amount_override, gross_pay);
        let remaining = remaining_annual_cap(annual_cap, relief_id, claimed);
        let reduction = reduction.max(Decimal::ZERO).min(remaining).min(reducible_income);
        let credit = credit.max(Decimal::ZERO).min(remaining);
        if reduction == Decimal::ZERO && credit == Decimal::ZERO {
            return;
        }
        reducible_income -= reduction;
        grants.push(ReliefGrant {
            relief_id: relief_id.to_string(),
            name: name.to_string(),
            source,
            scope: scope.clone(),
            income_reduction: reduction,
            tax_credit: credit,
        });
    };

    for rule in rules {
        push_grant(
            &rule.id,
            &rule.name,
            ReliefSource::Statutory,
            &rule.scope,
            &rule.benefit,
            rule.annual_cap,
            None,
        );
    }

    for scheme in schemes {
        let Some(enrollment) = enrollments.iter().find(|e| e.scheme_id == scheme.id) else {
            continue;
        };
        push_grant(
            &scheme.id,
            &scheme.name,
            ReliefSource::Scheme,
            &scheme.scope,
            &scheme.benefit,
            scheme.annual_cap,
            enrollment.amount_override,
        );
    }

    ReliefContext { grants }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Validity;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn validity() -> Validity {
        Validity::unbounded(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    fn flat_rule(id: &str, amount: &str) -> TaxReliefRule {
        TaxReliefRule {
            id: id.to_string(),
            name: format!("Rule {}", id),
            country_code: "JM".to_string(),
            benefit: ReliefBenefit::FlatIncomeReduction { amount: dec(amount) },
            scope: ReliefScope::AllTypes,
            annual_cap: None,
            validity: validity(),
        }
    }

    fn pension_scheme() -> TaxReliefScheme {
        TaxReliefScheme {
            id: "approved_pension".to_string(),
            name: "Approved Pension".to_string(),
            country_code: "JM".to_string(),
            benefit: ReliefBenefit::PercentOfGross {
                percent: dec("0.05"),
                cap: None,
            },
            scope: ReliefScope::Types(vec!["INCOME_TAX".to_string()]),
            annual_cap: None,
            validity: validity(),
        }
    }

    fn enrollment(scheme_id: &str, amount_override: Option<Decimal>) -> EmployeeReliefEnrollment {
        EmployeeReliefEnrollment {
            employee_id: "emp_001".to_string(),
            scheme_id: scheme_id.to_string(),
            amount_override,
            validity: validity(),
        }
    }

    #[test]
    fn test_statutory_rule_applies_without_enrollment() {
        let context = resolve_relief(
            &[flat_rule("personal", "10000")],
            &[],
            &[],
            &HashMap::new(),
            dec("60000"),
        );

        assert_eq!(context.grants.len(), 1);
        assert_eq!(context.total_income_reduction(), dec("10000"));
        assert_eq!(context.income_reduction_for("INCOME_TAX"), dec("10000"));
    }

    #[test]
    fn test_scheme_requires_enrollment() {
        let no_enrollment =
            resolve_relief(&[], &[pension_scheme()], &[], &HashMap::new(), dec("60000"));
        assert!(no_enrollment.grants.is_empty());

        let enrolled = resolve_relief(
            &[],
            &[pension_scheme()],
            &[enrollment("approved_pension", None)],
            &HashMap::new(),
            dec("60000"),
        );
        assert_eq!(enrolled.total_income_reduction(), dec("3000"));
    }

    #[test]
    fn test_enrollment_override_replaces_percent() {
        let context = resolve_relief(
            &[],
            &[pension_scheme()],
            &[enrollment("approved_pension", Some(dec("0.10")))],
            &HashMap::new(),
            dec("60000"),
        );
        assert_eq!(context.total_income_reduction(), dec("6000"));
    }

    #[test]
    fn test_scoped_relief_only_reaches_listed_types() {
        let context = resolve_relief(
            &[],
            &[pension_scheme()],
            &[enrollment("approved_pension", None)],
            &HashMap::new(),
            dec("60000"),
        );

        assert_eq!(context.income_reduction_for("INCOME_TAX"), dec("3000"));
        assert_eq!(context.income_reduction_for("NIS"), Decimal::ZERO);
    }

    #[test]
    fn test_annual_cap_enforced_against_claimed_ledger() {
        let mut rule = flat_rule("personal", "10000");
        rule.annual_cap = Some(dec("25000"));

        let mut claimed = HashMap::new();
        claimed.insert("personal".to_string(), dec("22000"));

        let context = resolve_relief(&[rule], &[], &[], &claimed, dec("60000"));
        assert_eq!(context.total_income_reduction(), dec("3000"));
    }

    #[test]
    fn test_exhausted_annual_cap_yields_no_grant() {
        let mut rule = flat_rule("personal", "10000");
        rule.annual_cap = Some(dec("25000"));

        let mut claimed = HashMap::new();
        claimed.insert("personal".to_string(), dec("25000"));

        let context = resolve_relief(&[rule], &[], &[], &claimed, dec("60000"));
        assert!(context.grants.is_empty());
    }

    #[test]
    fn test_income_reduction_clamped_at_gross_pay() {
        let context = resolve_relief(
            &[flat_rule("a", "40000"), flat_rule("b", "40000")],
            &[],
            &[],
            &HashMap::new(),
            dec("60000"),
        );

        assert_eq!(context.total_income_reduction(), dec("60000"));
        assert_eq!(context.grants[0].income_reduction, dec("40000"));
        assert_eq!(context.grants[1].income_reduction, dec("20000"));
    }

    #[test]
    fn test_percent_benefit_cap() {
        let mut scheme = pension_scheme();
        scheme.benefit = ReliefBenefit::PercentOfGross {
            percent: dec("0.10"),
            cap: Some(dec("2500")),
        };

        let context = resolve_relief(
            &[],
            &[scheme],
            &[enrollment("approved_pension", None)],
            &HashMap::new(),
            dec("60000"),
        );
        assert_eq!(context.total_income_reduction(), dec("2500"));
    }

    #[test]
    fn test_tax_credit_does_not_reduce_income() {
        let rule = TaxReliefRule {
            id: "credit".to_string(),
            name: "Low Income Credit".to_string(),
            country_code: "JM".to_string(),
            benefit: ReliefBenefit::FlatTaxCredit { amount: dec("150") },
            scope: ReliefScope::AllTypes,
            annual_cap: None,
            validity: validity(),
        };

        let context = resolve_relief(&[rule], &[], &[], &HashMap::new(), dec("60000"));
        assert_eq!(context.total_income_reduction(), Decimal::ZERO);
        assert_eq!(context.total_tax_credits(), dec("150"));
        assert_eq!(context.tax_credit_for("INCOME_TAX"), dec("150"));
    }

    #[test]
    fn test_applied_summary_matches_grants() {
        let context = resolve_relief(
            &[flat_rule("personal", "10000")],
            &[],
            &[],
            &HashMap::new(),
            dec("60000"),
        );

        let applied = context.applied();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].relief_id, "personal");
        assert_eq!(applied[0].source, ReliefSource::Statutory);
        assert_eq!(applied[0].income_reduction, dec("10000"));
    }
}
