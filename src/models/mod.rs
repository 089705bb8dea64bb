//! Core data models for the statutory deduction engine.
//!
//! This module contains all the domain models used throughout the engine:
//! effective-dated reference data, accumulated amounts, relief rules, and
//! calculation context/result types.

mod amounts;
mod effective;
mod pay_period;
mod relief;
mod result;
mod statutory_type;
mod tax_settings;

pub use amounts::{
    OpeningBalances, PayrollRunRecord, PeriodStatutoryAmounts, RecordedDeduction, TypeAmounts,
    YtdStatutoryAmounts,
};
pub use effective::{EffectiveDated, Validity, effective_at, into_effective_at};
pub use pay_period::PayPeriod;
pub use relief::{
    EmployeeReliefEnrollment, ReliefBenefit, ReliefScope, TaxReliefRule, TaxReliefScheme,
};
pub use result::{
    AppliedRelief, CalculationWarning, CumulativeCalculationContext, DeductionResult,
    ReliefSource, StatutoryCalculationResult,
};
pub use statutory_type::{DeductionKind, RateBand, StatutoryDeductionType};
pub use tax_settings::{CountryTaxSettings, TaxCalculationMethod};
