//! Request types for the statutory deduction engine API.
//!
//! This module defines the JSON request structures for the calculation
//! endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::{OffCycleCalculationParams, RegularCalculationParams};

/// Request body for the `/calculate/off-cycle` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OffCycleCalculationRequest {
    /// The employee to calculate for.
    pub employee_id: String,
    /// The pay period the off-cycle run falls in.
    pub pay_period_id: String,
    /// Gross pay for the run.
    pub gross_pay: Decimal,
    /// The country whose statutory rules apply (ISO code).
    pub country_code: String,
    /// A run to exclude from aggregation, for recalculations.
    #[serde(default)]
    pub exclude_run_id: Option<String>,
    /// Number of Mondays in the pay period, for weekly-aligned types.
    #[serde(default)]
    pub monday_count: Option<u32>,
    /// The employee's age, when known.
    #[serde(default)]
    pub employee_age: Option<u32>,
}

impl From<OffCycleCalculationRequest> for OffCycleCalculationParams {
    fn from(request: OffCycleCalculationRequest) -> Self {
        Self {
            employee_id: request.employee_id,
            pay_period_id: request.pay_period_id,
            gross_pay: request.gross_pay,
            country_code: request.country_code,
            exclude_run_id: request.exclude_run_id,
            monday_count: request.monday_count,
            employee_age: request.employee_age,
        }
    }
}

/// Request body for the `/calculate/regular` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegularCalculationRequest {
    /// The employee to calculate for.
    pub employee_id: String,
    /// The start date of the pay period being processed.
    pub pay_period_start: NaiveDate,
    /// Gross pay for the run.
    pub gross_pay: Decimal,
    /// The country whose statutory rules apply (ISO code).
    pub country_code: String,
    /// A run to exclude from aggregation, for recalculations.
    #[serde(default)]
    pub exclude_run_id: Option<String>,
    /// Number of Mondays in the pay period, for weekly-aligned types.
    #[serde(default)]
    pub monday_count: Option<u32>,
    /// The employee's age, when known.
    #[serde(default)]
    pub employee_age: Option<u32>,
}

impl From<RegularCalculationRequest> for RegularCalculationParams {
    fn from(request: RegularCalculationRequest) -> Self {
        Self {
            employee_id: request.employee_id,
            pay_period_start: request.pay_period_start,
            gross_pay: request.gross_pay,
            country_code: request.country_code,
            exclude_run_id: request.exclude_run_id,
            monday_count: request.monday_count,
            employee_age: request.employee_age,
        }
    }
}
