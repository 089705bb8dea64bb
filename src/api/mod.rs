//! HTTP API module for the statutory deduction engine.
//!
//! This module provides the REST API endpoints for calculating statutory
//! deductions for regular and off-cycle payroll runs.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{OffCycleCalculationRequest, RegularCalculationRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
