//! Pay period model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A pay period with its identifier and date range.
///
/// Off-cycle calculations resolve a pay period by id to determine the tax
/// year and the effective date for all reference lookups.
///
/// # Example
///
/// ```
/// use statutory_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod {
///     id: "pp_2024_07".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 7, 31).unwrap(),
/// };
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriod {
    /// Unique identifier for the pay period.
    pub id: String,
    /// The start date of the pay period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the pay period (inclusive).
    pub end_date: NaiveDate,
}

impl PayPeriod {
    /// Checks if a given date falls within this pay period.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}
