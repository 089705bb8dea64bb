//! Tax year boundary determination.
//!
//! Every component that needs to know which tax year a date belongs to goes
//! through [`tax_year_for_date`], so the boundary logic cannot drift between
//! the aggregator, the calculator, and the orchestration entry points. Tax
//! years follow the calendar year.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A tax year.
///
/// # Example
///
/// ```
/// use statutory_engine::calculation::{TaxYear, tax_year_for_date};
/// use chrono::NaiveDate;
///
/// let year = tax_year_for_date(NaiveDate::from_ymd_opt(2024, 7, 25).unwrap());
/// assert_eq!(year, TaxYear::new(2024));
/// assert!(year.contains(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));
/// assert!(!year.contains(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TaxYear {
    year: i32,
}

impl TaxYear {
    /// Creates a tax year for the given calendar year.
    pub fn new(year: i32) -> Self {
        Self { year }
    }

    /// Returns the calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The first day of the tax year.
    pub fn start(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, 1, 1).expect("January 1 is always a valid date")
    }

    /// The last day of the tax year.
    pub fn end(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, 12, 31).expect("December 31 is always a valid date")
    }

    /// Returns true if the date falls within this tax year.
    pub fn contains(&self, date: NaiveDate) -> bool {
        tax_year_for_date(date) == *self
    }
}

impl std::fmt::Display for TaxYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.year)
    }
}

/// Determines the tax year a date belongs to.
pub fn tax_year_for_date(date: NaiveDate) -> TaxYear {
    TaxYear::new(date.year())
}
