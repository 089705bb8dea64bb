//! Effective-dated record support.
//!
//! Every piece of statutory reference data (deduction types, rate bands,
//! country tax settings, relief rules, schemes, enrollments) is tagged with
//! a validity window. This module provides the single shared "as-of" lookup
//! primitive so date-comparison logic is identical everywhere it matters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An inclusive validity window for an effective-dated record.
///
/// A record is effective on a date when `from <= date` and, if `to` is set,
/// `date <= to`. An absent `to` means the record is open-ended.
///
/// # Example
///
/// ```
/// use statutory_engine::models::Validity;
/// use chrono::NaiveDate;
///
/// let window = Validity::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     Some(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()),
/// );
/// assert!(window.contains(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()));
/// assert!(!window.contains(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validity {
    /// The first date (inclusive) on which the record is effective.
    pub from: NaiveDate,
    /// The last date (inclusive) on which the record is effective, if any.
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

impl Validity {
    /// Creates a validity window with an explicit end date.
    pub fn new(from: NaiveDate, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Creates an open-ended validity window starting at `from`.
    pub fn unbounded(from: NaiveDate) -> Self {
        Self { from, to: None }
    }

    /// Returns true if `date` falls within this window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        if date < self.from {
            return false;
        }
        match self.to {
            Some(to) => date <= to,
            None => true,
        }
    }
}

/// A record carrying a validity window.
pub trait EffectiveDated {
    /// Returns the record's validity window.
    fn validity(&self) -> &Validity;

    /// Returns true if the record is effective on the given date.
    fn is_effective_at(&self, date: NaiveDate) -> bool {
        self.validity().contains(date)
    }
}

/// Filters a slice to the records effective on `date`.
pub fn effective_at<T: EffectiveDated>(items: &[T], date: NaiveDate) -> Vec<&T> {
    items.iter().filter(|i| i.is_effective_at(date)).collect()
}

/// Consumes a vector, keeping only the records effective on `date`.
pub fn into_effective_at<T: EffectiveDated>(items: Vec<T>, date: NaiveDate) -> Vec<T> {
    items
        .into_iter()
        .filter(|i| i.is_effective_at(date))
        .collect()
}
