//! Progressive rate band engine.
//!
//! Computes the total employee or employer amount due on an income figure by
//! stacking band slices: each band charges its rate on the portion of income
//! falling inside `[lower, upper)`, plus an optional flat amount charged once
//! when income enters the band. Schedules are validated to be ordered,
//! contiguous partitions starting at zero before any calculation uses them.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::RateBand;

/// Validates that a band list forms a well-formed progressive schedule.
///
/// Invariants checked:
/// - at least one band;
/// - bands ordered by ascending lower bound, starting at zero;
/// - every band except the last has an upper bound greater than its lower;
/// - consecutive bands are contiguous (no gaps, no overlaps);
/// - rates are non-negative.
///
/// The caller is expected to pass bands already filtered to a single
/// statutory type and effective date.
pub fn validate_schedule(type_code: &str, bands: &[RateBand]) -> EngineResult<()> {
    let invalid = |message: String| EngineError::InvalidBandSchedule {
        type_code: type_code.to_string(),
        message,
    };

    if bands.is_empty() {
        return Err(invalid("schedule has no bands".to_string()));
    }

    if bands[0].lower != Decimal::ZERO {
        return Err(invalid(format!(
            "first band starts at {} instead of 0",
            bands[0].lower
        )));
    }

    for (index, band) in bands.iter().enumerate() {
        if band.employee_rate < Decimal::ZERO || band.employer_rate < Decimal::ZERO {
            return Err(invalid(format!("band {} has a negative rate", index)));
        }

        match band.upper {
            Some(upper) => {
                if upper <= band.lower {
                    return Err(invalid(format!(
                        "band {} upper bound {} is not above its lower bound {}",
                        index, upper, band.lower
                    )));
                }
                match bands.get(index + 1) {
                    Some(next) if next.lower != upper => {
                        return Err(invalid(format!(
                            "bands are not contiguous: {} ends at {} but the next starts at {}",
                            index, upper, next.lower
                        )));
                    }
                    _ => {}
                }
            }
            None => {
                if index + 1 != bands.len() {
                    return Err(invalid(format!(
                        "band {} is open-ended but is not the last band",
                        index
                    )));
                }
            }
        }
    }

    Ok(())
}

/// Returns a copy of the bands sorted by ascending lower bound.
pub fn sorted_schedule(bands: &[RateBand]) -> Vec<RateBand> {
    let mut sorted = bands.to_vec();
    sorted.sort_by(|a, b| a.lower.cmp(&b.lower));
    sorted
}

/// Finds the band an income figure falls in (the marginal band).
pub fn marginal_band<'a>(bands: &'a [RateBand], income: Decimal) -> Option<&'a RateBand> {
    bands.iter().find(|b| b.contains_income(income))
}

fn stack_bands<R, F>(bands: &[RateBand], income: Decimal, rate_of: R, flat_of: F) -> Decimal
where
    R: Fn(&RateBand) -> Decimal,
    F: Fn(&RateBand) -> Option<Decimal>,
{
    let mut total = Decimal::ZERO;
    for band in bands {
        if income <= band.lower {
            break;
        }
        let slice_top = match band.upper {
            Some(upper) => income.min(upper),
            None => income,
        };
        total += (slice_top - band.lower) * rate_of(band);
        if let Some(flat) = flat_of(band) {
            total += flat;
        }
    }
    total
}

/// Computes the total employee amount due on `income` under a schedule.
///
/// The result is exact (unrounded); the statutory calculator applies the
/// engine's rounding policy once per reported amount.
pub fn employee_amount_for_income(bands: &[RateBand], income: Decimal) -> Decimal {
    stack_bands(bands, income, |b| b.employee_rate, |b| b.flat_employee)
}

/// Computes the total employer amount due on `income` under a schedule.
pub fn employer_amount_for_income(bands: &[RateBand], income: Decimal) -> Decimal {
    stack_bands(bands, income, |b| b.employer_rate, |b| b.flat_employer)
}
