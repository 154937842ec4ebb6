//! Rhythmic regularity scoring
//!
//! Scores a duration or time interval (in ticks) in [0, 1] by its
//! log2-distance to the nearest power-of-two multiple of a reference
//! duration `t_ref`.
//!
//! A value of exactly `t_ref * 2^j` for any integer `j` (double, half,
//! quarter, ... of the reference beat) scores 1.0; the score decays as
//! `exp(-sensitivity * diff)` with the distance `diff` from that grid.
//!
//! Nearest-integer rounding uses [`f64::round`], which rounds ties away from
//! zero. An exact tie would require `ticks = t_ref * 2^(j + 1/2)`, which is
//! irrational in the integer tick domain, so the tie-breaking direction is
//! unobservable in practice.

use crate::error::EuphonyError;

/// Score a note duration against the log2 grid.
///
/// # Errors
/// Returns [`EuphonyError::DomainError`] for a non-positive duration.
pub fn duration_score(duration: i64, alpha: f64, t_ref: i64) -> Result<f64, EuphonyError> {
    grid_score(duration, alpha, t_ref, "duration")
}

/// Score the time interval between two consecutive onsets.
///
/// A zero interval (simultaneous onset) scores exactly 1.0 without taking a
/// logarithm.
///
/// # Errors
/// Returns [`EuphonyError::DomainError`] for a negative interval.
pub fn time_score(interval: i64, beta: f64, t_ref: i64) -> Result<f64, EuphonyError> {
    if interval == 0 {
        return Ok(1.0);
    }
    grid_score(interval, beta, t_ref, "time interval")
}

fn grid_score(ticks: i64, sensitivity: f64, t_ref: i64, what: &str) -> Result<f64, EuphonyError> {
    if ticks <= 0 {
        return Err(EuphonyError::DomainError {
            value: ticks,
            message: format!("{} must be positive", what),
        });
    }

    let log_ratio = (ticks as f64 / t_ref as f64).log2();
    let diff = (log_ratio - log_ratio.round()).abs();
    Ok((-sensitivity * diff).exp())
}
