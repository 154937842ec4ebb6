//! # Evaluation Engine
//!
//! Orchestrates the scoring pipeline for one note sequence.
//!
//! ## Pipeline
//! 1. Parse the notation into note events (`notation`)
//! 2. Accumulate delta-times into absolute onset times and group the pitches
//!    of events sharing an onset (a chord, or a singleton)
//! 3. Score each group's consonance (`harmony`), each note's duration, and
//!    each consecutive onset gap (`rhythm`)
//! 4. Average the three score lists and combine them into the weighted total
//!
//! ## Scoring Scales
//! The total is `(0.5*h + 0.25*d + 0.25*t) * 20`, in [0, 20]. Sub-scores are
//! reported on independent scales for readability: harmony out of 10,
//! duration and timing out of 5 each. Since `0.5*20 = 10` and `0.25*20 = 5`,
//! the sub-scores reconcile with the total up to their independent rounding
//! to two decimals.
//!
//! ## Example
//! ```rust
//! use euphony::{EvalConfig, Evaluator};
//!
//! let evaluator = Evaluator::new(EvalConfig::default());
//! let result = evaluator.evaluate("p54:v95:d960:t0 p56:v94:d960:t0 p61:v93:d480:t480")?;
//!
//! assert_eq!(result.total_score, 17.0);
//! assert_eq!(result.harmonic_score, 7.0);
//! # Ok::<(), euphony::EuphonyError>(())
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::EvalConfig;
use crate::error::EuphonyError;
use crate::harmony::harmonic_score;
use crate::notation::parse_notes;
use crate::rhythm::{duration_score, time_score};

/// Scores for one evaluated sequence, each rounded to two decimals.
///
/// An empty sequence degenerates to the maximum everywhere: with nothing to
/// penalize, every average defaults to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    /// Weighted overall quality, out of 20.
    pub total_score: f64,
    /// Mean chord consonance, out of 10.
    pub harmonic_score: f64,
    /// Mean duration regularity, out of 5.
    pub duration_score: f64,
    /// Mean onset-gap regularity, out of 5.
    pub time_score: f64,
}

/// Stateless sequence evaluator.
///
/// Holds only the hyperparameters, fixed at construction, so one instance can
/// be shared freely across threads; evaluation is a pure function of its
/// input.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    pub fn new(config: EvalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Evaluate one note-notation string into a [`ScoreResult`].
    ///
    /// # Errors
    /// Propagates [`EuphonyError::ParseError`] from the notation parser and
    /// [`EuphonyError::DomainError`] from the rhythm scorer; no partial
    /// result is produced.
    pub fn evaluate(&self, source: &str) -> Result<ScoreResult, EuphonyError> {
        let notes = parse_notes(source)?;

        // Group pitches by absolute onset time. BTreeMap iteration order is
        // deterministic; only the mean is observable either way.
        let mut time_groups: BTreeMap<i64, Vec<i32>> = BTreeMap::new();
        let mut absolute_time = 0i64;
        for note in &notes {
            absolute_time += note.time;
            time_groups.entry(absolute_time).or_default().push(note.pitch);
        }

        let harmonic_scores: Vec<f64> = time_groups.values().map(|g| harmonic_score(g)).collect();

        let mut duration_scores = Vec::with_capacity(notes.len());
        let mut time_scores = Vec::new();
        for (i, note) in notes.iter().enumerate() {
            duration_scores.push(duration_score(note.duration, self.config.alpha, self.config.t_ref)?);
            if i > 0 {
                // The first note offsets the sequence start and contributes
                // no gap of its own.
                time_scores.push(time_score(note.time, self.config.beta, self.config.t_ref)?);
            }
        }

        let h_avg = mean_or(&harmonic_scores, 1.0);
        let d_avg = mean_or(&duration_scores, 1.0);
        let t_avg = mean_or(&time_scores, 1.0);

        // Harmony carries half the weight, the two rhythm scores a quarter each
        let total = (0.5 * h_avg + 0.25 * d_avg + 0.25 * t_avg) * 20.0;

        Ok(ScoreResult {
            total_score: round2(total),
            harmonic_score: round2(h_avg * 10.0),
            duration_score: round2(d_avg * 5.0),
            time_score: round2(t_avg * 5.0),
        })
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(EvalConfig::default())
    }
}

fn mean_or(scores: &[f64], default: f64) -> f64 {
    if scores.is_empty() {
        default
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
