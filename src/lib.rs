pub mod config;
pub mod error;
pub mod evaluate;
pub mod harmony;
pub mod midi;
pub mod notation;
pub mod rhythm;

pub use config::EvalConfig;
pub use error::EuphonyError;
pub use evaluate::{Evaluator, ScoreResult};
pub use harmony::harmonic_score;
pub use midi::{to_midi, MidiHeader};
pub use notation::{parse_notes, NoteEvent};

/// Evaluate a note-notation string with the default hyperparameters.
/// This is the main entry point for the library.
pub fn evaluate(source: &str) -> Result<ScoreResult, EuphonyError> {
    Evaluator::new(EvalConfig::default()).evaluate(source)
}

/// Evaluate with explicit hyperparameters (useful for sweeps and tuning).
pub fn evaluate_with_config(source: &str, config: EvalConfig) -> Result<ScoreResult, EuphonyError> {
    Evaluator::new(config).evaluate(source)
}
