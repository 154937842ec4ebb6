//! # Error Types
//!
//! This module defines all error types for the euphony evaluator.
//!
//! All errors include enough context (token index, offending token, or the
//! out-of-domain value) to identify and fix issues in the input notation.
//!
//! ## Error Types
//! - `ParseError` - Malformed note-notation token, with token index
//! - `DomainError` - Out-of-domain input to the rhythm scorer (log2 of a non-positive tick count)
//! - `ConfigError` - Invalid YAML evaluator configuration
//!
//! ## Usage
//! ```rust
//! use euphony::{evaluate, EuphonyError};
//!
//! match evaluate("p60:v90:d480:t0") {
//!     Ok(result) => println!("{}/20", result.total_score),
//!     Err(EuphonyError::ParseError { index, token, message }) => {
//!         eprintln!("Bad token '{}' at position {}: {}", token, index, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EuphonyError {
    /// Malformed token in the note notation.
    ///
    /// Occurs when a token does not have exactly four `:`-separated fields,
    /// a field is missing its `p`/`v`/`d`/`t` prefix, or a value is not an integer.
    ///
    /// # Example
    /// ```
    /// # use euphony::EuphonyError;
    /// let err = EuphonyError::ParseError {
    ///     index: 2,
    ///     token: "p60:v90:t0".to_string(),
    ///     message: "expected 4 fields, found 3".to_string(),
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Parse error in token 'p60:v90:t0' at position 2: expected 4 fields, found 3"
    /// );
    /// ```
    #[error("Parse error in token '{token}' at position {index}: {message}")]
    ParseError {
        index: usize,
        token: String,
        message: String,
    },

    /// Out-of-domain input to the rhythm scorer.
    ///
    /// The log2-grid score is undefined for non-positive tick counts. The only
    /// exception is a time interval of exactly zero (simultaneous onset), which
    /// the scorer handles without taking a logarithm.
    ///
    /// # Example
    /// ```
    /// # use euphony::EuphonyError;
    /// let err = EuphonyError::DomainError {
    ///     value: 0,
    ///     message: "duration must be positive".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Domain error for value 0: duration must be positive");
    /// ```
    #[error("Domain error for value {value}: {message}")]
    DomainError { value: i64, message: String },

    /// Invalid evaluator configuration.
    ///
    /// Occurs when YAML configuration is malformed or contains unusable values
    /// (e.g. a non-positive reference duration).
    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}
