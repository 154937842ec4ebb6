//! Evaluator configuration
//!
//! Hyperparameters for the evaluator, fixed at construction. Configs can be
//! built in code or loaded from YAML:
//!
//! ```yaml
//! alpha: 2.0
//! beta: 1.5
//! t_ref: 960
//! ```
//!
//! Missing keys fall back to their defaults.

use serde::Deserialize;

use crate::error::EuphonyError;

/// Immutable evaluator hyperparameters.
///
/// - `alpha`: sensitivity of the duration score's exponential decay
/// - `beta`: sensitivity of the time-interval score's exponential decay
/// - `t_ref`: reference duration in ticks (one nominal beat; default 480)
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalConfig {
    pub alpha: f64,
    pub beta: f64,
    pub t_ref: i64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 1.0,
            t_ref: 480,
        }
    }
}

impl EvalConfig {
    /// Load a config from YAML text, applying defaults for missing keys.
    ///
    /// # Errors
    /// Returns [`EuphonyError::ConfigError`] for malformed YAML, unknown keys,
    /// or a non-positive `t_ref`.
    pub fn from_yaml(yaml: &str) -> Result<Self, EuphonyError> {
        let config: EvalConfig =
            serde_yaml::from_str(yaml).map_err(|e| EuphonyError::ConfigError(e.to_string()))?;
        if config.t_ref <= 0 {
            return Err(EuphonyError::ConfigError(format!(
                "t_ref must be positive, got {}",
                config.t_ref
            )));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EvalConfig::default();
        assert_eq!(config.alpha, 1.0);
        assert_eq!(config.beta, 1.0);
        assert_eq!(config.t_ref, 480);
    }

    #[test]
    fn test_from_yaml_full() {
        let config = EvalConfig::from_yaml("alpha: 2.0\nbeta: 1.5\nt_ref: 960\n").unwrap();
        assert_eq!(config.alpha, 2.0);
        assert_eq!(config.beta, 1.5);
        assert_eq!(config.t_ref, 960);
    }

    #[test]
    fn test_from_yaml_partial_applies_defaults() {
        let config = EvalConfig::from_yaml("alpha: 3.0\n").unwrap();
        assert_eq!(config.alpha, 3.0);
        assert_eq!(config.beta, 1.0);
        assert_eq!(config.t_ref, 480);
    }

    #[test]
    fn test_from_yaml_rejects_non_positive_t_ref() {
        assert!(EvalConfig::from_yaml("t_ref: 0\n").is_err());
        assert!(EvalConfig::from_yaml("t_ref: -480\n").is_err());
    }

    #[test]
    fn test_from_yaml_rejects_unknown_keys() {
        assert!(EvalConfig::from_yaml("gamma: 1.0\n").is_err());
    }
}
