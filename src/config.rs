//! Search configuration

use std::time::Duration;

use crate::{error::ConfigError, evaluator::DiagonalMode};

/// Search depth used when none is given
pub const DEFAULT_DEPTH: usize = 5;

/// Tuning knobs of the computer opponent.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Plies searched before falling back to the static evaluator
    pub depth: usize,
    /// Seed of the tie-break RNG, drawn from the OS when absent
    pub seed: Option<u64>,
    /// Search the first-move candidates on the rayon pool
    pub parallel: bool,
    /// Deadline for one search, after which nodes are scored statically
    pub time_limit: Option<Duration>,
    pub diagonal_mode: DiagonalMode,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: DEFAULT_DEPTH,
            seed: None,
            parallel: false,
            time_limit: None,
            diagonal_mode: DiagonalMode::Corrected,
        }
    }
}

impl SearchConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::Validation("depth must be >= 1".into()));
        }
        if self.time_limit == Some(Duration::from_millis(0)) {
            return Err(ConfigError::Validation(
                "time_limit must be > 0 when set".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.depth, DEFAULT_DEPTH);
        assert_eq!(config.diagonal_mode, DiagonalMode::Corrected);
    }

    #[test]
    fn zero_depth_is_rejected() {
        let config = SearchConfig {
            depth: 0,
            ..SearchConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::Validation("depth must be >= 1".into()))
        );
    }

    #[test]
    fn zero_time_limit_is_rejected() {
        let config = SearchConfig {
            time_limit: Some(Duration::from_millis(0)),
            ..SearchConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
