//! Error types of the board and the search configuration

use crate::WIDTH;

/// A move that cannot be played on the current board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("Invalid move, column {0} out of range. Columns must be between 0 and {max}", max = WIDTH - 1)]
    InvalidColumn(usize),

    #[error("Invalid move, column {0} full")]
    ColumnFull(usize),

    #[error("Invalid move, the game is already over")]
    GameOver,
}

/// Errors that can occur when building a search configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_error_display() {
        assert_eq!(
            MoveError::InvalidColumn(9).to_string(),
            "Invalid move, column 9 out of range. Columns must be between 0 and 6"
        );
        assert_eq!(MoveError::ColumnFull(2).to_string(), "Invalid move, column 2 full");
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::Validation("depth must be >= 1".to_string());
        assert_eq!(err.to_string(), "config validation error: depth must be >= 1");
    }
}
