//! Error types for the engine.
//!
//! Every failure is reported to the immediate caller as its own variant so a
//! host can render a precise message without re-deriving the reason.

use thiserror::Error;

use crate::types::{BOARD_SIZE, Player, Square};

/// Raw coordinates outside the 9x9 board.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("square ({row}, {col}) is out of bounds (must be 0-8)")]
pub struct OutOfBounds {
    pub row: i32,
    pub col: i32,
}

/// Why a move was rejected. The game state is untouched in every case.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error(transparent)]
    OutOfBounds(#[from] OutOfBounds),

    #[error("it is not your turn")]
    NotYourTurn,

    #[error("illegal move: {from} -> {to}")]
    Illegal { from: Square, to: Square },

    #[error("game already over")]
    GameOver,
}

impl MoveError {
    pub fn kind(&self) -> &'static str {
        match self {
            MoveError::OutOfBounds(_) => "outOfBounds",
            MoveError::NotYourTurn => "notYourTurn",
            MoveError::Illegal { .. } => "illegal",
            MoveError::GameOver => "gameOver",
        }
    }
}

/// A save that cannot be decoded into a valid game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CorruptSave {
    #[error("save data too short: expected at least {expected} bytes, got {got}")]
    Truncated { expected: usize, got: usize },

    #[error("invalid save magic (expected HSSG)")]
    BadMagic,

    #[error("unsupported save version: expected {expected}, got {got}")]
    UnsupportedVersion { expected: u32, got: u32 },

    #[error("payload length mismatch: header says {declared}, found {actual}")]
    LengthMismatch { declared: usize, actual: usize },

    #[error("CRC32 mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("invalid cell value {value} at index {index}")]
    InvalidCell { index: usize, value: String },

    #[error("invalid player '{0}'")]
    InvalidPlayer(String),

    #[error("invalid capture counter '{0}'")]
    InvalidCounter(String),

    #[error(
        "piece count mismatch: {on_board} {color} pieces on board but {captured} captured (must total {expected})",
        expected = BOARD_SIZE
    )]
    PieceCountMismatch {
        color: &'static str,
        on_board: u8,
        captured: u8,
    },

    #[error("both sides reached the capture threshold {threshold} (black {black}, white {white})")]
    BothSidesWon { black: u8, white: u8, threshold: u8 },

    #[error("{0:?} already won but is recorded as the side to move")]
    WinnerToMove(Player),

    #[error("invalid rules in save: {0}")]
    InvalidRules(#[from] ConfigError),

    #[error("malformed text save: {0}")]
    Malformed(String),
}

impl CorruptSave {
    pub fn kind(&self) -> &'static str {
        "corruptSave"
    }
}

/// Rejected rule configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("capture threshold {value} must be between 1 and {max}")]
    CaptureThreshold { value: u8, max: u8 },
}

impl ConfigError {
    pub fn kind(&self) -> &'static str {
        "invalidConfig"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_error_kinds_are_distinct() {
        let sq = Square::new(0, 0).unwrap();
        let kinds = [
            MoveError::from(OutOfBounds { row: 9, col: 9 }).kind(),
            MoveError::NotYourTurn.kind(),
            MoveError::Illegal { from: sq, to: sq }.kind(),
            MoveError::GameOver.kind(),
        ];

        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn messages_name_the_offending_values() {
        let err = MoveError::from(OutOfBounds { row: -1, col: 3 });
        assert_eq!(err.to_string(), "square (-1, 3) is out of bounds (must be 0-8)");

        let err = CorruptSave::PieceCountMismatch {
            color: "white",
            on_board: 5,
            captured: 2,
        };
        assert!(err.to_string().contains("must total 9"));
    }
}
