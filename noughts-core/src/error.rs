//! Error types for noughts-core

use thiserror::Error;

use crate::Player;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can be rejected at the crate's input boundary.
///
/// All of these indicate a caller bug or malformed external data; none are
/// transient.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("{player} occupancy grid has {rows} rows, expected 3")]
    InvalidRowCount { player: Player, rows: usize },

    #[error("{player} occupancy grid row {row} has {len} cells, expected 3")]
    InvalidRowLength { player: Player, row: usize, len: usize },

    #[error("{player} occupancy grid cell ({row},{col}) is {value}, expected 0 or 1")]
    InvalidCellValue {
        player: Player,
        row: usize,
        col: usize,
        value: u8,
    },

    #[error("{player} occupancy layer {bits:#x} has bits outside the 3x3 board")]
    InvalidLayerBits { player: Player, bits: u16 },

    #[error("cell ({row},{col}) is occupied by both players")]
    DoubleOccupancy { row: usize, col: usize },

    #[error("position ({row},{col}) is out of bounds (must be 0-2)")]
    PositionOutOfBounds { row: usize, col: usize },

    #[error("board string has {got} cells, expected {expected}: '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at cell {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("transposition has {got} symbols, expected 9: '{context}'")]
    InvalidTranspositionLength { got: usize, context: String },

    #[error("invalid transposition symbol '{symbol}' at cell {position} in '{context}'")]
    InvalidTranspositionSymbol {
        symbol: char,
        position: usize,
        context: String,
    },

    #[error("invalid piece counts: X={a}, O={b} (must be equal or X ahead by 1)")]
    InvalidPieceCounts { a: u32, b: u32 },

    #[error("both players have a completed line")]
    BothPlayersWon,

    #[error("{winner} has a completed line but did not make the last move")]
    InconsistentWinner { winner: Player },

    #[error("invalid move: cell ({row},{col}) is already occupied")]
    Occupied { row: u8, col: u8 },

    #[error("game already over")]
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::DoubleOccupancy { row: 1, col: 2 }.to_string(),
            "cell (1,2) is occupied by both players"
        );
        assert_eq!(
            Error::InvalidRowCount { player: Player::B, rows: 4 }.to_string(),
            "O occupancy grid has 4 rows, expected 3"
        );
        assert_eq!(
            Error::InvalidLayerBits { player: Player::A, bits: 0x200 }.to_string(),
            "X occupancy layer 0x200 has bits outside the 3x3 board"
        );
    }
}
