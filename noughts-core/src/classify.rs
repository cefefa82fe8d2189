//! Per-cell strategic classification.

use serde::{Deserialize, Serialize};

use crate::groups::groups_through;
use crate::{Board, Player, Pos};

/// What a single cell contributes to the position.
///
/// The declaration order is the symbol order used when comparing
/// transpositions: `Empty < PlayerA < PlayerB < Indifferent`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum Classification {
    Empty = 0,
    PlayerA = 1,
    PlayerB = 2,
    /// Occupied, but the opponent already blocks every group through the cell.
    Indifferent = 3,
}

impl Classification {
    /// Transposition symbol ('0'..='3').
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            Classification::Empty => '0',
            Classification::PlayerA => '1',
            Classification::PlayerB => '2',
            Classification::Indifferent => '3',
        }
    }

    /// Inverse of [`Classification::symbol`].
    pub fn from_symbol(symbol: char) -> Option<Classification> {
        match symbol {
            '0' => Some(Classification::Empty),
            '1' => Some(Classification::PlayerA),
            '2' => Some(Classification::PlayerB),
            '3' => Some(Classification::Indifferent),
            _ => None,
        }
    }

    /// Relevant occupant classification for `player`.
    #[inline]
    pub fn of_player(player: Player) -> Classification {
        match player {
            Player::A => Classification::PlayerA,
            Player::B => Classification::PlayerB,
        }
    }

    /// True for every variant except `Empty`.
    #[inline]
    pub fn is_occupied(self) -> bool {
        self != Classification::Empty
    }
}

/// Classify one cell of `board`.
///
/// An occupied cell is `Indifferent` when every scoring group through it
/// already holds at least one opponent piece; otherwise it is classified by
/// its occupant.
///
/// # Panics
///
/// Panics if `pos` is not on the board.
pub fn classify(board: &Board, pos: Pos) -> Classification {
    assert!(pos.is_valid(), "cell index {} is outside the 3x3 board", pos.0);

    let Some(player) = board.occupant(pos) else {
        return Classification::Empty;
    };

    let opponent = board.layer(player.opponent());
    if groups_through(pos).all(|group| group & opponent != 0) {
        Classification::Indifferent
    } else {
        Classification::of_player(player)
    }
}
