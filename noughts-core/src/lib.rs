//! Tic-tac-toe positions with symmetry-aware canonical transposition keys.
//!
//! # Board Encoding (two 9-bit layers)
//!
//! ```text
//! layers[0]: Player A (X) occupancy, bit i set = A owns cell i
//! layers[1]: Player B (O) occupancy, bit i set = B owns cell i
//! Bits 9-15 of each layer: unused (always zero)
//!
//! Cell indices (row-major order):
//!   (0,0)=0  (0,1)=1  (0,2)=2
//!   (1,0)=3  (1,1)=4  (1,2)=5
//!   (2,0)=6  (2,1)=7  (2,2)=8
//! ```
//!
//! A cell is never set in both layers. The checked constructors reject such
//! boards; the hashing code assumes the invariant.
//!
//! # Transposition Encoding (9 symbols)
//!
//! ```text
//! '0' = Empty        '1' = Player A
//! '2' = Player B     '3' = Indifferent (every line through it is blocked)
//! ```
//!
//! The canonical key of a board is the smallest transposition over the
//! eight symmetries of the square, compared symbol by symbol in the order
//! above.

#[cfg(feature = "wasm")]
pub mod wasm;

pub mod classify;
pub mod error;
pub mod game;
pub mod groups;
pub mod hasher;
pub mod symmetry;
pub mod transposition;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use classify::{classify, Classification};
pub use error::{Error, Result};
pub use game::{Game, Outcome};
pub use groups::{groups_through, SCORING_GROUPS};
pub use hasher::{CanonicalHasher, PositionHasher, ZobristHasher};
pub use symmetry::Symmetry;
pub use transposition::{canonical_form, canonical_hash, Transposition};

/// Player identifier. Player A moves first and is written `X`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Player {
    A = 0,
    B = 1,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::A => Player::B,
            Player::B => Player::A,
        }
    }

    /// Index of this player's occupancy layer.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Board-string symbol for this player.
    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            Player::A => 'X',
            Player::B => 'O',
        }
    }

    /// Both players, A first.
    pub fn all() -> impl Iterator<Item = Player> {
        [Player::A, Player::B].into_iter()
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Position on the 3x3 board (0-8).
///
/// Layout:
/// ```text
///   0 1 2
///   3 4 5
///   6 7 8
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos(pub u8);

impl Pos {
    /// Create a position from row and column (0-2 each).
    #[inline]
    pub fn from_row_col(row: u8, col: u8) -> Pos {
        debug_assert!(row < 3 && col < 3);
        Pos(row * 3 + col)
    }

    /// Checked variant of [`Pos::from_row_col`] for untrusted input.
    pub fn try_from_row_col(row: usize, col: usize) -> Result<Pos> {
        if row < 3 && col < 3 {
            Ok(Pos((row * 3 + col) as u8))
        } else {
            Err(Error::PositionOutOfBounds { row, col })
        }
    }

    /// Get the row (0-2).
    #[inline]
    pub fn row(self) -> u8 {
        self.0 / 3
    }

    /// Get the column (0-2).
    #[inline]
    pub fn col(self) -> u8 {
        self.0 % 3
    }

    /// Check if this is a valid position (0-8).
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 < 9
    }

    /// Single-bit mask of this cell within an occupancy layer.
    #[inline]
    pub const fn bit(self) -> u16 {
        1 << self.0
    }

    /// Iterate over all 9 positions.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..9).map(Pos)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row(), self.col())
    }
}

/// A 3x3 board as two occupancy layers.
///
/// See module documentation for encoding details. The board carries no turn
/// information; [`Game`] tracks whose move it is.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Board {
    layers: [u16; 2],
}

impl Board {
    /// Mask covering the nine cells of a layer.
    pub const CELLS_MASK: u16 = 0x1FF;

    /// Create a new empty board.
    #[inline]
    pub const fn new() -> Board {
        Board { layers: [0, 0] }
    }

    /// Build a board from raw occupancy layers.
    pub fn from_layers(a: u16, b: u16) -> Result<Board> {
        for (player, layer) in [(Player::A, a), (Player::B, b)] {
            if layer & !Self::CELLS_MASK != 0 {
                return Err(Error::InvalidLayerBits { player, bits: layer });
            }
        }
        let both = a & b;
        if both != 0 {
            let pos = Pos(both.trailing_zeros() as u8);
            return Err(Error::DoubleOccupancy {
                row: pos.row() as usize,
                col: pos.col() as usize,
            });
        }
        Ok(Board { layers: [a, b] })
    }

    /// Build a board from two 3x3 grids of 0/1 occupancy flags.
    ///
    /// The grids must both be exactly 3 rows of 3 cells, every value must be
    /// 0 or 1, and no cell may be flagged in both grids.
    pub fn from_grids<R: AsRef<[u8]>>(a: &[R], b: &[R]) -> Result<Board> {
        let a = Self::grid_to_layer(Player::A, a)?;
        let b = Self::grid_to_layer(Player::B, b)?;
        Self::from_layers(a, b)
    }

    fn grid_to_layer<R: AsRef<[u8]>>(player: Player, grid: &[R]) -> Result<u16> {
        if grid.len() != 3 {
            return Err(Error::InvalidRowCount { player, rows: grid.len() });
        }
        let mut layer = 0u16;
        for (row, cells) in grid.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != 3 {
                return Err(Error::InvalidRowLength { player, row, len: cells.len() });
            }
            for (col, &value) in cells.iter().enumerate() {
                match value {
                    0 => {}
                    1 => layer |= Pos((row * 3 + col) as u8).bit(),
                    _ => return Err(Error::InvalidCellValue { player, row, col, value }),
                }
            }
        }
        Ok(layer)
    }

    /// The two layers as 3x3 grids of 0/1 flags, A first.
    pub fn to_grids(&self) -> [[[u8; 3]; 3]; 2] {
        let mut grids = [[[0u8; 3]; 3]; 2];
        for player in Player::all() {
            for pos in Pos::all() {
                if self.layer(player) & pos.bit() != 0 {
                    grids[player.index()][pos.row() as usize][pos.col() as usize] = 1;
                }
            }
        }
        grids
    }

    /// Occupancy layer of one player.
    #[inline]
    pub const fn layer(&self, player: Player) -> u16 {
        self.layers[player.index()]
    }

    /// Both layers packed as `a | (b << 9)`. Distinct boards map to distinct values.
    #[inline]
    pub const fn to_bits(&self) -> u32 {
        self.layers[0] as u32 | ((self.layers[1] as u32) << 9)
    }

    /// Bitmask of occupied cells.
    #[inline]
    pub const fn occupied(&self) -> u16 {
        self.layers[0] | self.layers[1]
    }

    /// Get the occupant of a cell, if any.
    #[inline]
    pub fn occupant(&self, pos: Pos) -> Option<Player> {
        let bit = pos.bit();
        if self.layers[0] & bit != 0 {
            Some(Player::A)
        } else if self.layers[1] & bit != 0 {
            Some(Player::B)
        } else {
            None
        }
    }

    /// Check if a cell is empty.
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.occupied() & pos.bit() == 0
    }

    /// Check if every cell is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.occupied() == Self::CELLS_MASK
    }

    /// Mark a cell as owned by `player`.
    /// Does NOT validate - caller must ensure the cell is empty.
    #[inline]
    pub fn place(&mut self, pos: Pos, player: Player) {
        debug_assert!(self.is_empty(pos), "cell {} already occupied", pos);
        self.layers[player.index()] |= pos.bit();
    }

    /// Clear a cell in both layers.
    #[inline]
    pub fn clear(&mut self, pos: Pos) {
        self.layers[0] &= !pos.bit();
        self.layers[1] &= !pos.bit();
    }

    /// Number of cells owned by `player`.
    #[inline]
    pub fn count(&self, player: Player) -> u32 {
        self.layer(player).count_ones()
    }

    /// Iterate over empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Pos> + '_ {
        Pos::all().filter(move |&pos| self.is_empty(pos))
    }

    // ========== Win Detection ==========

    /// Get the first completed scoring group for a player, if any.
    pub fn winning_group(&self, player: Player) -> Option<[Pos; 3]> {
        let layer = self.layer(player);
        groups::GROUP_MASKS
            .iter()
            .position(|&mask| layer & mask == mask)
            .map(|idx| SCORING_GROUPS[idx])
    }

    /// Check if the given player owns a complete scoring group.
    #[inline]
    pub fn has_won(&self, player: Player) -> bool {
        let layer = self.layer(player);
        groups::GROUP_MASKS.iter().any(|&mask| layer & mask == mask)
    }

    /// Check if either player has won.
    /// Returns the winning player, or None if nobody has a full group.
    pub fn winner(&self) -> Option<Player> {
        Player::all().find(|&player| self.has_won(player))
    }

    // ========== Classification & Canonical Keys ==========

    /// Classify a single cell. See [`classify`].
    #[inline]
    pub fn classify(&self, pos: Pos) -> Classification {
        classify(self, pos)
    }

    /// Transposition of this board as it stands (identity view).
    #[inline]
    pub fn transposition(&self) -> Transposition {
        Transposition::of(self)
    }

    /// Canonical transposition key. See [`canonical_hash`].
    #[inline]
    pub fn canonical_hash(&self) -> Transposition {
        canonical_hash(self)
    }

    /// Render as a 3-line grid, one row per line.
    pub fn render(&self) -> String {
        let symbols: Vec<char> = self.to_string().chars().collect();
        symbols
            .chunks(3)
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pos in Pos::all() {
            let symbol = match self.occupant(pos) {
                Some(player) => player.symbol(),
                None => '.',
            };
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Parse a 9-cell board string such as `"XXO/X../O.O"`.
    ///
    /// `X`/`x` is Player A, `O`/`o` is Player B, `.`, `-` and `_` are empty.
    /// Whitespace and `/` row separators are ignored.
    fn from_str(s: &str) -> Result<Board> {
        let mut layers = [0u16; 2];
        let mut count = 0usize;
        for character in s.chars().filter(|c| !c.is_whitespace() && *c != '/') {
            if count < 9 {
                let bit = Pos(count as u8).bit();
                match character {
                    'X' | 'x' => layers[0] |= bit,
                    'O' | 'o' => layers[1] |= bit,
                    '.' | '-' | '_' => {}
                    _ => {
                        return Err(Error::InvalidCellCharacter {
                            character,
                            position: count,
                            context: s.to_string(),
                        })
                    }
                }
            }
            count += 1;
        }
        if count != 9 {
            return Err(Error::InvalidBoardLength {
                expected: 9,
                got: count,
                context: s.to_string(),
            });
        }
        Board::from_layers(layers[0], layers[1])
    }
}

impl TryFrom<String> for Board {
    type Error = Error;

    fn try_from(value: String) -> Result<Board> {
        value.parse()
    }
}

impl From<Board> for String {
    fn from(board: Board) -> String {
        board.to_string()
    }
}
