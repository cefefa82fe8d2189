//! Incremental position hashing for move-ordered search.
//!
//! A search engine drives a [`PositionHasher`] alongside its own move stack:
//! every `apply_move` is matched by an `undo_move`, and `hash` yields the
//! transposition-table key for the current position.

use std::sync::LazyLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{canonical_hash, Game, Player, Pos, Result, Transposition};

/// Key-producing view of a game, kept in sync with the search's move stack.
pub trait PositionHasher {
    type Key;

    /// Apply a move for the side to move.
    fn apply_move(&mut self, pos: Pos) -> Result<()>;

    /// Undo the most recent move. Returns None when there is nothing to undo.
    fn undo_move(&mut self) -> Option<Pos>;

    /// Key of the current position.
    fn hash(&self) -> Self::Key;
}

/// Hashes positions to their canonical transposition.
///
/// Symmetric positions, and positions that differ only in the owner of
/// indifferent cells, share a key.
#[derive(Clone, Debug, Default)]
pub struct CanonicalHasher {
    game: Game,
}

impl CanonicalHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_game(game: Game) -> Self {
        Self { game }
    }

    /// The game being tracked.
    #[inline]
    pub fn game(&self) -> &Game {
        &self.game
    }
}

impl PositionHasher for CanonicalHasher {
    type Key = Transposition;

    fn apply_move(&mut self, pos: Pos) -> Result<()> {
        self.game.apply(pos)
    }

    fn undo_move(&mut self) -> Option<Pos> {
        self.game.undo()
    }

    fn hash(&self) -> Transposition {
        canonical_hash(self.game.board())
    }
}

/// Fixed seed so Zobrist keys are reproducible between runs.
const ZOBRIST_SEED: u64 = 0x6E6F_7567_6874_7331;

/// Random number tables for Zobrist hashing.
struct ZobristKeys {
    cells: [[u64; 9]; 2],
    side_to_move: u64,
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);
        let mut cells = [[0u64; 9]; 2];
        for layer in cells.iter_mut() {
            for key in layer.iter_mut() {
                *key = rng.random();
            }
        }
        Self {
            cells,
            side_to_move: rng.random(),
        }
    }

    #[inline]
    fn cell(&self, pos: Pos, player: Player) -> u64 {
        self.cells[player.index()][pos.0 as usize]
    }
}

static KEYS: LazyLock<ZobristKeys> = LazyLock::new(ZobristKeys::new);

/// Conventional incremental Zobrist hashing.
///
/// Every raw position (including the side to move) gets its own key, so it
/// is the baseline the canonical strategy is compared against.
#[derive(Clone, Debug)]
pub struct ZobristHasher {
    game: Game,
    key: u64,
}

impl ZobristHasher {
    pub fn new() -> Self {
        Self::from_game(Game::new())
    }

    /// Start hashing from an existing game; the key is computed from scratch.
    pub fn from_game(game: Game) -> Self {
        let key = Self::full_key(&game);
        Self { game, key }
    }

    /// Compute the key of `game` without incremental state.
    pub fn full_key(game: &Game) -> u64 {
        let board = game.board();
        let mut key = 0u64;
        for pos in Pos::all() {
            if let Some(player) = board.occupant(pos) {
                key ^= KEYS.cell(pos, player);
            }
        }
        if game.current_player() == Player::B {
            key ^= KEYS.side_to_move;
        }
        key
    }

    /// The game being tracked.
    #[inline]
    pub fn game(&self) -> &Game {
        &self.game
    }
}

impl Default for ZobristHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionHasher for ZobristHasher {
    type Key = u64;

    fn apply_move(&mut self, pos: Pos) -> Result<()> {
        let mover = self.game.current_player();
        self.game.apply(pos)?;
        self.key ^= KEYS.cell(pos, mover) ^ KEYS.side_to_move;
        Ok(())
    }

    fn undo_move(&mut self) -> Option<Pos> {
        let pos = self.game.undo()?;
        // After undo the mover is back on turn
        let mover = self.game.current_player();
        self.key ^= KEYS.cell(pos, mover) ^ KEYS.side_to_move;
        Some(pos)
    }

    #[inline]
    fn hash(&self) -> u64 {
        self.key
    }
}
