//! Full game-tree census.
//!
//! Enumerates every path from a root position and measures how many
//! transposition-table entries each keying scheme would need:
//! - Raw boards (what a Zobrist key distinguishes)
//! - Boards up to rotation and reflection only
//! - Canonical transposition keys (symmetry plus indifferent-cell folding)

use std::collections::HashSet;
use std::time::Instant;

use anyhow::Result;
use log::{debug, info};
use noughts_core::{canonical_hash, Game, Outcome, Player, Pos, Transposition};
use serde::Serialize;

/// Stack frame for iterative DFS.
struct Frame {
    /// All legal moves from this position
    moves: Vec<Pos>,
    /// Index of next move to explore
    move_idx: usize,
}

/// Totals gathered by a census walk.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Census {
    /// Root position as a board string
    pub root: String,
    /// Tree nodes visited, root included (transpositions counted per path)
    pub nodes: u64,
    pub x_wins: u64,
    pub o_wins: u64,
    pub draws: u64,
    /// Deepest ply below the root
    pub max_depth: usize,
    pub raw_positions: usize,
    pub symmetry_classes: usize,
    pub canonical_keys: usize,
}

impl Census {
    /// Raw positions per canonical key.
    pub fn compression(&self) -> f64 {
        if self.canonical_keys == 0 {
            return 0.0;
        }
        self.raw_positions as f64 / self.canonical_keys as f64
    }

    pub fn terminals(&self) -> u64 {
        self.x_wins + self.o_wins + self.draws
    }
}

/// Distinct keys seen so far.
#[derive(Default)]
struct Seen {
    raw: HashSet<u32>,
    symmetry: HashSet<u32>,
    canonical: HashSet<Transposition>,
}

impl Seen {
    fn record(&mut self, game: &Game) {
        let board = game.board();
        // Both derived keys are functions of the raw board
        if self.raw.insert(board.to_bits()) {
            self.symmetry.insert(board.canonical_bits());
            self.canonical.insert(canonical_hash(board));
        }
    }
}

/// Walk the full game tree below `root`.
///
/// Progress is logged every `log_every` nodes; 0 disables progress logging.
pub fn run(root: Game, log_every: u64) -> Result<Census> {
    let start = Instant::now();
    let mut game = root;
    let mut census = Census {
        root: game.board().to_string(),
        ..Census::default()
    };
    let mut seen = Seen::default();

    info!(
        "Census from {} ({} to move)",
        census.root,
        game.current_player()
    );

    visit(&game, &mut census, &mut seen);
    let mut stack = vec![Frame {
        moves: game.legal_moves(),
        move_idx: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        if frame.move_idx < frame.moves.len() {
            let mov = frame.moves[frame.move_idx];
            frame.move_idx += 1;

            game.apply(mov)?;
            visit(&game, &mut census, &mut seen);

            if log_every > 0 && census.nodes % log_every == 0 {
                let elapsed = start.elapsed().as_secs_f64();
                let rate = if elapsed > 0.0 {
                    census.nodes as f64 / elapsed
                } else {
                    0.0
                };
                info!(
                    "nodes={} rate={:.0}/s depth={} raw={} canonical={}",
                    census.nodes,
                    rate,
                    stack.len(),
                    seen.raw.len(),
                    seen.canonical.len()
                );
            }

            stack.push(Frame {
                moves: game.legal_moves(),
                move_idx: 0,
            });
        } else {
            stack.pop();
            // The root frame has no move of its own to undo
            if !stack.is_empty() {
                game.undo();
            }
        }
    }

    census.raw_positions = seen.raw.len();
    census.symmetry_classes = seen.symmetry.len();
    census.canonical_keys = seen.canonical.len();

    debug!(
        "Census of {} finished in {:.2}s",
        census.root,
        start.elapsed().as_secs_f64()
    );
    Ok(census)
}

fn visit(game: &Game, census: &mut Census, seen: &mut Seen) {
    census.nodes += 1;
    census.max_depth = census.max_depth.max(game.move_count());
    seen.record(game);

    match game.outcome() {
        Outcome::Win(Player::A) => census.x_wins += 1,
        Outcome::Win(Player::B) => census.o_wins += 1,
        Outcome::Draw => census.draws += 1,
        Outcome::Ongoing => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from(board: &str) -> Census {
        let game = Game::from_board(board.parse().unwrap()).unwrap();
        run(game, 0).unwrap()
    }

    #[test]
    fn test_full_tree_census() {
        let census = run(Game::new(), 0).unwrap();
        assert_eq!(census.root, ".........");
        assert_eq!(census.nodes, 549_946);
        assert_eq!(census.x_wins, 131_184);
        assert_eq!(census.o_wins, 77_904);
        assert_eq!(census.draws, 46_080);
        assert_eq!(census.terminals(), 255_168);
        assert_eq!(census.max_depth, 9);
        assert_eq!(census.raw_positions, 5_478);
        assert_eq!(census.symmetry_classes, 765);
        assert_eq!(census.canonical_keys, 747);
        assert!(census.compression() > 7.3 && census.compression() < 7.4);
    }

    #[test]
    fn test_census_after_corner_opening() {
        let census = from("X../.../...");
        assert_eq!(census.nodes, 59_705);
        assert_eq!(census.x_wins, 14_652);
        assert_eq!(census.o_wins, 7_896);
        assert_eq!(census.draws, 5_184);
        assert_eq!(census.max_depth, 8);
        assert_eq!(census.raw_positions, 1_870);
        assert_eq!(census.symmetry_classes, 652);
        assert_eq!(census.canonical_keys, 634);
    }

    #[test]
    fn test_census_midgame_with_o_to_move() {
        let census = from("XXO/.O./...");
        assert_eq!(census.nodes, 198);
        assert_eq!((census.x_wins, census.o_wins, census.draws), (22, 48, 24));
        assert_eq!(census.max_depth, 5);
        assert_eq!(census.raw_positions, 81);
        assert_eq!(census.symmetry_classes, 75);
        assert_eq!(census.canonical_keys, 69);
    }

    #[test]
    fn test_census_of_terminal_root() {
        let draw = from("XOX/XOO/OXX");
        assert_eq!((draw.nodes, draw.draws, draw.max_depth), (1, 1, 0));
        assert_eq!(draw.canonical_keys, 1);

        let win = from("XXX/.OO/...");
        assert_eq!((win.nodes, win.x_wins), (1, 1));
    }

    #[test]
    fn test_census_serializes() {
        let census = from("XOX/XOO/OXX");
        let json = serde_json::to_value(&census).unwrap();
        assert_eq!(json["root"], "XOXXOOOXX");
        assert_eq!(json["draws"], 1);
    }
}
