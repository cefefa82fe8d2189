//! Two-player game environment: turn tracking, legal moves, apply/undo.

use serde::{Deserialize, Serialize};

use crate::{Board, Error, Player, Pos, Result};

/// State of the game from the rules' point of view.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Ongoing,
    Win(Player),
    Draw,
}

impl Outcome {
    /// Check if the game has ended.
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }
}

/// A game in progress: the board, the side to move, and the move stack.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    to_move: Player,
    history: Vec<Pos>,
}

impl Game {
    /// Create a new game on an empty board with Player A to move.
    pub fn new() -> Game {
        Game {
            board: Board::new(),
            to_move: Player::A,
            history: Vec::with_capacity(9),
        }
    }

    /// Start a game from an arbitrary position.
    ///
    /// The side to move follows from the piece counts: A moves when the
    /// counts are equal, B when A is one ahead. Positions that cannot arise
    /// in play are rejected. The move stack starts empty.
    pub fn from_board(board: Board) -> Result<Game> {
        let a = board.count(Player::A);
        let b = board.count(Player::B);
        let to_move = if a == b {
            Player::A
        } else if a == b + 1 {
            Player::B
        } else {
            return Err(Error::InvalidPieceCounts { a, b });
        };

        match (board.has_won(Player::A), board.has_won(Player::B)) {
            (true, true) => return Err(Error::BothPlayersWon),
            // The winner must have made the last move
            (true, false) if to_move != Player::B => {
                return Err(Error::InconsistentWinner { winner: Player::A })
            }
            (false, true) if to_move != Player::A => {
                return Err(Error::InconsistentWinner { winner: Player::B })
            }
            _ => {}
        }

        Ok(Game {
            board,
            to_move,
            history: Vec::with_capacity(9),
        })
    }

    /// Current board snapshot.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player whose turn it is.
    #[inline]
    pub fn current_player(&self) -> Player {
        self.to_move
    }

    /// Moves applied since the game (or `from_board` position) started.
    #[inline]
    pub fn history(&self) -> &[Pos] {
        &self.history
    }

    /// Number of moves on the move stack.
    #[inline]
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Get the winner, if a scoring group is complete.
    #[inline]
    pub fn winner(&self) -> Option<Player> {
        self.board.winner()
    }

    /// The completed scoring group, if any.
    pub fn winning_group(&self) -> Option<[Pos; 3]> {
        self.winner()
            .and_then(|winner| self.board.winning_group(winner))
    }

    /// Current outcome.
    pub fn outcome(&self) -> Outcome {
        if let Some(winner) = self.winner() {
            Outcome::Win(winner)
        } else if self.board.is_full() {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        }
    }

    /// Check if the game has ended.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.outcome().is_terminal()
    }

    /// Reward for `player` at a terminal position: +1 win, -1 loss, 0 draw.
    /// Always 0 while the game is ongoing.
    pub fn reward(&self, player: Player) -> i8 {
        match self.outcome() {
            Outcome::Win(winner) if winner == player => 1,
            Outcome::Win(_) => -1,
            Outcome::Draw | Outcome::Ongoing => 0,
        }
    }

    /// Legal moves for the current player, in row-major order.
    /// Empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Pos> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.empty_cells().collect()
    }

    /// Apply a move for the current player and pass the turn.
    pub fn apply(&mut self, pos: Pos) -> Result<()> {
        if !pos.is_valid() {
            return Err(Error::PositionOutOfBounds {
                row: pos.row() as usize,
                col: pos.col() as usize,
            });
        }
        if self.is_terminal() {
            return Err(Error::GameOver);
        }
        if !self.board.is_empty(pos) {
            return Err(Error::Occupied {
                row: pos.row(),
                col: pos.col(),
            });
        }

        self.board.place(pos, self.to_move);
        self.to_move = self.to_move.opponent();
        self.history.push(pos);
        Ok(())
    }

    /// Undo the last move, restoring the previous position.
    ///
    /// Returns the undone move, or None if the move stack is empty.
    pub fn undo(&mut self) -> Option<Pos> {
        let pos = self.history.pop()?;
        self.board.clear(pos);
        self.to_move = self.to_move.opponent();
        Some(pos)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
