//! WASM bindings for noughts-core
//!
//! Provides a JavaScript-friendly API for playing games and inspecting
//! canonical keys.

use wasm_bindgen::prelude::*;
use crate::{canonical_form, Board, Game, Outcome, Player, Pos};

/// WASM-friendly wrapper around Game
#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a new game on an empty board
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame { inner: Game::new() }
    }

    /// Start from a board string such as "XXO/X../O.O"
    #[wasm_bindgen(js_name = fromBoard)]
    pub fn from_board(board: &str) -> Result<WasmGame, JsError> {
        let board: Board = board.parse()?;
        let inner = Game::from_board(board)?;
        Ok(WasmGame { inner })
    }

    /// Board as a 9-character string
    pub fn board(&self) -> String {
        self.inner.board().to_string()
    }

    /// Current player (1 or 2)
    #[wasm_bindgen(js_name = currentPlayer)]
    pub fn current_player(&self) -> u8 {
        self.inner.current_player() as u8 + 1
    }

    /// Get legal moves as JSON array of [row, col]
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        let moves: Vec<[u8; 2]> = self
            .inner
            .legal_moves()
            .into_iter()
            .map(|pos| [pos.row(), pos.col()])
            .collect();
        Ok(serde_wasm_bindgen::to_value(&moves)?)
    }

    /// Apply a move. Returns true if successful.
    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(&mut self, row: u8, col: u8) -> bool {
        match Pos::try_from_row_col(row as usize, col as usize) {
            Ok(pos) => self.inner.apply(pos).is_ok(),
            Err(_) => false,
        }
    }

    /// Undo the last move. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.inner.undo().is_some()
    }

    /// Check if game is over (win or full board)
    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.inner.is_terminal()
    }

    /// Get game result: "ongoing", "x_wins", "o_wins", or "draw"
    pub fn result(&self) -> String {
        match self.inner.outcome() {
            Outcome::Ongoing => "ongoing".to_string(),
            Outcome::Win(Player::A) => "x_wins".to_string(),
            Outcome::Win(Player::B) => "o_wins".to_string(),
            Outcome::Draw => "draw".to_string(),
        }
    }

    /// Get winning group as [row, col, row, col, row, col]
    /// Returns empty array if no winner
    #[wasm_bindgen(js_name = winningGroup)]
    pub fn winning_group(&self) -> Vec<u8> {
        self.inner
            .winning_group()
            .map(|group| group.iter().flat_map(|pos| [pos.row(), pos.col()]).collect())
            .unwrap_or_default()
    }

    /// Transposition of the board as it stands
    pub fn transposition(&self) -> String {
        self.inner.board().transposition().to_string()
    }

    /// Canonical transposition key (for transposition-table lookups)
    pub fn canonical(&self) -> String {
        canonical_form(self.inner.board()).0.to_string()
    }

    /// Name of the symmetry that produced the canonical key
    #[wasm_bindgen(js_name = canonicalSymmetry)]
    pub fn canonical_symmetry(&self) -> String {
        format!("{:?}", canonical_form(self.inner.board()).1)
    }

    /// Classification symbol (0-3) of one cell
    pub fn classify(&self, row: u8, col: u8) -> Result<u8, JsError> {
        let pos = Pos::try_from_row_col(row as usize, col as usize)?;
        Ok(self.inner.board().classify(pos) as u8)
    }

    /// Clone the game
    #[wasm_bindgen(js_name = clone)]
    pub fn clone_game(&self) -> WasmGame {
        WasmGame { inner: self.inner.clone() }
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}
