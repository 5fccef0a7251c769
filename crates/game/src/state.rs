//! The game state machine.
//!
//! One `GameState` belongs to one session. Transitions happen only through
//! `apply_move`; once a verdict is reached the state is frozen until
//! `reset`. The human plays X; the engine answers each accepted human move
//! with the optimal O reply before returning.

use crate::board::{Board, Player, Verdict};
use crate::search;
use tracing::debug;

/// Board, whose turn it is, and the verdict once the game is decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turn: Player,
    verdict: Option<Verdict>,
}

impl GameState {
    /// A fresh game: empty board, X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Player::X,
            verdict: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    pub fn is_over(&self) -> bool {
        self.verdict.is_some()
    }

    /// Back to the initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Play the human move at (row, col), then the engine's reply.
    ///
    /// Returns false and leaves the state untouched when the move is
    /// illegal: out of range, cell occupied, game already over, or not the
    /// human's turn. Illegal moves are not errors, they are ignored.
    pub fn apply_move(&mut self, row: usize, col: usize) -> bool {
        if self.is_over()
            || self.turn != Player::X
            || !Board::in_bounds(row, col)
            || self.board.get(row, col).is_some()
        {
            debug!(row, col, "move rejected");
            return false;
        }

        self.board.set(row, col, Some(Player::X));
        self.turn = Player::O;
        self.verdict = self.board.check_winner();
        if self.verdict.is_some() {
            return true;
        }

        // Engine reply. A reply cell always exists here: the game is not
        // over, so the board has at least one empty cell.
        if let Some((ai_row, ai_col)) = search::best_move(&self.board) {
            self.board.set(ai_row, ai_col, Some(Player::O));
            self.turn = Player::X;
            self.verdict = self.board.check_winner();
        }
        true
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game() {
        let state = GameState::new();
        assert_eq!(state.turn(), Player::X);
        assert!(!state.is_over());
        assert_eq!(state.board().check_winner(), None);
    }

    #[test]
    fn test_accepted_move_gets_an_engine_reply() {
        let mut state = GameState::new();
        assert!(state.apply_move(0, 0));

        // The human mark is placed and the engine answered, so it is the
        // human's turn again on a board with two marks.
        assert_eq!(state.board().get(0, 0), Some(Player::X));
        assert_eq!(state.turn(), Player::X);
        let marks = (0..3)
            .flat_map(|r| (0..3).map(move |c| (r, c)))
            .filter(|&(r, c)| state.board().get(r, c).is_some())
            .count();
        assert_eq!(marks, 2);
        assert!(!state.is_over());
    }

    #[test]
    fn test_occupied_cell_is_rejected_without_side_effects() {
        let mut state = GameState::new();
        assert!(state.apply_move(1, 1));
        let before = state.clone();

        // (1, 1) is now occupied by X
        assert!(!state.apply_move(1, 1));
        assert_eq!(state, before, "rejected move must not change anything");
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let mut state = GameState::new();
        let before = state.clone();
        assert!(!state.apply_move(3, 0));
        assert!(!state.apply_move(0, 9));
        assert_eq!(state, before);
    }

    #[test]
    fn test_no_moves_after_game_over() {
        let mut state = GameState::new();
        // Drive the game to a verdict by playing row-major into free cells
        let mut guard = 0;
        while !state.is_over() {
            for row in 0..3 {
                for col in 0..3 {
                    if !state.is_over() {
                        state.apply_move(row, col);
                    }
                }
            }
            guard += 1;
            assert!(guard < 10, "game did not terminate");
        }

        let before = state.clone();
        for row in 0..3 {
            for col in 0..3 {
                assert!(!state.apply_move(row, col));
            }
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut state = GameState::new();
        state.apply_move(0, 0);
        state.apply_move(2, 2);
        state.reset();
        assert_eq!(state, GameState::new());
    }
}
