//! Exhaustive minimax search for the O player.
//!
//! The full game tree is searched to terminal states, no depth limit and no
//! pruning; a 3×3 board is small enough that the complete search returns
//! instantly. Terminal scores are +1 for an O win, -1 for an X win, 0 for a
//! draw, maximized on O's turns and minimized on X's.
//!
//! The search mutates one scratch board in place, undoing each placement on
//! the way back up, so no allocation happens per node.

use crate::board::{Board, Player, Verdict};
use tracing::debug;

/// The optimal cell for O on this board, or `None` if the board is full.
///
/// Candidate cells are scanned in row-major order and a candidate replaces
/// the incumbent only on a strictly better score, so among equally good
/// moves the first one in scan order wins. A consequence worth keeping: the
/// engine does not prefer faster wins or slower losses among moves of equal
/// game-theoretic value.
pub fn best_move(board: &Board) -> Option<(usize, usize)> {
    let mut scratch = *board;
    let mut best_score = i32::MIN;
    let mut best_cell = None;

    for row in 0..3 {
        for col in 0..3 {
            if scratch.get(row, col).is_some() {
                continue;
            }
            scratch.set(row, col, Some(Player::O));
            let score = minimax(&mut scratch, false);
            scratch.set(row, col, None);

            if score > best_score {
                best_score = score;
                best_cell = Some((row, col));
            }
        }
    }

    debug!(?best_cell, best_score, "minimax move selected");
    best_cell
}

/// Score the position with O to move when `maximizing`, X otherwise.
fn minimax(board: &mut Board, maximizing: bool) -> i32 {
    match board.check_winner() {
        Some(Verdict::Winner(Player::O)) => return 1,
        Some(Verdict::Winner(Player::X)) => return -1,
        Some(Verdict::Draw) => return 0,
        None => {}
    }

    let player = if maximizing { Player::O } else { Player::X };
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for row in 0..3 {
        for col in 0..3 {
            if board.get(row, col).is_some() {
                continue;
            }
            board.set(row, col, Some(player));
            let score = minimax(board, !maximizing);
            board.set(row, col, None);

            best = if maximizing {
                best.max(score)
            } else {
                best.min(score)
            };
        }
    }

    best
}
