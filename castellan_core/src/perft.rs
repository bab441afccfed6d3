//! Leaf counting over the legal move tree, for checking the rules against
//! published node counts.

use crate::board::{Board, Color, Move};

/// Counts the leaves of the legal move tree `depth` plies deep, starting with
/// `side` to move.
pub fn perft(board: &Board, side: Color, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut scratch = board.clone();
    let moves = scratch.legal_moves(side);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|m| perft(&child(board, m), side.flip(), depth - 1))
        .sum()
}

/// Like [`perft`], but reports the count under each root move separately.
pub fn perft_divide(board: &Board, side: Color, depth: usize) -> Vec<(Move, u64)> {
    assert!(depth >= 1);

    let mut scratch = board.clone();
    scratch
        .legal_moves(side)
        .into_iter()
        .map(|m| (m, perft(&child(board, m), side.flip(), depth - 1)))
        .collect()
}

fn child(board: &Board, the_move: Move) -> Board {
    let mut child = board.clone();
    child.make_move_unchecked(the_move);
    child
}
