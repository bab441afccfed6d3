//! Move classification, attack detection and legal move enumeration.

use arrayvec::ArrayVec;

use crate::board::{Board, Color, Move, PieceType, Square};

pub use self::probe::LegalityProbe;

pub mod attacks;
mod probe;
pub(crate) mod pseudo_legal;

/// Maximum number of moves that could occur in a legal position, used for
/// stack-allocating a vector to hold moves.
///
/// The actual number appears to be 218 in this position:
///
/// R6R/3Q4/1Q4Q1/4Q3/2Q4Q/Q4Q2/pp1Q4/kBNN1KB1 w - - 0 1
///
/// But 256 is a nice number and a good buffer in case there could be more.
pub const MAX_MOVES: usize = 256;

pub type MoveVec = ArrayVec<Move, MAX_MOVES>;

/// Returns true if the pseudo-legal `the_move` does not leave the mover's king
/// attacked. The board is restored before returning.
pub fn is_legal(board: &mut Board, the_move: Move) -> bool {
    let side = the_move.piece().color();
    let probe = LegalityProbe::new(board, the_move);
    !probe.board().in_check(side)
}

/// Origins of every piece of `side`, collected up front so the board can be
/// probed while iterating.
fn origins(board: &Board, side: Color) -> ArrayVec<Square, 64> {
    board
        .repr()
        .occupants_of(side)
        .map(|occupant| occupant.square())
        .collect()
}

/// Feeds every legal move of `side` to `f` until `f` returns false. Returns
/// false if it stopped early.
fn for_each_legal_move(
    board: &mut Board,
    side: Color,
    mut f: impl FnMut(Move) -> bool,
) -> bool {
    for from in origins(board, side) {
        for to in Square::all() {
            let Some(the_move) = board.pseudo_legal_move(from, to) else {
                continue;
            };
            if is_legal(board, the_move) && !f(the_move) {
                return false;
            }
        }
    }
    true
}

/// Computes all legal moves for `side`.
///
/// A pawn move onto the last row is listed once per promotion target.
pub fn legal_moves(board: &mut Board, side: Color) -> MoveVec {
    let mut moves = MoveVec::new();
    for_each_legal_move(board, side, |the_move| {
        let piece = the_move.piece();
        if piece.piece_type() == PieceType::Pawn
            && the_move.to_square().row() == piece.color().promotion_rank()
        {
            for promotion in PieceType::PROMOTIONS {
                moves.push(the_move.into_builder().promotes_to(promotion).build());
            }
        } else {
            moves.push(the_move);
        }
        true
    });
    moves
}

/// Returns true as soon as one legal move for `side` is found.
pub fn has_any_legal_move(board: &mut Board, side: Color) -> bool {
    !for_each_legal_move(board, side, |_| false)
}
