use crate::board::{Board, CastlingWing, Move, Occupant, PieceType, Square};

pub(crate) use pawn_moves::pawn_attacks;

mod pawn_moves;

/// Classifies the move of `occupant` to `to`, returning [`None`] if the move
/// breaks the movement rules of the piece.
///
/// King safety is ignored. Pawn moves onto the last row are returned without a
/// promotion target; callers decide what the pawn becomes.
pub(crate) fn classify(board: &Board, occupant: &Occupant, to: Square) -> Option<Move> {
    let from = occupant.square();
    if from == to {
        return None;
    }

    // Shared destination validity: empty or holding an opposing piece other
    // than the king. Kings are never captured.
    let target = board.piece_at(to);
    if target.is_some_and(|piece| {
        piece.color() == occupant.color() || piece.piece_type() == PieceType::King
    }) {
        return None;
    }

    let (dr, dc) = from.delta(to);
    let geometry_ok = match occupant.piece_type() {
        PieceType::Pawn => return pawn_moves::classify_pawn(board, occupant, to),
        PieceType::King => return classify_king(board, occupant, to),
        PieceType::Knight => is_knight_step(dr, dc),
        PieceType::Bishop => is_diagonal(dr, dc) && clear_path(board, from, to),
        PieceType::Rook => is_orthogonal(dr, dc) && clear_path(board, from, to),
        PieceType::Queen => (is_diagonal(dr, dc) || is_orthogonal(dr, dc)) && clear_path(board, from, to),
    };

    geometry_ok.then(|| {
        let builder = Move::builder(from, to, occupant.piece());
        match target {
            Some(captured) => builder.captures(captured).build(),
            None => builder.build(),
        }
    })
}

fn classify_king(board: &Board, occupant: &Occupant, to: Square) -> Option<Move> {
    let from = occupant.square();
    let (dr, dc) = from.delta(to);
    let builder = Move::builder(from, to, occupant.piece());

    if is_king_step(dr, dc) {
        return Some(match board.piece_at(to) {
            Some(captured) => builder.captures(captured).build(),
            None => builder.build(),
        });
    }

    // A two-square horizontal step is a castling attempt.
    if dr != 0 || dc.abs() != 2 {
        return None;
    }
    let color = occupant.color();
    let wing = if dc > 0 {
        CastlingWing::Kingside
    } else {
        CastlingWing::Queenside
    };
    (from == CastlingWing::king_from(color) && board.can_castle(color, wing))
        .then(|| builder.is_castle().build())
}

pub(crate) const fn is_knight_step(dr: i8, dc: i8) -> bool {
    matches!((dr.abs(), dc.abs()), (1, 2) | (2, 1))
}

pub(crate) const fn is_king_step(dr: i8, dc: i8) -> bool {
    (dr != 0 || dc != 0) && dr.abs() <= 1 && dc.abs() <= 1
}

pub(crate) const fn is_diagonal(dr: i8, dc: i8) -> bool {
    dr != 0 && dr.abs() == dc.abs()
}

pub(crate) const fn is_orthogonal(dr: i8, dc: i8) -> bool {
    (dr == 0) != (dc == 0)
}

/// Returns true if every square strictly between `from` and `to` is empty.
/// The squares must share a row, column or diagonal; the occupant of `to` is
/// not examined.
pub(crate) fn clear_path(board: &Board, from: Square, to: Square) -> bool {
    let (dr, dc) = from.delta(to);
    let (step_r, step_c) = (dr.signum(), dc.signum());

    let mut current = from;
    loop {
        let Some(next) = current.offset(step_r, step_c) else {
            return false;
        };
        if next == to {
            return true;
        }
        if board.piece_at(next).is_some() {
            return false;
        }
        current = next;
    }
}
