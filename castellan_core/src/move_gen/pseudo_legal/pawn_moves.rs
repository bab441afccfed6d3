use crate::board::{Board, Move, Occupant, PieceType, Square};

pub(in crate::move_gen) fn classify_pawn(
    board: &Board,
    pawn: &Occupant,
    to: Square,
) -> Option<Move> {
    let from = pawn.square();
    let color = pawn.color();
    let forward = color.forward();
    let (dr, dc) = from.delta(to);
    let builder = Move::builder(from, to, pawn.piece());
    let target = board.piece_at(to);

    match (dr, dc.abs()) {
        (dr, 0) if dr == forward => target.is_none().then(|| builder.build()),
        (dr, 0) if dr == 2 * forward => {
            let intermediate = from.offset(forward, 0)?;
            (!pawn.has_moved() && target.is_none() && board.piece_at(intermediate).is_none())
                .then(|| builder.is_double_pawn_push().build())
        }
        (dr, 1) if dr == forward => match target {
            Some(captured) => Some(builder.captures(captured).build()),
            None => {
                let victim = en_passant_victim(board, pawn, to)?;
                Some(builder.captures(victim.piece()).is_en_passant().build())
            }
        },
        _ => None,
    }
}

/// The opposing pawn `pawn` could capture en passant by moving to `to`: it
/// stands beside the mover in the destination's column and its double step was
/// the last move on the board.
fn en_passant_victim<'a>(board: &'a Board, pawn: &Occupant, to: Square) -> Option<&'a Occupant> {
    let beside = Square::new_unchecked(pawn.square().row(), to.col());
    let victim = board.occupant_at(beside)?;

    let last_move = board.last_move()?;
    let timed = victim.just_double_stepped()
        && last_move.to == beside
        && last_move.is_double_pawn_push();

    (victim.piece() == PieceType::Pawn.with_color(pawn.color().flip()) && timed).then_some(victim)
}

/// Returns true if `pawn` attacks `target` diagonally, regardless of what
/// stands there.
pub(crate) fn pawn_attacks(pawn: &Occupant, target: Square) -> bool {
    let (dr, dc) = pawn.square().delta(target);
    dr == pawn.color().forward() && dc.abs() == 1
}
