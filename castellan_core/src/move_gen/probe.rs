use crate::board::{Board, Move, Occupant, Square};

/// A tentative move used to check king safety.
///
/// Creating the probe relocates the moving piece (and lifts an en passant
/// victim off the board); dropping it puts every touched square back exactly
/// as it was. Nothing else on the board is touched: `last_move`, move history
/// flags and castling rooks are left alone.
pub struct LegalityProbe<'a> {
    board: &'a mut Board,
    from: Square,
    to: Square,
    saved_from: Option<Occupant>,
    saved_to: Option<Occupant>,
    victim: Option<Occupant>,
}

impl<'a> LegalityProbe<'a> {
    pub fn new(board: &'a mut Board, the_move: Move) -> Self {
        let from = the_move.from_square();
        let to = the_move.to_square();

        let saved_from = board.repr.take(from);
        let saved_to = board.repr.take(to);
        let victim = if the_move.is_en_passant() {
            board.repr.take(the_move.en_passant_square())
        } else {
            None
        };

        if let Some(mut moving) = saved_from {
            moving.square = to;
            board.repr.place(moving);
        }

        Self {
            board,
            from,
            to,
            saved_from,
            saved_to,
            victim,
        }
    }

    /// The board with the tentative move applied.
    pub fn board(&self) -> &Board {
        self.board
    }
}

impl Drop for LegalityProbe<'_> {
    fn drop(&mut self) {
        let repr = &mut self.board.repr;
        repr[self.to] = self.saved_to;
        repr[self.from] = self.saved_from;
        if let Some(victim) = self.victim {
            repr.place(victim);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::{Color, Piece};
    use pretty_assertions::assert_eq;

    #[test]
    fn probe_applies_then_restores() {
        let mut board = Board::starting_position();
        board.execute_move(Square::G1, Square::F3, None).unwrap();
        let before = board.clone();

        let the_move = board.pseudo_legal_move(Square::F3, Square::E5).unwrap();
        {
            let probe = LegalityProbe::new(&mut board, the_move);
            let probed = probe.board();
            assert_eq!(probed.piece_at(Square::F3), None);
            let knight = probed.occupant_at(Square::E5).unwrap();
            assert_eq!(knight.square(), Square::E5);
            assert_eq!(knight.piece(), Piece::WHITE_KNIGHT);
        }

        assert_eq!(board, before);
    }

    #[test]
    fn probe_restores_captured_piece() {
        let mut board = Board::empty();
        board.put(Piece::WHITE_KING, Square::E1);
        board.put(Piece::BLACK_KING, Square::E8);
        board.put(Piece::WHITE_ROOK, Square::A1);
        board.put(Piece::BLACK_QUEEN, Square::A7);
        let before = board.clone();

        let the_move = board.pseudo_legal_move(Square::A1, Square::A7).unwrap();
        {
            let probe = LegalityProbe::new(&mut board, the_move);
            assert_eq!(probe.board().piece_at(Square::A7), Some(Piece::WHITE_ROOK));
            assert_eq!(probe.board().occupants().count(), 3);
        }

        assert_eq!(board, before);
    }

    #[test]
    fn probe_lifts_en_passant_victim() {
        let (mut board, _) =
            Board::try_parse_fen("8/8/8/K2pP2r/8/8/8/4k3 w - d6 0 1").unwrap();
        let before = board.clone();

        let the_move = board.pseudo_legal_move(Square::E5, Square::D6).unwrap();
        assert!(the_move.is_en_passant());
        {
            let probe = LegalityProbe::new(&mut board, the_move);
            assert_eq!(probe.board().piece_at(Square::D5), None);
            assert!(probe.board().in_check(Color::White));
        }

        assert_eq!(board, before);
        assert!(board.occupant_at(Square::D5).unwrap().just_double_stepped());
    }
}
