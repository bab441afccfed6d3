//! Direct attack geometry.
//!
//! Attack detection never goes through the king's move classification, which
//! would itself need attack detection to decide on castling.

use crate::board::{Board, Color, Occupant, PieceType, Square};

use super::pseudo_legal::{
    clear_path, is_diagonal, is_king_step, is_knight_step, is_orthogonal, pawn_attacks,
};

/// Returns true if `attacker` attacks `target` on `board`, whatever stands on
/// `target`.
pub fn attacks_square(board: &Board, attacker: &Occupant, target: Square) -> bool {
    let from = attacker.square();
    if from == target {
        return false;
    }

    let (dr, dc) = from.delta(target);
    match attacker.piece_type() {
        PieceType::Pawn => pawn_attacks(attacker, target),
        PieceType::Knight => is_knight_step(dr, dc),
        PieceType::King => is_king_step(dr, dc),
        PieceType::Bishop => is_diagonal(dr, dc) && clear_path(board, from, target),
        PieceType::Rook => is_orthogonal(dr, dc) && clear_path(board, from, target),
        PieceType::Queen => {
            (is_diagonal(dr, dc) || is_orthogonal(dr, dc)) && clear_path(board, from, target)
        }
    }
}

pub fn attacked_by(board: &Board, square: Square, side: Color) -> bool {
    board
        .repr()
        .occupants_of(side)
        .any(|attacker| attacks_square(board, attacker, square))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{board::Piece, test_utils::board_from_diagram as board};

    #[test]
    fn kings_attack_adjacent_squares() {
        let board = board(
            "
                ........
                ........
                ........
                ...k....
                ........
                ...K....
                ........
                ........
            ",
        );

        // e4 lies between both kings.
        assert!(board.attacked_by(Square::E4, Color::White));
        assert!(board.attacked_by(Square::E4, Color::Black));
        assert!(!board.attacked_by(Square::D5, Color::White));
    }

    #[test]
    fn pawns_attack_only_diagonally_forward() {
        let mut board = Board::empty();
        board.put(Piece::WHITE_PAWN, Square::D4);
        board.put(Piece::BLACK_PAWN, Square::H5);

        assert!(board.attacked_by(Square::C5, Color::White));
        assert!(board.attacked_by(Square::E5, Color::White));
        assert!(!board.attacked_by(Square::D5, Color::White));
        assert!(!board.attacked_by(Square::C3, Color::White));
        assert!(board.attacked_by(Square::G4, Color::Black));
        assert!(!board.attacked_by(Square::G6, Color::Black));
    }

    #[test]
    fn sliders_are_blocked() {
        let board = board(
            "
                ....k...
                ........
                ........
                ........
                ....p...
                ........
                ........
                R...K..Q
            ",
        );

        assert!(board.attacked_by(Square::A8, Color::White));
        assert!(board.attacked_by(Square::H8, Color::White));
        assert!(board.attacked_by(Square::E2, Color::White));
        // The pawn itself is attacked but shields everything behind it.
        assert!(board.attacked_by(Square::E4, Color::White));
        assert!(!board.attacked_by(Square::D5, Color::White));
        assert!(!board.attacked_by(Square::B7, Color::White));
        // The king on e1 blocks the rook's view of h1.
        assert!(!attacks_square(
            &board,
            board.occupant_at(Square::A1).unwrap(),
            Square::H1
        ));
    }

    #[test]
    fn defended_pieces_count_as_attacked() {
        let board = board(
            "
                ....k...
                ........
                ........
                ........
                ........
                ........
                ....N...
                ....K...
            ",
        );

        assert!(board.attacked_by(Square::E2, Color::White));
        assert!(!attacks_square(
            &board,
            board.occupant_at(Square::E2).unwrap(),
            Square::E2
        ));
    }
}
