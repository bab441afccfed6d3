//! Structs and functions related to the board representation.

mod board_repr;
mod castling;
mod coord_move;
mod fen;
mod move_repr;
mod piece;
mod records;
mod square;

use std::fmt::{Display, Write};

use tracing::trace;

pub use board_repr::{BoardRepr, Occupant};
pub use castling::Castling;
pub use coord_move::CoordMove;
pub use move_repr::{CastlingWing, Move, MoveBuilder, MoveFlags};
pub use piece::{Color, Piece, PieceType};
pub use records::PieceRecord;

pub(crate) use records::check_idle_king;
pub use square::Square;

use crate::{
    game::GameStatus,
    move_gen::{self, attacks, pseudo_legal, MoveVec},
};

pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// The most recently executed move, as far as en passant needs to know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LastMove {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
}

impl LastMove {
    /// True if this was a pawn advancing two rows.
    pub fn is_double_pawn_push(&self) -> bool {
        self.piece.piece_type() == PieceType::Pawn && self.from.row().abs_diff(self.to.row()) == 2
    }
}

/// The board: sole owner of every piece on it, plus the last move record
/// needed to time en passant captures.
///
/// The board does not track whose turn it is; the side is passed into every
/// query that needs one. [`Game`](crate::game::Game) layers turn order on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) repr: BoardRepr,
    pub(crate) last_move: Option<LastMove>,
}

impl Board {
    /// A board with no pieces on it.
    pub fn empty() -> Self {
        Self {
            repr: BoardRepr::default(),
            last_move: None,
        }
    }

    /// The canonical chess starting position.
    pub fn starting_position() -> Self {
        let mut board = Self::empty();
        for (col, piece_type) in BACK_RANK.into_iter().enumerate() {
            let col = col as u8;
            for color in [Color::White, Color::Black] {
                board.put(
                    piece_type.with_color(color),
                    Square::new_unchecked(color.back_rank(), col),
                );
                board.put(
                    PieceType::Pawn.with_color(color),
                    Square::new_unchecked(color.pawn_rank(), col),
                );
            }
        }
        board
    }

    pub(crate) fn from_parts(repr: BoardRepr, last_move: Option<LastMove>) -> Self {
        Self { repr, last_move }
    }

    /// Places `piece` on `square` as an unmoved piece (a pawn off its starting
    /// row counts as moved), returning whatever stood there before.
    ///
    /// Intended for setting up positions; it performs no rule checks.
    pub fn put(&mut self, piece: Piece, square: Square) -> Option<Occupant> {
        self.repr.place(Occupant::inferred(piece, square))
    }

    /// Places a fully specified occupant, returning whatever stood there
    /// before. Performs no rule checks.
    pub fn put_occupant(&mut self, occupant: Occupant) -> Option<Occupant> {
        self.repr.place(occupant)
    }

    /// Removes and returns the occupant of `square`.
    pub fn remove(&mut self, square: Square) -> Option<Occupant> {
        self.repr.take(square)
    }

    pub fn repr(&self) -> &BoardRepr {
        &self.repr
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.repr.piece_at(square)
    }

    pub fn occupant_at(&self, square: Square) -> Option<&Occupant> {
        self.repr[square].as_ref()
    }

    pub fn occupants(&self) -> impl Iterator<Item = &Occupant> + '_ {
        self.repr.occupants()
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.repr.king_square(color)
    }

    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    /// Classifies the move of whatever stands on `from` to `to`, ignoring
    /// whether it leaves the mover's own king attacked. Returns [`None`] if
    /// there is no piece on `from` or the move breaks the piece's movement
    /// rules.
    ///
    /// Promotion moves are returned without a promotion target.
    pub fn pseudo_legal_move(&self, from: Square, to: Square) -> Option<Move> {
        let occupant = self.occupant_at(from)?;
        pseudo_legal::classify(self, occupant, to)
    }

    pub fn move_is_pseudo_legal(&self, from: Square, to: Square) -> bool {
        self.pseudo_legal_move(from, to).is_some()
    }

    /// Returns true if any piece of `side` attacks `square`.
    pub fn attacked_by(&self, square: Square, side: Color) -> bool {
        attacks::attacked_by(self, square, side)
    }

    /// Returns true if the king of `side` is attacked.
    ///
    /// # Panics
    ///
    /// Panics if `side` has no king on the board, which can only happen if
    /// the board was assembled by hand without one.
    pub fn in_check(&self, side: Color) -> bool {
        let king = self
            .king_square(side)
            .unwrap_or_else(|| panic!("No {side} king on the board"));
        self.attacked_by(king, side.flip())
    }

    /// Returns true if `side` may castle on `wing` right now: king and rook
    /// are in place and unmoved, the squares between them are empty, the king
    /// is not in check, and no square the king passes through or lands on is
    /// attacked.
    pub fn can_castle(&self, side: Color, wing: CastlingWing) -> bool {
        let row = side.back_rank();
        let unmoved = |square: Square, piece_type: PieceType| {
            self.occupant_at(square).is_some_and(|occupant| {
                occupant.piece() == piece_type.with_color(side) && !occupant.has_moved()
            })
        };

        if !unmoved(CastlingWing::king_from(side), PieceType::King)
            || !unmoved(wing.rook_from(side), PieceType::Rook)
        {
            return false;
        }

        let (low, high) = match wing {
            CastlingWing::Kingside => (CastlingWing::KING_COL + 1, wing.rook_from_col()),
            CastlingWing::Queenside => (wing.rook_from_col() + 1, CastlingWing::KING_COL),
        };
        if (low..high).any(|col| self.piece_at(Square::new_unchecked(row, col)).is_some()) {
            return false;
        }

        if self.in_check(side) {
            return false;
        }

        let opponent = side.flip();
        !wing
            .king_path_cols()
            .into_iter()
            .any(|col| self.attacked_by(Square::new_unchecked(row, col), opponent))
    }

    /// Which castling moves are still available in principle. See
    /// [`Castling`].
    pub fn castling_rights(&self) -> Castling {
        let mut rights = Castling::empty();
        for color in [Color::White, Color::Black] {
            let king_home = self
                .occupant_at(CastlingWing::king_from(color))
                .is_some_and(|o| o.piece() == PieceType::King.with_color(color) && !o.has_moved());
            if !king_home {
                continue;
            }
            for wing in [CastlingWing::Kingside, CastlingWing::Queenside] {
                let rook_home = self
                    .occupant_at(wing.rook_from(color))
                    .is_some_and(|o| o.piece() == PieceType::Rook.with_color(color) && !o.has_moved());
                if rook_home {
                    rights |= Castling::flag(color, wing);
                }
            }
        }
        rights
    }

    /// Returns true if the pseudo-legal move `from` to `to` by `side` does not
    /// leave the king of `side` attacked.
    ///
    /// Returns false if the move is not pseudo-legal or the piece on `from`
    /// does not belong to `side`. The board is left exactly as it was.
    pub fn is_legal(&mut self, from: Square, to: Square, side: Color) -> bool {
        match self.pseudo_legal_move(from, to) {
            Some(the_move) if the_move.piece().color() == side => {
                move_gen::is_legal(self, the_move)
            }
            _ => false,
        }
    }

    /// Executes the move of the piece on `from` to `to`, including any en
    /// passant capture, castling rook relocation or promotion.
    ///
    /// `promotion` chooses what a pawn reaching its last row becomes; a
    /// missing or unsuitable choice promotes to a queen. It is ignored for
    /// other moves.
    ///
    /// Returns [`None`], leaving the board untouched, if the move is not
    /// pseudo-legal. King safety is *not* checked here; see
    /// [`Self::is_legal`].
    pub fn execute_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Option<Move> {
        let mut the_move = self.pseudo_legal_move(from, to)?;

        let piece = the_move.piece();
        if piece.piece_type() == PieceType::Pawn && to.row() == piece.color().promotion_rank() {
            let target = promotion
                .filter(|p| p.is_promotion_target())
                .unwrap_or(PieceType::Queen);
            the_move = the_move.into_builder().promotes_to(target).build();
        }

        self.make_move_unchecked(the_move);
        Some(the_move)
    }

    /// Applies a move previously produced by the move classifier.
    ///
    /// No checks are performed to ensure the move is valid.
    pub(crate) fn make_move_unchecked(&mut self, the_move: Move) {
        let from = the_move.from_square();
        let to = the_move.to_square();

        // The double-step flag only lives for one ply.
        if let Some(previous) = self.last_move {
            if let Some(occupant) = &mut self.repr[previous.to] {
                occupant.just_double_stepped = false;
            }
        }

        let Some(mut moving) = self.repr.take(from) else {
            return;
        };

        if the_move.is_en_passant() {
            self.repr.take(the_move.en_passant_square());
        }

        if the_move.is_castle() {
            let (rook_from, rook_to) = the_move.castling_rook_squares();
            if let Some(mut rook) = self.repr.take(rook_from) {
                rook.square = rook_to;
                rook.has_moved = true;
                self.repr.place(rook);
            }
        }

        moving.square = to;
        moving.has_moved = true;
        moving.just_double_stepped = the_move.is_double_pawn_push();
        if let Some(promotion) = the_move.promotion() {
            moving = Occupant::new(promotion, to).with_has_moved(true);
        }
        self.repr.place(moving);

        self.last_move = Some(LastMove {
            piece: the_move.piece(),
            from,
            to,
        });

        trace!(?the_move, "executed move");
    }

    /// All legal moves for `side`, freshly computed.
    ///
    /// A pawn move onto the last row appears once per promotion target.
    pub fn legal_moves(&mut self, side: Color) -> MoveVec {
        move_gen::legal_moves(self, side)
    }

    pub fn has_any_legal_move(&mut self, side: Color) -> bool {
        move_gen::has_any_legal_move(self, side)
    }

    /// Derives the status of `side` as the side to move.
    pub fn status(&mut self, side: Color) -> GameStatus {
        let in_check = self.in_check(side);
        match (in_check, self.has_any_legal_move(side)) {
            (true, true) => GameStatus::Check,
            (true, false) => GameStatus::Checkmate,
            (false, true) => GameStatus::Active,
            (false, false) => GameStatus::Stalemate,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting_position()
    }
}

/// Draws the board as an 8-row diagram with FEN piece characters, eighth rank
/// first.
impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8 {
                let c = self
                    .piece_at(Square::new_unchecked(row, col))
                    .map_or('.', Piece::as_fen_char);
                f.write_char(c)?;
            }
            f.write_char('\n')?;
        }
        f.write_str("  abcdefgh")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::board_from_diagram as board;
    use pretty_assertions::assert_eq;

    #[test]
    fn starting_position_layout() {
        let board = Board::starting_position();

        assert_eq!(board.piece_at(Square::E1), Some(Piece::WHITE_KING));
        assert_eq!(board.piece_at(Square::D8), Some(Piece::BLACK_QUEEN));
        assert_eq!(board.piece_at(Square::A1), Some(Piece::WHITE_ROOK));
        assert_eq!(board.piece_at(Square::G8), Some(Piece::BLACK_KNIGHT));
        assert_eq!(board.occupants().count(), 32);
        assert!(board.occupants().all(|o| !o.has_moved()));
        assert_eq!(board.castling_rights(), Castling::all());
        assert_eq!(board.last_move(), None);
    }

    #[test]
    fn execute_move_rejects_without_mutation() {
        let mut board = Board::starting_position();
        let before = board.clone();

        assert_eq!(board.execute_move(Square::E2, Square::E5, None), None);
        assert_eq!(board.execute_move(Square::E4, Square::E5, None), None);
        assert_eq!(board.execute_move(Square::A1, Square::A3, None), None);
        assert_eq!(board, before);
    }

    #[test]
    fn execute_move_updates_history() {
        let mut board = Board::starting_position();

        let the_move = board.execute_move(Square::E2, Square::E4, None).unwrap();
        assert!(the_move.is_double_pawn_push());

        let pawn = board.occupant_at(Square::E4).unwrap();
        assert!(pawn.has_moved());
        assert!(pawn.just_double_stepped());
        assert_eq!(pawn.square(), Square::E4);
        assert_eq!(board.piece_at(Square::E2), None);
        assert_eq!(
            board.last_move(),
            Some(LastMove {
                piece: Piece::WHITE_PAWN,
                from: Square::E2,
                to: Square::E4
            })
        );

        board.execute_move(Square::G8, Square::F6, None).unwrap();
        assert!(!board.occupant_at(Square::E4).unwrap().just_double_stepped());
    }

    #[test]
    fn execute_move_captures() {
        let mut board = board(
            "
                ....k...
                ........
                ........
                ...p....
                ....P...
                ........
                ........
                ....K...
            ",
        );

        let the_move = board.execute_move(Square::E4, Square::D5, None).unwrap();
        assert_eq!(the_move.captured_piece(), Some(Piece::BLACK_PAWN));
        assert_eq!(board.piece_at(Square::D5), Some(Piece::WHITE_PAWN));
        assert_eq!(board.occupants().count(), 3);
    }

    #[test]
    fn castling_moves_king_and_rook_together() {
        let mut board = board(
            "
                r...k..r
                ........
                ........
                ........
                ........
                ........
                ........
                R...K..R
            ",
        );

        let the_move = board.execute_move(Square::E1, Square::G1, None).unwrap();
        assert!(the_move.is_castle());
        assert_eq!(board.piece_at(Square::G1), Some(Piece::WHITE_KING));
        assert_eq!(board.piece_at(Square::F1), Some(Piece::WHITE_ROOK));
        assert_eq!(board.piece_at(Square::H1), None);
        assert_eq!(board.piece_at(Square::E1), None);
        assert!(board.occupant_at(Square::F1).unwrap().has_moved());
        assert_eq!(board.occupant_at(Square::F1).unwrap().square(), Square::F1);

        board.execute_move(Square::E8, Square::C8, None).unwrap();
        assert_eq!(board.piece_at(Square::C8), Some(Piece::BLACK_KING));
        assert_eq!(board.piece_at(Square::D8), Some(Piece::BLACK_ROOK));
        assert_eq!(board.piece_at(Square::A8), None);
        assert_eq!(board.castling_rights(), Castling::empty());
    }

    #[test]
    fn can_castle_conditions() {
        let open = board(
            "
                r...k..r
                ........
                ........
                ........
                ........
                ........
                ........
                R...K..R
            ",
        );
        assert!(open.can_castle(Color::White, CastlingWing::Kingside));
        assert!(open.can_castle(Color::White, CastlingWing::Queenside));
        assert!(open.can_castle(Color::Black, CastlingWing::Kingside));
        assert!(open.can_castle(Color::Black, CastlingWing::Queenside));

        // b1 is not on the king's path but must still be empty.
        let blocked = board(
            "
                r...k..r
                ........
                ........
                ........
                ........
                ........
                ........
                RN..K..R
            ",
        );
        assert!(!blocked.can_castle(Color::White, CastlingWing::Queenside));
        assert!(blocked.can_castle(Color::White, CastlingWing::Kingside));

        // A rook on f8 attacks f1, which the king passes through.
        let through_check = board(
            "
                ....kr..
                ........
                ........
                ........
                ........
                ........
                ........
                R...K..R
            ",
        );
        assert!(!through_check.can_castle(Color::White, CastlingWing::Kingside));
        assert!(through_check.can_castle(Color::White, CastlingWing::Queenside));

        // b1 attacked does not matter for queenside castling.
        let b_file_attacked = board(
            "
                .r..k...
                ........
                ........
                ........
                ........
                ........
                ........
                R...K...
            ",
        );
        assert!(b_file_attacked.can_castle(Color::White, CastlingWing::Queenside));

        let in_check = board(
            "
                ....k...
                ........
                ........
                ........
                ....r...
                ........
                ........
                R...K..R
            ",
        );
        assert!(!in_check.can_castle(Color::White, CastlingWing::Kingside));
        assert!(!in_check.can_castle(Color::White, CastlingWing::Queenside));
    }

    #[test]
    fn can_castle_requires_unmoved_pieces() {
        let mut board = board(
            "
                ....k...
                ........
                ........
                ........
                ........
                ........
                ........
                R...K..R
            ",
        );

        board.execute_move(Square::H1, Square::H2, None).unwrap();
        board.execute_move(Square::E8, Square::D8, None).unwrap();
        board.execute_move(Square::H2, Square::H1, None).unwrap();
        assert!(!board.can_castle(Color::White, CastlingWing::Kingside));
        assert!(board.can_castle(Color::White, CastlingWing::Queenside));

        board.execute_move(Square::D8, Square::E8, None).unwrap();
        board.execute_move(Square::E1, Square::D1, None).unwrap();
        board.execute_move(Square::E8, Square::D8, None).unwrap();
        board.execute_move(Square::D1, Square::E1, None).unwrap();
        assert!(!board.can_castle(Color::White, CastlingWing::Queenside));
    }

    #[test]
    fn promotion_defaults_to_queen() {
        let mut board = board(
            "
                .......k
                P.......
                ........
                ........
                ........
                ........
                ........
                ....K...
            ",
        );

        let the_move = board.execute_move(Square::A7, Square::A8, None).unwrap();
        assert_eq!(the_move.promotion(), Some(Piece::WHITE_QUEEN));
        let queen = board.occupant_at(Square::A8).unwrap();
        assert_eq!(queen.piece(), Piece::WHITE_QUEEN);
        assert!(queen.has_moved());
    }

    #[test]
    fn promotion_honours_choice() {
        let mut board = board(
            "
                .......k
                ........
                ........
                ........
                ........
                ........
                ...p....
                ....K...
            ",
        );

        board
            .execute_move(Square::D2, Square::D1, Some(PieceType::Knight))
            .unwrap();
        assert_eq!(board.piece_at(Square::D1), Some(Piece::BLACK_KNIGHT));
    }

    #[test]
    fn promotion_to_king_falls_back_to_queen() {
        let mut board = board(
            "
                .......k
                ..P.....
                ........
                ........
                ........
                ........
                ........
                ....K...
            ",
        );

        board
            .execute_move(Square::C7, Square::C8, Some(PieceType::King))
            .unwrap();
        assert_eq!(board.piece_at(Square::C8), Some(Piece::WHITE_QUEEN));
    }

    #[test]
    fn status_of_each_side() {
        let mut board = Board::starting_position();
        assert_eq!(board.status(Color::White), GameStatus::Active);
        assert_eq!(board.status(Color::Black), GameStatus::Active);
    }

    #[test]
    #[should_panic(expected = "No white king")]
    fn in_check_without_king_is_a_defect() {
        Board::empty().in_check(Color::White);
    }

    #[test]
    fn display_diagram() {
        let board = Board::starting_position();
        let diagram = board.to_string();

        assert!(diagram.starts_with("8 rnbqkbnr\n"));
        assert!(diagram.ends_with("1 RNBQKBNR\n  abcdefgh"));
    }
}
