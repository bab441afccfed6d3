use std::fmt::Debug;

use bitflags::bitflags;

use super::{Color, Piece, PieceType, Square};

bitflags! {
    /// Flags representing special kinds of moves that need special handling.
    ///
    /// Only one of these flags should be set at any one time.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct MoveFlags: u8 {
        /// Whether this move is the initial double move of a pawn. The pawn
        /// may be captured en passant on the very next move.
        const DOUBLE_PAWN_PUSH = 0b001;
        /// Whether this move is a castle. The move is the two-square king
        /// step; the rook relocation is implied by its direction.
        const CASTLE           = 0b010;
        /// Whether this move is an en passant capture.
        const EN_PASSANT       = 0b100;
    }
}

/// Which rook a king castles with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CastlingWing {
    Kingside,
    Queenside,
}

impl CastlingWing {
    pub const KING_COL: u8 = 4;

    /// Column the king lands on.
    pub const fn king_to_col(self) -> u8 {
        match self {
            CastlingWing::Kingside => 6,
            CastlingWing::Queenside => 2,
        }
    }

    /// Column the rook starts on.
    pub const fn rook_from_col(self) -> u8 {
        match self {
            CastlingWing::Kingside => 7,
            CastlingWing::Queenside => 0,
        }
    }

    /// Column the rook lands on.
    pub const fn rook_to_col(self) -> u8 {
        match self {
            CastlingWing::Kingside => 5,
            CastlingWing::Queenside => 3,
        }
    }

    /// Columns the king passes through or lands on, none of which may be
    /// attacked.
    pub const fn king_path_cols(self) -> [u8; 2] {
        match self {
            CastlingWing::Kingside => [5, 6],
            CastlingWing::Queenside => [3, 2],
        }
    }

    /// The king's starting square for `color`.
    pub const fn king_from(color: Color) -> Square {
        Square::new_unchecked(color.back_rank(), Self::KING_COL)
    }

    pub const fn king_to(self, color: Color) -> Square {
        Square::new_unchecked(color.back_rank(), self.king_to_col())
    }

    pub const fn rook_from(self, color: Color) -> Square {
        Square::new_unchecked(color.back_rank(), self.rook_from_col())
    }
}

/// Representation of a chess move.
///
/// Assuming the board is in a valid state that allows the move, this structure
/// contains all the data required to unambiguously perform the move.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    from: Square,
    to: Square,
    piece: Piece,
    captured_piece: Option<Piece>,
    promotion: Option<Piece>,
    flags: MoveFlags,
}

impl Move {
    /// Constructs a new [`Move`].
    ///
    /// Note that this method will not check to see if the move performed is
    /// actually legal, i.e. making sure a bishop move actually moved on a
    /// diagonal, ensuring that the [`MoveFlags::EN_PASSANT`] flag is only used
    /// for an en passant capture, etc.
    pub const fn new(
        from: Square,
        to: Square,
        piece: Piece,
        captured_piece: Option<Piece>,
        promotion: Option<Piece>,
        flags: MoveFlags,
    ) -> Self {
        Self {
            from,
            to,
            piece,
            captured_piece,
            promotion,
            flags,
        }
    }

    /// Returns the source square of the moved piece.
    pub const fn from_square(self) -> Square {
        self.from
    }

    /// Returns the destination square of the moved piece.
    pub const fn to_square(self) -> Square {
        self.to
    }

    /// Returns the piece that was moved.
    pub const fn piece(self) -> Piece {
        self.piece
    }

    /// Returns if the piece that was moved was of the given type.
    pub fn is_move_of(self, piece_type: PieceType) -> bool {
        self.piece.piece_type() == piece_type
    }

    /// Returns the piece that was captured, if any.
    ///
    /// This piece will be on [`to_square`][Self::to_square] unless this move is
    /// an en passant capture, in which case it stood on
    /// [`Self::en_passant_square`].
    pub const fn captured_piece(self) -> Option<Piece> {
        self.captured_piece
    }

    /// If this was a pawn move that reached the final rank, returns the
    /// promotion target for this pawn.
    pub const fn promotion(self) -> Option<Piece> {
        self.promotion
    }

    /// Returns the special move flags for this move.
    pub const fn flags(self) -> MoveFlags {
        self.flags
    }

    /// Returns true if this move is a capture.
    pub const fn is_capture(self) -> bool {
        self.captured_piece.is_some()
    }

    /// Returns true if this move was an initial double-step move of a pawn.
    pub const fn is_double_pawn_push(self) -> bool {
        self.flags.contains(MoveFlags::DOUBLE_PAWN_PUSH)
    }

    /// Returns true if this move was a castling move.
    pub const fn is_castle(self) -> bool {
        self.flags.contains(MoveFlags::CASTLE)
    }

    /// Returns true if this move was an en passant capture.
    pub const fn is_en_passant(self) -> bool {
        self.flags.contains(MoveFlags::EN_PASSANT)
    }

    /// The square beside the capturing pawn: same row as the start square,
    /// same column as the end square. Only meaningful for en passant.
    pub const fn en_passant_square(self) -> Square {
        Square::new_unchecked(self.from.row(), self.to.col())
    }

    /// If this move is a castling move, returns the wing the king castled
    /// towards.
    ///
    /// The result of this method called on a non-castling move is defined but
    /// meaningless.
    pub const fn castling_wing(self) -> CastlingWing {
        if self.from.col() < self.to.col() {
            CastlingWing::Kingside
        } else {
            CastlingWing::Queenside
        }
    }

    /// If this move is a castling move, returns the source and destination
    /// squares of rook involved in the castle. (The `from_square` and
    /// `to_square` of this move are for the king.)
    ///
    /// The result of this method called on a non-castling move is defined but
    /// meaningless.
    pub const fn castling_rook_squares(self) -> (Square, Square) {
        let wing = self.castling_wing();
        let row = self.from.row();

        (
            Square::new_unchecked(row, wing.rook_from_col()),
            Square::new_unchecked(row, wing.rook_to_col()),
        )
    }

    /// Convenience alias for [`MoveBuilder::new`].
    pub const fn builder(from: Square, to: Square, piece: Piece) -> MoveBuilder {
        MoveBuilder::new(from, to, piece)
    }

    /// Convert this move into a pre-populated [`MoveBuilder`]. Useful for
    /// editing just one aspect of the move.
    pub const fn into_builder(self) -> MoveBuilder {
        MoveBuilder {
            from: self.from,
            to: self.to,
            piece: self.piece,
            captured_piece: self.captured_piece,
            promotion: self.promotion,
            flags: self.flags,
        }
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Move")
            .field("from", &format_args!("{}", self.from))
            .field("to", &format_args!("{}", self.to))
            .field("piece", &self.piece)
            .field("captured_piece", &self.captured_piece)
            .field("promotion", &self.promotion)
            .field("flags", &self.flags)
            .finish()
    }
}

/// Builder struct for convenient construction of a [`Move`].
///
/// Most moves are neither captures, promotions nor special moves, so this
/// struct lets callers specify only the parts that differ from a quiet move
/// before calling [`MoveBuilder::build`] to finalise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveBuilder {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured_piece: Option<Piece>,
    pub promotion: Option<Piece>,
    pub flags: MoveFlags,
}

impl MoveBuilder {
    /// Create a new [`MoveBuilder`].
    ///
    /// Every move requires a source and destination square, as well as the
    /// piece being moved, so these are required in this constructor.
    pub const fn new(from: Square, to: Square, piece: Piece) -> Self {
        Self {
            from,
            to,
            piece,
            captured_piece: None,
            promotion: None,
            flags: MoveFlags::empty(),
        }
    }

    /// Sets the captured piece of this move.
    pub const fn captures(self, captured_piece: Piece) -> Self {
        Self {
            captured_piece: Some(captured_piece),
            ..self
        }
    }

    /// Sets the promotion target of this move.
    pub const fn promotes_to(self, promotion: PieceType) -> Self {
        Self {
            promotion: Some(promotion.with_color(self.piece.color())),
            ..self
        }
    }

    /// Sets the flags to [`MoveFlags::DOUBLE_PAWN_PUSH`].
    pub const fn is_double_pawn_push(self) -> Self {
        Self {
            flags: MoveFlags::DOUBLE_PAWN_PUSH,
            ..self
        }
    }

    /// Sets the flags to [`MoveFlags::CASTLE`].
    pub const fn is_castle(self) -> Self {
        Self {
            flags: MoveFlags::CASTLE,
            ..self
        }
    }

    /// Sets the flags to [`MoveFlags::EN_PASSANT`].
    pub const fn is_en_passant(self) -> Self {
        Self {
            flags: MoveFlags::EN_PASSANT,
            ..self
        }
    }

    /// Finalises and builds the [`Move`].
    pub const fn build(self) -> Move {
        Move::new(
            self.from,
            self.to,
            self.piece,
            self.captured_piece,
            self.promotion,
            self.flags,
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    const EN_PASSANT_CAPTURES: &[MoveBuilder] = &[
        MoveBuilder::new(Square::B5, Square::A6, Piece::WHITE_PAWN)
            .captures(Piece::BLACK_PAWN)
            .is_en_passant(),
        MoveBuilder::new(Square::F4, Square::G3, Piece::BLACK_PAWN)
            .captures(Piece::WHITE_PAWN)
            .is_en_passant(),
    ];

    const CASTLES: &[MoveBuilder] = &[
        MoveBuilder::new(Square::E1, Square::G1, Piece::WHITE_KING).is_castle(),
        MoveBuilder::new(Square::E8, Square::C8, Piece::BLACK_KING).is_castle(),
    ];

    const QUIET_MOVES: &[MoveBuilder] = &[
        MoveBuilder::new(Square::B2, Square::B5, Piece::BLACK_QUEEN),
        MoveBuilder::new(Square::C6, Square::C7, Piece::WHITE_PAWN),
    ];

    #[test]
    fn move_flags_are_exclusive() {
        for move_case in EN_PASSANT_CAPTURES {
            let the_move = move_case.build();
            assert!(the_move.is_en_passant());
            assert!(the_move.is_capture());
            assert!(!the_move.is_castle());
        }

        for move_case in CASTLES {
            let the_move = move_case.build();
            assert!(the_move.is_castle());
            assert!(!the_move.is_capture());
            assert!(!the_move.is_double_pawn_push());
        }

        for move_case in QUIET_MOVES {
            let the_move = move_case.build();
            assert!(the_move.flags().is_empty());
            assert!(!the_move.is_capture());
        }
    }

    #[test]
    fn en_passant_square_is_beside_the_capturer() {
        assert_eq!(EN_PASSANT_CAPTURES[0].build().en_passant_square(), Square::A5);
        assert_eq!(EN_PASSANT_CAPTURES[1].build().en_passant_square(), Square::G4);
    }

    #[test]
    fn castling_rook_squares() {
        assert_eq!(
            CASTLES[0].build().castling_rook_squares(),
            (Square::H1, Square::F1)
        );
        assert_eq!(
            CASTLES[1].build().castling_rook_squares(),
            (Square::A8, Square::D8)
        );
    }

    #[test]
    fn castling_wing_of_a_castle() {
        assert_eq!(CASTLES[0].build().castling_wing(), CastlingWing::Kingside);
        assert_eq!(CASTLES[1].build().castling_wing(), CastlingWing::Queenside);
    }

    #[test]
    fn castling_wing_squares_agree_with_moves() {
        assert_eq!(CastlingWing::king_from(Color::White), Square::E1);
        assert_eq!(CastlingWing::Kingside.king_to(Color::White), Square::G1);
        assert_eq!(CastlingWing::Queenside.king_to(Color::Black), Square::C8);
        assert_eq!(CastlingWing::Queenside.rook_from(Color::Black), Square::A8);
    }

    #[test]
    fn promotes_to_keeps_mover_color() {
        let the_move = Move::builder(Square::H2, Square::G1, Piece::BLACK_PAWN)
            .captures(Piece::WHITE_BISHOP)
            .promotes_to(PieceType::Rook)
            .build();

        assert_eq!(the_move.promotion(), Some(Piece::BLACK_ROOK));
        assert!(the_move.is_move_of(PieceType::Pawn));
    }

    #[test]
    fn move_into_builder() {
        for move_case in EN_PASSANT_CAPTURES.iter().chain(CASTLES).chain(QUIET_MOVES) {
            assert_eq!(*move_case, move_case.build().into_builder());
        }
    }
}
