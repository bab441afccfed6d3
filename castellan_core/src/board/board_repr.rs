use std::{
    ops::{Index, IndexMut},
    str::FromStr,
};

use super::{Color, Piece, PieceType, Square};

/// A piece standing on the board, together with the per-piece history the
/// rules depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occupant {
    pub(crate) piece: Piece,
    pub(crate) square: Square,
    pub(crate) has_moved: bool,
    pub(crate) just_double_stepped: bool,
}

impl Occupant {
    /// Creates an occupant that has never moved.
    pub const fn new(piece: Piece, square: Square) -> Self {
        Self {
            piece,
            square,
            has_moved: false,
            just_double_stepped: false,
        }
    }

    /// Creates an occupant whose move history is guessed from where it stands:
    /// a pawn away from its starting row must have moved, everything else is
    /// assumed unmoved.
    pub const fn inferred(piece: Piece, square: Square) -> Self {
        let has_moved = matches!(piece.piece_type(), PieceType::Pawn)
            && square.row() != piece.color().pawn_rank();
        Self::new(piece, square).with_has_moved(has_moved)
    }

    pub const fn with_has_moved(self, has_moved: bool) -> Self {
        Self { has_moved, ..self }
    }

    pub const fn piece(&self) -> Piece {
        self.piece
    }

    pub const fn color(&self) -> Color {
        self.piece.color()
    }

    pub const fn piece_type(&self) -> PieceType {
        self.piece.piece_type()
    }

    /// Square this piece currently stands on. Only the board updates it.
    pub const fn square(&self) -> Square {
        self.square
    }

    /// Whether this piece has moved at least once. Governs castling and the
    /// pawn double step.
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// True only for a pawn whose two-square advance was the most recent move
    /// on the board.
    pub const fn just_double_stepped(&self) -> bool {
        self.just_double_stepped
    }
}

/// Represents just the pieces on the board as an 8×8 grid of optional
/// [`Occupant`]s, addressed by [`Square`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRepr {
    squares: [Option<Occupant>; 64],
}

impl Default for BoardRepr {
    fn default() -> Self {
        Self {
            squares: [None; 64],
        }
    }
}

impl BoardRepr {
    /// Returns the piece, if any, on the provided square.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self[square].map(|occupant| occupant.piece)
    }

    /// Removes and returns whatever stands on `square`.
    pub fn take(&mut self, square: Square) -> Option<Occupant> {
        self[square].take()
    }

    /// Places `occupant` on the square it records, returning what was there.
    pub fn place(&mut self, occupant: Occupant) -> Option<Occupant> {
        self[occupant.square].replace(occupant)
    }

    /// Returns an iterator over every occupant in row-major order.
    pub fn occupants(&self) -> impl Iterator<Item = &Occupant> + '_ {
        self.squares.iter().flatten()
    }

    /// Returns an iterator over the occupants of the given [`Color`].
    pub fn occupants_of(&self, color: Color) -> impl Iterator<Item = &Occupant> + '_ {
        self.occupants()
            .filter(move |occupant| occupant.color() == color)
    }

    /// Returns a tuple (white count, black count) of the provided piece type.
    pub fn piece_count(&self, piece_type: PieceType) -> (usize, usize) {
        let count = |color: Color| {
            self.occupants_of(color)
                .filter(|occupant| occupant.piece_type() == piece_type)
                .count()
        };
        (count(Color::White), count(Color::Black))
    }

    /// Square of the king of the given color, if there is one.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.occupants()
            .find(|occupant| occupant.piece == PieceType::King.with_color(color))
            .map(Occupant::square)
    }
}

impl Index<Square> for BoardRepr {
    type Output = Option<Occupant>;

    fn index(&self, index: Square) -> &Self::Output {
        &self.squares[index.index()]
    }
}

impl IndexMut<Square> for BoardRepr {
    /// Intended for internal use. Writing an occupant whose recorded square
    /// differs from the index breaks board invariants.
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.squares[index.index()]
    }
}

/// Parses a plain diagram of 64 squares, row 0 (the eighth rank) first, using
/// FEN piece characters and `.` for empty squares. Whitespace is ignored.
/// Move history is inferred as in [`Occupant::inferred`].
impl FromStr for BoardRepr {
    type Err = char;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut repr = Self::default();
        let mut squares = Square::all();

        for c in s.chars().filter(|c| !c.is_whitespace()) {
            let square = squares.next().ok_or(c)?;
            if c == '.' {
                continue;
            }
            let piece = Piece::try_from_fen_char(c).ok_or(c)?;
            repr.place(Occupant::inferred(piece, square));
        }

        Ok(repr)
    }
}
