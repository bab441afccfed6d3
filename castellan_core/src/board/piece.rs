use std::fmt::{Debug, Display, Write};

/// Represents the kind of a piece, but not its colour.
///
/// The set of kinds is closed: every rule in the engine dispatches on this
/// enum with an exhaustive `match`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// Kinds a pawn may be promoted to, most valuable first.
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Knight,
        PieceType::Rook,
        PieceType::Bishop,
    ];

    /// Convenience method for constructing a white [`Piece`].
    pub const fn white(self) -> Piece {
        Piece::white(self)
    }

    /// Convenience method for constructing a black [`Piece`].
    pub const fn black(self) -> Piece {
        Piece::black(self)
    }

    /// Convenience method for constructing a [`Piece`] with the supplied
    /// [`Color`].
    pub const fn with_color(self, color: Color) -> Piece {
        Piece::new(color, self)
    }

    /// Get the FEN representation of the white version of this piece.
    pub const fn as_uppercase_char(self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }

    /// Get the FEN representation of the black version of this piece.
    pub const fn as_lowercase_char(self) -> char {
        self.as_uppercase_char().to_ascii_lowercase()
    }

    /// Returns true if a pawn may be promoted to this piece type.
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceType::Knight | PieceType::Bishop | PieceType::Rook | PieceType::Queen
        )
    }
}

/// Represents a player in a chess game (either white or black).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Returns true if this is [`Color::White`].
    pub const fn is_white(self) -> bool {
        match self {
            Color::White => true,
            Color::Black => false,
        }
    }

    /// Returns true if this is [`Color::Black`].
    pub const fn is_black(self) -> bool {
        !self.is_white()
    }

    /// Inverts the color, i.e. maps [`Color::White`] to [`Color::Black`] and
    /// vice versa.
    pub const fn flip(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a single pawn advance. White moves towards row 0.
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row holding this side's king and rooks at the start of the game.
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Row holding this side's pawns at the start of the game.
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row on which this side's pawns promote.
    pub const fn promotion_rank(self) -> u8 {
        self.flip().back_rank()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Color::White => "white",
            Color::Black => "black",
        })
    }
}

/// A coloured piece kind.
///
/// This carries no board state; see
/// [`Occupant`](super::Occupant) for a piece placed on the board.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Piece {
    color: Color,
    piece_type: PieceType,
}

impl Piece {
    pub const WHITE_PAWN: Piece = Piece::new(Color::White, PieceType::Pawn);
    pub const WHITE_KNIGHT: Piece = Piece::new(Color::White, PieceType::Knight);
    pub const WHITE_BISHOP: Piece = Piece::new(Color::White, PieceType::Bishop);
    pub const WHITE_ROOK: Piece = Piece::new(Color::White, PieceType::Rook);
    pub const WHITE_QUEEN: Piece = Piece::new(Color::White, PieceType::Queen);
    pub const WHITE_KING: Piece = Piece::new(Color::White, PieceType::King);
    pub const BLACK_PAWN: Piece = Piece::new(Color::Black, PieceType::Pawn);
    pub const BLACK_KNIGHT: Piece = Piece::new(Color::Black, PieceType::Knight);
    pub const BLACK_BISHOP: Piece = Piece::new(Color::Black, PieceType::Bishop);
    pub const BLACK_ROOK: Piece = Piece::new(Color::Black, PieceType::Rook);
    pub const BLACK_QUEEN: Piece = Piece::new(Color::Black, PieceType::Queen);
    pub const BLACK_KING: Piece = Piece::new(Color::Black, PieceType::King);

    /// Constructs a [`Piece`] from a [`Color`] and a [`PieceType`].
    pub const fn new(color: Color, piece_type: PieceType) -> Self {
        Self { color, piece_type }
    }

    /// Convenience method for constructing a white [`Piece`] from a
    /// [`PieceType`].
    pub const fn white(piece_type: PieceType) -> Self {
        Self::new(Color::White, piece_type)
    }

    /// Convenience method for constructing a black [`Piece`] from a
    /// [`PieceType`].
    pub const fn black(piece_type: PieceType) -> Self {
        Self::new(Color::Black, piece_type)
    }

    /// Returns the [`Color`] of this piece.
    pub const fn color(self) -> Color {
        self.color
    }

    /// Returns if this piece is white.
    pub const fn is_white(self) -> bool {
        self.color.is_white()
    }

    /// Returns if this piece is black.
    pub const fn is_black(self) -> bool {
        self.color.is_black()
    }

    /// Returns the [`PieceType`] of this piece.
    pub const fn piece_type(self) -> PieceType {
        self.piece_type
    }

    pub const fn as_fen_char(self) -> char {
        if self.color.is_white() {
            self.piece_type.as_uppercase_char()
        } else {
            self.piece_type.as_lowercase_char()
        }
    }

    pub const fn try_from_fen_char(c: char) -> Option<Self> {
        let piece_type = match c.to_ascii_uppercase() {
            'P' => PieceType::Pawn,
            'N' => PieceType::Knight,
            'B' => PieceType::Bishop,
            'R' => PieceType::Rook,
            'Q' => PieceType::Queen,
            'K' => PieceType::King,
            _ => return None,
        };

        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };

        Some(Self::new(color, piece_type))
    }
}

impl Debug for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Piece")
            .field("color", &self.color())
            .field("piece_type", &self.piece_type())
            .finish()
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char(self.as_fen_char())
    }
}
