use bitflags::bitflags;

use super::{CastlingWing, Color};

bitflags! {
    /// Which castling moves are still available in principle, given the
    /// history of the king and rooks.
    ///
    /// A flag is set while the king and the corresponding rook both stand on
    /// their starting squares without having moved. Temporary obstacles (pieces
    /// in between, the king being in check or passing through an attacked
    /// square) are not reflected here; those are decided by
    /// [`Board::can_castle`](super::Board::can_castle).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Castling: u8 {
        const WHITE_KINGSIDE  = 0b0001;
        const WHITE_QUEENSIDE = 0b0010;
        const BLACK_KINGSIDE  = 0b0100;
        const BLACK_QUEENSIDE = 0b1000;

        const WHITE = Self::WHITE_KINGSIDE.bits() | Self::WHITE_QUEENSIDE.bits();
        const BLACK = Self::BLACK_KINGSIDE.bits() | Self::BLACK_QUEENSIDE.bits();
    }
}

impl Castling {
    /// The flag for one color and wing.
    pub const fn flag(color: Color, wing: CastlingWing) -> Self {
        match (color, wing) {
            (Color::White, CastlingWing::Kingside) => Self::WHITE_KINGSIDE,
            (Color::White, CastlingWing::Queenside) => Self::WHITE_QUEENSIDE,
            (Color::Black, CastlingWing::Kingside) => Self::BLACK_KINGSIDE,
            (Color::Black, CastlingWing::Queenside) => Self::BLACK_QUEENSIDE,
        }
    }

    /// Returns the castling state as the 3rd field in [Forsyth-Edwards
    /// Notation](https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation).
    pub fn as_fen_str(self) -> String {
        if self.is_empty() {
            return "-".to_owned();
        }

        [
            (Self::WHITE_KINGSIDE, 'K'),
            (Self::WHITE_QUEENSIDE, 'Q'),
            (Self::BLACK_KINGSIDE, 'k'),
            (Self::BLACK_QUEENSIDE, 'q'),
        ]
        .into_iter()
        .filter(|&(flag, _)| self.contains(flag))
        .map(|(_, c)| c)
        .collect()
    }

    /// Parses the 3rd FEN field. Returns the first unrecognised character on
    /// failure.
    pub fn try_from_fen_str(s: &str) -> Result<Self, char> {
        if s == "-" {
            return Ok(Self::empty());
        }

        s.chars().try_fold(Self::empty(), |flags, c| {
            let flag = match c {
                'K' => Self::WHITE_KINGSIDE,
                'Q' => Self::WHITE_QUEENSIDE,
                'k' => Self::BLACK_KINGSIDE,
                'q' => Self::BLACK_QUEENSIDE,
                _ => return Err(c),
            };
            Ok(flags | flag)
        })
    }
}
