use std::{
    fmt::{Display, Write},
    str::FromStr,
};

use crate::error::ParseCoordMoveError;

use super::{Move, Piece, PieceType, Square};

/// A move written in coordinate notation: origin square, destination square
/// and an optional lowercase promotion target.
///
/// * `e2e4`
/// * `e1g1` (white castles kingside)
/// * `a7a8n` (promotion to a knight)
///
/// ```
/// # use castellan_core::board::{CoordMove, Square};
/// assert_eq!(
///     "e2e4".parse(),
///     Ok(CoordMove {
///         from: Square::E2,
///         to: Square::E4,
///         promotion: None,
///     })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CoordMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

impl Display for CoordMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.from.fmt(f)?;
        self.to.fmt(f)?;
        if let Some(promotion) = self.promotion {
            f.write_char(promotion.as_lowercase_char())?;
        }
        Ok(())
    }
}

impl FromStr for CoordMove {
    type Err = ParseCoordMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars = s.chars().collect::<Vec<_>>();
        if chars.len() != 4 && chars.len() != 5 {
            return Err(ParseCoordMoveError::IncorrectLength(chars.len()));
        }

        let square = |chars: &[char]| {
            let s = String::from_iter(chars);
            s.parse::<Square>()
                .map_err(|_| ParseCoordMoveError::InvalidSquare(s))
        };
        let from = square(&chars[0..2])?;
        let to = square(&chars[2..4])?;

        let promotion = match chars.get(4) {
            Some(&c) => Some(
                Piece::try_from_fen_char(c)
                    .filter(|p| p.is_black() && p.piece_type().is_promotion_target())
                    .ok_or(ParseCoordMoveError::InvalidPromotion(c))?
                    .piece_type(),
            ),
            None => None,
        };

        Ok(Self {
            from,
            to,
            promotion,
        })
    }
}

impl From<Move> for CoordMove {
    fn from(value: Move) -> Self {
        Self {
            from: value.from_square(),
            to: value.to_square(),
            promotion: value.promotion().map(Piece::piece_type),
        }
    }
}
