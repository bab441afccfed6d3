use crate::error::LoadError;

use super::{Board, BoardRepr, Color, Occupant, PieceType, Square};

/// One piece of a persisted position.
///
/// `has_moved` is kept exactly, since castling and pawn double steps depend
/// on it. En passant state is not part of a record: a restored board never
/// has an en passant capture pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PieceRecord {
    pub square: Square,
    pub piece_type: PieceType,
    pub color: Color,
    pub has_moved: bool,
}

impl From<&Occupant> for PieceRecord {
    fn from(occupant: &Occupant) -> Self {
        Self {
            square: occupant.square(),
            piece_type: occupant.piece_type(),
            color: occupant.color(),
            has_moved: occupant.has_moved(),
        }
    }
}

impl Board {
    /// Flattens the board into one record per piece, in row-major order.
    pub fn records(&self) -> Vec<PieceRecord> {
        self.occupants().map(PieceRecord::from).collect()
    }

    /// Rebuilds a board from flat records.
    ///
    /// Fails if two records share a square or either side does not have
    /// exactly one king.
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a PieceRecord>,
    ) -> Result<Board, LoadError> {
        let mut repr = BoardRepr::default();
        for record in records {
            let occupant = Occupant::new(record.piece_type.with_color(record.color), record.square)
                .with_has_moved(record.has_moved);
            if repr.place(occupant).is_some() {
                return Err(LoadError::DuplicateSquare(record.square));
            }
        }
        check_kings(&repr)?;

        Ok(Board::from_parts(repr, None))
    }
}

/// Fails if the side that is not to move stands in check, since its king
/// could then be taken.
pub(crate) fn check_idle_king(board: &Board, to_move: Color) -> Result<(), LoadError> {
    let idle = to_move.flip();
    if board.in_check(idle) {
        return Err(LoadError::IdleKingInCheck { color: idle });
    }
    Ok(())
}

pub(super) fn check_kings(repr: &BoardRepr) -> Result<(), LoadError> {
    let (white, black) = repr.piece_count(PieceType::King);
    for (color, count) in [(Color::White, white), (Color::Black, black)] {
        if count != 1 {
            return Err(LoadError::KingCount { color, count });
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::CastlingWing;
    use pretty_assertions::assert_eq;

    #[test]
    fn records_round_trip_keeps_has_moved() {
        let mut board = Board::starting_position();
        board.execute_move(Square::E2, Square::E4, None).unwrap();
        board.execute_move(Square::E7, Square::E5, None).unwrap();
        board.execute_move(Square::E1, Square::E2, None).unwrap();
        board.execute_move(Square::E8, Square::E7, None).unwrap();
        board.execute_move(Square::E2, Square::E1, None).unwrap();

        let records = board.records();
        assert_eq!(records.len(), 32);

        let restored = Board::from_records(&records).unwrap();
        assert_eq!(restored.records(), records);
        assert!(restored.occupant_at(Square::E1).unwrap().has_moved());
        assert!(!restored.can_castle(Color::White, CastlingWing::Kingside));
        // Pending en passant state is dropped.
        assert_eq!(restored.last_move(), None);
        assert!(!restored.occupant_at(Square::E4).unwrap().just_double_stepped());
    }

    #[test]
    fn from_records_rejects_duplicates() {
        let king = PieceRecord {
            square: Square::E1,
            piece_type: PieceType::King,
            color: Color::White,
            has_moved: false,
        };
        let queen = PieceRecord {
            piece_type: PieceType::Queen,
            ..king
        };

        assert_eq!(
            Board::from_records(&[king, queen]),
            Err(LoadError::DuplicateSquare(Square::E1))
        );
    }

    #[test]
    fn idle_king_must_not_be_in_check() {
        let board = Board::from_records(&[
            PieceRecord {
                square: Square::A1,
                piece_type: PieceType::King,
                color: Color::White,
                has_moved: true,
            },
            PieceRecord {
                square: Square::E1,
                piece_type: PieceType::Rook,
                color: Color::White,
                has_moved: true,
            },
            PieceRecord {
                square: Square::E8,
                piece_type: PieceType::King,
                color: Color::Black,
                has_moved: true,
            },
        ])
        .unwrap();

        assert_eq!(check_idle_king(&board, Color::Black), Ok(()));
        assert_eq!(
            check_idle_king(&board, Color::White),
            Err(LoadError::IdleKingInCheck {
                color: Color::Black
            })
        );
    }

    #[test]
    fn from_records_requires_one_king_each() {
        let white_king = PieceRecord {
            square: Square::E1,
            piece_type: PieceType::King,
            color: Color::White,
            has_moved: false,
        };
        let black_king = PieceRecord {
            square: Square::E8,
            color: Color::Black,
            ..white_king
        };
        let second_black_king = PieceRecord {
            square: Square::A8,
            ..black_king
        };

        assert!(Board::from_records(&[white_king, black_king]).is_ok());
        assert_eq!(
            Board::from_records(&[white_king]),
            Err(LoadError::KingCount {
                color: Color::Black,
                count: 0
            })
        );
        assert_eq!(
            Board::from_records(&[white_king, black_king, second_black_king]),
            Err(LoadError::KingCount {
                color: Color::Black,
                count: 2
            })
        );
    }
}
