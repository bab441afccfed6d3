use crate::error::FenError;

use super::{
    records, Board, BoardRepr, Castling, CastlingWing, Color, LastMove, Occupant, Piece,
    PieceType, Square,
};

impl Board {
    /// Parses a position in [Forsyth-Edwards
    /// Notation](https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation),
    /// returning the board and the side to move.
    ///
    /// The move clocks are optional and ignored. Since FEN carries no per-piece
    /// history, it is inferred: pawns away from their starting row have moved,
    /// and a king or rook counts as unmoved only if a castling right needs it
    /// to be. An en passant square marks the pawn that just double-stepped.
    pub fn try_parse_fen(fen: &str) -> Result<(Board, Color), FenError> {
        let fields: Vec<_> = fen.split_whitespace().collect();
        if !(4..=6).contains(&fields.len()) {
            return Err(FenError::WrongFieldCount(fields.len()));
        }
        let placement = fields[0];
        let to_move = fields[1];
        let castling = fields[2];
        let en_passant = fields[3];

        let to_move = match to_move {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(FenError::InvalidSideToMove(to_move.to_owned())),
        };
        let castling = Castling::try_from_fen_str(castling).map_err(FenError::InvalidCastling)?;

        let mut repr = parse_placement(placement, castling)?;
        records::check_kings(&repr)?;

        let last_move = if en_passant == "-" {
            None
        } else {
            Some(mark_double_step(&mut repr, en_passant, to_move)?)
        };

        let board = Board::from_parts(repr, last_move);
        records::check_idle_king(&board, to_move)?;

        Ok((board, to_move))
    }

    /// Writes the position as FEN with `to_move` as the side to move.
    ///
    /// Move clocks are not tracked, so they are always written as `0 1`.
    pub fn fen(&self, to_move: Color) -> String {
        let mut result = String::new();

        for row in 0..8 {
            let mut empty_squares = 0;
            for col in 0..8 {
                match self.piece_at(Square::new_unchecked(row, col)) {
                    None => empty_squares += 1,
                    Some(piece) => {
                        if empty_squares > 0 {
                            result.push((empty_squares + b'0') as _);
                        }
                        result.push(piece.as_fen_char());
                        empty_squares = 0;
                    }
                }
            }
            if empty_squares > 0 {
                result.push((empty_squares + b'0') as _);
            }
            if row < 7 {
                result.push('/');
            }
        }

        result.push(' ');
        result.push(if to_move.is_white() { 'w' } else { 'b' });
        result.push(' ');
        result.push_str(&self.castling_rights().as_fen_str());
        result.push(' ');
        match self.en_passant_target() {
            Some(square) => result.push_str(&square.to_string()),
            None => result.push('-'),
        }
        result.push_str(" 0 1");

        result
    }

    /// The square a pawn could capture en passant onto right now, if any.
    pub fn en_passant_target(&self) -> Option<Square> {
        let last_move = self.last_move?;
        let pawn = self.occupant_at(last_move.to)?;
        if !last_move.is_double_pawn_push() || !pawn.just_double_stepped() {
            return None;
        }
        last_move.to.offset(-pawn.color().forward(), 0)
    }
}

fn parse_placement(placement: &str, castling: Castling) -> Result<BoardRepr, FenError> {
    let ranks: Vec<_> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount(ranks.len()));
    }

    let mut repr = BoardRepr::default();
    for (row, rank_pieces) in ranks.into_iter().enumerate() {
        let mut col = 0;
        for c in rank_pieces.chars() {
            if col >= 8 {
                return Err(FenError::RankOverflow(8 - row));
            }

            if let Some(digit) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                col += digit as u8;
                if col > 8 {
                    return Err(FenError::RankOverflow(8 - row));
                }
                continue;
            }

            let piece = Piece::try_from_fen_char(c).ok_or(FenError::InvalidPiece(c))?;
            let square = Square::new_unchecked(row as u8, col);
            repr.place(inferred_occupant(piece, square, castling));
            col += 1;
        }

        if col < 8 {
            return Err(FenError::RankUnderflow(8 - row));
        }
    }

    Ok(repr)
}

fn inferred_occupant(piece: Piece, square: Square, castling: Castling) -> Occupant {
    let color = piece.color();
    let wings = [CastlingWing::Kingside, CastlingWing::Queenside];

    let unmoved = match piece.piece_type() {
        PieceType::King => {
            square == CastlingWing::king_from(color)
                && wings
                    .into_iter()
                    .any(|wing| castling.contains(Castling::flag(color, wing)))
        }
        PieceType::Rook => wings.into_iter().any(|wing| {
            square == wing.rook_from(color) && castling.contains(Castling::flag(color, wing))
        }),
        _ => return Occupant::inferred(piece, square),
    };

    Occupant::new(piece, square).with_has_moved(!unmoved)
}

/// Marks the pawn that passed over `en_passant` as having just double-stepped
/// and returns the move that put it there.
fn mark_double_step(
    repr: &mut BoardRepr,
    en_passant: &str,
    to_move: Color,
) -> Result<LastMove, FenError> {
    let invalid = || FenError::InvalidEnPassant(en_passant.to_owned());

    let target: Square = en_passant.parse().map_err(|_| invalid())?;
    let mover = to_move.flip();
    let forward = mover.forward();
    let from = target.offset(-forward, 0).ok_or_else(invalid)?;
    let to = target.offset(forward, 0).ok_or_else(invalid)?;

    let piece = PieceType::Pawn.with_color(mover);
    let pawn = repr[to]
        .as_mut()
        .filter(|occupant| occupant.piece() == piece && from.row() == mover.pawn_rank())
        .ok_or_else(invalid)?;
    pawn.has_moved = true;
    pawn.just_double_stepped = true;

    Ok(LastMove { piece, from, to })
}
