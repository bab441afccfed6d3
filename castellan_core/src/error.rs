use thiserror::Error;

use crate::board::{Color, Square};

/// Error returned when a string is not a square in algebraic notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSquareError {
    #[error("Expected 2 characters, got {0}")]
    IncorrectLength(usize),
    #[error("Invalid file {0:?}")]
    InvalidFile(char),
    #[error("Invalid rank {0:?}")]
    InvalidRank(char),
}

/// Error returned when a string is not a move in coordinate notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCoordMoveError {
    #[error("Expected 4 or 5 characters, got {0}")]
    IncorrectLength(usize),
    #[error("Invalid square {0:?}")]
    InvalidSquare(String),
    #[error("Invalid promotion target {0:?}")]
    InvalidPromotion(char),
}

/// Error returned when a position described by persisted records (or by a
/// FEN string) cannot be turned into a board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("More than one piece placed on {0}")]
    DuplicateSquare(Square),
    #[error("Expected exactly one {color:?} king, found {count}")]
    KingCount { color: Color, count: usize },
    #[error("The {color} king is in check although it is not {color}'s turn")]
    IdleKingInCheck { color: Color },
}

/// Error returned by [`Board::try_parse_fen`](crate::board::Board::try_parse_fen).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("Expected 4 to 6 space-separated fields, got {0}")]
    WrongFieldCount(usize),
    #[error("Expected 8 ranks, got {0}")]
    WrongRankCount(usize),
    #[error("Invalid piece character {0:?}")]
    InvalidPiece(char),
    #[error("Rank {0} describes more than 8 squares")]
    RankOverflow(usize),
    #[error("Rank {0} describes fewer than 8 squares")]
    RankUnderflow(usize),
    #[error("Invalid side to move {0:?}")]
    InvalidSideToMove(String),
    #[error("Invalid castling character {0:?}")]
    InvalidCastling(char),
    #[error("Invalid en passant square {0:?}")]
    InvalidEnPassant(String),
    #[error(transparent)]
    Position(#[from] LoadError),
}
