//! Rule engine for two-player chess.
//!
//! The engine decides whether a proposed move is legal, executes it along with
//! any special-move side effects (castling, en passant, promotion), and derives
//! check, checkmate and stalemate for the side to move. Everything else (input
//! parsing, rendering, move selection, persistence) is expected to live in
//! clients that drive a [`game::Game`].

pub mod board;
pub mod error;
pub mod game;
pub mod move_gen;
pub mod perft;
pub mod sync;

#[cfg(test)]
mod test_utils;

pub use board::{Board, Color, Move, Piece, PieceType, Square};
pub use game::{CastleOutcome, Game, GameOptions, GameStatus, MoveOutcome};
