//! A game shared between threads.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    board::{CastlingWing, Color, Square},
    game::{CastleOutcome, Game, GameStatus, MoveOutcome},
    move_gen::MoveVec,
};

/// A [`Game`] behind a single lock, for hosts that serve one game to several
/// threads.
///
/// Every call holds the lock for its whole duration, so no caller can see the
/// board while a legality probe has a piece lifted.
#[derive(Debug, Clone, Default)]
pub struct SharedGame(Arc<Mutex<Game>>);

impl SharedGame {
    pub fn new(game: Game) -> Self {
        Self(Arc::new(Mutex::new(game)))
    }

    pub fn attempt_move(&self, side: Color, from: Square, to: Square) -> MoveOutcome {
        self.0.lock().attempt_move(side, from, to)
    }

    pub fn attempt_castle(&self, side: Color, wing: CastlingWing) -> CastleOutcome {
        self.0.lock().attempt_castle(side, wing)
    }

    pub fn status(&self) -> GameStatus {
        self.0.lock().status()
    }

    pub fn legal_moves(&self) -> MoveVec {
        self.0.lock().legal_moves()
    }

    /// Runs `f` with exclusive access to the game.
    pub fn with_game<R>(&self, f: impl FnOnce(&mut Game) -> R) -> R {
        f(&mut self.0.lock())
    }
}

impl From<Game> for SharedGame {
    fn from(game: Game) -> Self {
        Self::new(game)
    }
}
