//! Turn-by-turn game state on top of a [`Board`].

use tracing::{debug, info, trace, warn};

use crate::{
    board::{
        check_idle_king, Board, CastlingWing, Color, Move, MoveFlags, Piece, PieceRecord,
        PieceType, Square,
    },
    error::LoadError,
    move_gen::{self, MoveVec},
};

/// Status of the side to move.
///
/// [`GameStatus::Check`] is informational; only [`GameStatus::Checkmate`]
/// and [`GameStatus::Stalemate`] end the game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    #[default]
    Active,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

/// Result of [`Game::attempt_move`]. Every rejection leaves the game exactly
/// as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    Accepted { captured: Option<PieceType> },
    RejectedNoPiece,
    RejectedWrongColor,
    RejectedIllegal,
    RejectedOutOfTurn,
    RejectedGameOver,
}

impl MoveOutcome {
    pub const fn is_accepted(self) -> bool {
        matches!(self, MoveOutcome::Accepted { .. })
    }
}

/// Result of [`Game::attempt_castle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleOutcome {
    Accepted,
    Rejected,
}

/// One entry of the append-only move history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveRecord {
    pub side: Color,
    pub piece: PieceType,
    pub from: Square,
    pub to: Square,
    /// The captured kind; an en passant victim is recorded as a pawn.
    pub captured: Option<PieceType>,
    pub promotion: Option<PieceType>,
    pub flags: MoveFlags,
}

impl From<Move> for MoveRecord {
    fn from(the_move: Move) -> Self {
        Self {
            side: the_move.piece().color(),
            piece: the_move.piece().piece_type(),
            from: the_move.from_square(),
            to: the_move.to_square(),
            captured: the_move.captured_piece().map(Piece::piece_type),
            promotion: the_move.promotion().map(Piece::piece_type),
            flags: the_move.flags(),
        }
    }
}

/// Per-game settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GameOptions {
    /// What a pawn becomes when it reaches the last row and the caller makes
    /// no choice.
    pub default_promotion: PieceType,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            default_promotion: PieceType::Queen,
        }
    }
}

impl GameOptions {
    fn validated(self) -> Self {
        if self.default_promotion.is_promotion_target() {
            return self;
        }
        warn!(
            default_promotion = ?self.default_promotion,
            "invalid default promotion, using queen"
        );
        Self {
            default_promotion: PieceType::Queen,
        }
    }
}

/// Everything needed to resume a game later. En passant state is not kept.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub pieces: Vec<PieceRecord>,
    pub to_move: Color,
    pub history: Vec<MoveRecord>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub options: GameOptions,
}

/// A game of chess: the board plus whose turn it is, the status of that side
/// and the moves played so far.
///
/// Moves are proposed through [`Game::attempt_move`] and
/// [`Game::attempt_castle`]; a rejected proposal never changes anything. Once
/// the status is terminal every further proposal is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    to_move: Color,
    status: GameStatus,
    history: Vec<MoveRecord>,
    options: GameOptions,
}

impl Game {
    /// A game from the starting position with White to move.
    pub fn new() -> Self {
        Self::with_options(Board::starting_position(), Color::White, GameOptions::default())
    }

    /// A game from an arbitrary position. The status of `to_move` is computed
    /// immediately, so the game may already be over.
    ///
    /// # Panics
    ///
    /// Panics if either side has no king; boards from
    /// [`Board::try_parse_fen`] and [`Board::from_records`] always have one.
    pub fn with_options(mut board: Board, to_move: Color, options: GameOptions) -> Self {
        let status = board.status(to_move);
        Self {
            board,
            to_move,
            status,
            history: Vec::new(),
            options: options.validated(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side whose turn it is. The turn passes after every accepted move,
    /// including the one that ends the game.
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    /// Status of the side to move, as of the last accepted move.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn options(&self) -> GameOptions {
        self.options
    }

    /// The side that delivered checkmate, if the game ended that way.
    pub fn winner(&self) -> Option<Color> {
        (self.status == GameStatus::Checkmate).then(|| self.to_move.flip())
    }

    /// All legal moves for the side to move.
    pub fn legal_moves(&mut self) -> MoveVec {
        self.board.legal_moves(self.to_move)
    }

    /// Proposes moving the piece on `from` to `to` for `side`. A pawn reaching
    /// the last row becomes the configured default promotion.
    ///
    /// Castling may also be proposed this way, as the two-square king step.
    pub fn attempt_move(&mut self, side: Color, from: Square, to: Square) -> MoveOutcome {
        self.attempt_move_with_promotion(side, from, to, None)
    }

    /// Like [`Self::attempt_move`], with an explicit choice of what a
    /// promoting pawn becomes. Choosing a pawn or king is illegal.
    pub fn attempt_move_with_promotion(
        &mut self,
        side: Color,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> MoveOutcome {
        let outcome = self.try_move(side, from, to, promotion);
        match outcome {
            MoveOutcome::Accepted { .. } => {}
            rejected => debug!(%side, %from, %to, ?promotion, ?rejected, "rejected move"),
        }
        outcome
    }

    fn try_move(
        &mut self,
        side: Color,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> MoveOutcome {
        if self.status.is_terminal() {
            return MoveOutcome::RejectedGameOver;
        }
        if side != self.to_move {
            return MoveOutcome::RejectedOutOfTurn;
        }

        let Some(piece) = self.board.piece_at(from) else {
            return MoveOutcome::RejectedNoPiece;
        };
        if piece.color() != side {
            return MoveOutcome::RejectedWrongColor;
        }
        if promotion.is_some_and(|p| !p.is_promotion_target()) {
            return MoveOutcome::RejectedIllegal;
        }

        let Some(the_move) = self.board.pseudo_legal_move(from, to) else {
            return MoveOutcome::RejectedIllegal;
        };
        if !move_gen::is_legal(&mut self.board, the_move) {
            return MoveOutcome::RejectedIllegal;
        }

        let promotion = promotion.unwrap_or(self.options.default_promotion);
        match self.commit(from, to, promotion) {
            Some(executed) => MoveOutcome::Accepted {
                captured: executed.captured_piece().map(Piece::piece_type),
            },
            None => MoveOutcome::RejectedIllegal,
        }
    }

    /// Proposes castling on `wing` for `side`.
    pub fn attempt_castle(&mut self, side: Color, wing: CastlingWing) -> CastleOutcome {
        let allowed = !self.status.is_terminal()
            && side == self.to_move
            && self.board.can_castle(side, wing);
        if !allowed {
            debug!(%side, ?wing, "rejected castle");
            return CastleOutcome::Rejected;
        }

        let from = CastlingWing::king_from(side);
        let to = wing.king_to(side);
        match self.commit(from, to, self.options.default_promotion) {
            Some(_) => CastleOutcome::Accepted,
            None => CastleOutcome::Rejected,
        }
    }

    /// Executes an already validated move, records it and hands the turn over.
    fn commit(&mut self, from: Square, to: Square, promotion: PieceType) -> Option<Move> {
        let executed = self.board.execute_move(from, to, Some(promotion))?;
        self.history.push(MoveRecord::from(executed));

        self.to_move = self.to_move.flip();
        self.status = self.board.status(self.to_move);

        trace!(?executed, status = ?self.status, "accepted move");
        if self.status.is_terminal() {
            info!(status = ?self.status, winner = ?self.winner(), "game over");
        }

        Some(executed)
    }

    /// Captures the game for persistence.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            pieces: self.board.records(),
            to_move: self.to_move,
            history: self.history.clone(),
            options: self.options,
        }
    }

    /// Resumes a game from a snapshot. A snapshot that does not describe a
    /// valid position is rejected as a whole, including one where the side
    /// that just moved has left its king in check.
    pub fn restore(snapshot: &GameSnapshot) -> Result<Game, LoadError> {
        let board = Board::from_records(&snapshot.pieces)
            .and_then(|board| check_idle_king(&board, snapshot.to_move).map(|()| board))
            .map_err(|err| {
                warn!(%err, "rejected game snapshot");
                err
            })?;

        let mut game = Game::with_options(board, snapshot.to_move, snapshot.options);
        game.history = snapshot.history.clone();
        Ok(game)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
