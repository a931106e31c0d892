use tracing::{debug, info, instrument};

use crate::board::Board;
use crate::capture;
use crate::config::RuleConfig;
use crate::error::MoveError;
use crate::movegen;
use crate::types::{Captures, GameResult, GameView, MoveOutcome, Player, Snapshot, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Over,
}

/// One game of Hasami Shogi.
///
/// Owned by whoever drives it; there is no shared or global instance.
/// `apply_move` and `start_new_game` are the only mutators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    captures: Captures,
    rules: RuleConfig,
}

impl GameState {
    pub fn new() -> Self {
        Self::with_rules(RuleConfig::default())
    }

    /// `RuleConfig` can only be built validated, so any rules given here are
    /// playable.
    pub fn with_rules(rules: RuleConfig) -> Self {
        Self {
            board: Board::new(),
            current_player: Player::Black,
            captures: Captures::default(),
            rules,
        }
    }

    /// Reassembles a state from stored fields. Callers validate first.
    pub(crate) fn from_parts(
        board: Board,
        current_player: Player,
        captures: Captures,
        rules: RuleConfig,
    ) -> Self {
        Self {
            board,
            current_player,
            captures,
            rules,
        }
    }

    pub fn start_new_game(&mut self) {
        *self = Self::with_rules(self.rules);
        info!(threshold = self.rules.capture_threshold(), "new game started");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snapshot(&self) -> Snapshot {
        self.board.to_snapshot()
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn captures(&self) -> Captures {
        self.captures
    }

    pub fn rules(&self) -> RuleConfig {
        self.rules
    }

    pub fn phase(&self) -> Phase {
        let threshold = self.rules.capture_threshold();
        if self.captures.black >= threshold || self.captures.white >= threshold {
            Phase::Over
        } else {
            Phase::InProgress
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase() == Phase::Over
    }

    /// The side that took enough of the opponent's pieces.
    pub fn winner(&self) -> Option<Player> {
        let threshold = self.rules.capture_threshold();
        if self.captures.black >= threshold {
            Some(Player::Black)
        } else if self.captures.white >= threshold {
            Some(Player::White)
        } else {
            None
        }
    }

    /// Where the piece on `origin` may go this turn.
    ///
    /// Empty when the square is empty, holds the opponent's piece, or the
    /// game has ended.
    pub fn legal_destinations(&self, origin: Square) -> Vec<Square> {
        if self.is_over() || self.board.occupant(origin).owner() != Some(self.current_player) {
            return Vec::new();
        }
        movegen::legal_destinations(&self.board, origin)
    }

    /// Raw-coordinate probe for hosts; out-of-range squares have no moves.
    pub fn legal_destinations_at(&self, row: i32, col: i32) -> Vec<Square> {
        Square::new(row, col)
            .map(|origin| self.legal_destinations(origin))
            .unwrap_or_default()
    }

    /// Validates and plays one move. On error nothing has changed.
    #[instrument(level = "debug", skip(self), fields(player = ?self.current_player))]
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        if let Err(err) = self.check_move(from, to) {
            debug!(%err, "move rejected");
            return Err(err);
        }

        let mover = self.current_player;
        self.board.remove(from);
        self.board.place(to, mover);

        let captured = capture::resolve(&mut self.board, to);
        let taken = captured.len() as u8;
        match mover {
            Player::Black => self.captures.black += taken,
            Player::White => self.captures.white += taken,
        }
        if taken > 0 {
            debug!(count = taken, "pieces captured");
        }

        self.current_player = mover.opponent();

        let ended_game = self.is_over();
        if ended_game {
            info!(
                winner = ?self.winner(),
                black = self.captures.black,
                white = self.captures.white,
                "game over"
            );
        }

        Ok(MoveOutcome {
            from,
            to,
            mover,
            captured,
            ended_game,
        })
    }

    /// Same as [`apply_move`](Self::apply_move) for raw host coordinates.
    pub fn apply_move_at(
        &mut self,
        from_row: i32,
        from_col: i32,
        to_row: i32,
        to_col: i32,
    ) -> Result<MoveOutcome, MoveError> {
        let from = Square::new(from_row, from_col)?;
        let to = Square::new(to_row, to_col)?;
        self.apply_move(from, to)
    }

    fn check_move(&self, from: Square, to: Square) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        match self.board.occupant(from).owner() {
            None => return Err(MoveError::Illegal { from, to }),
            Some(owner) if owner != self.current_player => return Err(MoveError::NotYourTurn),
            Some(_) => {}
        }
        if !movegen::is_legal(&self.board, from, to) {
            return Err(MoveError::Illegal { from, to });
        }
        Ok(())
    }

    pub fn to_view(&self, captured: &[Square]) -> GameView {
        GameView {
            board: self.board.to_array().to_vec(),
            current_player: self.current_player.code(),
            black_captured: self.captures.black,
            white_captured: self.captures.white,
            capture_threshold: self.rules.capture_threshold(),
            is_game_over: self.is_over(),
            winner: self.winner().map_or(0, Player::code),
            captured: captured.iter().map(|sq| sq.index() as u8).collect(),
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        GameResult {
            winner: self.winner().map_or(0, Player::code),
            black_captured: self.captures.black,
            white_captured: self.captures.white,
        }
    }

    #[cfg(test)]
    pub(crate) fn set_position_for_test(
        &mut self,
        board: Board,
        current_player: Player,
        captures: Captures,
    ) {
        self.board = board;
        self.current_player = current_player;
        self.captures = captures;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
