//! Value-typed call surface for host shells.
//!
//! Each function takes the game by reference and hands back new values, so a
//! host can keep as many independent games as it likes.

use crate::error::{CorruptSave, MoveError};
use crate::game::GameState;
use crate::persist;
use crate::types::{Captures, Player, Snapshot, Square};

pub fn new_game() -> GameState {
    GameState::new()
}

pub fn valid_moves(state: &GameState, origin: Square) -> Vec<Square> {
    state.legal_destinations(origin)
}

/// Returns the successor state; `state` itself is never modified.
pub fn apply_move(state: &GameState, from: Square, to: Square) -> Result<GameState, MoveError> {
    let mut next = state.clone();
    next.apply_move(from, to)?;
    Ok(next)
}

pub fn board_snapshot(state: &GameState) -> Snapshot {
    state.snapshot()
}

pub fn captures(state: &GameState) -> Captures {
    state.captures()
}

pub fn current_player(state: &GameState) -> Player {
    state.current_player()
}

pub fn is_over(state: &GameState) -> bool {
    state.is_over()
}

pub fn winner(state: &GameState) -> Option<Player> {
    state.winner()
}

pub fn save(state: &GameState) -> Vec<u8> {
    persist::encode(state)
}

pub fn load(bytes: &[u8]) -> Result<GameState, CorruptSave> {
    persist::decode(bytes)
}
