use wasm_bindgen::prelude::*;

pub mod board;
pub mod capture;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod movegen;
pub mod persist;
pub mod types;
pub mod wasm;

pub use config::RuleConfig;
pub use error::{ConfigError, CorruptSave, MoveError, OutOfBounds};
pub use game::{GameState, Phase};
pub use types::{Captures, Cell, MoveOutcome, Player, Snapshot, Square};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
