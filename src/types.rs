use std::fmt;

use serde::Serialize;

use crate::error::OutOfBounds;

pub const BOARD_SIZE: usize = 9;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// A board coordinate. Always inside the 9x9 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Row 0 is Black's home row, row 8 is White's.
    pub fn new(row: i32, col: i32) -> Result<Self, OutOfBounds> {
        if !in_bounds(row, col) {
            return Err(OutOfBounds { row, col });
        }
        Ok(Self {
            row: row as u8,
            col: col as u8,
        })
    }

    pub fn row(self) -> usize {
        self.row as usize
    }

    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Row-major index in `0..81`.
    pub fn index(self) -> usize {
        self.row() * BOARD_SIZE + self.col()
    }

    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < NUM_SQUARES);
        Self {
            row: (index / BOARD_SIZE) as u8,
            col: (index % BOARD_SIZE) as u8,
        }
    }

    pub fn is_corner(self) -> bool {
        let last = (BOARD_SIZE - 1) as u8;
        (self.row == 0 || self.row == last) && (self.col == 0 || self.col == last)
    }

    /// The neighbouring square in `dir`, or `None` past the edge.
    pub fn step(self, dir: Direction) -> Option<Self> {
        let (dr, dc) = dir.delta();
        Self::new(self.row as i32 + dr, self.col as i32 + dc).ok()
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Orthogonal directions. Pieces never move or capture diagonally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
        }
    }

    pub(crate) fn ordinal(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::South => 1,
            Direction::West => 2,
            Direction::East => 3,
        }
    }
}

/// A side, and the colour of its pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Wire code: 1 = black, 2 = white.
    pub fn code(self) -> u8 {
        match self {
            Player::Black => 1,
            Player::White => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Player::Black),
            2 => Some(Player::White),
            _ => None,
        }
    }
}

/// Occupancy of a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

impl Cell {
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Black => Some(Player::Black),
            Cell::White => Some(Player::White),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// Wire code: 0 = empty, 1 = black, 2 = white.
    pub fn code(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Black => 1,
            Cell::White => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Black),
            2 => Some(Cell::White),
            _ => None,
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Cell::Black,
            Player::White => Cell::White,
        }
    }
}

/// `snapshot[row][col]`, row 0 = Black's home row.
pub type Snapshot = [[Cell; BOARD_SIZE]; BOARD_SIZE];

/// Pieces each side has taken from the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Captures {
    /// White pieces removed by Black.
    pub black: u8,
    /// Black pieces removed by White.
    pub white: u8,
}

/// Result of a successfully applied move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub from: Square,
    pub to: Square,
    pub mover: Player,
    pub captured: Vec<Square>,
    /// `true` when this move pushed a counter to the threshold.
    pub ended_game: bool,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameView {
    /// 81 cell codes, row-major.
    pub board: Vec<u8>,
    pub current_player: u8,
    pub black_captured: u8,
    pub white_captured: u8,
    pub capture_threshold: u8,
    pub is_game_over: bool,
    /// 0 while the game is running.
    pub winner: u8,
    /// Contract:
    /// - After a move: indices (0..=80) removed by that move, possibly empty.
    /// - After new game or load: empty.
    pub captured: Vec<u8>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: u8,
    pub black_captured: u8,
    pub white_captured: u8,
}

pub(crate) fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}
