use std::fmt;

use once_cell::sync::Lazy;

use crate::types::{BOARD_SIZE, Cell, Direction, NUM_SQUARES, Player, Snapshot, Square};

/// Squares walked outward from each square, per direction, nearest first.
static RAYS: Lazy<Vec<[Vec<Square>; 4]>> = Lazy::new(|| {
    (0..NUM_SQUARES)
        .map(|index| {
            let origin = Square::from_index(index);
            Direction::ALL.map(|dir| {
                let mut ray = Vec::with_capacity(BOARD_SIZE - 1);
                let mut cursor = origin.step(dir);
                while let Some(sq) = cursor {
                    ray.push(sq);
                    cursor = sq.step(dir);
                }
                ray
            })
        })
        .collect()
});

/// Squares from `origin` (exclusive) to the edge in `dir`.
pub(crate) fn ray(origin: Square, dir: Direction) -> &'static [Square] {
    &RAYS[origin.index()][dir.ordinal()]
}

/// Hasami Shogi board state represented by two 81-bit bitboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    black: u128,
    white: u128,
}

impl Board {
    /// Creates the initial board:
    /// row 0 all black, row 8 all white.
    pub fn new() -> Self {
        let row_mask = (1u128 << BOARD_SIZE) - 1;
        Self {
            black: row_mask,
            white: row_mask << (NUM_SQUARES - BOARD_SIZE),
        }
    }

    pub fn empty() -> Self {
        Self { black: 0, white: 0 }
    }

    pub fn occupant(&self, sq: Square) -> Cell {
        let square = bit(sq);
        if (self.black & square) != 0 {
            Cell::Black
        } else if (self.white & square) != 0 {
            Cell::White
        } else {
            Cell::Empty
        }
    }

    pub fn is_empty_at(&self, sq: Square) -> bool {
        ((self.black | self.white) & bit(sq)) == 0
    }

    /// Puts a piece on `sq`, replacing whatever was there.
    pub(crate) fn place(&mut self, sq: Square, piece: Player) {
        self.remove(sq);
        match piece {
            Player::Black => self.black |= bit(sq),
            Player::White => self.white |= bit(sq),
        }
    }

    pub(crate) fn remove(&mut self, sq: Square) {
        let clear = !bit(sq);
        self.black &= clear;
        self.white &= clear;
    }

    /// Returns `(black_count, white_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.black.count_ones() as u8, self.white.count_ones() as u8)
    }

    pub fn to_snapshot(&self) -> Snapshot {
        let mut grid = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for index in 0..NUM_SQUARES {
            let sq = Square::from_index(index);
            grid[sq.row()][sq.col()] = self.occupant(sq);
        }
        grid
    }

    pub(crate) fn from_snapshot(grid: &Snapshot) -> Self {
        let mut board = Self::empty();
        for index in 0..NUM_SQUARES {
            let sq = Square::from_index(index);
            if let Some(piece) = grid[sq.row()][sq.col()].owner() {
                board.place(sq, piece);
            }
        }
        board
    }

    /// Converts board to `[u8; 81]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut cells = [0u8; NUM_SQUARES];
        for (index, cell) in cells.iter_mut().enumerate() {
            *cell = self.occupant(Square::from_index(index)).code();
        }
        cells
    }

    #[cfg(test)]
    pub(crate) fn from_rows(rows: [&str; BOARD_SIZE]) -> Self {
        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let sq = Square::new(row as i32, col as i32).unwrap();
                match ch {
                    'B' => board.place(sq, Player::Black),
                    'W' => board.place(sq, Player::White),
                    _ => {}
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.to_snapshot() {
            for cell in row {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::Black => 'B',
                    Cell::White => 'W',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn bit(sq: Square) -> u128 {
    1u128 << sq.index()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: i32, col: i32) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn initial_board_fills_home_rows() {
        let board = Board::new();

        for col in 0..BOARD_SIZE as i32 {
            assert_eq!(board.occupant(sq(0, col)), Cell::Black);
            assert_eq!(board.occupant(sq(8, col)), Cell::White);
            for row in 1..8 {
                assert_eq!(board.occupant(sq(row, col)), Cell::Empty);
            }
        }
        assert_eq!(board.count(), (9, 9));
    }

    #[test]
    fn place_replaces_and_remove_clears() {
        let mut board = Board::new();

        board.place(sq(0, 0), Player::White);
        assert_eq!(board.occupant(sq(0, 0)), Cell::White);
        assert_eq!(board.count(), (8, 10));

        board.remove(sq(0, 0));
        assert!(board.is_empty_at(sq(0, 0)));
        assert_eq!(board.count(), (8, 9));
    }

    #[test]
    fn snapshot_is_indexed_row_then_column() {
        let board = Board::from_rows([
            ".........",
            ".........",
            "...B.....",
            ".........",
            ".........",
            ".........",
            ".........",
            ".........",
            "W........",
        ]);
        let grid = board.to_snapshot();

        assert_eq!(grid[2][3], Cell::Black);
        assert_eq!(grid[8][0], Cell::White);
        assert_eq!(Board::from_snapshot(&grid), board);
        assert_eq!(board.to_array()[2 * 9 + 3], 1);
    }

    #[test]
    fn rays_run_to_the_edge_nearest_first() {
        let east = ray(sq(4, 6), Direction::East);
        assert_eq!(east, &[sq(4, 7), sq(4, 8)]);

        assert!(ray(sq(0, 0), Direction::North).is_empty());
        assert_eq!(ray(sq(0, 0), Direction::South).len(), 8);
    }

    #[test]
    fn display_draws_one_line_per_row() {
        let text = Board::new().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "BBBBBBBBB");
        assert_eq!(lines[4], ".........");
        assert_eq!(lines[8], "WWWWWWWWW");
    }
}
