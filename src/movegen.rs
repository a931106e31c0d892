use crate::board::{Board, ray};
use crate::types::{Direction, Square};

/// Destinations reachable from `origin` by one orthogonal slide.
///
/// Turn-agnostic: whose piece sits on `origin` is the caller's concern.
/// An empty origin yields no moves.
pub fn legal_destinations(board: &Board, origin: Square) -> Vec<Square> {
    if board.is_empty_at(origin) {
        return Vec::new();
    }

    let mut out = Vec::new();
    for dir in Direction::ALL {
        out.extend(
            ray(origin, dir)
                .iter()
                .take_while(|&&sq| board.is_empty_at(sq))
                .copied(),
        );
    }
    out
}

pub fn is_legal(board: &Board, from: Square, to: Square) -> bool {
    if board.is_empty_at(from) || from == to {
        return false;
    }
    Direction::ALL.into_iter().any(|dir| {
        ray(from, dir)
            .iter()
            .take_while(|&&sq| board.is_empty_at(sq))
            .any(|&sq| sq == to)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: i32, col: i32) -> Square {
        Square::new(row, col).unwrap()
    }

    fn sorted(mut moves: Vec<Square>) -> Vec<Square> {
        moves.sort();
        moves
    }

    #[test]
    fn home_row_piece_slides_down_its_file_only() {
        let board = Board::new();

        let moves = sorted(legal_destinations(&board, sq(0, 4)));

        let expected: Vec<Square> = (1..=7).map(|row| sq(row, 4)).collect();
        assert_eq!(moves, expected);
    }

    #[test]
    fn slides_stop_before_any_piece() {
        let board = Board::from_rows([
            ".........",
            ".........",
            "....W....",
            ".........",
            ".B..B...B",
            ".........",
            ".........",
            ".........",
            ".........",
        ]);

        let moves = sorted(legal_destinations(&board, sq(4, 4)));

        assert_eq!(
            moves,
            vec![
                sq(3, 4),
                sq(4, 2),
                sq(4, 3),
                sq(4, 5),
                sq(4, 6),
                sq(4, 7),
                sq(5, 4),
                sq(6, 4),
                sq(7, 4),
                sq(8, 4),
            ]
        );
    }

    #[test]
    fn empty_origin_has_no_moves() {
        let board = Board::new();

        assert!(legal_destinations(&board, sq(4, 4)).is_empty());
    }

    #[test]
    fn boxed_in_piece_has_no_moves() {
        let board = Board::new();

        // Corner piece: neighbour on the row, edge above, open file below.
        assert_eq!(legal_destinations(&board, sq(0, 0)).len(), 7);

        let boxed = Board::from_rows([
            "BB.......",
            "W........",
            ".........",
            ".........",
            ".........",
            ".........",
            ".........",
            ".........",
            ".........",
        ]);
        assert!(legal_destinations(&boxed, sq(0, 0)).is_empty());
    }

    #[test]
    fn is_legal_agrees_with_generated_set() {
        let board = Board::new();
        let origin = sq(0, 2);

        assert!(is_legal(&board, origin, sq(7, 2)));
        assert!(!is_legal(&board, origin, sq(8, 2)));
        assert!(!is_legal(&board, origin, sq(1, 3)));
        assert!(!is_legal(&board, origin, origin));
        assert!(!is_legal(&board, sq(4, 4), sq(5, 4)));
    }
}
