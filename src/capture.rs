use crate::board::{Board, ray};
use crate::types::{Direction, Player, Square};

/// Removes every opposing piece sandwiched by the piece that just landed on
/// `landed` and returns the removed squares.
///
/// Only the mover's neighbourhood is examined, so a move can never capture
/// one of the mover's own pieces.
pub fn resolve(board: &mut Board, landed: Square) -> Vec<Square> {
    let Some(mover) = board.occupant(landed).owner() else {
        return Vec::new();
    };

    let mut captured = Vec::new();
    for dir in Direction::ALL {
        captured.extend(captured_run(board, landed, dir, mover));
        captured.extend(captured_corner(board, landed, dir, mover));
    }

    for &sq in &captured {
        board.remove(sq);
    }
    captured
}

/// A maximal run of enemies starting next to `landed`, closed off by a
/// friendly piece.
fn captured_run(board: &Board, landed: Square, dir: Direction, mover: Player) -> Vec<Square> {
    let enemy = mover.opponent();
    let line = ray(landed, dir);
    let run = line
        .iter()
        .take_while(|&&sq| board.occupant(sq).owner() == Some(enemy))
        .count();

    match line.get(run) {
        Some(&flank) if run > 0 && board.occupant(flank).owner() == Some(mover) => {
            line[..run].to_vec()
        }
        _ => Vec::new(),
    }
}

/// An enemy on a corner next to `landed` whose other neighbour is friendly.
fn captured_corner(board: &Board, landed: Square, dir: Direction, mover: Player) -> Option<Square> {
    let target = landed.step(dir)?;
    if !target.is_corner() || board.occupant(target).owner() != Some(mover.opponent()) {
        return None;
    }

    let closes = Direction::ALL
        .into_iter()
        .filter_map(|d| target.step(d))
        .filter(|&neighbour| neighbour != landed)
        .any(|neighbour| board.occupant(neighbour).owner() == Some(mover));

    closes.then_some(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn sq(row: i32, col: i32) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn single_piece_between_two_friends_is_removed() {
        let mut board = Board::from_rows([
            ".........",
            ".........",
            ".........",
            ".........",
            "...BWB...",
            ".........",
            ".........",
            ".........",
            ".........",
        ]);

        let captured = resolve(&mut board, sq(4, 5));

        assert_eq!(captured, vec![sq(4, 4)]);
        assert_eq!(board.occupant(sq(4, 4)), Cell::Empty);
        assert_eq!(board.count(), (2, 0));
    }

    #[test]
    fn whole_run_is_removed_together() {
        let mut board = Board::from_rows([
            ".........",
            ".........",
            "..B......",
            "..W......",
            "..W......",
            "..W......",
            "..B......",
            ".........",
            ".........",
        ]);

        let mut captured = resolve(&mut board, sq(6, 2));
        captured.sort();

        assert_eq!(captured, vec![sq(3, 2), sq(4, 2), sq(5, 2)]);
        assert_eq!(board.count(), (2, 0));
    }

    #[test]
    fn run_with_gap_or_open_end_survives() {
        let mut board = Board::from_rows([
            ".........",
            ".........",
            ".........",
            ".........",
            "BW.WB....",
            ".........",
            ".........",
            ".........",
            "WWB......",
        ]);
        let before = board;

        assert!(resolve(&mut board, sq(4, 4)).is_empty());
        assert!(resolve(&mut board, sq(4, 0)).is_empty());
        // The row 8 run ends at the edge, which never flanks a run.
        assert!(resolve(&mut board, sq(8, 2)).is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn several_directions_capture_at_once() {
        let mut board = Board::from_rows([
            ".........",
            ".........",
            "....B....",
            "....W....",
            "..BW.WB..",
            ".........",
            ".........",
            ".........",
            ".........",
        ]);
        board.place(sq(4, 4), Player::Black);

        let mut captured = resolve(&mut board, sq(4, 4));
        captured.sort();

        assert_eq!(captured, vec![sq(3, 4), sq(4, 3), sq(4, 5)]);
    }

    #[test]
    fn corner_piece_flanked_on_both_edges_is_captured() {
        let mut board = Board::from_rows([
            ".........",
            ".........",
            ".........",
            ".........",
            ".........",
            ".........",
            ".........",
            "........B",
            ".......BW",
        ]);

        let captured = resolve(&mut board, sq(8, 7));

        assert_eq!(captured, vec![sq(8, 8)]);
        assert_eq!(board.count(), (2, 0));
    }

    #[test]
    fn corner_piece_with_one_flank_survives() {
        let mut board = Board::from_rows([
            "WB.......",
            ".........",
            ".........",
            ".........",
            ".........",
            ".........",
            ".........",
            ".........",
            ".........",
        ]);

        assert!(resolve(&mut board, sq(0, 1)).is_empty());
        assert_eq!(board.occupant(sq(0, 0)), Cell::White);
    }

    #[test]
    fn pre_existing_sandwich_of_the_mover_is_not_self_capture() {
        // Black lands between two whites; only black's turn is evaluated.
        let mut board = Board::from_rows([
            ".........",
            ".........",
            ".........",
            ".........",
            "...WBW...",
            ".........",
            ".........",
            ".........",
            ".........",
        ]);

        assert!(resolve(&mut board, sq(4, 4)).is_empty());
        assert_eq!(board.count(), (1, 2));
    }
}
