//! Move legality: which opponent pieces a move would capture.
//!
//! A move is legal exactly when it captures at least one piece. The scan
//! walks the eight directions from the target; a run of opponent pieces is
//! captured only when it is closed off by one of the mover's own pieces.

use crate::board::{Board, Cell, Coord, Turn};
use crate::constants::{DIRECTIONS, N};

/// Coordinates a candidate move would flip, in scan order. Empty means illegal.
pub type PlayImpact = Vec<Coord>;

/// Compute the pieces `turn` would capture by playing at `(row, col)`.
///
/// Returns an empty impact when the target is occupied or off the board.
/// Captures are listed direction by direction (see [`DIRECTIONS`]), nearest
/// to the target first.
pub fn impact_of(board: &Board, turn: Turn, row: isize, col: isize) -> PlayImpact {
    if board.get(row, col) != Some(Cell::Empty) {
        return Vec::new();
    }

    let mine = turn.cell();
    let theirs = turn.opponent().cell();
    let mut impact = Vec::new();

    for (dr, dc) in DIRECTIONS {
        let (mut r, mut c) = (row, col);
        let mut run: Vec<Coord> = Vec::new();
        let stop = loop {
            r += dr;
            c += dc;
            let cell = board.get(r, c);
            // Off-board cells are never collected, so casting is safe here.
            if cell.is_some() {
                run.push((r as usize, c as usize));
            }
            if cell != Some(theirs) {
                break cell;
            }
        };
        // The anchor is the last collected cell; anything before it was the opponent's.
        if stop == Some(mine) && run.len() > 1 {
            run.pop();
            impact.extend(run);
        }
    }
    impact
}

/// Every cell where `turn` has a legal move, in row-major order.
pub fn where_can_play(board: &Board, turn: Turn) -> Vec<Coord> {
    Board::coords()
        .filter(|&(r, c)| !impact_of(board, turn, r as isize, c as isize).is_empty())
        .collect()
}

/// Whether `turn` has at least one legal move.
pub fn can_play(board: &Board, turn: Turn) -> bool {
    Board::coords().any(|(r, c)| !impact_of(board, turn, r as isize, c as isize).is_empty())
}

/// An 8x8 mask with `true` on each of the given cells.
pub fn playable_mask(moves: &[Coord]) -> [[bool; N]; N] {
    let mut mask = [[false; N]; N];
    for &(r, c) in moves {
        mask[r][c] = true;
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(text: &str) -> Board {
        text.parse().unwrap()
    }

    #[test]
    fn test_opening_moves_player1() {
        let moves = where_can_play(&Board::opening(), Turn::Player1);
        assert_eq!(moves, vec![(2, 3), (3, 2), (4, 5), (5, 4)]);
    }

    #[test]
    fn test_opening_moves_player2() {
        let moves = where_can_play(&Board::opening(), Turn::Player2);
        assert_eq!(moves, vec![(2, 4), (3, 5), (4, 2), (5, 3)]);
    }

    #[test]
    fn test_impact_single_capture() {
        let impact = impact_of(&Board::opening(), Turn::Player1, 2, 3);
        assert_eq!(impact, vec![(3, 3)]);
    }

    #[test]
    fn test_impact_occupied_or_off_board() {
        let b = Board::opening();
        assert!(impact_of(&b, Turn::Player1, 3, 3).is_empty());
        assert!(impact_of(&b, Turn::Player1, 3, 4).is_empty());
        assert!(impact_of(&b, Turn::Player1, -1, 0).is_empty());
        assert!(impact_of(&b, Turn::Player1, 8, 8).is_empty());
        assert!(impact_of(&b, Turn::Player1, 0, 0).is_empty());
    }

    #[test]
    fn test_impact_needs_anchor() {
        // Opponent runs that end at the edge or at an empty cell capture nothing.
        let b = board(
            "OO......\n\
             .OO.....\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             ........",
        );
        assert!(impact_of(&b, Turn::Player1, 0, 2).is_empty());
        assert!(impact_of(&b, Turn::Player1, 1, 3).is_empty());
        // Own pieces next to the target with nothing between capture nothing either.
        assert!(impact_of(&b, Turn::Player2, 0, 2).is_empty());
    }

    #[test]
    fn test_impact_long_run_nearest_first() {
        let b = board(
            ".OOOX...\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             ........\n\
             ........",
        );
        assert_eq!(impact_of(&b, Turn::Player1, 0, 0), vec![(0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn test_impact_direction_order() {
        // Captures come out south-east first, then east, then north-east.
        let b = board(
            "...X....\n\
             ..O.....\n\
             .O......\n\
             .OOOOX..\n\
             .O......\n\
             ..X.....\n\
             ........\n\
             ........",
        );
        let impact = impact_of(&b, Turn::Player1, 3, 0);
        assert_eq!(
            impact,
            vec![(4, 1), (3, 1), (3, 2), (3, 3), (3, 4), (2, 1), (1, 2)]
        );
    }

    #[test]
    fn test_impact_excludes_target_and_own_pieces() {
        let b = Board::opening();
        for turn in [Turn::Player1, Turn::Player2] {
            for (r, c) in Board::coords() {
                let impact = impact_of(&b, turn, r as isize, c as isize);
                assert!(!impact.contains(&(r, c)));
                assert!(impact.iter().all(|&p| b.at(p) == turn.opponent().cell()));
            }
        }
    }

    #[test]
    fn test_no_moves_on_empty_board() {
        assert!(where_can_play(&Board::default(), Turn::Player1).is_empty());
        assert!(!can_play(&Board::default(), Turn::Player2));
    }

    #[test]
    fn test_playable_mask() {
        let mask = playable_mask(&[(2, 3), (5, 4)]);
        let marked: Vec<Coord> = Board::coords().filter(|&(r, c)| mask[r][c]).collect();
        assert_eq!(marked, vec![(2, 3), (5, 4)]);
    }
}
