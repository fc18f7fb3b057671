//! Game state snapshots and the UI-facing view derived from them.

use crate::board::{Board, Coord, Turn, serialize};
use crate::constants::{CHAR_PLAYER1, CHAR_PLAYER2, N};
use crate::rules::{playable_mask, where_can_play};

/// A complete game state: the board and whose move is next.
///
/// States are values. The engine replaces its state on every transition and
/// never edits a published one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GameState {
    pub board: Board,
    pub turn: Turn,
}

impl GameState {
    /// The canonical opening with `Player1` to move.
    pub fn initial() -> Self {
        Self {
            board: Board::opening(),
            turn: Turn::Player1,
        }
    }

    /// Legal moves for the player to move.
    pub fn legal_moves(&self) -> Vec<Coord> {
        where_can_play(&self.board, self.turn)
    }

    /// Human-readable dump of the board, the turn and the legal moves.
    ///
    /// For logs only; the layout is not stable and nothing parses it.
    pub fn summary(&self) -> String {
        let moves = self.legal_moves();
        let listing = moves
            .iter()
            .map(|(r, c)| format!("  * play({r},{c})"))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "________\n{}\n________\nTurn: {}\n{CHAR_PLAYER1} is {}\n{CHAR_PLAYER2} is {}\n________\nLegal moves ({}):\n{listing}",
            serialize(&self.board),
            self.turn,
            Turn::Player1,
            Turn::Player2,
            moves.len(),
        )
    }
}

/// What a board view needs to render one state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameView {
    pub state: GameState,
    /// Text serialization of the board.
    pub text: String,
    /// Legal moves for `state.turn`, row-major.
    pub legal_moves: Vec<Coord>,
    /// `true` on every cell listed in `legal_moves`.
    pub playable: [[bool; N]; N],
}

impl GameView {
    pub fn derive(state: &GameState) -> Self {
        let legal_moves = state.legal_moves();
        let playable = playable_mask(&legal_moves);
        Self {
            state: *state,
            text: serialize(&state.board),
            legal_moves,
            playable,
        }
    }

    /// Whether the cell at `(row, col)` is a legal move in this view.
    pub fn is_playable(&self, (row, col): Coord) -> bool {
        self.playable[row][col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = GameState::initial();
        assert_eq!(state.turn, Turn::Player1);
        assert_eq!(state.board, Board::opening());
    }

    #[test]
    fn test_view_of_initial_state() {
        let view = GameView::derive(&GameState::initial());
        assert_eq!(view.legal_moves, vec![(2, 3), (3, 2), (4, 5), (5, 4)]);
        assert!(view.is_playable((2, 3)));
        assert!(!view.is_playable((0, 0)));
        assert_eq!(view.playable.iter().flatten().filter(|&&p| p).count(), 4);
        assert_eq!(view.text, serialize(&Board::opening()));
    }

    #[test]
    fn test_summary_lists_moves() {
        let summary = GameState::initial().summary();
        assert!(summary.contains("Turn: Player1"));
        assert!(summary.contains("Legal moves (4):"));
        assert!(summary.contains("  * play(2,3)"));
        assert!(summary.contains("X is Player1"));
    }
}
