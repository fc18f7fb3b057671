//! Turn state machine: applies moves, handles forced passes, restarts games.
//!
//! The [`Engine`] owns the single live [`GameState`] and publishes every
//! transition through its [`Broadcaster`]. Transitions are synchronous: when
//! `play` returns, every state it produced (including a forced pass) has
//! already been delivered to subscribers.

use tracing::{debug, instrument, trace};

use crate::board::{Board, Cell, Coord, Turn};
use crate::broadcast::{Broadcaster, Subscription};
use crate::rules::{PlayImpact, can_play, impact_of, where_can_play};
use crate::state::{GameState, GameView};

/// Runtime settings for an [`Engine`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum number of past views kept in the history (`None` = unbounded).
    pub history_limit: Option<usize>,
}

impl EngineConfig {
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }
}

/// Optional overrides for [`Engine::restart`]. Missing fields take their
/// value from the canonical opening.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartialState {
    pub board: Option<Board>,
    pub turn: Option<Turn>,
}

impl PartialState {
    pub fn with_board(mut self, board: Board) -> Self {
        self.board = Some(board);
        self
    }

    pub fn with_turn(mut self, turn: Turn) -> Self {
        self.turn = Some(turn);
        self
    }
}

/// Reversi rules engine owning the live game state.
pub struct Engine {
    broadcaster: Broadcaster,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an engine positioned at the canonical opening.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let initial = GameState::initial();
        debug!(?config, "engine created");
        Self {
            broadcaster: Broadcaster::new(initial, config.history_limit),
        }
    }

    /// The live state.
    pub fn state(&self) -> &GameState {
        self.broadcaster.state()
    }

    /// The live view (state plus legal-move annotations).
    pub fn view(&self) -> &GameView {
        self.broadcaster.view()
    }

    /// Past views, most recent first.
    pub fn history(&self) -> &[GameView] {
        self.broadcaster.history()
    }

    /// Start a new game from the opening, optionally overriding board and/or turn.
    ///
    /// The resulting state is always published, even if nothing changed.
    #[instrument(level = "debug", skip(self))]
    pub fn restart(&mut self, partial: PartialState) {
        let initial = GameState::initial();
        // Board is a value type: storing it copies the caller's grid.
        let state = GameState {
            board: partial.board.unwrap_or(initial.board),
            turn: partial.turn.unwrap_or(initial.turn),
        };
        debug!(turn = %state.turn, "restart");
        self.broadcaster.publish(state);
    }

    /// Try to place a piece for the player to move at `(i, j)`.
    ///
    /// Illegal or off-board targets are ignored and nothing is published.
    /// Otherwise the new state is published, followed by a forced pass when the
    /// next player has no legal move. Returns whether a move was made.
    #[instrument(level = "debug", skip(self))]
    pub fn play(&mut self, i: isize, j: isize) -> bool {
        let current = *self.state();
        let next = self.try_play(i, j);
        if next.board == current.board && next.turn == current.turn {
            trace!("illegal move ignored");
            return false;
        }

        self.broadcaster.publish(next);
        if !can_play(&next.board, next.turn) {
            debug!(passes = %next.turn, "forced pass");
            self.broadcaster.publish(GameState {
                board: next.board,
                turn: next.turn.opponent(),
            });
        }
        true
    }

    /// The state a move at `(i, j)` would produce, without publishing it.
    ///
    /// Returns the current state unchanged when the move is illegal.
    fn try_play(&self, i: isize, j: isize) -> GameState {
        let current = *self.state();
        let impact = impact_of(&current.board, current.turn, i, j);
        if impact.is_empty() {
            return current;
        }

        let mut board = current.board;
        let mover = current.turn.cell();
        // impact_of only accepts on-board empty targets, so (i, j) is in range here.
        let target = (i as usize, j as usize);
        for &p in impact.iter().chain(std::iter::once(&target)) {
            board.set(p, mover);
        }
        debug!(turn = %current.turn, row = i, col = j, flipped = impact.len(), "move played");
        GameState {
            board,
            turn: current.turn.opponent(),
        }
    }

    /// Pieces the player to move would capture at `(i, j)`.
    pub fn impact_of(&self, i: isize, j: isize) -> PlayImpact {
        let state = self.state();
        impact_of(&state.board, state.turn, i, j)
    }

    /// Legal moves for the player to move, row-major.
    pub fn where_can_play(&self) -> Vec<Coord> {
        let state = self.state();
        where_can_play(&state.board, state.turn)
    }

    /// Piece counts as `(player1, player2)`.
    pub fn score(&self) -> (usize, usize) {
        let board = &self.state().board;
        (board.count(Cell::Player1), board.count(Cell::Player2))
    }

    /// True when neither player has a legal move.
    ///
    /// This is only a query: the engine does not publish anything special
    /// when the game is over, further `play` calls are simply ignored.
    pub fn is_game_over(&self) -> bool {
        let state = self.state();
        !can_play(&state.board, state.turn) && !can_play(&state.board, state.turn.opponent())
    }

    /// Diagnostic dump of the live state.
    pub fn summary(&self) -> String {
        self.state().summary()
    }

    pub fn subscribe_states(&self, listener: impl FnMut(&GameState) + 'static) -> Subscription {
        self.broadcaster.subscribe_states(listener)
    }

    pub fn subscribe_views(&self, listener: impl FnMut(&GameView) + 'static) -> Subscription {
        self.broadcaster.subscribe_views(listener)
    }

    pub fn subscribe_history(
        &self,
        listener: impl FnMut(&Vec<GameView>) + 'static,
    ) -> Subscription {
        self.broadcaster.subscribe_history(listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_engine_is_at_opening() {
        let engine = Engine::new();
        assert_eq!(*engine.state(), GameState::initial());
        assert!(engine.history().is_empty());
        assert_eq!(engine.score(), (2, 2));
    }

    #[test]
    fn test_play_illegal_is_noop() {
        let mut engine = Engine::new();
        assert!(!engine.play(0, 0));
        assert!(!engine.play(3, 3));
        assert!(!engine.play(-1, 4));
        assert!(!engine.play(100, 100));
        assert_eq!(*engine.state(), GameState::initial());
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_play_captures() {
        let mut engine = Engine::new();
        assert!(engine.play(2, 3));
        let state = engine.state();
        assert_eq!(state.turn, Turn::Player2);
        assert_eq!(state.board.at((2, 3)), Cell::Player1);
        assert_eq!(state.board.at((3, 3)), Cell::Player1);
        assert_eq!(engine.score(), (4, 1));
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_try_play_does_not_publish() {
        let engine = Engine::new();
        let next = engine.try_play(2, 3);
        assert_eq!(next.turn, Turn::Player2);
        assert_eq!(*engine.state(), GameState::initial());
    }

    #[test]
    fn test_restart_partial() {
        let mut engine = Engine::new();
        engine.play(2, 3);

        engine.restart(PartialState::default().with_turn(Turn::Player2));
        assert_eq!(engine.state().board, Board::opening());
        assert_eq!(engine.state().turn, Turn::Player2);

        let mut board = Board::opening();
        board.set((0, 0), Cell::Player2);
        engine.restart(PartialState::default().with_board(board));
        assert_eq!(engine.state().turn, Turn::Player1);
        assert_eq!(engine.state().board.at((0, 0)), Cell::Player2);

        // The engine holds its own copy.
        board.set((0, 0), Cell::Empty);
        assert_eq!(engine.state().board.at((0, 0)), Cell::Player2);
    }

    #[test]
    fn test_game_over_query() {
        let mut engine = Engine::new();
        assert!(!engine.is_game_over());
        engine.restart(PartialState::default().with_board(Board::default()));
        assert!(engine.is_game_over());
    }
}
