//! Reversi-Engine: rules engine for 8x8 Reversi with state broadcasting.
//!
//! The engine owns one live game state. Every transition (a move, a forced
//! pass, a restart) produces a new state value that is pushed to subscribers,
//! along with a derived view (legal moves, playable mask) and the history of
//! views that came before it.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, scan directions, opening layout
//! - [`board`] - Cells, turns and the 8x8 board value
//! - [`rules`] - Capture computation and legal-move listing
//! - [`state`] - Game state snapshots and derived views
//! - [`broadcast`] - Replay-latest subjects and history derivation
//! - [`engine`] - Turn state machine (play, forced pass, restart)
//! - [`shell`] - Text command protocol for driving an engine
//! - [`error`] - Errors for malformed board input
//!
//! ## Example
//!
//! ```
//! use reversi_engine::board::{Cell, Turn};
//! use reversi_engine::engine::Engine;
//!
//! let mut engine = Engine::new();
//! let _sub = engine.subscribe_states(|s| println!("{} to move", s.turn));
//!
//! assert!(engine.play(2, 3));
//! assert_eq!(engine.state().turn, Turn::Player2);
//! assert_eq!(engine.state().board.at((3, 3)), Cell::Player1);
//! assert_eq!(engine.history().len(), 1);
//! ```

pub mod board;
pub mod broadcast;
pub mod constants;
pub mod engine;
pub mod error;
pub mod rules;
pub mod shell;
pub mod state;
