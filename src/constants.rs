//! Constants for board geometry, scan directions and the opening layout.
//!
//! The board is a fixed 8x8 grid addressed by `(row, col)`. Scans use signed
//! coordinates so that a walk can step off the edge; anything outside
//! `0..N` is simply "absent".

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 8;

/// Number of cells on the board.
pub const CELLS: usize = N * N;

// =============================================================================
// Scan Directions
// =============================================================================

/// Unit steps `(drow, dcol)` walked by the capture scan.
///
/// The order matters: captures are reported direction by direction in this
/// order. Order: S, SW, SE, E, W, N, NW, NE
pub const DIRECTIONS: [(isize, isize); 8] = [
    (1, 0),
    (1, -1),
    (1, 1),
    (0, 1),
    (0, -1),
    (-1, 0),
    (-1, -1),
    (-1, 1),
];

// =============================================================================
// Opening Position
// =============================================================================

/// Center cells owned by `Player1` at the start of a game.
pub const OPENING_PLAYER1: [(usize, usize); 2] = [(3, 4), (4, 3)];

/// Center cells owned by `Player2` at the start of a game.
pub const OPENING_PLAYER2: [(usize, usize); 2] = [(3, 3), (4, 4)];

// =============================================================================
// Text Representation
// =============================================================================

/// Character used for `Player1` pieces.
pub const CHAR_PLAYER1: char = 'X';

/// Character used for `Player2` pieces.
pub const CHAR_PLAYER2: char = 'O';

/// Character written for an empty cell.
pub const CHAR_EMPTY: char = ' ';

/// Characters accepted as an empty cell when parsing.
pub const EMPTY_ALIASES: [char; 3] = [' ', '.', '_'];
