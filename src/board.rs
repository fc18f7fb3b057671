//! Board model: cell values, turns, coordinates and the 8x8 grid.
//!
//! A [`Board`] is a plain value. Copying it yields an independent grid, so a
//! published snapshot can never be changed through another copy.

use std::fmt;
use std::str::FromStr;

use crate::constants::{
    CHAR_EMPTY, CHAR_PLAYER1, CHAR_PLAYER2, EMPTY_ALIASES, N, OPENING_PLAYER1, OPENING_PLAYER2,
};
use crate::error::BoardError;

/// A cell on the board, as `(row, col)` with both in `0..N`.
pub type Coord = (usize, usize);

/// Content of one board cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Player1,
    Player2,
}

impl Cell {
    /// Character used for this cell in the text serialization.
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => CHAR_EMPTY,
            Cell::Player1 => CHAR_PLAYER1,
            Cell::Player2 => CHAR_PLAYER2,
        }
    }

    /// Parse a serialized cell character. Several spellings of "empty" are accepted.
    pub fn from_char(ch: char) -> Option<Cell> {
        match ch {
            CHAR_PLAYER1 => Some(Cell::Player1),
            CHAR_PLAYER2 => Some(Cell::Player2),
            c if EMPTY_ALIASES.contains(&c) => Some(Cell::Empty),
            _ => None,
        }
    }
}

/// Whose move is next.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Turn {
    #[default]
    Player1,
    Player2,
}

impl Turn {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Turn {
        match self {
            Turn::Player1 => Turn::Player2,
            Turn::Player2 => Turn::Player1,
        }
    }

    /// The cell value this player's pieces carry.
    #[inline]
    pub fn cell(self) -> Cell {
        match self {
            Turn::Player1 => Cell::Player1,
            Turn::Player2 => Cell::Player2,
        }
    }
}

impl From<Turn> for Cell {
    fn from(turn: Turn) -> Self {
        turn.cell()
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Turn::Player1 => write!(f, "Player1"),
            Turn::Player2 => write!(f, "Player2"),
        }
    }
}

impl FromStr for Turn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "player1" | "p1" | "x" => Ok(Turn::Player1),
            "player2" | "p2" | "o" => Ok(Turn::Player2),
            other => Err(format!("unknown player: {other}")),
        }
    }
}

/// An 8x8 row-major grid of cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; N]; N],
}

impl Default for Board {
    fn default() -> Self {
        empty_board()
    }
}

impl Board {
    /// The canonical opening: two pieces of each player on the center diagonals.
    pub fn opening() -> Self {
        let mut board = empty_board();
        for (r, c) in OPENING_PLAYER1 {
            board.cells[r][c] = Cell::Player1;
        }
        for (r, c) in OPENING_PLAYER2 {
            board.cells[r][c] = Cell::Player2;
        }
        board
    }

    /// Look up a cell by signed coordinates. Off-board yields `None`.
    #[inline]
    pub fn get(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        self.cells
            .get(row as usize)
            .and_then(|line| line.get(col as usize))
            .copied()
    }

    /// The cell at an on-board coordinate.
    #[inline]
    pub fn at(&self, (row, col): Coord) -> Cell {
        self.cells[row][col]
    }

    /// Overwrite the cell at an on-board coordinate.
    #[inline]
    pub fn set(&mut self, (row, col): Coord, cell: Cell) {
        self.cells[row][col] = cell;
    }

    /// The rows of the grid.
    pub fn rows(&self) -> &[[Cell; N]; N] {
        &self.cells
    }

    /// Every on-board coordinate in row-major order.
    pub fn coords() -> impl Iterator<Item = Coord> {
        (0..N).flat_map(|r| (0..N).map(move |c| (r, c)))
    }

    /// Number of cells holding `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells.iter().flatten().filter(|&&c| c == cell).count()
    }
}

/// An 8x8 board with every cell empty.
pub fn empty_board() -> Board {
    Board {
        cells: [[Cell::Empty; N]; N],
    }
}

/// Render a board as text: one character per cell, rows separated by newlines.
///
/// `Player1` is `X`, `Player2` is `O`, empty cells are blank. Meant for logs
/// and diagnostics; the game logic never reads it back.
pub fn serialize(board: &Board) -> String {
    board
        .cells
        .iter()
        .map(|line| line.iter().map(|c| c.to_char()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))
    }
}

impl TryFrom<Vec<Vec<Cell>>> for Board {
    type Error = BoardError;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        if rows.len() != N {
            return Err(BoardError::RowCount(rows.len()));
        }
        let mut board = empty_board();
        for (r, line) in rows.iter().enumerate() {
            if line.len() != N {
                return Err(BoardError::RowLength {
                    row: r,
                    len: line.len(),
                });
            }
            board.cells[r].copy_from_slice(line);
        }
        Ok(board)
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parse the output of [`serialize`]. `.` and `_` are also read as empty,
    /// which keeps hand-written boards readable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .enumerate()
            .map(|(r, line)| {
                line.chars()
                    .enumerate()
                    .map(|(c, ch)| {
                        Cell::from_char(ch).ok_or(BoardError::UnknownCell { ch, row: r, col: c })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Board::try_from(rows)
    }
}
