//! Error types for building boards from untrusted input.

/// Errors raised when raw rows or text cannot form a valid 8x8 board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("expected 8 rows, got {0}")]
    RowCount(usize),

    #[error("row {row} has {len} cells, expected 8")]
    RowLength { row: usize, len: usize },

    #[error("unknown cell character {ch:?} at ({row},{col})")]
    UnknownCell { ch: char, row: usize, col: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_error_display() {
        assert_eq!(BoardError::RowCount(7).to_string(), "expected 8 rows, got 7");
        assert_eq!(
            BoardError::RowLength { row: 2, len: 9 }.to_string(),
            "row 2 has 9 cells, expected 8"
        );
        assert_eq!(
            BoardError::UnknownCell {
                ch: 'z',
                row: 0,
                col: 5
            }
            .to_string(),
            "unknown cell character 'z' at (0,5)"
        );
    }
}
