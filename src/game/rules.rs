//! Win and draw detection.

use super::types::{Board, Cell, Symbol};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The eight winning triples, in scan order: rows top to bottom, columns
/// left to right, then the two diagonals.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// A detected win: the winning symbol and the completed triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Win {
    /// Symbol that completed the triple.
    pub winner: Symbol,
    /// Indices of the completed triple.
    pub line: [usize; 3],
}

/// Scans the triples in order and reports the first one uniformly occupied.
///
/// Legal play can never produce two different winning symbols, so scanning
/// order only decides which `line` gets reported when one symbol completes
/// two triples at once.
#[instrument]
pub fn detect_win(board: &Board) -> Option<Win> {
    for line in LINES {
        let [a, b, c] = line;
        if let Some(Cell::Occupied(winner)) = board.get(a) {
            if board.get(b) == Some(Cell::Occupied(winner))
                && board.get(c) == Some(Cell::Occupied(winner))
            {
                return Some(Win { winner, line });
            }
        }
    }
    None
}

/// Checks whether every cell is occupied.
#[instrument]
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|cell| *cell != Cell::Empty)
}
