//! Wire types for the engine exchange.
//!
//! JSON with camelCase keys. Boards travel as flat arrays of nine cell
//! strings (`"X"`, `"O"`, `"_"`); moves are cell indices 0-8. The reply
//! carries the engine's own terminal assessment, which callers treat as
//! advisory and cross-check against local detection.

use crate::game::{Board, Symbol};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/get-ai-move`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    /// Board to move on, nine cells in row-major order.
    pub board: Board,
    /// Symbol the engine plays.
    pub ai_symbol: Symbol,
    /// Symbol the human plays.
    pub human_symbol: Symbol,
}

/// Reply: the chosen cell, the board after the move, and the engine's own
/// assessment of the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    /// Cell index the engine chose.
    #[serde(rename = "move")]
    pub chosen: usize,
    /// Board after the engine's move.
    pub board: Board,
    /// Engine-side assessment: the new board contains a winning triple.
    pub has_winner: bool,
    /// Engine-side assessment: the new board is full.
    pub is_full: bool,
    /// Winning symbol when `has_winner` is set.
    #[serde(default)]
    pub winner: Option<Symbol>,
}
