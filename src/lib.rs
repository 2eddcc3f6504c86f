//! Noughts library - tic-tac-toe against a remote move engine.
//!
//! # Architecture
//!
//! - **Game**: the pure session state machine (board, phases, turn order)
//! - **Engine**: the move supplier behind the [`engine::MoveEngine`] seam,
//!   with an HTTP client, an in-process minimax, and the HTTP service
//! - **Duel**: the control loop composing a session with an engine
//! - **Tui**: the terminal front end rendering duel snapshots
//!
//! The session never performs I/O: every engine exchange goes through the
//! one suspension point in [`Duel::engine_turn`], and any failure there
//! moves the session to its error phase without touching the board.
//!
//! # Example
//!
//! ```no_run
//! use noughts::engine::Minimax;
//! use noughts::{Duel, Symbol};
//!
//! # async fn example() -> anyhow::Result<()> {
//! // Play the engine in-process, no service required
//! let mut duel = Duel::new(Minimax);
//! duel.choose_symbol(Symbol::X)?;
//! duel.human_move(4)?;
//! duel.engine_turn().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod duel;
mod game;

// Engine collaborators and the terminal front end keep their namespaces
pub mod engine;
pub mod tui;

// Crate-level exports - control loop
pub use duel::{Duel, Snapshot};

// Crate-level exports - game model
pub use game::{
    Board, Cell, IllegalMove, LINES, MoveOutcome, Phase, Seats, Session, Symbol, Win, detect_win,
    is_full,
};
