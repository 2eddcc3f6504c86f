//! Pure game model: board types, win rules, and the session state machine.

mod rules;
mod session;
mod types;

pub use rules::{LINES, Win, detect_win, is_full};
pub use session::{IllegalMove, MoveOutcome, Phase, Seats, Session};
pub use types::{Board, Cell, Symbol};
