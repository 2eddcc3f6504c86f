//! The game session state machine.
//!
//! [`Session`] is the single source of truth for one game: the board, the
//! lifecycle phase, the seat assignment, and the turn. It is pure and
//! synchronous; obtaining engine moves is I/O and lives elsewhere, behind
//! the engine seam. Every mutation checks its preconditions before touching
//! any state, so a rejected call leaves the session exactly as it was.

use super::rules::{self, Win};
use super::types::{Board, Cell, Symbol};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No symbols assigned yet; the board is empty.
    Setup,
    /// Moves are being exchanged.
    Playing,
    /// A win or draw was detected. Terminal.
    Finished,
    /// An engine exchange failed. Terminal, reachable only from `Playing`.
    Error,
}

/// Seat assignment for one game: who plays which symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seats {
    /// Symbol played by the human.
    pub human: Symbol,
    /// Symbol played by the engine, always the complement of `human`.
    pub engine: Symbol,
}

impl Seats {
    /// Seats the human at `choice`; the engine takes the complement.
    pub fn for_human(choice: Symbol) -> Self {
        Self {
            human: choice,
            engine: choice.opponent(),
        }
    }
}

/// Why a move or a symbol assignment was rejected.
///
/// Rejection never mutates the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum IllegalMove {
    /// The session is not accepting moves in its current phase.
    #[display("No moves accepted in the {:?} phase", _0)]
    NotPlaying(Phase),

    /// Symbols were already assigned; the session has left setup.
    #[display("Symbols are already assigned")]
    AlreadyAssigned,

    /// The cell index is outside 0-8.
    #[display("Cell index {} is out of range", _0)]
    OutOfRange(usize),

    /// The target cell is already occupied.
    #[display("Cell {} is already occupied", _0)]
    Occupied(usize),

    /// The mover does not hold the turn.
    #[display("It's not {}'s turn", _0)]
    NotYourTurn(Symbol),
}

impl std::error::Error for IllegalMove {}

/// Result of a successfully applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The game continues; the turn passed to the other symbol.
    Continued,
    /// The move completed a triple; the session is finished.
    Won(Win),
    /// The move filled the board with no winner; the session is finished.
    Drawn,
}

impl MoveOutcome {
    /// True when the move ended the game.
    pub fn is_terminal(self) -> bool {
        !matches!(self, MoveOutcome::Continued)
    }
}

/// One tic-tac-toe game from setup to its terminal phase.
///
/// The lifecycle is `Setup -> Playing -> Finished`, with `Error` reachable
/// from `Playing` when an engine exchange fails. [`Session::reset`] returns
/// any session to a fresh `Setup`. The outcome, once set, never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The board.
    board: Board,
    /// Lifecycle phase.
    phase: Phase,
    /// Seat assignment, present once play has started.
    seats: Option<Seats>,
    /// Symbol holding the turn.
    to_move: Symbol,
    /// Winning symbol and triple, once a win is detected.
    outcome: Option<Win>,
}

impl Session {
    /// Creates a session in `Setup` with an empty board.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            phase: Phase::Setup,
            seats: None,
            to_move: Symbol::X,
            outcome: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the seat assignment, if play has started.
    pub fn seats(&self) -> Option<Seats> {
        self.seats
    }

    /// Returns the symbol holding the turn.
    pub fn to_move(&self) -> Symbol {
        self.to_move
    }

    /// Returns the win, if one was detected.
    pub fn outcome(&self) -> Option<Win> {
        self.outcome
    }

    /// Seats the human at `choice` and starts play.
    ///
    /// X opens regardless of which seat holds it: choosing O means the
    /// engine moves first. Only a `Setup` session accepts an assignment.
    #[instrument(skip(self))]
    pub fn assign_symbols(&mut self, choice: Symbol) -> Result<Seats, IllegalMove> {
        if self.phase != Phase::Setup {
            return Err(IllegalMove::AlreadyAssigned);
        }
        let seats = Seats::for_human(choice);
        self.seats = Some(seats);
        self.to_move = Symbol::X;
        self.phase = Phase::Playing;
        info!(human = %seats.human, engine = %seats.engine, "symbols assigned, X opens");
        Ok(seats)
    }

    /// Applies one move for `mover` at `index`.
    ///
    /// Preconditions are checked in order before anything mutates: the
    /// session is playing, the index is in range, the cell is empty, and
    /// `mover` holds the turn. On success the mark is placed and the board
    /// is evaluated: a completed triple finishes the session with a win, a
    /// full board finishes it as a draw, otherwise the turn passes.
    #[instrument(skip(self), fields(phase = ?self.phase, to_move = %self.to_move))]
    pub fn apply_move(&mut self, index: usize, mover: Symbol) -> Result<MoveOutcome, IllegalMove> {
        if self.phase != Phase::Playing {
            return Err(IllegalMove::NotPlaying(self.phase));
        }
        let cell = self.board.get(index).ok_or(IllegalMove::OutOfRange(index))?;
        if cell != Cell::Empty {
            return Err(IllegalMove::Occupied(index));
        }
        if mover != self.to_move {
            return Err(IllegalMove::NotYourTurn(mover));
        }

        self.board
            .set(index, Cell::Occupied(mover))
            .map_err(|_| IllegalMove::OutOfRange(index))?;

        if let Some(win) = rules::detect_win(&self.board) {
            self.phase = Phase::Finished;
            self.outcome = Some(win);
            info!(winner = %win.winner, line = ?win.line, "game won\n{}", self.board.display());
            return Ok(MoveOutcome::Won(win));
        }
        if rules::is_full(&self.board) {
            self.phase = Phase::Finished;
            info!("game drawn\n{}", self.board.display());
            return Ok(MoveOutcome::Drawn);
        }
        self.to_move = mover.opponent();
        debug!(index, next = %self.to_move, "turn passed");
        Ok(MoveOutcome::Continued)
    }

    /// Records an engine exchange failure.
    ///
    /// Only a playing session can fail this way; the board and seats are
    /// kept as they were so the failure can be rendered in place.
    #[instrument(skip(self))]
    pub fn mark_engine_failure(&mut self) {
        if self.phase == Phase::Playing {
            self.phase = Phase::Error;
            warn!("session entered the error phase");
        } else {
            warn!(phase = ?self.phase, "engine failure reported outside of play, ignored");
        }
    }

    /// Returns the session to a fresh `Setup`, discarding board, seats,
    /// and outcome. Valid in every phase.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        *self = Self::new();
        debug!("session reset");
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
