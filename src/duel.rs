//! The control loop composing a session with an engine client.
//!
//! [`Duel`] turns player intents into session mutations and settles the
//! engine's turns. It owns the only suspension point in a game (the engine
//! exchange) and derives the processing flag from whose turn it is, so
//! there is no stored flag to fall out of sync. Engine moves are adopted
//! through the same checked apply path as human moves; the terminal flags
//! and board in the reply are cross-checked but never trusted.

use crate::engine::{EngineUnavailable, MoveEngine};
use crate::game::{Board, IllegalMove, MoveOutcome, Phase, Seats, Session, Symbol, Win, is_full};
use tracing::{debug, info, instrument, warn};

/// Everything the presentation layer renders, captured in one value.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Lifecycle phase.
    pub phase: Phase,
    /// Current board.
    pub board: Board,
    /// Symbol holding the turn, meaningful while playing.
    pub to_move: Symbol,
    /// Seat assignment, present once play has started.
    pub seats: Option<Seats>,
    /// The win, if the game finished with one.
    pub outcome: Option<Win>,
    /// True while the engine owes a move; human input is gated.
    pub processing: bool,
    /// Last engine failure, for display in the error phase.
    pub error: Option<String>,
    /// Cell of the engine's most recent move.
    pub last_engine_move: Option<usize>,
}

/// A human-versus-engine game driven one intent at a time.
///
/// At most one engine request is ever outstanding: [`Duel::engine_turn`]
/// takes `&mut self`, so a second request cannot start while one is in
/// flight, and human moves are rejected while the engine owes a move.
#[derive(Debug)]
pub struct Duel<E> {
    session: Session,
    engine: E,
    last_error: Option<String>,
    last_engine_move: Option<usize>,
}

impl<E: MoveEngine> Duel<E> {
    /// Creates a duel in the setup phase.
    pub fn new(engine: E) -> Self {
        Self {
            session: Session::new(),
            engine,
            last_error: None,
            last_engine_move: None,
        }
    }

    /// The session being driven.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// True when the engine owes the next move: the session is playing and
    /// the turn belongs to the engine's seat.
    pub fn engine_to_move(&self) -> bool {
        match self.session.seats() {
            Some(seats) => {
                self.session.phase() == Phase::Playing && self.session.to_move() == seats.engine
            }
            None => false,
        }
    }

    /// Intent: the human picks a symbol; play begins and X opens.
    ///
    /// When the human picks O the engine holds X and owes the opening move,
    /// so callers settle [`Duel::engine_turn`] before reading any input.
    #[instrument(skip(self))]
    pub fn choose_symbol(&mut self, choice: Symbol) -> Result<Seats, IllegalMove> {
        let seats = self.session.assign_symbols(choice)?;
        debug!(human = %seats.human, "symbol chosen");
        Ok(seats)
    }

    /// Intent: the human plays `index`.
    ///
    /// Rejected while the engine owes a move, and for every precondition of
    /// the underlying session; rejection never mutates state.
    #[instrument(skip(self))]
    pub fn human_move(&mut self, index: usize) -> Result<MoveOutcome, IllegalMove> {
        let Some(seats) = self.session.seats() else {
            return Err(IllegalMove::NotPlaying(self.session.phase()));
        };
        if self.engine_to_move() {
            return Err(IllegalMove::NotYourTurn(seats.human));
        }
        let outcome = self.session.apply_move(index, seats.human)?;
        self.last_engine_move = None;
        debug!(index, ?outcome, "human move applied");
        Ok(outcome)
    }

    /// Settles the engine's turn, if one is owed.
    ///
    /// This is the single suspension point. `Ok(None)` means no move was
    /// owed. On success the proposed cell goes through the same checked
    /// apply path as a human move, and the reply's terminal flags and board
    /// are cross-checked against the local result. On any failure,
    /// including an illegal proposed cell, the session moves to the error
    /// phase with the board left exactly as it was.
    #[instrument(skip(self))]
    pub async fn engine_turn(&mut self) -> Result<Option<MoveOutcome>, EngineUnavailable> {
        let Some(seats) = self.session.seats() else {
            return Ok(None);
        };
        if self.session.phase() != Phase::Playing || self.session.to_move() != seats.engine {
            return Ok(None);
        }

        let reply = match self
            .engine
            .request_move(self.session.board(), seats.engine, seats.human)
            .await
        {
            Ok(reply) => reply,
            Err(err) => {
                warn!(%err, "engine exchange failed");
                self.session.mark_engine_failure();
                self.last_error = Some(err.message.clone());
                return Err(err);
            }
        };

        let outcome = match self.session.apply_move(reply.chosen, seats.engine) {
            Ok(outcome) => outcome,
            Err(illegal) => {
                warn!(chosen = reply.chosen, %illegal, "engine proposed an illegal move");
                self.session.mark_engine_failure();
                let err = EngineUnavailable::new(format!(
                    "engine proposed an illegal move: {}",
                    illegal
                ));
                self.last_error = Some(err.message.clone());
                return Err(err);
            }
        };
        self.last_engine_move = Some(reply.chosen);

        let local_won = matches!(outcome, MoveOutcome::Won(_));
        if reply.has_winner != local_won || reply.is_full != is_full(self.session.board()) {
            warn!(
                has_winner = reply.has_winner,
                is_full = reply.is_full,
                ?outcome,
                "engine terminal flags disagree with local detection"
            );
        }
        if reply.board != *self.session.board() {
            warn!("engine board diverges from the locally applied move");
        }

        info!(chosen = reply.chosen, ?outcome, "engine move adopted");
        Ok(Some(outcome))
    }

    /// Intent: discard the game and return to setup.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.session.reset();
        self.last_error = None;
        self.last_engine_move = None;
    }

    /// Captures the render state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.session.phase(),
            board: self.session.board().clone(),
            to_move: self.session.to_move(),
            seats: self.session.seats(),
            outcome: self.session.outcome(),
            processing: self.engine_to_move(),
            error: self.last_error.clone(),
            last_engine_move: self.last_engine_move,
        }
    }
}
