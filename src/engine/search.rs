//! Move selection for the engine seat.
//!
//! Depth-aware minimax with alpha-beta pruning. Wins score `100 - depth`
//! and losses `-100 + depth`, so the engine prefers the fastest win and the
//! slowest loss; draws score zero. Candidates are tried in ascending cell
//! order and only a strictly better score replaces the current pick, which
//! makes selection fully deterministic.

use super::client::{EngineUnavailable, MoveEngine};
use super::protocol::{MoveRequest, MoveResponse};
use crate::game::{Board, Cell, Symbol, detect_win, is_full};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Why the engine refused to answer a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ReplyError {
    /// The submitted board already has a winner or no empty cell.
    #[display("The submitted board is already terminal")]
    TerminalBoard,

    /// Both seats claimed the same symbol.
    #[display("Engine and human cannot share a symbol")]
    SymbolClash,
}

impl std::error::Error for ReplyError {}

/// In-process minimax engine.
///
/// The HTTP service wraps this for remote play; it also plugs straight into
/// the control loop for socket-free games and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Minimax;

impl Minimax {
    /// Picks the best cell for `engine` on `board`.
    ///
    /// Returns `None` when the board already has a winner or no empty cell
    /// remains.
    #[instrument(skip(self, board))]
    pub fn choose(&self, board: &Board, engine: Symbol, human: Symbol) -> Option<usize> {
        if detect_win(board).is_some() {
            return None;
        }
        let mut best: Option<(usize, i32)> = None;
        for index in empty_cells(board) {
            let candidate = with_mark(board, index, engine);
            let score = minimax(&candidate, engine, human, false, i32::MIN, i32::MAX, 0);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((index, score));
            }
        }
        let pick = best.map(|(index, _)| index);
        debug!(?pick, "minimax selection");
        pick
    }

    /// Builds a full protocol reply: chooses a move, applies it, and
    /// assesses the resulting board.
    #[instrument(skip(self, request))]
    pub fn reply(&self, request: &MoveRequest) -> Result<MoveResponse, ReplyError> {
        if request.ai_symbol == request.human_symbol {
            return Err(ReplyError::SymbolClash);
        }
        let chosen = self
            .choose(&request.board, request.ai_symbol, request.human_symbol)
            .ok_or(ReplyError::TerminalBoard)?;
        let board = with_mark(&request.board, chosen, request.ai_symbol);
        let win = detect_win(&board);
        Ok(MoveResponse {
            chosen,
            has_winner: win.is_some(),
            is_full: is_full(&board),
            winner: win.map(|w| w.winner),
            board,
        })
    }
}

#[async_trait]
impl MoveEngine for Minimax {
    async fn request_move(
        &self,
        board: &Board,
        engine: Symbol,
        human: Symbol,
    ) -> Result<MoveResponse, EngineUnavailable> {
        let request = MoveRequest {
            board: board.clone(),
            ai_symbol: engine,
            human_symbol: human,
        };
        self.reply(&request)
            .map_err(|err| EngineUnavailable::new(err.to_string()))
    }
}

fn empty_cells(board: &Board) -> impl Iterator<Item = usize> + '_ {
    (0..9).filter(move |index| board.is_empty(*index))
}

fn with_mark(board: &Board, index: usize, symbol: Symbol) -> Board {
    let mut cells = *board.cells();
    cells[index] = Cell::Occupied(symbol);
    Board::from_cells(cells)
}

/// Scores `board` for the engine. `maximizing` means the engine moves next;
/// a detected win therefore belongs to whoever moved last.
fn minimax(
    board: &Board,
    engine: Symbol,
    human: Symbol,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
    depth: i32,
) -> i32 {
    if detect_win(board).is_some() {
        return if maximizing { -100 + depth } else { 100 - depth };
    }
    if is_full(board) {
        return 0;
    }

    if maximizing {
        let mut best = i32::MIN;
        for index in empty_cells(board) {
            let next = with_mark(board, index, engine);
            best = best.max(minimax(&next, engine, human, false, alpha, beta, depth + 1));
            alpha = alpha.max(best);
            if alpha >= beta {
                break;
            }
        }
        best
    } else {
        let mut best = i32::MAX;
        for index in empty_cells(board) {
            let next = with_mark(board, index, human);
            best = best.min(minimax(&next, engine, human, true, alpha, beta, depth + 1));
            beta = beta.min(best);
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{MoveOutcome, Phase, Session};

    fn board_of(marks: &[(usize, Symbol)]) -> Board {
        let mut board = Board::new();
        for &(index, symbol) in marks {
            board.set(index, Cell::Occupied(symbol)).unwrap();
        }
        board
    }

    #[test]
    fn test_takes_the_winning_cell() {
        // X completes the top row rather than doing anything else.
        let board = board_of(&[
            (0, Symbol::X),
            (1, Symbol::X),
            (3, Symbol::O),
            (4, Symbol::O),
        ]);
        assert_eq!(Minimax.choose(&board, Symbol::X, Symbol::O), Some(2));
    }

    #[test]
    fn test_blocks_the_opponent_threat() {
        // O has no win of its own and must block X at 2.
        let board = board_of(&[(0, Symbol::X), (1, Symbol::X), (3, Symbol::O)]);
        assert_eq!(Minimax.choose(&board, Symbol::O, Symbol::X), Some(2));
    }

    #[test]
    fn test_prefers_winning_over_blocking() {
        // Both sides threaten a row; O takes its own win at 5 instead of
        // blocking X at 2.
        let board = board_of(&[
            (0, Symbol::X),
            (1, Symbol::X),
            (3, Symbol::O),
            (4, Symbol::O),
            (8, Symbol::X),
        ]);
        assert_eq!(Minimax.choose(&board, Symbol::O, Symbol::X), Some(5));
    }

    #[test]
    fn test_empty_board_pick_is_deterministic() {
        // Perfect play draws from every opening, so all scores tie and the
        // first candidate survives.
        assert_eq!(Minimax.choose(&Board::new(), Symbol::X, Symbol::O), Some(0));
    }

    #[test]
    fn test_terminal_boards_yield_no_move() {
        let won = board_of(&[(0, Symbol::X), (1, Symbol::X), (2, Symbol::X)]);
        assert_eq!(Minimax.choose(&won, Symbol::O, Symbol::X), None);

        let drawn = board_of(&[
            (0, Symbol::X),
            (1, Symbol::O),
            (2, Symbol::X),
            (3, Symbol::X),
            (4, Symbol::O),
            (5, Symbol::O),
            (6, Symbol::O),
            (7, Symbol::X),
            (8, Symbol::X),
        ]);
        assert_eq!(Minimax.choose(&drawn, Symbol::X, Symbol::O), None);
    }

    #[test]
    fn test_reply_rejects_terminal_and_clashing_requests() {
        let won = MoveRequest {
            board: board_of(&[(0, Symbol::X), (1, Symbol::X), (2, Symbol::X)]),
            ai_symbol: Symbol::O,
            human_symbol: Symbol::X,
        };
        assert_eq!(Minimax.reply(&won), Err(ReplyError::TerminalBoard));

        let clash = MoveRequest {
            board: Board::new(),
            ai_symbol: Symbol::X,
            human_symbol: Symbol::X,
        };
        assert_eq!(Minimax.reply(&clash), Err(ReplyError::SymbolClash));
    }

    #[test]
    fn test_reply_reports_its_own_win() {
        let request = MoveRequest {
            board: board_of(&[
                (0, Symbol::O),
                (1, Symbol::O),
                (3, Symbol::X),
                (4, Symbol::X),
            ]),
            ai_symbol: Symbol::O,
            human_symbol: Symbol::X,
        };
        let reply = Minimax.reply(&request).unwrap();
        assert_eq!(reply.chosen, 2);
        assert!(reply.has_winner);
        assert_eq!(reply.winner, Some(Symbol::O));
        assert!(!reply.is_full);
    }

    #[test]
    fn test_perfect_play_always_draws() {
        let mut session = Session::new();
        session.assign_symbols(Symbol::X).unwrap();
        let mut moves = 0;
        while session.phase() == Phase::Playing {
            let mover = session.to_move();
            let index = Minimax
                .choose(session.board(), mover, mover.opponent())
                .unwrap();
            let outcome = session.apply_move(index, mover).unwrap();
            moves += 1;
            assert!(moves <= 9);
            if moves == 9 {
                assert_eq!(outcome, MoveOutcome::Drawn);
            }
        }
        assert_eq!(session.phase(), Phase::Finished);
        assert_eq!(session.outcome(), None);
    }
}
