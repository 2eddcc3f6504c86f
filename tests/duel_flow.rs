//! Control-loop scenarios driven with scripted engines.

use async_trait::async_trait;
use noughts::engine::{EngineUnavailable, Minimax, MoveEngine, MoveResponse};
use noughts::{Board, Cell, Duel, IllegalMove, MoveOutcome, Phase, Symbol, detect_win, is_full};

/// Plays the lowest empty cell and composes an honest reply.
#[derive(Debug)]
struct FirstEmpty;

#[async_trait]
impl MoveEngine for FirstEmpty {
    async fn request_move(
        &self,
        board: &Board,
        engine: Symbol,
        _human: Symbol,
    ) -> Result<MoveResponse, EngineUnavailable> {
        let chosen = board
            .cells()
            .iter()
            .position(|cell| *cell == Cell::Empty)
            .ok_or_else(|| EngineUnavailable::new("no empty cell left"))?;
        let mut cells = *board.cells();
        cells[chosen] = Cell::Occupied(engine);
        let after = Board::from_cells(cells);
        let win = detect_win(&after);
        Ok(MoveResponse {
            chosen,
            has_winner: win.is_some(),
            is_full: is_full(&after),
            winner: win.map(|w| w.winner),
            board: after,
        })
    }
}

/// Fails every exchange.
#[derive(Debug)]
struct Unreachable;

#[async_trait]
impl MoveEngine for Unreachable {
    async fn request_move(
        &self,
        _board: &Board,
        _engine: Symbol,
        _human: Symbol,
    ) -> Result<MoveResponse, EngineUnavailable> {
        Err(EngineUnavailable::new("scripted outage"))
    }
}

/// Replies with a fixed cell regardless of the board, echoing the board
/// back unchanged.
#[derive(Debug)]
struct Stubborn(usize);

#[async_trait]
impl MoveEngine for Stubborn {
    async fn request_move(
        &self,
        board: &Board,
        _engine: Symbol,
        _human: Symbol,
    ) -> Result<MoveResponse, EngineUnavailable> {
        Ok(MoveResponse {
            chosen: self.0,
            board: board.clone(),
            has_winner: false,
            is_full: false,
            winner: None,
        })
    }
}

/// Proposes a legal cell but reports a fabricated board and terminal flags
/// that have nothing to do with it.
#[derive(Debug)]
struct Liar;

#[async_trait]
impl MoveEngine for Liar {
    async fn request_move(
        &self,
        board: &Board,
        engine: Symbol,
        _human: Symbol,
    ) -> Result<MoveResponse, EngineUnavailable> {
        let chosen = board
            .cells()
            .iter()
            .position(|cell| *cell == Cell::Empty)
            .ok_or_else(|| EngineUnavailable::new("no empty cell left"))?;
        Ok(MoveResponse {
            chosen,
            board: Board::from_cells([Cell::Occupied(engine); 9]),
            has_winner: true,
            is_full: true,
            winner: Some(engine),
        })
    }
}

#[tokio::test]
async fn test_round_trip_with_a_compliant_engine() {
    let mut duel = Duel::new(FirstEmpty);
    duel.choose_symbol(Symbol::X).unwrap();
    assert!(!duel.engine_to_move());

    assert_eq!(duel.human_move(4).unwrap(), MoveOutcome::Continued);
    assert!(duel.engine_to_move());
    assert!(duel.snapshot().processing);

    // the engine owes a move, so the human is gated out
    assert_eq!(duel.human_move(0), Err(IllegalMove::NotYourTurn(Symbol::X)));

    let outcome = duel.engine_turn().await.unwrap();
    assert_eq!(outcome, Some(MoveOutcome::Continued));

    let snapshot = duel.snapshot();
    assert_eq!(snapshot.board.get(0), Some(Cell::Occupied(Symbol::O)));
    assert_eq!(snapshot.last_engine_move, Some(0));
    assert!(!snapshot.processing);
    assert_eq!(snapshot.to_move, Symbol::X);
}

#[tokio::test]
async fn test_the_engine_opens_when_the_human_takes_o() {
    let mut duel = Duel::new(FirstEmpty);
    duel.choose_symbol(Symbol::O).unwrap();

    // X opens and X is the engine's seat, so the opening is owed at once
    assert!(duel.engine_to_move());
    assert_eq!(duel.snapshot().board, Board::new());
    assert_eq!(duel.human_move(4), Err(IllegalMove::NotYourTurn(Symbol::O)));

    duel.engine_turn().await.unwrap();
    let snapshot = duel.snapshot();
    assert_eq!(snapshot.board.get(0), Some(Cell::Occupied(Symbol::X)));
    assert!(!snapshot.processing);

    // now the human may answer
    assert_eq!(duel.human_move(4).unwrap(), MoveOutcome::Continued);
}

#[tokio::test]
async fn test_an_outage_parks_the_session_in_error() {
    let mut duel = Duel::new(Unreachable);
    duel.choose_symbol(Symbol::X).unwrap();
    duel.human_move(4).unwrap();

    let err = duel.engine_turn().await.unwrap_err();
    assert!(err.to_string().contains("scripted outage"));

    let snapshot = duel.snapshot();
    assert_eq!(snapshot.phase, Phase::Error);
    assert_eq!(snapshot.error.as_deref(), Some("scripted outage"));
    // the board is exactly as it was before the exchange
    assert_eq!(snapshot.board.get(4), Some(Cell::Occupied(Symbol::X)));
    let occupied = snapshot
        .board
        .cells()
        .iter()
        .filter(|cell| **cell != Cell::Empty)
        .count();
    assert_eq!(occupied, 1);

    // terminal: no further moves, no further engine turns
    assert_eq!(
        duel.human_move(0),
        Err(IllegalMove::NotPlaying(Phase::Error))
    );
    assert_eq!(duel.engine_turn().await.unwrap(), None);

    // reset recovers to a fresh setup
    duel.reset();
    let snapshot = duel.snapshot();
    assert_eq!(snapshot.phase, Phase::Setup);
    assert_eq!(snapshot.error, None);
    assert_eq!(snapshot.board, Board::new());
}

#[tokio::test]
async fn test_an_occupied_cell_reply_is_a_failure() {
    let mut duel = Duel::new(Stubborn(4));
    duel.choose_symbol(Symbol::X).unwrap();
    duel.human_move(4).unwrap();

    let err = duel.engine_turn().await.unwrap_err();
    assert!(err.to_string().contains("illegal move"));

    let snapshot = duel.snapshot();
    assert_eq!(snapshot.phase, Phase::Error);
    assert_eq!(snapshot.board.get(4), Some(Cell::Occupied(Symbol::X)));
    assert_eq!(snapshot.last_engine_move, None);
}

#[tokio::test]
async fn test_an_out_of_range_reply_is_a_failure() {
    let mut duel = Duel::new(Stubborn(9));
    duel.choose_symbol(Symbol::X).unwrap();
    duel.human_move(4).unwrap();

    assert!(duel.engine_turn().await.is_err());
    assert_eq!(duel.snapshot().phase, Phase::Error);
}

#[tokio::test]
async fn test_a_lying_reply_board_is_never_adopted() {
    let mut duel = Duel::new(Liar);
    duel.choose_symbol(Symbol::X).unwrap();
    duel.human_move(4).unwrap();

    // the proposed cell is legal, so the move is adopted; the fabricated
    // board and flags are not
    let outcome = duel.engine_turn().await.unwrap();
    assert_eq!(outcome, Some(MoveOutcome::Continued));

    let snapshot = duel.snapshot();
    assert_eq!(snapshot.phase, Phase::Playing);
    assert_eq!(snapshot.outcome, None);
    assert_eq!(snapshot.to_move, Symbol::X);
    assert_eq!(snapshot.last_engine_move, Some(0));

    // the board is the locally applied result, nothing from the reply
    let mut expected = Board::new();
    expected.set(4, Cell::Occupied(Symbol::X)).unwrap();
    expected.set(0, Cell::Occupied(Symbol::O)).unwrap();
    assert_eq!(snapshot.board, expected);

    // play continues on the local board
    assert_eq!(duel.human_move(1).unwrap(), MoveOutcome::Continued);
}

#[tokio::test]
async fn test_reset_while_the_engine_is_owed_cancels_nothing_midair() {
    // resetting before the exchange settles simply removes the debt
    let mut duel = Duel::new(FirstEmpty);
    duel.choose_symbol(Symbol::O).unwrap();
    assert!(duel.engine_to_move());

    duel.reset();
    assert!(!duel.engine_to_move());
    assert_eq!(duel.engine_turn().await.unwrap(), None);
    assert_eq!(duel.snapshot().phase, Phase::Setup);
}

#[tokio::test]
async fn test_a_full_duel_against_the_minimax_never_beats_it() {
    let mut duel = Duel::new(Minimax);
    duel.choose_symbol(Symbol::X).unwrap();

    let mut guard = 0;
    while duel.session().phase() == Phase::Playing {
        guard += 1;
        assert!(guard <= 10, "game did not terminate");
        if duel.engine_to_move() {
            duel.engine_turn().await.unwrap();
        } else {
            let index = duel
                .snapshot()
                .board
                .cells()
                .iter()
                .position(|cell| *cell == Cell::Empty)
                .unwrap();
            duel.human_move(index).unwrap();
        }
    }

    assert_eq!(duel.session().phase(), Phase::Finished);
    if let Some(win) = duel.session().outcome() {
        assert_eq!(win.winner, Symbol::O);
    }
}
