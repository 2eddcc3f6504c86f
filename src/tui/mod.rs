//! Terminal front end.
//!
//! A thin presentation layer over [`Duel`]: it renders snapshots, turns key
//! presses into intents, and settles the engine's turn before reading any
//! input, so a move can never be queued while the engine is thinking. Logs
//! go to a file to keep the alternate screen clean.

mod ui;

use crate::duel::Duel;
use crate::engine::HttpEngine;
use crate::game::Symbol;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

/// Runs the interactive client against the engine at `engine_url`.
pub async fn run(engine_url: String) -> Result<()> {
    let log_file = std::fs::File::create("noughts_tui.log")?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(%engine_url, "starting terminal client");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = play(&mut terminal, Duel::new(HttpEngine::new(engine_url))).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        error!(error = ?err, "terminal client exited with an error");
    }
    result
}

/// Draw-settle-read loop: render the snapshot, give the engine its turn if
/// one is owed, then handle a single key.
#[instrument(skip_all)]
async fn play<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut duel: Duel<HttpEngine>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, &duel.snapshot()))?;

        // covers the engine opening as X right after setup as well as every
        // answer to a human move
        if duel.engine_to_move() {
            if let Err(err) = duel.engine_turn().await {
                debug!(%err, "engine turn failed");
            }
            drain_pending_input()?;
            continue;
        }

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q' | 'Q') => {
                info!("user quit");
                return Ok(());
            }
            KeyCode::Char('r' | 'R') => {
                info!("user reset the game");
                duel.reset();
            }
            KeyCode::Char('x' | 'X') => {
                if let Err(rejected) = duel.choose_symbol(Symbol::X) {
                    debug!(%rejected, "symbol choice rejected");
                }
            }
            KeyCode::Char('o' | 'O') => {
                if let Err(rejected) = duel.choose_symbol(Symbol::O) {
                    debug!(%rejected, "symbol choice rejected");
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(digit) = c.to_digit(10) {
                    if (1..=9).contains(&digit) {
                        // keys 1-9 map to cells 0-8, row-major
                        if let Err(rejected) = duel.human_move(digit as usize - 1) {
                            debug!(%rejected, "move rejected");
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

/// Discards keys pressed while the engine was thinking.
fn drain_pending_input() -> Result<()> {
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }
    Ok(())
}
