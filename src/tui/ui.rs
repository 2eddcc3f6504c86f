//! Stateless snapshot rendering.

use crate::duel::Snapshot;
use crate::game::{Cell, Phase, Symbol};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

/// Draws one frame from a snapshot.
pub fn draw(frame: &mut Frame, snapshot: &Snapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(11),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let title = Paragraph::new("Noughts - Tic-Tac-Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    render_board(frame, chunks[1], snapshot);

    let status = Paragraph::new(status_line(snapshot))
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, chunks[2]);

    let help = Paragraph::new(help_line(snapshot))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[3]);
}

fn status_line(snapshot: &Snapshot) -> String {
    match snapshot.phase {
        Phase::Setup => "Choose your symbol. X moves first".to_string(),
        Phase::Playing if snapshot.processing => "Engine is thinking...".to_string(),
        Phase::Playing => match snapshot.seats {
            Some(seats) => format!("Your turn ({})", seats.human),
            None => String::new(),
        },
        Phase::Finished => match (snapshot.outcome, snapshot.seats) {
            (Some(win), Some(seats)) if win.winner == seats.human => "You win!".to_string(),
            (Some(_), _) => "Engine wins!".to_string(),
            _ => "It's a draw!".to_string(),
        },
        Phase::Error => match &snapshot.error {
            Some(message) => format!("Engine unavailable: {}", message),
            None => "Engine unavailable".to_string(),
        },
    }
}

fn help_line(snapshot: &Snapshot) -> &'static str {
    match snapshot.phase {
        Phase::Setup => "X / O: choose symbol | Q: quit",
        Phase::Playing => "1-9: play a cell | R: reset | Q: quit",
        Phase::Finished | Phase::Error => "R: new game | Q: quit",
    }
}

fn render_board(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    let board_area = center_rect(area, 40, 11);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    render_row(frame, rows[0], snapshot, 0);
    render_separator(frame, rows[1]);
    render_row(frame, rows[2], snapshot, 3);
    render_separator(frame, rows[3]);
    render_row(frame, rows[4], snapshot, 6);
}

fn render_row(frame: &mut Frame, area: Rect, snapshot: &Snapshot, start: usize) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Length(1),
            Constraint::Percentage(33),
            Constraint::Length(1),
            Constraint::Percentage(34),
        ])
        .split(area);

    render_cell(frame, cols[0], snapshot, start);
    render_vertical_sep(frame, cols[1]);
    render_cell(frame, cols[2], snapshot, start + 1);
    render_vertical_sep(frame, cols[3]);
    render_cell(frame, cols[4], snapshot, start + 2);
}

fn render_cell(frame: &mut Frame, area: Rect, snapshot: &Snapshot, index: usize) {
    let cell = snapshot.board.get(index).unwrap_or(Cell::Empty);
    let (text, mut style) = match cell.symbol() {
        None => (
            format!("{}", index + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Some(symbol) => {
            let color = match symbol {
                Symbol::X => Color::Blue,
                Symbol::O => Color::Red,
            };
            (
                symbol.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        }
    };

    let in_winning_line = snapshot
        .outcome
        .is_some_and(|win| win.line.contains(&index));
    if in_winning_line {
        style = Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD);
    } else if snapshot.last_engine_move == Some(index) {
        style = style.add_modifier(Modifier::UNDERLINED);
    }

    let paragraph = Paragraph::new(text).style(style).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_separator(frame: &mut Frame, area: Rect) {
    let sep =
        Paragraph::new("─".repeat(area.width as usize)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn render_vertical_sep(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Length(area.width.saturating_sub(width) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Length(area.height.saturating_sub(height) / 2),
        ])
        .split(horizontal[1])[1]
}
