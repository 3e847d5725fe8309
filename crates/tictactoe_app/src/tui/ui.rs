//! Stateless UI rendering for the menu and the board.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tictactoe_core::{Board, Mark, Position, Square};

use super::app::App;

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(7),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let title = match app.orchestrator().session() {
        Some(session) => session.mode().name(),
        None => "Tic Tac Toe".to_string(),
    };
    let title = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let help = match app.orchestrator().session() {
        Some(session) => {
            draw_board(frame, chunks[1], session.board(), app.cursor());
            "arrows/1-9 move • enter place • r reset • m menu • q quit"
        }
        None => {
            draw_menu(frame, chunks[1], app);
            "↑/↓ or 1-5 choose • enter start • q quit"
        }
    };

    let status = Paragraph::new(app.status())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    let help = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

fn draw_menu(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .tiers()
        .iter()
        .enumerate()
        .map(|(i, tier)| {
            let text = format!(" {}. {} ", i + 1, tier.name());
            if i == app.menu_selection() {
                Line::from(Span::styled(
                    text,
                    Style::default().bg(Color::White).fg(Color::Black),
                ))
            } else {
                Line::from(text)
            }
        })
        .collect();

    let menu = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title("Difficulty").borders(Borders::ALL));
    frame.render_widget(menu, center_rect(area, 30, 7));
}

/// Width of one cell in columns.
const CELL_WIDTH: usize = 7;

fn draw_board(frame: &mut Frame, area: Rect, board: &Board, cursor: Position) {
    let divider = Line::from(Span::styled(
        vec!["─".repeat(CELL_WIDTH); 3].join("┼"),
        Style::default().fg(Color::DarkGray),
    ));

    let mut lines = Vec::with_capacity(5);
    for row in 0..3 {
        if row > 0 {
            lines.push(divider.clone());
        }
        lines.push(board_row(board, cursor, row));
    }

    let grid = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(grid, center_rect(area, (CELL_WIDTH * 3 + 2) as u16, 5));
}

/// One text line holding the three cells of `row`.
fn board_row(board: &Board, cursor: Position, row: usize) -> Line<'static> {
    let mut spans = Vec::with_capacity(5);
    for pos in (0..3).filter_map(|col| Position::new(row, col)) {
        if pos.col() > 0 {
            spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
        }
        spans.push(cell(board.get(pos), pos, pos == cursor));
    }
    Line::from(spans)
}

/// Empty squares show their keypad number; the cursor is drawn inverted.
fn cell(square: Square, pos: Position, selected: bool) -> Span<'static> {
    let (text, style) = match square {
        Square::Empty => (
            (pos.to_index() + 1).to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Occupied(mark) => (mark.to_string(), mark_style(mark)),
    };
    let style = if selected {
        style.bg(Color::White).fg(Color::Black)
    } else {
        style
    };
    Span::styled(format!("{:^width$}", text, width = CELL_WIDTH), style)
}

fn mark_style(mark: Mark) -> Style {
    let color = match mark {
        Mark::X => Color::Blue,
        Mark::O => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .split(vertical[1])[1]
}
