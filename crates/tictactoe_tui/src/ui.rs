//! Stateless UI rendering.

use crate::app::{App, Focus};
use crate::config::TuiConfig;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use tictactoe_core::{Player, Position, Square, winning_line};

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App, config: &TuiConfig) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(9),    // Board + history
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    let title = Paragraph::new("Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    draw_board(frame, body[0], app, config);
    draw_history(frame, body[1], app);

    let status = match app.message() {
        Some(message) => format!("{} ({})", app.status_line(), message),
        None => app.status_line(),
    };
    let status = Paragraph::new(status)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[2]);

    let help = Paragraph::new(
        "arrows move · enter/space play · 1-9 play · tab history · n new · q quit",
    )
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App, config: &TuiConfig) {
    let board = app.history().current_board();
    let highlight = if *config.highlight_winning_line() {
        winning_line(board)
    } else {
        None
    };

    let mut lines = Vec::with_capacity(5);
    for row in 0..3 {
        if row > 0 {
            lines.push(Line::from(Span::styled(
                "───┼───┼───",
                Style::default().fg(Color::DarkGray),
            )));
        }
        let mut spans = Vec::with_capacity(5);
        for pos in Position::ALL.iter().copied().filter(|p| p.row() == row) {
            if pos.col() > 0 {
                spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
            }
            let winning = highlight.is_some_and(|line| line.contains(&pos));
            spans.push(cell_span(board.get(pos), pos, app, config, winning));
        }
        lines.push(Line::from(spans));
    }

    let border_style = if app.focus() == Focus::Board {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let block = Block::default()
        .title(format!("Step {}", app.history().step()))
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = center_rect(block.inner(area), 11, 5);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(lines), inner);
}

fn cell_span(
    square: Square,
    pos: Position,
    app: &App,
    config: &TuiConfig,
    winning: bool,
) -> Span<'static> {
    let (symbol, base_style) = match square {
        Square::Empty if *config.show_cell_numbers() => (
            format!(" {} ", pos.to_index() + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Empty => ("   ".to_string(), Style::default()),
        Square::Occupied(Player::X) => (
            " X ".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Player::O) => (
            " O ".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };

    let style = if app.focus() == Focus::Board && pos == app.cursor() {
        base_style.bg(Color::White).fg(Color::Black)
    } else if winning {
        base_style.bg(Color::Green)
    } else {
        base_style
    };
    Span::styled(symbol, style)
}

fn draw_history(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .history()
        .entries()
        .into_iter()
        .map(|entry| {
            let marker = if entry.is_current { "● " } else { "  " };
            let text = match entry.mov {
                Some(mov) => format!("{}{} ({})", marker, entry.label(), mov),
                None => format!("{}{}", marker, entry.label()),
            };
            let style = if entry.is_current {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(text).style(style)
        })
        .collect();

    let focused = app.focus() == Focus::History;
    let block = Block::default()
        .title("History")
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        });
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if focused {
        state.select(Some(app.selected_step()));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
