//! Stateless rendering of the memory game.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use strictly_memory::{CardState, Face};

use super::app::App;
use crate::terminal_display::TerminalDisplay;

const CELL_HEIGHT: u16 = 3;
const CELEBRATION_COLORS: [Color; 3] = [Color::Yellow, Color::Magenta, Color::Cyan];
const HELP: &str =
    "arrows/hjkl move  enter/space flip  s start/pause  r reset  ? hint  1/2/3 difficulty  q quit";

/// Draws the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let display = app.controller().display();
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Counters
            Constraint::Min(9),    // Board
            Constraint::Length(3), // Status
            Constraint::Length(1), // Help
        ])
        .split(area);

    draw_title(frame, chunks[0], app, display);
    draw_counters(frame, chunks[1], display);
    draw_board(frame, chunks[2], display, app.cursor());

    let status = Paragraph::new(display.status())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, chunks[3]);

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

fn draw_title(frame: &mut Frame, area: Rect, app: &App, display: &TerminalDisplay) {
    let frames = display.celebration_frames();
    let (text, color) = if frames > 0 {
        let color = CELEBRATION_COLORS[usize::from(frames / 4) % CELEBRATION_COLORS.len()];
        ("🎉  You won!  🎉".to_string(), color)
    } else {
        (format!("Strictly Memory - {}", app.difficulty()), Color::Cyan)
    };

    let title = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, area);
}

fn draw_counters(frame: &mut Frame, area: Rect, display: &TerminalDisplay) {
    let counters = display.counters();
    let text = format!(
        "Moves: {}   Matches: {}   Score: {}   Time: {}s   [s] {}",
        counters.moves,
        counters.matches,
        counters.score,
        counters.elapsed_seconds,
        display.label()
    );
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_board(frame: &mut Frame, area: Rect, display: &TerminalDisplay, cursor: usize) {
    let (rows, cols) = (display.rows(), display.cols());
    if rows == 0 || cols == 0 {
        return;
    }

    // Face plus two cells of padding on each side plus borders.
    let cell_width = u16::try_from(display.face_width() + 6).unwrap_or(8);
    let width = cell_width.saturating_mul(cols as u16);
    let height = CELL_HEIGHT.saturating_mul(rows as u16);
    let board_area = center_rect(area, width, height);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CELL_HEIGHT); rows])
        .split(board_area);

    for (row, row_area) in row_areas.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(cell_width); cols])
            .split(*row_area);
        for (col, cell_area) in cells.iter().enumerate() {
            let index = row * cols + col;
            draw_cell(frame, *cell_area, display, index, index == cursor);
        }
    }
}

fn draw_cell(
    frame: &mut Frame,
    area: Rect,
    display: &TerminalDisplay,
    index: usize,
    selected: bool,
) {
    let Some((face, state)) = display.card(index) else {
        return;
    };

    let face_style = match (face, state) {
        (Face::Hidden, _) => Style::default().fg(Color::DarkGray),
        (Face::Shown(_), CardState::Matched) => Style::default().fg(Color::Green),
        (Face::Shown(_), CardState::Flipped) => Style::default().add_modifier(Modifier::BOLD),
        // Revealed by a hint.
        (Face::Shown(_), CardState::Hidden) => Style::default().fg(Color::Gray),
    };
    let border_style = match (selected, state) {
        (true, _) => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        (false, CardState::Matched) => Style::default().fg(Color::Green),
        (false, CardState::Flipped) => Style::default().fg(Color::Yellow),
        (false, CardState::Hidden) => Style::default().fg(Color::DarkGray),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    let face_style = if selected {
        face_style.bg(Color::White).fg(Color::Black)
    } else {
        face_style
    };
    let paragraph = Paragraph::new(Line::from(Span::styled(face.to_string(), face_style)))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}
