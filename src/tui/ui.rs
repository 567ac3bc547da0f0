//! Stateless UI rendering for the card table.

use super::app::App;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use strictly_memory::{BoardView, CardStatus, CardView, Summary};
use unicode_width::UnicodeWidthStr;

const CARD_WIDTH: u16 = 8;
const CARD_HEIGHT: u16 = 3;

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Moves and time
            Constraint::Min(CARD_HEIGHT),
            Constraint::Length(3), // Status
        ])
        .split(area);

    let title = Paragraph::new("Strictly Concentration")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    if let Some(board) = app.board() {
        draw_header(frame, chunks[1], board);
        draw_board(frame, chunks[2], app, board);
    }

    let status = Paragraph::new(vec![
        Line::from(Span::styled(
            app.status_message(),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(Span::styled(
            app.mode().help(),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(status, chunks[3]);

    if let Some(summary) = app.banner() {
        draw_win_popup(frame, area, summary);
    }

    if let Some(confetti) = app.confetti() {
        frame.render_widget(confetti, area);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, board: &BoardView) {
    let header = Line::from(vec![
        Span::raw("Moves: "),
        Span::styled(
            board.moves.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   Time: "),
        Span::styled(
            format!("{}s", board.elapsed_seconds),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("   Pairs: {}/{}", board.matched(), board.cards.len() / 2)),
    ]);
    frame.render_widget(Paragraph::new(header).alignment(Alignment::Center), area);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App, board: &BoardView) {
    let columns = app.columns().max(1);
    let rows = board.cards.len().div_ceil(columns);
    let width = CARD_WIDTH.saturating_mul(columns as u16);
    let height = CARD_HEIGHT.saturating_mul(rows as u16);
    let grid = center_rect(area, width, height);

    let dealt = app.dealt();
    for card in board.cards.iter().take(dealt) {
        let index = card.position.index();
        let x = grid.x + (index % columns) as u16 * CARD_WIDTH;
        let y = grid.y + (index / columns) as u16 * CARD_HEIGHT;
        let cell = Rect::new(x, y, CARD_WIDTH, CARD_HEIGHT).intersection(grid);
        if cell.is_empty() {
            continue;
        }
        draw_card(frame, cell, card, card.position == app.cursor());
    }
}

fn draw_card(frame: &mut Frame, area: Rect, card: &CardView, selected: bool) {
    let (face, base) = match (card.status, &card.symbol) {
        (CardStatus::FaceDown, _) | (_, None) => (String::new(), Style::default().bg(Color::Blue)),
        (CardStatus::FaceUp, Some(symbol)) => {
            (symbol.to_string(), Style::default().fg(Color::White))
        }
        (CardStatus::Matched, Some(symbol)) => (
            symbol.to_string(),
            Style::default().fg(Color::Black).bg(Color::Green),
        ),
    };

    let border = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if selected {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(border);

    let inner = area.width.saturating_sub(2) as usize;
    let paragraph = Paragraph::new(Line::from(center_face(&face, inner)))
        .style(base)
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Pads a face to the display width of the card interior.
///
/// Emoji are two columns wide, so padding goes by display width rather
/// than by `char` count.
fn center_face(face: &str, width: usize) -> String {
    let used = face.width();
    if used >= width {
        return face.to_string();
    }
    let left = (width - used) / 2;
    let right = width - used - left;
    format!("{}{}{}", " ".repeat(left), face, " ".repeat(right))
}

fn draw_win_popup(frame: &mut Frame, area: Rect, summary: Summary) {
    let popup = center_rect(area, 36, 8);
    frame.render_widget(Clear, popup);

    let text = vec![
        Line::from(Span::styled(
            "Congratulations! 🎉",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("You completed the game in:"),
        Line::from(Span::styled(
            summary.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press r to play again",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(paragraph, popup);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::GameEvent;
    use crate::settings::Timing;
    use crate::tui::mode::PlayMode;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Instant;
    use strictly_memory::{Deck, Position, Session, Symbol};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app_with(session: &Session) -> App {
        let mut app = App::new(PlayMode::Human, Timing::default(), 2, Instant::now());
        app.handle_event(GameEvent::Board(session.view()));
        app.on_frame(Instant::now() + std::time::Duration::from_secs(1));
        app
    }

    #[test]
    fn test_center_face_uses_display_width() {
        assert_eq!(center_face("ab", 6), "  ab  ");
        assert_eq!(center_face("🍎", 6).width(), 6);
        assert_eq!(center_face("toolong", 3), "toolong");
    }

    #[test]
    fn test_face_down_cards_hide_symbols() {
        let layout = ["@", "$", "@", "$"].into_iter().map(Symbol::from).collect();
        let session = Session::with_deck(Deck::from_layout(layout).unwrap());
        let screen = render(&app_with(&session));
        assert!(screen.contains("Moves: 0"));
        assert!(screen.contains("Enter/Space flip"));
        assert!(!screen.contains("@"));
    }

    #[test]
    fn test_revealed_card_shows_symbol() {
        let layout = ["@", "$", "@", "$"].into_iter().map(Symbol::from).collect();
        let mut session = Session::with_deck(Deck::from_layout(layout).unwrap());
        session.activate(Position::new(0));
        let screen = render(&app_with(&session));
        assert!(screen.contains("@"));
        assert!(!screen.contains("$"));
    }
}
