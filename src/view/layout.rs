//! Layout rendering (top bar, hint bar, card centering)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

use crate::config;
use crate::model::UiState;

/// Width the profile card is capped at on wide terminals.
const CARD_MAX_WIDTH: u16 = 64;

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),    // Marquee banner
            Constraint::Length(6), // Language toggle
            Constraint::Length(6), // Theme toggle
        ])
        .split(area);

    let strings = config::strings(ui_state.language);
    let accent = ui_state.theme.accent();

    let marquee = Paragraph::new(strings.marquee)
        .style(Style::default().fg(accent).add_modifier(Modifier::ITALIC))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(marquee, chunks[0]);

    let language = Paragraph::new(ui_state.language.label())
        .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL).title(" L "));
    frame.render_widget(language, chunks[1]);

    let theme = Paragraph::new(ui_state.theme.label())
        .style(Style::default().fg(accent))
        .block(Block::default().borders(Borders::ALL).title(" D "));
    frame.render_widget(theme, chunks[2]);
}

pub fn render_hint_bar(frame: &mut Frame, area: Rect, ui_state: &UiState) {
    let mut hints =
        " q quit · space play · n/p track · ←/→ seek · ↑/↓ links · c copy · s share · r qr · h help"
            .to_string();
    if ui_state.show_back_to_top() {
        hints.push_str(" · t top ↑");
    }

    let bar = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(bar, area);
}

/// Center the card horizontally, capping its width on wide terminals.
pub fn centered_card_area(area: Rect) -> Rect {
    let width = CARD_MAX_WIDTH.min(area.width);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(area);
    chunks[1]
}
