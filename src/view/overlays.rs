//! Overlay rendering (share modal, QR modal, help popup, toast)

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::config;
use crate::model::UiState;
use crate::share;

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(4));
    Rect {
        x: area.width.saturating_sub(popup_width) / 2,
        y: area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    }
}

pub fn render_share_modal(frame: &mut Frame, ui_state: &UiState) {
    let strings = config::strings(ui_state.language);
    let accent = ui_state.theme.accent();
    let targets = share::share_targets();

    let popup_area = centered_popup(frame.area(), 46, targets.len() as u16 + 4);
    frame.render_widget(Clear, popup_area);

    let mut items: Vec<ListItem> = vec![ListItem::new(Span::styled(
        strings.share_subtitle.to_string(),
        Style::default().fg(Color::DarkGray),
    ))];
    items.extend(targets.iter().enumerate().map(|(i, target)| {
        let style = if i == ui_state.share_selected {
            Style::default()
                .fg(Color::Black)
                .bg(accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        ListItem::new(format!("  {}", target.name)).style(style)
    }));

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent))
            .title(format!(" {} (↑↓ Enter Esc) ", strings.share_title))
            .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );

    // Offset by one for the subtitle row.
    let mut list_state = ListState::default();
    list_state.select(Some(ui_state.share_selected + 1));

    frame.render_stateful_widget(list, popup_area, &mut list_state);
}

pub fn render_qr_modal(frame: &mut Frame, ui_state: &UiState) {
    let strings = config::strings(ui_state.language);
    let accent = ui_state.theme.accent();

    let popup_area = centered_popup(frame.area(), 64, 8);
    frame.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from(Span::styled(
            strings.qr_subtitle.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            share::qr_image_url(250),
            Style::default().fg(Color::White),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("Enter: {} (500x500)", strings.download),
                Style::default().fg(accent),
            ),
            Span::raw("   "),
            Span::styled(
                format!("Esc: {}", strings.close),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];

    let qr_widget = Paragraph::new(lines)
        .wrap(ratatui::widgets::Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent))
                .title(format!(" {} ", strings.qr_title))
                .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(qr_widget, popup_area);
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    let keybindings = vec![
        ("", "── Navigation ──"),
        ("↑ / ↓", "Move link selection"),
        ("PgUp / PgDn", "Jump five links"),
        ("Home / T", "Back to top"),
        ("Enter / C", "Copy selected link"),
        ("", ""),
        ("", "── Playback ──"),
        ("Space", "Play / Pause"),
        ("N", "Next track"),
        ("P", "Previous track"),
        ("← / →", "Seek back / forward"),
        ("", ""),
        ("", "── Page ──"),
        ("S", "Share modal"),
        ("R", "QR code"),
        ("D", "Toggle theme"),
        ("L", "Toggle language"),
        ("", ""),
        ("", "── General ──"),
        ("H", "Toggle this help"),
        ("Q", "Quit"),
    ];

    let popup_width = 52;
    let popup_height = (keybindings.len() as u16 + 2).min(area.height.saturating_sub(4));

    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width) / 2,
        y: area.height.saturating_sub(popup_height) / 2,
        width: popup_width.min(area.width),
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>14}", key),
                        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}

/// Small confirmation popup near the bottom of the screen.
pub fn render_toast(frame: &mut Frame, ui_state: &UiState) {
    let Some(ref message) = ui_state.toast_message else {
        return;
    };
    let area = frame.area();
    let accent = ui_state.theme.accent();

    let popup_width = (message.chars().count() as u16 + 4).min(area.width.saturating_sub(4));
    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width) / 2,
        y: area.height.saturating_sub(5),
        width: popup_width,
        height: 3,
    };

    frame.render_widget(Clear, popup_area);

    let toast = Paragraph::new(message.to_string())
        .style(Style::default().fg(accent).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent))
                .style(Style::default().bg(Color::Black)),
        );

    frame.render_widget(toast, popup_area);
}
