//! Music player bar rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::config;
use crate::model::{PlayerInfo, Readiness, UiState};

use super::utils::{format_time, truncate_string};

pub fn render_player(frame: &mut Frame, area: Rect, player: &Option<PlayerInfo>, ui_state: &UiState) {
    let strings = config::strings(ui_state.language);
    let accent = ui_state.theme.accent();

    let Some(info) = player else {
        // Playlist still being fetched (or empty after a failed fetch).
        let placeholder = Paragraph::new(strings.loading_text)
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", strings.music_section)),
            );
        frame.render_widget(placeholder, area);
        return;
    };

    let state_glyph = match info.readiness {
        Readiness::Loading | Readiness::Buffering => "⏳",
        Readiness::Ready if info.is_playing => "▶",
        Readiness::Ready => "⏸",
    };
    let status_text = format!(
        " {} {} | {} ({}/{})",
        state_glyph,
        truncate_string(&info.title, 24),
        truncate_string(&info.artist, 20),
        info.track_number,
        info.track_count,
    );

    let time_str = match info.duration {
        Some(duration) => format!("{} / {}", format_time(info.position), format_time(duration)),
        None => format!("{} / --:--", format_time(info.position)),
    };

    let progress_ratio = match info.duration {
        Some(duration) if duration > 0.0 => (info.position / duration).clamp(0.0, 1.0),
        _ => 0.0,
    };

    let controls_info = " space | n/p | ←/→ ";

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(status_text)
                .title_bottom(Line::from(controls_info).right_aligned()),
        )
        .gauge_style(Style::default().fg(accent))
        .ratio(progress_ratio)
        .label(time_str);

    frame.render_widget(gauge, area);
}
