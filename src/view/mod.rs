//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Main layout structure (top bar, hint bar, card centering)
//! - `content`: Profile card rendering
//! - `player`: Music player bar rendering
//! - `overlays`: Modal overlays (share, QR code, help, toast)

mod utils;
mod layout;
mod content;
mod player;
mod overlays;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::model::{PlayerInfo, UiState};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, player: &Option<PlayerInfo>, ui_state: &UiState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Marquee banner + toggles
                Constraint::Min(0),    // Profile card
                Constraint::Length(3), // Music player bar
                Constraint::Length(1), // Keybinding hints
            ])
            .split(frame.area());

        // Top bar: marquee + language/theme toggles
        layout::render_top_bar(frame, chunks[0], ui_state);

        // Middle: the centered profile card
        let card_area = layout::centered_card_area(chunks[1]);
        content::render_card(frame, card_area, ui_state);

        // Player bar with track info and progress
        player::render_player(frame, chunks[2], player, ui_state);

        // Hint bar
        layout::render_hint_bar(frame, chunks[3], ui_state);

        // Share modal overlay (if open)
        if ui_state.show_share_modal {
            overlays::render_share_modal(frame, ui_state);
        }

        // QR code overlay (if open)
        if ui_state.show_qr_modal {
            overlays::render_qr_modal(frame, ui_state);
        }

        // Help popup overlay (if open)
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }

        // Copy confirmation toast (if active)
        if ui_state.toast_message.is_some() {
            overlays::render_toast(frame, ui_state);
        }
    }
}
