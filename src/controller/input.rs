//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::share;

use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let mut model = self.model.lock().await;

        // Handle help popup (blocks everything else while open)
        if model.ui_state().show_help_popup {
            if let KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H') = key.code {
                model.toggle_help_popup();
            }
            return Ok(());
        }

        // Handle share modal
        if model.ui_state().show_share_modal {
            match key.code {
                KeyCode::Up => model.share_move_up(),
                KeyCode::Down => model.share_move_down(share::share_targets().len()),
                KeyCode::Enter => {
                    let targets = share::share_targets();
                    let selected = &targets[model.ui_state().share_selected];
                    tracing::info!(platform = selected.name, "share target chosen");
                    if share::copy_to_clipboard(&selected.url) {
                        let toast = model.strings().copied_toast.to_string();
                        model.show_toast(toast);
                    }
                    model.toggle_share_modal();
                }
                KeyCode::Esc | KeyCode::Char('s') | KeyCode::Char('S') => {
                    model.toggle_share_modal();
                }
                _ => {}
            }
            return Ok(());
        }

        // Handle QR modal
        if model.ui_state().show_qr_modal {
            match key.code {
                KeyCode::Enter => {
                    // Copy the high-resolution download URL.
                    if share::copy_to_clipboard(&share::qr_image_url(500)) {
                        let toast = model.strings().copied_toast.to_string();
                        model.show_toast(toast);
                    }
                    model.toggle_qr_modal();
                }
                KeyCode::Esc | KeyCode::Char('r') | KeyCode::Char('R') => {
                    model.toggle_qr_modal();
                }
                _ => {}
            }
            return Ok(());
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit();
            }
            // Link selection (the card scrolls to keep it visible)
            KeyCode::Up => model.move_selection_up(),
            KeyCode::Down => model.move_selection_down(),
            KeyCode::PageUp => model.move_selection_by(-5),
            KeyCode::PageDown => model.move_selection_by(5),
            KeyCode::Home | KeyCode::Char('t') | KeyCode::Char('T') => {
                model.selection_home();
            }
            // Copy the selected link
            KeyCode::Enter | KeyCode::Char('c') | KeyCode::Char('C') => {
                let href = model.selected_link().href;
                tracing::debug!(href, "copying selected link");
                if share::copy_to_clipboard(href) {
                    let toast = model.strings().copied_toast.to_string();
                    model.show_toast(toast);
                }
            }
            // Playback
            KeyCode::Char(' ') => {
                drop(model);
                self.toggle_playback().await;
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                drop(model);
                self.next_track().await;
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                drop(model);
                self.previous_track().await;
            }
            KeyCode::Left => {
                drop(model);
                self.seek_step(false).await;
            }
            KeyCode::Right => {
                drop(model);
                self.seek_step(true).await;
            }
            // Shell toggles
            KeyCode::Char('s') | KeyCode::Char('S') => model.toggle_share_modal(),
            KeyCode::Char('r') | KeyCode::Char('R') => model.toggle_qr_modal(),
            KeyCode::Char('d') | KeyCode::Char('D') => model.toggle_theme(),
            KeyCode::Char('l') | KeyCode::Char('L') => model.toggle_language(),
            KeyCode::Char('h') | KeyCode::Char('H') => model.toggle_help_popup(),
            _ => {}
        }
        Ok(())
    }
}
