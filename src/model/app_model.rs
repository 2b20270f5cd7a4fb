//! Main application model with state management

use std::time::Instant;

use crate::config::{self, LinkEntry, Strings};
use crate::media::HttpMediaElement;
use crate::model::sequencer::Sequencer;
use crate::model::types::{UiState, TOAST_DURATION};

/// All mutable application state, shared behind `Arc<tokio::sync::Mutex>`.
///
/// Every event handler locks the model, applies its transition and releases;
/// the single-threaded event model keeps each critical window short.
pub struct AppModel {
    pub sequencer: Sequencer<HttpMediaElement>,
    ui_state: UiState,
    should_quit: bool,
}

impl AppModel {
    pub fn new(sequencer: Sequencer<HttpMediaElement>) -> Self {
        Self {
            sequencer,
            ui_state: UiState::default(),
            should_quit: false,
        }
    }

    pub fn ui_state(&self) -> &UiState {
        &self.ui_state
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn set_should_quit(&mut self) {
        self.should_quit = true;
    }

    pub fn strings(&self) -> &'static Strings {
        config::strings(self.ui_state.language)
    }

    // ========================================================================
    // Independent shell toggles
    // ========================================================================

    pub fn toggle_language(&mut self) {
        self.ui_state.language = self.ui_state.language.toggle();
    }

    pub fn toggle_theme(&mut self) {
        self.ui_state.theme = self.ui_state.theme.toggle();
    }

    pub fn toggle_share_modal(&mut self) {
        self.ui_state.show_share_modal = !self.ui_state.show_share_modal;
        self.ui_state.share_selected = 0;
    }

    pub fn toggle_qr_modal(&mut self) {
        self.ui_state.show_qr_modal = !self.ui_state.show_qr_modal;
    }

    pub fn toggle_help_popup(&mut self) {
        self.ui_state.show_help_popup = !self.ui_state.show_help_popup;
    }

    pub fn share_move_up(&mut self) {
        if self.ui_state.share_selected > 0 {
            self.ui_state.share_selected -= 1;
        }
    }

    pub fn share_move_down(&mut self, count: usize) {
        if self.ui_state.share_selected + 1 < count {
            self.ui_state.share_selected += 1;
        }
    }

    // ========================================================================
    // Link selection
    // ========================================================================

    /// All link rows of the card in display order.
    pub fn link_count(&self) -> usize {
        config::ABOUT_LINKS.len() + config::PROJECT_LINKS.len() + config::CONTACT_LINKS.len()
    }

    pub fn selected_link(&self) -> &'static LinkEntry {
        let mut index = self.ui_state.selected_link;
        if index < config::ABOUT_LINKS.len() {
            return &config::ABOUT_LINKS[index];
        }
        index -= config::ABOUT_LINKS.len();
        if index < config::PROJECT_LINKS.len() {
            return &config::PROJECT_LINKS[index];
        }
        index -= config::PROJECT_LINKS.len();
        &config::CONTACT_LINKS[index.min(config::CONTACT_LINKS.len() - 1)]
    }

    pub fn move_selection_up(&mut self) {
        if self.ui_state.selected_link > 0 {
            self.ui_state.selected_link -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.ui_state.selected_link + 1 < self.link_count() {
            self.ui_state.selected_link += 1;
        }
    }

    pub fn move_selection_by(&mut self, delta: isize) {
        let count = self.link_count() as isize;
        let next = (self.ui_state.selected_link as isize + delta).clamp(0, count - 1);
        self.ui_state.selected_link = next as usize;
    }

    pub fn selection_home(&mut self) {
        self.ui_state.selected_link = 0;
    }

    // ========================================================================
    // Toast
    // ========================================================================

    pub fn show_toast(&mut self, message: String) {
        self.ui_state.toast_message = Some(message);
        self.ui_state.toast_shown_at = Some(Instant::now());
    }

    /// Clears the toast once it has been visible long enough. Called every
    /// draw iteration.
    pub fn auto_clear_toast(&mut self) {
        if let Some(shown_at) = self.ui_state.toast_shown_at {
            if shown_at.elapsed() >= TOAST_DURATION {
                self.ui_state.toast_message = None;
                self.ui_state.toast_shown_at = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media;
    use crate::model::types::{Language, Theme};

    fn model() -> AppModel {
        let (tx, _rx) = media::event_channel();
        let sequencer = Sequencer::new(
            HttpMediaElement::new(tx.clone()),
            HttpMediaElement::new(tx.clone()),
            HttpMediaElement::new(tx),
        );
        AppModel::new(sequencer)
    }

    #[test]
    fn toggles_are_independent() {
        let mut model = model();
        assert_eq!(model.ui_state().language, Language::Id);
        assert_eq!(model.ui_state().theme, Theme::Dark);

        model.toggle_language();
        model.toggle_theme();
        assert_eq!(model.ui_state().language, Language::En);
        assert_eq!(model.ui_state().theme, Theme::Light);

        model.toggle_language();
        assert_eq!(model.ui_state().language, Language::Id);
        // Language round trip leaves the theme alone.
        assert_eq!(model.ui_state().theme, Theme::Light);
    }

    #[test]
    fn link_selection_stays_in_bounds() {
        let mut model = model();
        model.move_selection_up();
        assert_eq!(model.ui_state().selected_link, 0);

        model.move_selection_by(1000);
        assert_eq!(model.ui_state().selected_link, model.link_count() - 1);
        model.move_selection_down();
        assert_eq!(model.ui_state().selected_link, model.link_count() - 1);

        model.selection_home();
        assert_eq!(model.ui_state().selected_link, 0);
        assert_eq!(model.selected_link().title, crate::config::ABOUT_LINKS[0].title);
    }

    #[test]
    fn toast_is_set_and_not_cleared_early() {
        let mut model = model();
        model.show_toast("Link copied!".to_string());
        model.auto_clear_toast();
        assert_eq!(model.ui_state().toast_message.as_deref(), Some("Link copied!"));
    }
}
