//! Core type definitions for the page shell
//!
//! Everything here is independent, uncoupled UI state: each toggle is read and
//! written by exactly one affordance and none of it feeds the sequencer.

use std::time::{Duration, Instant};

use ratatui::style::Color;

/// How long the copy-confirmation toast stays visible.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Selecting a link this far down the card shows the back-to-top affordance.
pub const BACK_TO_TOP_THRESHOLD: usize = 4;

/// Display language for the card's strings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
    Id,
    En,
}

impl Language {
    pub fn toggle(self) -> Self {
        match self {
            Language::Id => Language::En,
            Language::En => Language::Id,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::Id => "ID",
            Language::En => "EN",
        }
    }
}

/// Color theme for the card
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "🌙",
            Theme::Light => "☀",
        }
    }

    /// Accent used for borders, the progress gauge and highlights.
    pub fn accent(self) -> Color {
        match self {
            Theme::Dark => Color::Green,
            Theme::Light => Color::Yellow,
        }
    }
}

/// UI state for the page shell
#[derive(Clone)]
pub struct UiState {
    pub language: Language,
    pub theme: Theme,
    /// Flattened index into about + projects + contact links.
    pub selected_link: usize,
    pub show_share_modal: bool,
    pub share_selected: usize,
    pub show_qr_modal: bool,
    pub show_help_popup: bool,
    pub toast_message: Option<String>,
    pub toast_shown_at: Option<Instant>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            language: Language::Id,
            theme: Theme::Dark,
            selected_link: 0,
            show_share_modal: false,
            share_selected: 0,
            show_qr_modal: false,
            show_help_popup: false,
            toast_message: None,
            toast_shown_at: None,
        }
    }
}

impl UiState {
    pub fn show_back_to_top(&self) -> bool {
        self.selected_link > BACK_TO_TOP_THRESHOLD
    }
}
