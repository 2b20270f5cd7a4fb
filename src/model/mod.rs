//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the
//! application. It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (language, theme, UI state)
//! - `playlist`: Track types and the playlist source
//! - `sequencer`: The track sequencer state machine
//! - `app_model`: Main application model with state management methods

mod types;
mod playlist;
mod sequencer;
mod app_model;

// Re-export all public types for convenient access
pub use types::{Language, Theme, UiState};

pub use playlist::{Playlist, PlaylistSource, Track};

pub use sequencer::{PlayAttempt, PlayerInfo, PollStep, Readiness, Sequencer};

pub use app_model::AppModel;
