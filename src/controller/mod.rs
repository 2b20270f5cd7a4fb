//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input
//! and coordinates between the model and view. It is organized into
//! submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `playback`: Playback control methods and the buffering wait
//! - `media_events`: Media element event listener

mod input;
mod playback;
mod media_events;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::model::AppModel;

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>) -> Self {
        Self { model }
    }
}
