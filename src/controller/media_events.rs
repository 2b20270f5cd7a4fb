//! Media element event listener

use tokio::sync::mpsc::UnboundedReceiver;

use crate::media::{ElementEvent, MediaEvent};

use super::AppController;

impl AppController {
    /// Forward the active element's event stream into the sequencer.
    ///
    /// Runs for the life of the mounted player; exits when the channel closes
    /// or the application is shutting down, so no stale callback can touch a
    /// torn-down session. Events carry their load generation; the sequencer
    /// drops the ones a track change has since superseded.
    pub fn start_media_event_listener(&self, mut events: UnboundedReceiver<ElementEvent>) {
        let model = self.model.clone();
        tracing::info!("starting media event listener");

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let mut model = model.lock().await;
                if model.should_quit() {
                    tracing::debug!("media event listener shutting down");
                    break;
                }
                match &event.event {
                    MediaEvent::TimeUpdate { .. } => {
                        tracing::trace!(?event, "media event")
                    }
                    _ => tracing::debug!(?event, "media event"),
                }
                model.sequencer.handle_media_event(event);
            }
        });
    }
}
