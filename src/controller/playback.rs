//! Playback control methods

use std::time::Duration;

use crate::model::{PlayAttempt, PollStep};

use super::AppController;

/// Cadence of the buffering-then-play readiness poll.
const BUFFER_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Seek step issued per arrow key press, as a fraction of the track.
const SEEK_STEP_FRACTION: f64 = 0.05;

impl AppController {
    pub async fn toggle_playback(&self) {
        let mut model = self.model.lock().await;
        match model.sequencer.play_pause() {
            PlayAttempt::Buffering(generation) => {
                tracing::debug!(generation, "not enough data, starting buffering wait");
                drop(model);
                self.spawn_buffering_wait(generation);
            }
            outcome => {
                tracing::debug!(?outcome, "play/pause handled");
            }
        }
    }

    /// Poll the element's readiness until the pending play can be issued.
    ///
    /// The loop self-terminates once the sequencer reports anything but
    /// `NotReady`: started, rejected, superseded by a newer `play_pause`, or
    /// application shutdown. A stalled network keeps it polling indefinitely,
    /// mirroring the indefinite buffering state the player shows.
    fn spawn_buffering_wait(&self, generation: u64) {
        let model = self.model.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(BUFFER_POLL_INTERVAL);
            loop {
                interval.tick().await;
                let mut model = model.lock().await;
                if model.should_quit() {
                    break;
                }
                match model.sequencer.poll_buffering(generation) {
                    PollStep::NotReady => continue,
                    step => {
                        tracing::debug!(generation, ?step, "buffering wait finished");
                        break;
                    }
                }
            }
        });
    }

    pub async fn next_track(&self) {
        tracing::debug!("skipping to next track");
        self.model.lock().await.sequencer.next();
    }

    pub async fn previous_track(&self) {
        tracing::debug!("skipping to previous track");
        self.model.lock().await.sequencer.previous();
    }

    /// Nudge the playback cursor by one step of the progress track's width.
    pub async fn seek_step(&self, forward: bool) {
        let mut model = self.model.lock().await;
        let Some(info) = model.sequencer.snapshot() else {
            return;
        };
        let Some(duration) = info.duration else {
            return;
        };
        if duration <= 0.0 {
            return;
        }
        let delta = if forward {
            SEEK_STEP_FRACTION
        } else {
            -SEEK_STEP_FRACTION
        };
        let fraction = (info.position / duration + delta).clamp(0.0, 1.0);
        model.sequencer.seek_fraction(fraction);
    }
}
