//! Host media-element abstraction
//!
//! The track sequencer never talks to the network directly; it drives a
//! `MediaElement` and reacts to the `MediaEvent` stream the element emits.
//! `HttpMediaElement` is the production implementation: it streams the source
//! URL in a background task, models readiness from the buffered byte count and
//! advances the playback position on a timer. No audio is decoded; duration is
//! estimated from `Content-Length` at a nominal 128 kbit/s.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Nominal MP3 byte rate used to translate byte counts into seconds.
const NOMINAL_BYTES_PER_SEC: f64 = 16_000.0;

/// Buffered lead (seconds) required before the element reports it can play.
const PLAYABLE_AHEAD_SECS: f64 = 3.0;

/// Position advance cadence while playing.
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Events emitted by a media element as its source loads and plays.
#[derive(Clone, Debug, PartialEq)]
pub enum MediaEvent {
    /// A new source started loading; nothing is known about it yet.
    LoadStart,
    /// Enough is known to report a duration (seconds).
    LoadedMetadata { duration: f64 },
    /// First data for the current source arrived.
    LoadedData,
    /// Playback can begin without an immediate stall.
    CanPlay,
    /// The whole source is buffered.
    CanPlayThrough,
    /// Playback ran out of buffered data (network stall).
    Waiting,
    /// The element is actively producing output.
    Playing,
    /// Playback position moved (seconds).
    TimeUpdate { position: f64 },
    /// The current source played to its end.
    Ended,
}

/// A media event tagged with the load generation of the source it describes.
///
/// The channel is unbounded, so events for a source can still be queued after
/// the element has been re-loaded with the next one. The tag lets consumers
/// drop those stragglers instead of applying them to the new session.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementEvent {
    pub generation: u64,
    pub event: MediaEvent,
}

/// How much of the current source is available, lowest to highest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReadyState {
    Empty,
    Metadata,
    CurrentData,
    FutureData,
    EnoughData,
}

impl Default for ReadyState {
    fn default() -> Self {
        ReadyState::Empty
    }
}

/// The seam between the track sequencer and whatever produces sound.
///
/// Methods are synchronous and cheap; long-running work happens in background
/// tasks owned by the implementation.
pub trait MediaElement: Send {
    /// Attach a source URL. Takes effect on the next `load`.
    fn set_source(&mut self, url: &str);
    /// Begin (re)loading the attached source, discarding any previous load.
    fn load(&mut self);
    /// Request playback. May be rejected by the host.
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self);
    /// Move the playback cursor to `position` seconds.
    fn seek(&mut self, position: f64);
    /// Load generation of the current source; bumped by every `load`.
    fn generation(&self) -> u64;
    fn ready_state(&self) -> ReadyState;
}

/// Create the event channel a media element reports through.
pub fn event_channel() -> (UnboundedSender<ElementEvent>, UnboundedReceiver<ElementEvent>) {
    mpsc::unbounded_channel()
}

#[derive(Default)]
struct ElementState {
    ready: ReadyState,
    duration: Option<f64>,
    position: f64,
    buffered_secs: f64,
    download_complete: bool,
    playing: bool,
    stalled: bool,
    /// Bumped on every `load`; stale background tasks see the mismatch and exit.
    generation: u64,
}

/// Media element that streams its source over HTTP.
pub struct HttpMediaElement {
    source: Option<String>,
    state: Arc<Mutex<ElementState>>,
    events: UnboundedSender<ElementEvent>,
    download_task: Option<JoinHandle<()>>,
    tick_task: Option<JoinHandle<()>>,
}

impl HttpMediaElement {
    pub fn new(events: UnboundedSender<ElementEvent>) -> Self {
        Self {
            source: None,
            state: Arc::new(Mutex::new(ElementState::default())),
            events,
            download_task: None,
            tick_task: None,
        }
    }

    fn abort_tasks(&mut self) {
        if let Some(task) = self.download_task.take() {
            task.abort();
        }
        if let Some(task) = self.tick_task.take() {
            task.abort();
        }
    }

    fn emit(events: &UnboundedSender<ElementEvent>, generation: u64, event: MediaEvent) {
        let _ = events.send(ElementEvent { generation, event });
    }

    /// Background download: stream the source, counting buffered seconds and
    /// raising readiness as data arrives. Runs until the stream ends, the
    /// element is reloaded, or the connection drops. A stalled network simply
    /// leaves the element buffering; there is no timeout.
    async fn run_download(
        url: String,
        state: Arc<Mutex<ElementState>>,
        events: UnboundedSender<ElementEvent>,
        generation: u64,
    ) {
        let client = reqwest::Client::new();

        let mut response = match client.get(&url).send().await {
            Ok(resp) => match resp.error_for_status() {
                Ok(resp) => resp,
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "media source returned error status");
                    return;
                }
            },
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "media source request failed");
                return;
            }
        };

        if let Some(length) = response.content_length() {
            let duration = length as f64 / NOMINAL_BYTES_PER_SEC;
            let mut guard = state.lock().unwrap();
            if guard.generation != generation {
                return;
            }
            guard.duration = Some(duration);
            guard.ready = guard.ready.max(ReadyState::Metadata);
            drop(guard);
            Self::emit(&events, generation, MediaEvent::LoadedMetadata { duration });
        }

        let mut received_any = false;
        loop {
            let chunk = match response.chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break, // end of stream
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "media stream interrupted");
                    return;
                }
            };

            let mut guard = state.lock().unwrap();
            if guard.generation != generation {
                return;
            }
            guard.buffered_secs += chunk.len() as f64 / NOMINAL_BYTES_PER_SEC;

            if !received_any {
                received_any = true;
                guard.ready = guard.ready.max(ReadyState::CurrentData);
                drop(guard);
                Self::emit(&events, generation, MediaEvent::LoadedData);
                continue;
            }

            if guard.ready < ReadyState::FutureData
                && guard.buffered_secs >= guard.position + PLAYABLE_AHEAD_SECS
            {
                guard.ready = ReadyState::FutureData;
                drop(guard);
                Self::emit(&events, generation, MediaEvent::CanPlay);
            }
        }

        let mut guard = state.lock().unwrap();
        if guard.generation != generation {
            return;
        }
        guard.download_complete = true;
        guard.ready = ReadyState::EnoughData;
        // Servers that omit Content-Length never produced a metadata event;
        // the full byte count is the best duration available.
        let late_duration = if guard.duration.is_none() {
            guard.duration = Some(guard.buffered_secs);
            guard.duration
        } else {
            None
        };
        let was_ready = received_any;
        drop(guard);

        if let Some(duration) = late_duration {
            Self::emit(&events, generation, MediaEvent::LoadedMetadata { duration });
        }
        if was_ready {
            Self::emit(&events, generation, MediaEvent::CanPlay);
        }
        Self::emit(&events, generation, MediaEvent::CanPlayThrough);
    }

    /// Position clock: advances while playing, reports stalls and end of track.
    async fn run_ticks(
        state: Arc<Mutex<ElementState>>,
        events: UnboundedSender<ElementEvent>,
        generation: u64,
    ) {
        let mut interval = tokio::time::interval(TICK_INTERVAL);
        loop {
            interval.tick().await;

            let mut guard = state.lock().unwrap();
            if guard.generation != generation {
                return;
            }
            if !guard.playing {
                continue;
            }

            let step = TICK_INTERVAL.as_secs_f64();
            let next = guard.position + step;

            if let Some(duration) = guard.duration {
                if guard.download_complete && next >= duration {
                    guard.position = duration;
                    guard.playing = false;
                    drop(guard);
                    Self::emit(&events, generation, MediaEvent::TimeUpdate { position: duration });
                    Self::emit(&events, generation, MediaEvent::Ended);
                    continue;
                }
            }

            if !guard.download_complete && next > guard.buffered_secs {
                // Underrun: hold at the buffered edge until the download catches up.
                guard.position = guard.buffered_secs.max(guard.position);
                if !guard.stalled {
                    guard.stalled = true;
                    guard.ready = ReadyState::CurrentData;
                    drop(guard);
                    Self::emit(&events, generation, MediaEvent::Waiting);
                }
                continue;
            }

            guard.position = next;
            let resumed = guard.stalled;
            guard.stalled = false;
            if resumed {
                guard.ready = guard.ready.max(ReadyState::FutureData);
            }
            drop(guard);
            if resumed {
                Self::emit(&events, generation, MediaEvent::Playing);
            }
            Self::emit(&events, generation, MediaEvent::TimeUpdate { position: next });
        }
    }
}

impl MediaElement for HttpMediaElement {
    fn set_source(&mut self, url: &str) {
        self.source = Some(url.to_string());
    }

    fn load(&mut self) {
        self.abort_tasks();

        let generation = {
            let mut guard = self.state.lock().unwrap();
            let generation = guard.generation + 1;
            *guard = ElementState {
                generation,
                ..ElementState::default()
            };
            generation
        };

        Self::emit(&self.events, generation, MediaEvent::LoadStart);

        let Some(url) = self.source.clone() else {
            return;
        };

        self.download_task = Some(tokio::spawn(Self::run_download(
            url,
            self.state.clone(),
            self.events.clone(),
            generation,
        )));
        self.tick_task = Some(tokio::spawn(Self::run_ticks(
            self.state.clone(),
            self.events.clone(),
            generation,
        )));
    }

    fn play(&mut self) -> Result<()> {
        if self.source.is_none() {
            return Err(anyhow!("no source attached"));
        }
        let mut guard = self.state.lock().unwrap();
        if guard.ready == ReadyState::Empty {
            return Err(anyhow!("source has no data yet"));
        }
        guard.playing = true;
        let generation = guard.generation;
        drop(guard);
        Self::emit(&self.events, generation, MediaEvent::Playing);
        Ok(())
    }

    fn pause(&mut self) {
        self.state.lock().unwrap().playing = false;
    }

    fn seek(&mut self, position: f64) {
        let mut guard = self.state.lock().unwrap();
        let mut target = position.max(0.0);
        if let Some(duration) = guard.duration {
            target = target.min(duration);
        }
        guard.position = target;
        let generation = guard.generation;
        if !guard.download_complete && target > guard.buffered_secs {
            guard.stalled = true;
            guard.ready = ReadyState::CurrentData;
            drop(guard);
            Self::emit(&self.events, generation, MediaEvent::Waiting);
        } else {
            drop(guard);
        }
        Self::emit(&self.events, generation, MediaEvent::TimeUpdate { position: target });
    }

    fn generation(&self) -> u64 {
        self.state.lock().unwrap().generation
    }

    fn ready_state(&self) -> ReadyState {
        self.state.lock().unwrap().ready
    }
}

impl Drop for HttpMediaElement {
    fn drop(&mut self) {
        self.abort_tasks();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element() -> (HttpMediaElement, UnboundedReceiver<ElementEvent>) {
        let (tx, rx) = event_channel();
        (HttpMediaElement::new(tx), rx)
    }

    fn drain(rx: &mut UnboundedReceiver<ElementEvent>) -> Vec<MediaEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event.event);
        }
        events
    }

    #[test]
    fn play_is_rejected_without_source_or_data() {
        let (mut element, _rx) = element();
        assert!(element.play().is_err());

        // Source attached but nothing buffered yet.
        element.set_source("http://music.test/a.mp3");
        assert!(element.play().is_err());
        assert!(!element.state.lock().unwrap().playing);
    }

    #[test]
    fn play_succeeds_once_data_arrived() {
        let (mut element, mut rx) = element();
        element.set_source("http://music.test/a.mp3");
        element.state.lock().unwrap().ready = ReadyState::FutureData;

        assert!(element.play().is_ok());
        assert!(element.state.lock().unwrap().playing);
        assert!(drain(&mut rx).contains(&MediaEvent::Playing));
    }

    #[test]
    fn seek_clamps_to_track_bounds() {
        let (mut element, mut rx) = element();
        {
            let mut state = element.state.lock().unwrap();
            state.duration = Some(100.0);
            state.buffered_secs = 100.0;
            state.download_complete = true;
            state.ready = ReadyState::EnoughData;
        }

        element.seek(-5.0);
        assert_eq!(element.state.lock().unwrap().position, 0.0);
        element.seek(250.0);
        assert_eq!(element.state.lock().unwrap().position, 100.0);

        let events = drain(&mut rx);
        assert!(events.contains(&MediaEvent::TimeUpdate { position: 0.0 }));
        assert!(events.contains(&MediaEvent::TimeUpdate { position: 100.0 }));
        assert!(!events.contains(&MediaEvent::Waiting));
    }

    #[test]
    fn seek_past_buffered_edge_reports_waiting() {
        let (mut element, mut rx) = element();
        {
            let mut state = element.state.lock().unwrap();
            state.duration = Some(100.0);
            state.buffered_secs = 10.0;
            state.ready = ReadyState::FutureData;
        }

        element.seek(50.0);

        let state = element.state.lock().unwrap();
        assert!(state.stalled);
        assert_eq!(state.ready, ReadyState::CurrentData);
        drop(state);
        assert!(drain(&mut rx).contains(&MediaEvent::Waiting));
    }

    #[tokio::test]
    async fn load_resets_state_and_bumps_generation() {
        let (mut element, mut rx) = element();
        element.set_source("http://music.test/a.mp3");
        {
            let mut state = element.state.lock().unwrap();
            state.ready = ReadyState::EnoughData;
            state.position = 42.0;
            state.duration = Some(100.0);
            state.playing = true;
        }
        let before = element.generation();

        element.load();

        let state = element.state.lock().unwrap();
        assert_eq!(state.generation, before + 1);
        assert_eq!(state.ready, ReadyState::Empty);
        assert_eq!(state.position, 0.0);
        assert_eq!(state.duration, None);
        assert!(!state.playing);
        drop(state);

        // The start-of-load event carries the new generation.
        let first = rx.try_recv().unwrap();
        assert_eq!(first.generation, before + 1);
        assert_eq!(first.event, MediaEvent::LoadStart);
    }
}
