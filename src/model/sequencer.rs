//! Track sequencer - the playback state machine
//!
//! The sequencer exclusively owns the playback session (current index, play
//! intent, position, duration, readiness, resume intent) and drives the active
//! media element. Media events feed in through `handle_media_event`; user
//! intents arrive from the controller. Elements sit behind the `MediaElement`
//! trait so every transition is testable with a scripted fake.
//!
//! Besides the active element the sequencer keeps two preload elements primed
//! with the adjacent tracks so skips in either direction start with warm
//! buffers. Priming is a hint only; its failures never touch the active track.

use crate::media::{ElementEvent, MediaElement, MediaEvent, ReadyState};
use crate::model::playlist::{Playlist, Track};

/// Whether the current track has enough buffered data to play without stalling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
    /// Fresh source, nothing known yet.
    Loading,
    /// Playback is wanted or was interrupted and data is still arriving.
    Buffering,
    /// Enough data to (keep) playing.
    Ready,
}

/// Per-mount playback state, owned exclusively by the sequencer.
#[derive(Clone, Debug)]
pub struct PlaybackSession {
    pub current_index: usize,
    pub is_playing: bool,
    /// Seconds into the current track.
    pub position: f64,
    /// Known only after the current track's metadata loads.
    pub duration: Option<f64>,
    pub readiness: Readiness,
    /// One-shot "was playing before this track change" flag, consumed on the
    /// first readiness transition to `Ready`.
    resume_intent: bool,
    /// Bumped by every `play_pause`; a pending buffering wait carrying a stale
    /// generation is superseded and exits without touching the session.
    poll_generation: u64,
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self {
            current_index: 0,
            is_playing: false,
            position: 0.0,
            duration: None,
            readiness: Readiness::Loading,
            resume_intent: false,
            poll_generation: 0,
        }
    }
}

/// Outcome of a `play_pause` intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayAttempt {
    /// Nothing to play (empty playlist).
    NoTrack,
    /// Was playing; pause issued (always succeeds).
    Paused,
    /// Element was ready; play issued and accepted.
    Playing,
    /// Element was ready but the host rejected the play request. Non-fatal.
    Rejected,
    /// Not enough data yet; the caller should poll `poll_buffering` with this
    /// generation until it stops returning `NotReady`.
    Buffering(u64),
}

/// One step of the buffering-then-play protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollStep {
    /// Still waiting for data; poll again.
    NotReady,
    /// Ready; play issued and accepted.
    Started,
    /// Ready; play issued and rejected. The wait is over either way.
    Rejected,
    /// A later `play_pause` superseded this wait.
    Superseded,
}

/// Snapshot of sequencer state for rendering.
#[derive(Clone, Debug)]
pub struct PlayerInfo {
    pub title: String,
    pub artist: String,
    pub album_art_url: String,
    /// 1-based position in the playlist.
    pub track_number: usize,
    pub track_count: usize,
    pub position: f64,
    pub duration: Option<f64>,
    pub is_playing: bool,
    pub readiness: Readiness,
}

pub struct Sequencer<M: MediaElement> {
    playlist: Playlist,
    session: PlaybackSession,
    element: M,
    preload_next: M,
    preload_prev: M,
}

impl<M: MediaElement> Sequencer<M> {
    pub fn new(element: M, preload_next: M, preload_prev: M) -> Self {
        Self {
            playlist: Playlist::new(),
            session: PlaybackSession::default(),
            element,
            preload_next,
            preload_prev,
        }
    }

    /// Install a playlist and point the active element at its first track.
    ///
    /// An empty playlist is a valid terminal state: the player card keeps its
    /// loading placeholder and every operation becomes a no-op.
    pub fn load(&mut self, playlist: Playlist) {
        self.playlist = playlist;
        self.session = PlaybackSession::default();
        if self.playlist.is_empty() {
            tracing::warn!("playlist is empty, player stays in placeholder state");
            return;
        }
        tracing::info!(tracks = self.playlist.len(), "playlist installed");
        self.attach_current();
    }

    pub fn is_empty(&self) -> bool {
        self.playlist.is_empty()
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.get(self.session.current_index)
    }

    pub fn snapshot(&self) -> Option<PlayerInfo> {
        let track = self.current_track()?;
        Some(PlayerInfo {
            title: track.title.clone(),
            artist: track.artist.clone(),
            album_art_url: track.album_art_url.clone(),
            track_number: self.session.current_index + 1,
            track_count: self.playlist.len(),
            position: self.session.position,
            duration: self.session.duration,
            is_playing: self.session.is_playing,
            readiness: self.session.readiness,
        })
    }

    /// Toggle playback intent.
    ///
    /// Pausing is synchronous and always succeeds. Starting plays immediately
    /// when the element has enough data, otherwise the sequencer enters
    /// buffering and hands the caller a generation token for the poll loop.
    /// Exactly one play attempt happens per user intent; only the readiness
    /// check is retried.
    pub fn play_pause(&mut self) -> PlayAttempt {
        if self.playlist.is_empty() {
            return PlayAttempt::NoTrack;
        }

        // Any pending buffering wait is superseded by this intent.
        self.session.poll_generation += 1;

        if self.session.is_playing {
            self.element.pause();
            self.session.is_playing = false;
            return PlayAttempt::Paused;
        }

        if self.session.readiness == Readiness::Ready
            || self.element.ready_state() >= ReadyState::FutureData
        {
            self.session.readiness = Readiness::Ready;
            return self.attempt_play();
        }

        self.session.readiness = Readiness::Buffering;
        PlayAttempt::Buffering(self.session.poll_generation)
    }

    /// One step of the buffering-then-play protocol. Polled on a short fixed
    /// interval by the controller until it returns anything but `NotReady`.
    pub fn poll_buffering(&mut self, generation: u64) -> PollStep {
        if generation != self.session.poll_generation {
            return PollStep::Superseded;
        }
        if self.element.ready_state() < ReadyState::FutureData {
            return PollStep::NotReady;
        }
        self.session.readiness = Readiness::Ready;
        match self.attempt_play() {
            PlayAttempt::Playing => PollStep::Started,
            _ => PollStep::Rejected,
        }
    }

    /// Seek to a fraction of the progress track's width.
    pub fn seek_fraction(&mut self, fraction: f64) {
        let Some(duration) = self.session.duration else {
            return;
        };
        if self.playlist.is_empty() {
            return;
        }
        let target = fraction.clamp(0.0, 1.0) * duration;
        self.session.position = target;
        self.element.seek(target);
    }

    /// Skip forward, wrapping modulo playlist length. Playback does not start
    /// here; if the track was sounding, the resume intent re-starts it once
    /// the new track becomes ready.
    pub fn next(&mut self) {
        if self.playlist.is_empty() {
            return;
        }
        self.session.resume_intent = self.session.is_playing;
        self.session.current_index = (self.session.current_index + 1) % self.playlist.len();
        self.change_track();
    }

    /// Skip backward, wrapping modulo playlist length.
    pub fn previous(&mut self) {
        if self.playlist.is_empty() {
            return;
        }
        let len = self.playlist.len();
        self.session.resume_intent = self.session.is_playing;
        self.session.current_index = (self.session.current_index + len - 1) % len;
        self.change_track();
    }

    /// Feed one media event into the state machine.
    ///
    /// Events are tagged with the load generation of the source that emitted
    /// them; an event still queued when a track change re-loads the element
    /// belongs to the old source and is dropped. Without the guard a stale
    /// ready event would consume the resume intent against an element that
    /// cannot play yet.
    pub fn handle_media_event(&mut self, event: ElementEvent) {
        if event.generation != self.element.generation() {
            tracing::trace!(
                generation = event.generation,
                current = self.element.generation(),
                "dropping media event from a superseded load"
            );
            return;
        }
        match event.event {
            MediaEvent::LoadStart => {
                self.session.readiness = Readiness::Loading;
            }
            MediaEvent::LoadedMetadata { duration } => {
                self.session.duration = Some(duration);
            }
            MediaEvent::LoadedData => {}
            MediaEvent::CanPlay | MediaEvent::CanPlayThrough => {
                self.session.readiness = Readiness::Ready;
                if self.session.resume_intent {
                    // Consumed exactly once, success or failure.
                    self.session.resume_intent = false;
                    self.attempt_play();
                }
            }
            MediaEvent::Waiting => {
                // A stall before anything loaded is still just loading.
                if self.session.readiness != Readiness::Loading {
                    self.session.readiness = Readiness::Buffering;
                }
            }
            MediaEvent::Playing => {
                self.session.readiness = Readiness::Ready;
            }
            MediaEvent::TimeUpdate { position } => {
                self.session.position = match self.session.duration {
                    Some(duration) => position.min(duration),
                    None => position,
                };
            }
            MediaEvent::Ended => {
                if self.playlist.is_empty() {
                    return;
                }
                // Like next(), but playback always continues through the list.
                self.session.current_index =
                    (self.session.current_index + 1) % self.playlist.len();
                self.change_track();
                self.session.resume_intent = true;
            }
        }
    }

    fn attempt_play(&mut self) -> PlayAttempt {
        match self.element.play() {
            Ok(()) => {
                self.session.is_playing = true;
                PlayAttempt::Playing
            }
            Err(e) => {
                // Host-policy rejection: non-fatal, reported only.
                tracing::warn!(error = %e, "play request rejected");
                self.session.is_playing = false;
                PlayAttempt::Rejected
            }
        }
    }

    fn change_track(&mut self) {
        self.session.is_playing = false;
        self.attach_current();
    }

    /// Point the active element at the current track and re-prime the preload
    /// elements with its neighbours.
    fn attach_current(&mut self) {
        let Some(track) = self.playlist.get(self.session.current_index) else {
            return;
        };
        tracing::debug!(
            index = self.session.current_index,
            title = %track.title,
            "attaching track"
        );
        self.element.set_source(&track.audio_src);
        self.element.load();
        self.session.position = 0.0;
        self.session.duration = None;
        self.session.readiness = Readiness::Loading;
        self.prime_preloads();
    }

    fn prime_preloads(&mut self) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }
        let next_index = (self.session.current_index + 1) % len;
        let prev_index = (self.session.current_index + len - 1) % len;
        self.preload_next.set_source(&self.playlist[next_index].audio_src);
        self.preload_next.load();
        self.preload_prev.set_source(&self.playlist[prev_index].audio_src);
        self.preload_prev.load();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::model::playlist::Track;

    #[derive(Default)]
    struct FakeState {
        source: Option<String>,
        loads: usize,
        generation: u64,
        ready: ReadyState,
        play_calls: usize,
        pause_calls: usize,
        reject_play: bool,
        seeks: Vec<f64>,
    }

    /// Scripted element: tests flip `ready` and `reject_play` to drive the
    /// sequencer through its transitions.
    #[derive(Clone, Default)]
    struct FakeElement {
        state: Arc<Mutex<FakeState>>,
    }

    impl MediaElement for FakeElement {
        fn set_source(&mut self, url: &str) {
            self.state.lock().unwrap().source = Some(url.to_string());
        }

        fn load(&mut self) {
            let mut state = self.state.lock().unwrap();
            state.loads += 1;
            state.generation += 1;
            state.ready = ReadyState::Empty;
        }

        fn play(&mut self) -> anyhow::Result<()> {
            let mut state = self.state.lock().unwrap();
            state.play_calls += 1;
            if state.reject_play {
                anyhow::bail!("autoplay blocked by host policy");
            }
            Ok(())
        }

        fn pause(&mut self) {
            self.state.lock().unwrap().pause_calls += 1;
        }

        fn seek(&mut self, position: f64) {
            self.state.lock().unwrap().seeks.push(position);
        }

        fn generation(&self) -> u64 {
            self.state.lock().unwrap().generation
        }

        fn ready_state(&self) -> ReadyState {
            self.state.lock().unwrap().ready
        }
    }

    fn track(name: &str) -> Track {
        Track {
            title: name.to_string(),
            artist: "artist".to_string(),
            audio_src: format!("http://music.test/{name}.mp3"),
            album_art_url: format!("http://music.test/{name}.jpg"),
        }
    }

    fn playlist(names: &[&str]) -> Playlist {
        names.iter().map(|n| track(n)).collect()
    }

    fn sequencer(names: &[&str]) -> (Sequencer<FakeElement>, FakeElement, FakeElement, FakeElement) {
        let active = FakeElement::default();
        let next = FakeElement::default();
        let prev = FakeElement::default();
        let mut seq = Sequencer::new(active.clone(), next.clone(), prev.clone());
        seq.load(playlist(names));
        (seq, active, next, prev)
    }

    fn make_ready(element: &FakeElement) {
        element.state.lock().unwrap().ready = ReadyState::FutureData;
    }

    /// Feed an event tagged with the active element's current generation,
    /// the way the production listener receives them.
    fn deliver(seq: &mut Sequencer<FakeElement>, event: MediaEvent) {
        let generation = seq.element.generation();
        seq.handle_media_event(ElementEvent { generation, event });
    }

    #[test]
    fn next_cycles_back_to_start() {
        let (mut seq, _, _, _) = sequencer(&["a", "b", "c"]);
        let mut seen = Vec::new();
        for _ in 0..3 {
            seq.next();
            seen.push(seq.session().current_index);
        }
        assert_eq!(seen, vec![1, 2, 0]);
    }

    #[test]
    fn previous_cycles_back_to_start() {
        let (mut seq, _, _, _) = sequencer(&["a", "b", "c"]);
        for _ in 0..3 {
            seq.previous();
        }
        assert_eq!(seq.session().current_index, 0);
    }

    #[test]
    fn single_track_wraps_onto_itself() {
        let (mut seq, _, _, _) = sequencer(&["only"]);
        seq.next();
        assert_eq!(seq.session().current_index, 0);
        seq.previous();
        assert_eq!(seq.session().current_index, 0);
    }

    #[test]
    fn track_change_resets_position_and_duration() {
        let (mut seq, _, _, _) = sequencer(&["a", "b"]);
        deliver(&mut seq, MediaEvent::LoadedMetadata { duration: 120.0 });
        deliver(&mut seq, MediaEvent::TimeUpdate { position: 42.0 });
        assert_eq!(seq.session().position, 42.0);

        seq.next();
        assert_eq!(seq.session().position, 0.0);
        assert_eq!(seq.session().duration, None);
        assert_eq!(seq.session().readiness, Readiness::Loading);
    }

    #[test]
    fn play_pause_when_ready_starts_without_buffering() {
        let (mut seq, active, _, _) = sequencer(&["a"]);
        make_ready(&active);

        assert_eq!(seq.play_pause(), PlayAttempt::Playing);
        assert!(seq.session().is_playing);
        assert_eq!(active.state.lock().unwrap().play_calls, 1);
    }

    #[test]
    fn play_pause_toggles_to_pause() {
        let (mut seq, active, _, _) = sequencer(&["a"]);
        make_ready(&active);
        seq.play_pause();

        assert_eq!(seq.play_pause(), PlayAttempt::Paused);
        assert!(!seq.session().is_playing);
        assert_eq!(active.state.lock().unwrap().pause_calls, 1);
    }

    #[test]
    fn play_pause_without_data_enters_buffering_and_waits() {
        let (mut seq, active, _, _) = sequencer(&["a"]);

        let PlayAttempt::Buffering(generation) = seq.play_pause() else {
            panic!("expected buffering");
        };
        assert_eq!(seq.session().readiness, Readiness::Buffering);
        // Not ready yet: the poll retries the readiness check, never play().
        assert_eq!(seq.poll_buffering(generation), PollStep::NotReady);
        assert_eq!(seq.poll_buffering(generation), PollStep::NotReady);
        assert_eq!(active.state.lock().unwrap().play_calls, 0);

        make_ready(&active);
        assert_eq!(seq.poll_buffering(generation), PollStep::Started);
        assert!(seq.session().is_playing);
        assert_eq!(seq.session().readiness, Readiness::Ready);
        assert_eq!(active.state.lock().unwrap().play_calls, 1);
    }

    #[test]
    fn later_play_pause_supersedes_pending_poll() {
        let (mut seq, active, _, _) = sequencer(&["a"]);

        let PlayAttempt::Buffering(stale) = seq.play_pause() else {
            panic!("expected buffering");
        };
        // Second intent while still not ready issues a new generation.
        let PlayAttempt::Buffering(fresh) = seq.play_pause() else {
            panic!("expected buffering");
        };
        assert_ne!(stale, fresh);
        assert_eq!(seq.poll_buffering(stale), PollStep::Superseded);

        make_ready(&active);
        assert_eq!(seq.poll_buffering(fresh), PollStep::Started);
    }

    #[test]
    fn rejected_play_is_non_fatal() {
        let (mut seq, active, _, _) = sequencer(&["a"]);
        make_ready(&active);
        active.state.lock().unwrap().reject_play = true;

        assert_eq!(seq.play_pause(), PlayAttempt::Rejected);
        assert!(!seq.session().is_playing);
        // Exactly one attempt per user intent.
        assert_eq!(active.state.lock().unwrap().play_calls, 1);
    }

    #[test]
    fn ended_advances_and_forces_resume_even_when_paused() {
        let (mut seq, active, _, _) = sequencer(&["a", "b", "c"]);
        assert!(!seq.session().is_playing);

        deliver(&mut seq, MediaEvent::Ended);
        assert_eq!(seq.session().current_index, 1);
        assert_eq!(seq.session().position, 0.0);

        // New track becomes ready: playback resumes without user action.
        make_ready(&active);
        deliver(&mut seq, MediaEvent::CanPlay);
        assert!(seq.session().is_playing);
        assert_eq!(active.state.lock().unwrap().play_calls, 1);
    }

    #[test]
    fn resume_intent_fires_exactly_once() {
        let (mut seq, active, _, _) = sequencer(&["a", "b"]);
        make_ready(&active);
        seq.play_pause();
        seq.next();
        assert!(!seq.session().is_playing);

        deliver(&mut seq, MediaEvent::CanPlay);
        assert!(seq.session().is_playing);
        let plays = active.state.lock().unwrap().play_calls;

        // A later ready event for the same track must not re-fire the resume.
        deliver(&mut seq, MediaEvent::Playing);
        deliver(&mut seq, MediaEvent::CanPlayThrough);
        assert_eq!(active.state.lock().unwrap().play_calls, plays);
    }

    #[test]
    fn queued_event_from_previous_track_is_dropped() {
        let (mut seq, active, _, _) = sequencer(&["a", "b"]);
        make_ready(&active);
        seq.play_pause();

        // Skip while a ready event for the old source is still in flight.
        let stale = active.generation();
        seq.next();
        seq.handle_media_event(ElementEvent {
            generation: stale,
            event: MediaEvent::CanPlay,
        });

        // The stale event neither plays nor consumes the resume intent.
        assert!(!seq.session().is_playing);
        assert_eq!(seq.session().readiness, Readiness::Loading);
        assert_eq!(active.state.lock().unwrap().play_calls, 1);

        // The genuine ready event still triggers the auto-resume.
        make_ready(&active);
        deliver(&mut seq, MediaEvent::CanPlay);
        assert!(seq.session().is_playing);
        assert_eq!(active.state.lock().unwrap().play_calls, 2);
    }

    #[test]
    fn skip_while_paused_does_not_resume() {
        let (mut seq, active, _, _) = sequencer(&["a", "b"]);
        seq.next();
        deliver(&mut seq, MediaEvent::CanPlay);
        assert!(!seq.session().is_playing);
        assert_eq!(active.state.lock().unwrap().play_calls, 0);
    }

    #[test]
    fn seek_fraction_clamps_to_track_bounds() {
        let (mut seq, active, _, _) = sequencer(&["a"]);
        deliver(&mut seq, MediaEvent::LoadedMetadata { duration: 200.0 });

        seq.seek_fraction(0.0);
        assert_eq!(seq.session().position, 0.0);
        seq.seek_fraction(0.5);
        assert_eq!(seq.session().position, 100.0);
        seq.seek_fraction(1.0);
        assert_eq!(seq.session().position, 200.0);
        seq.seek_fraction(1.5);
        assert_eq!(seq.session().position, 200.0);

        let seeks = active.state.lock().unwrap().seeks.clone();
        assert_eq!(seeks, vec![0.0, 100.0, 200.0, 200.0]);
    }

    #[test]
    fn seek_before_metadata_is_ignored() {
        let (mut seq, active, _, _) = sequencer(&["a"]);
        seq.seek_fraction(0.5);
        assert_eq!(seq.session().position, 0.0);
        assert!(active.state.lock().unwrap().seeks.is_empty());
    }

    #[test]
    fn position_updates_clamp_to_duration() {
        let (mut seq, _, _, _) = sequencer(&["a"]);
        deliver(&mut seq, MediaEvent::LoadedMetadata { duration: 90.0 });
        deliver(&mut seq, MediaEvent::TimeUpdate { position: 95.0 });
        assert_eq!(seq.session().position, 90.0);
    }

    #[test]
    fn stall_after_loading_enters_buffering() {
        let (mut seq, _, _, _) = sequencer(&["a"]);
        // Waiting during initial load is still Loading.
        deliver(&mut seq, MediaEvent::Waiting);
        assert_eq!(seq.session().readiness, Readiness::Loading);

        deliver(&mut seq, MediaEvent::CanPlay);
        deliver(&mut seq, MediaEvent::Waiting);
        assert_eq!(seq.session().readiness, Readiness::Buffering);

        deliver(&mut seq, MediaEvent::Playing);
        assert_eq!(seq.session().readiness, Readiness::Ready);
    }

    #[test]
    fn empty_playlist_is_inert() {
        let active = FakeElement::default();
        let mut seq = Sequencer::new(active.clone(), FakeElement::default(), FakeElement::default());
        seq.load(Playlist::new());

        assert!(seq.is_empty());
        assert!(seq.snapshot().is_none());
        assert_eq!(seq.play_pause(), PlayAttempt::NoTrack);
        seq.next();
        seq.previous();
        deliver(&mut seq, MediaEvent::Ended);
        assert_eq!(seq.session().current_index, 0);
        assert_eq!(active.state.lock().unwrap().loads, 0);
    }

    #[test]
    fn preloads_follow_the_current_index() {
        let (mut seq, _, next, prev) = sequencer(&["a", "b", "c"]);
        assert_eq!(
            next.state.lock().unwrap().source.as_deref(),
            Some("http://music.test/b.mp3")
        );
        assert_eq!(
            prev.state.lock().unwrap().source.as_deref(),
            Some("http://music.test/c.mp3")
        );

        seq.next();
        assert_eq!(
            next.state.lock().unwrap().source.as_deref(),
            Some("http://music.test/c.mp3")
        );
        assert_eq!(
            prev.state.lock().unwrap().source.as_deref(),
            Some("http://music.test/a.mp3")
        );
    }

    #[test]
    fn rapid_skips_apply_in_order() {
        let (mut seq, active, _, _) = sequencer(&["a", "b", "c"]);
        seq.next();
        seq.next();
        assert_eq!(seq.session().current_index, 2);
        assert_eq!(seq.session().position, 0.0);
        // One load per attach: initial + two skips.
        assert_eq!(active.state.lock().unwrap().loads, 3);
    }
}
