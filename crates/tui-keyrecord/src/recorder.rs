//! Key sequence recording.
//!
//! A [`Recorder`] is either idle or owns exactly one [`RecordingSession`].
//! Keydown events add keys to the current combo; a keyup, or a second
//! character key arriving while one is already held, closes the combo and
//! appends it to the sequence. Every closed combo restarts the idle timer, and
//! when the timer fires the normalized sequence is handed to the completion
//! callback and the session is dropped.

use crate::combo::{canonical_key, is_character_key, KeyAccumulator, Sequence};
use crate::config::{RecordOptions, RecorderConfig, SessionSettings};
use crate::error::{RecordError, RecordResult};
use crate::event::{KeyEventType, RawKeyEvent};
use crate::normalize::{into_normalized, normalize_combo, normalize_sequence};
use crate::timer::IdleTimer;

use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// Receives the finished, normalized sequence.
pub type CompletionCallback = Box<dyn FnOnce(Vec<String>)>;

/// Receives the normalized sequence so far, including the open combo.
pub type ProgressCallback = Box<dyn FnMut(Vec<String>)>;

/// State of one active recording.
pub struct RecordingSession {
    /// Combos closed so far
    sequence: Sequence,
    /// Combo being built
    current: KeyAccumulator,
    on_complete: Option<CompletionCallback>,
    on_progress: Option<ProgressCallback>,
    settings: SessionSettings,
    /// Fires once no combo has closed for `settings.timeout`
    timer: IdleTimer,
}

impl RecordingSession {
    fn new(
        settings: SessionSettings,
        on_complete: Option<CompletionCallback>,
        on_progress: Option<ProgressCallback>,
    ) -> Self {
        Self {
            sequence: Sequence::new(),
            current: KeyAccumulator::new(),
            on_complete,
            on_progress,
            settings,
            timer: IdleTimer::new(),
        }
    }

    /// Effective settings of this session.
    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    /// Combos closed so far.
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// The combo being built.
    pub fn current(&self) -> &KeyAccumulator {
        &self.current
    }

    /// Normalized copy of the sequence plus the open combo, if any.
    pub fn snapshot(&self) -> Vec<String> {
        let mut progress = normalize_sequence(&self.sequence);
        if !self.current.is_empty() {
            progress.push(normalize_combo(self.current.combo()));
        }
        progress
    }

    /// Record a keydown.
    ///
    /// A character key closes the open combo only if another character key is
    /// already held and this key is not among the held keys, so a held key's
    /// auto-repeat never counts twice.
    fn keydown(
        &mut self,
        character: &str,
        modifiers: &[String],
        event: &mut dyn RawKeyEvent,
        now: Instant,
    ) {
        if self.settings.no_repeat && event.is_repeat() {
            trace!(key = character, "ignoring auto-repeat");
            return;
        }
        let character = canonical_key(character);

        if self.settings.prevent_default {
            event.prevent_default();
        }

        // A different character key while one is still held starts a new combo.
        // The same key again is a held repeat and stays in the open combo.
        if is_character_key(character)
            && self.current.has_character_key()
            && !self.current.contains(character)
        {
            self.close_combo(now);
        }

        for modifier in modifiers {
            self.record_key(modifier);
        }
        self.record_key(character);
    }

    fn keyup(&mut self, now: Instant) {
        if !self.current.is_empty() {
            self.close_combo(now);
        }
    }

    fn record_key(&mut self, key: &str) {
        if !self.current.add(key) {
            return;
        }

        if self.on_progress.is_some() {
            let progress = self.snapshot();
            if let Some(on_progress) = self.on_progress.as_mut() {
                on_progress(progress);
            }
        }
    }

    fn close_combo(&mut self, now: Instant) {
        let combo = self.current.take();
        trace!(combo = %combo, index = self.sequence.len(), "combo closed");
        self.sequence.push(combo);
        self.timer.restart_at(self.settings.timeout, now);
    }

    fn finish(self) {
        let combos = self.sequence.len();
        match self.on_complete {
            Some(on_complete) => {
                debug!(combos, "recording finished");
                on_complete(into_normalized(self.sequence));
            }
            None => debug!(combos, "recording finished without a completion callback"),
        }
    }
}

impl fmt::Debug for RecordingSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingSession")
            .field("sequence", &self.sequence)
            .field("current", &self.current)
            .field("on_complete", &self.on_complete.is_some())
            .field("on_progress", &self.on_progress.is_some())
            .field("settings", &self.settings)
            .field("timer", &self.timer)
            .finish()
    }
}

/// Records key sequences for one dispatcher.
#[derive(Debug, Default)]
pub struct Recorder {
    /// Construction-time defaults
    config: RecorderConfig,
    /// Active recording, if any
    session: Option<RecordingSession>,
}

impl Recorder {
    /// Create a new recorder.
    pub fn new(config: RecorderConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Replace the configuration. Applies to recordings started afterwards.
    pub fn set_config(&mut self, config: RecorderConfig) {
        self.config = config;
    }

    /// Check if currently recording.
    pub fn is_recording(&self) -> bool {
        self.session.is_some()
    }

    /// The active session.
    pub fn session(&self) -> Option<&RecordingSession> {
        self.session.as_ref()
    }

    /// Start recording.
    ///
    /// Fails with [`RecordError::AlreadyRecording`] if a session is active;
    /// the active session is left untouched.
    pub fn start(
        &mut self,
        options: &RecordOptions,
        on_complete: Option<CompletionCallback>,
        on_progress: Option<ProgressCallback>,
    ) -> RecordResult<()> {
        if self.session.is_some() {
            warn!("record requested while a recording is active");
            return Err(RecordError::AlreadyRecording);
        }

        let settings = options.resolve(&self.config);
        debug!(
            timeout_ms = settings.timeout.as_millis() as u64,
            prevent_default = settings.prevent_default,
            no_repeat = settings.no_repeat,
            "recording started"
        );
        self.session = Some(RecordingSession::new(settings, on_complete, on_progress));
        Ok(())
    }

    /// Feed a key event into the active session.
    ///
    /// Does nothing when idle.
    pub fn handle_key(&mut self, character: &str, modifiers: &[String], event: &mut dyn RawKeyEvent) {
        self.handle_key_at(character, modifiers, event, Instant::now());
    }

    /// [`handle_key`](Self::handle_key) with an explicit timestamp.
    pub fn handle_key_at(
        &mut self,
        character: &str,
        modifiers: &[String],
        event: &mut dyn RawKeyEvent,
        now: Instant,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match event.event_type() {
            KeyEventType::KeyDown => session.keydown(character, modifiers, event, now),
            KeyEventType::KeyUp => session.keyup(now),
        }
    }

    /// Fire the idle timer if it is due.
    ///
    /// Returns `true` if the recording finished.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// [`tick`](Self::tick) with an explicit timestamp.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        let due = self
            .session
            .as_mut()
            .is_some_and(|session| session.timer.poll_at(now));

        due && self.finish_now()
    }

    /// Deliver the sequence immediately, without waiting for the timer.
    ///
    /// Returns `false` if no recording was active.
    pub fn finish_now(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                session.finish();
                true
            }
            None => false,
        }
    }

    /// Stop recording without delivering anything.
    ///
    /// Returns `false` if no recording was active.
    pub fn cancel(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                debug!(combos = session.sequence.len(), "recording cancelled");
                true
            }
            None => false,
        }
    }

    /// Normalized view of the active recording, as a progress callback sees it.
    pub fn snapshot(&self) -> Option<Vec<String>> {
        self.session.as_ref().map(RecordingSession::snapshot)
    }

    /// Time until the idle timer fires.
    pub fn time_until_fire(&self) -> Option<Duration> {
        self.time_until_fire_at(Instant::now())
    }

    /// [`time_until_fire`](Self::time_until_fire) with an explicit timestamp.
    pub fn time_until_fire_at(&self, now: Instant) -> Option<Duration> {
        self.session
            .as_ref()
            .and_then(|session| session.timer.remaining_at(now))
    }
}
