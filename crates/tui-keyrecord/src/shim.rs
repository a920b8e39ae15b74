//! Dispatcher wrapper that diverts key events into a recorder.

use crate::config::{RecordOptions, RecorderConfig};
use crate::error::RecordResult;
use crate::event::{from_crossterm, KeyInput, RawKeyEvent};
use crate::recorder::Recorder;

use crossterm::event::KeyEvent;
use std::time::{Duration, Instant};

/// The key-event entry point of a keybinding dispatcher.
pub trait KeyDispatcher {
    /// Handle one key event.
    fn handle_key(&mut self, character: &str, modifiers: &[String], event: &mut dyn RawKeyEvent);
}

impl<F> KeyDispatcher for F
where
    F: FnMut(&str, &[String], &mut dyn RawKeyEvent),
{
    fn handle_key(&mut self, character: &str, modifiers: &[String], event: &mut dyn RawKeyEvent) {
        self(character, modifiers, event)
    }
}

/// A dispatcher with recording support.
///
/// Key events go to the wrapped dispatcher unchanged unless a recording is
/// active, in which case they go to the recorder instead.
#[derive(Debug)]
pub struct RecordingDispatcher<D> {
    /// The original dispatcher
    inner: D,
    /// Recording state for this dispatcher
    recorder: Recorder,
}

impl<D: KeyDispatcher> RecordingDispatcher<D> {
    /// Wrap a dispatcher with default configuration.
    pub fn new(inner: D) -> Self {
        Self::with_config(inner, RecorderConfig::default())
    }

    /// Wrap a dispatcher.
    pub fn with_config(inner: D, config: RecorderConfig) -> Self {
        Self {
            inner,
            recorder: Recorder::new(config),
        }
    }

    /// Start recording a key sequence.
    ///
    /// `on_complete` receives the normalized sequence once the idle timeout
    /// elapses after the last combo.
    pub fn record<C>(&mut self, on_complete: C, options: RecordOptions) -> RecordResult<()>
    where
        C: FnOnce(Vec<String>) + 'static,
    {
        self.recorder.start(&options, Some(Box::new(on_complete)), None)
    }

    /// Start recording and report progress after every new key.
    pub fn record_with_progress<C, P>(
        &mut self,
        on_complete: C,
        options: RecordOptions,
        on_progress: P,
    ) -> RecordResult<()>
    where
        C: FnOnce(Vec<String>) + 'static,
        P: FnMut(Vec<String>) + 'static,
    {
        self.recorder
            .start(&options, Some(Box::new(on_complete)), Some(Box::new(on_progress)))
    }

    /// Check if a recording is active.
    pub fn is_recording(&self) -> bool {
        self.recorder.is_recording()
    }

    /// Stop recording without delivering anything.
    pub fn cancel_recording(&mut self) -> bool {
        self.recorder.cancel()
    }

    /// Deliver the recording immediately.
    pub fn finish_recording(&mut self) -> bool {
        self.recorder.finish_now()
    }

    /// Handle a key event.
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
        if self.recorder.is_recording() {
            self.recorder.handle_key_at(character, modifiers, event, now);
        } else {
            self.inner.handle_key(character, modifiers, event);
        }
    }

    /// Handle a crossterm key event.
    ///
    /// Returns the converted event so the caller can check whether its default
    /// action was suppressed, or `None` for keys without a name.
    pub fn handle_crossterm(&mut self, event: &KeyEvent) -> Option<KeyInput> {
        let mut key = from_crossterm(event)?;
        self.handle_key(&key.character, &key.modifiers, &mut key.input);
        Some(key.input)
    }

    /// Fire the idle timer if it is due. Call from the event loop.
    pub fn tick(&mut self) -> bool {
        self.recorder.tick()
    }

    /// [`tick`](Self::tick) with an explicit timestamp.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        self.recorder.tick_at(now)
    }

    /// Time until the idle timer fires, for use as an event poll timeout.
    pub fn time_until_fire(&self) -> Option<Duration> {
        self.recorder.time_until_fire()
    }

    /// Get the recorder.
    pub fn recorder(&self) -> &Recorder {
        &self.recorder
    }

    /// Get the recorder mutably.
    pub fn recorder_mut(&mut self) -> &mut Recorder {
        &mut self.recorder
    }

    /// Get the wrapped dispatcher.
    pub fn inner(&self) -> &D {
        &self.inner
    }

    /// Get the wrapped dispatcher mutably.
    pub fn inner_mut(&mut self) -> &mut D {
        &mut self.inner
    }

    /// Unwrap, dropping any active recording.
    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: KeyDispatcher> KeyDispatcher for RecordingDispatcher<D> {
    fn handle_key(&mut self, character: &str, modifiers: &[String], event: &mut dyn RawKeyEvent) {
        RecordingDispatcher::handle_key(self, character, modifiers, event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::KeyEventType;
    use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Dispatcher that logs every key it receives.
    #[derive(Debug, Default)]
    struct LoggingDispatcher {
        seen: Vec<(String, Vec<String>, KeyEventType)>,
    }

    impl KeyDispatcher for LoggingDispatcher {
        fn handle_key(&mut self, character: &str, modifiers: &[String], event: &mut dyn RawKeyEvent) {
            self.seen
                .push((character.to_string(), modifiers.to_vec(), event.event_type()));
        }
    }

    #[test]
    fn test_passthrough_when_idle() {
        let mut dispatcher = RecordingDispatcher::new(LoggingDispatcher::default());
        dispatcher.handle_key("j", &[], &mut KeyInput::keydown());
        dispatcher.handle_key("j", &[], &mut KeyInput::keyup());

        assert_eq!(dispatcher.inner().seen.len(), 2);
        assert_eq!(dispatcher.inner().seen[0].0, "j");
    }

    #[test]
    fn test_recording_diverts_events() {
        let mut dispatcher = RecordingDispatcher::new(LoggingDispatcher::default());
        let result = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&result);
        dispatcher
            .record(move |seq| *sink.borrow_mut() = Some(seq), RecordOptions::new())
            .unwrap();
        assert!(dispatcher.is_recording());

        let t0 = Instant::now();
        dispatcher.handle_key_at("a", &[], &mut KeyInput::keydown(), t0);
        dispatcher.handle_key_at("a", &[], &mut KeyInput::keyup(), t0);
        assert!(dispatcher.inner().seen.is_empty());

        assert!(dispatcher.tick_at(t0 + Duration::from_millis(1000)));
        assert!(!dispatcher.is_recording());
        assert_eq!(*result.borrow(), Some(vec!["a".to_string()]));

        // Normal dispatch resumes
        dispatcher.handle_key("b", &[], &mut KeyInput::keydown());
        assert_eq!(dispatcher.inner().seen.len(), 1);
    }

    #[test]
    fn test_handle_crossterm() {
        let mut dispatcher = RecordingDispatcher::new(LoggingDispatcher::default());
        dispatcher
            .record(|_| {}, RecordOptions::new().prevent_default(true))
            .unwrap();

        let press = KeyEvent::new(KeyCode::Char('K'), KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        let input = dispatcher.handle_crossterm(&press).unwrap();
        assert!(input.is_default_prevented());
        assert_eq!(
            dispatcher.recorder().snapshot(),
            Some(vec!["ctrl+shift+k".to_string()])
        );

        let release = KeyEvent::new_with_kind(KeyCode::Char('K'), KeyModifiers::SHIFT, KeyEventKind::Release);
        let input = dispatcher.handle_crossterm(&release).unwrap();
        assert!(!input.is_default_prevented());
        assert_eq!(dispatcher.recorder().session().unwrap().sequence().len(), 1);

        assert!(dispatcher.handle_crossterm(&KeyEvent::new(KeyCode::Null, KeyModifiers::NONE)).is_none());
    }

    #[test]
    fn test_closure_dispatcher() {
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        let mut dispatcher = RecordingDispatcher::new(
            move |_: &str, _: &[String], _: &mut dyn RawKeyEvent| *counter.borrow_mut() += 1,
        );

        dispatcher.handle_key("x", &[], &mut KeyInput::keydown());
        assert_eq!(*count.borrow(), 1);

        dispatcher.record(|_| {}, RecordOptions::new()).unwrap();
        dispatcher.handle_key("x", &[], &mut KeyInput::keydown());
        assert_eq!(*count.borrow(), 1);

        assert!(dispatcher.cancel_recording());
        dispatcher.handle_key("x", &[], &mut KeyInput::keydown());
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn test_finish_recording_and_unwrap() {
        let mut dispatcher = RecordingDispatcher::new(LoggingDispatcher::default());
        let result = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&result);
        dispatcher
            .record(move |seq| *sink.borrow_mut() = Some(seq), RecordOptions::new())
            .unwrap();

        dispatcher.handle_key("+", &["shift".to_string()], &mut KeyInput::keydown());
        dispatcher.handle_key("+", &[], &mut KeyInput::keyup());
        dispatcher.handle_key("g", &[], &mut KeyInput::keydown());
        dispatcher.handle_key("g", &[], &mut KeyInput::keyup());

        assert!(dispatcher.finish_recording());
        assert!(!dispatcher.finish_recording());
        assert_eq!(
            *result.borrow(),
            Some(vec!["plus+shift".to_string(), "g".to_string()])
        );

        dispatcher.handle_key("q", &[], &mut KeyInput::keydown());
        let inner = dispatcher.into_inner();
        assert_eq!(inner.seen.len(), 1);
    }

    #[test]
    fn test_recorder_mut_reconfigures() {
        let mut dispatcher = RecordingDispatcher::new(LoggingDispatcher::default());
        dispatcher
            .recorder_mut()
            .set_config(RecorderConfig::default().with_timeout_ms(50));
        dispatcher.record(|_| {}, RecordOptions::new()).unwrap();

        let t0 = Instant::now();
        dispatcher.handle_key_at("a", &[], &mut KeyInput::keydown(), t0);
        dispatcher.handle_key_at("a", &[], &mut KeyInput::keyup(), t0);
        assert!(dispatcher.tick_at(t0 + Duration::from_millis(50)));
    }
}
