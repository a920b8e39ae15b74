//! Recorder application state.

use crossterm::event::{KeyEvent, KeyEventKind};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info};
use tui_keyrecord::{
    KeyDispatcher, KeyDisplayConfig, KeyEventType, RawKeyEvent, RecordOptions, RecorderConfig,
    RecordingDispatcher,
};

/// Upper bound on how long the event loop blocks waiting for input.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// What the user asked for outside of a recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Record,
    Quit,
}

/// Handles keys while nothing is being recorded.
#[derive(Debug, Default)]
pub struct Controls {
    pending: Option<Command>,
}

impl Controls {
    fn take_command(&mut self) -> Option<Command> {
        self.pending.take()
    }
}

impl KeyDispatcher for Controls {
    fn handle_key(&mut self, character: &str, modifiers: &[String], event: &mut dyn RawKeyEvent) {
        if event.event_type() != KeyEventType::KeyDown {
            return;
        }
        let ctrl = modifiers.iter().any(|m| m == "ctrl");
        self.pending = match (character, ctrl) {
            ("r", false) => Some(Command::Record),
            ("q" | "esc", false) | ("c", true) => Some(Command::Quit),
            _ => None,
        };
    }
}

/// Output the event loop should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Recording started
    Started,
    /// Sequence so far, still recording
    Progress(String),
    /// A finished sequence, as canonical and display strings
    Finished { canonical: String, display: String },
}

/// Key recorder application.
pub struct App {
    dispatcher: RecordingDispatcher<Controls>,
    options: RecordOptions,
    display: KeyDisplayConfig,
    /// Whether the terminal reports key releases
    release_events: bool,
    finished: Rc<RefCell<Vec<Vec<String>>>>,
    progress: Rc<RefCell<Option<Vec<String>>>>,
    completed: usize,
    quit: bool,
}

impl App {
    /// Create the app.
    pub fn new(
        config: RecorderConfig,
        options: RecordOptions,
        display: KeyDisplayConfig,
        release_events: bool,
    ) -> Self {
        Self {
            dispatcher: RecordingDispatcher::with_config(Controls::default(), config),
            options,
            display,
            release_events,
            finished: Rc::default(),
            progress: Rc::default(),
            completed: 0,
            quit: false,
        }
    }

    /// Check if the app should exit.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Number of sequences delivered so far.
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Check if a recording is active.
    pub fn is_recording(&self) -> bool {
        self.dispatcher.is_recording()
    }

    /// How long the event loop may block.
    pub fn poll_timeout(&self) -> Duration {
        self.dispatcher
            .time_until_fire()
            .map_or(POLL_INTERVAL, |remaining| remaining.min(POLL_INTERVAL))
    }

    /// Start a recording.
    pub fn start_recording(&mut self) -> anyhow::Result<()> {
        let finished = Rc::clone(&self.finished);
        let progress = Rc::clone(&self.progress);
        self.dispatcher.record_with_progress(
            move |seq| finished.borrow_mut().push(seq),
            self.options,
            move |seq| *progress.borrow_mut() = Some(seq),
        )?;
        info!("recording started");
        Ok(())
    }

    /// Handle a terminal key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        debug!(?key, "key event");
        self.dispatcher.handle_crossterm(&key);

        // Without release reporting every press is also its own release
        if !self.release_events && key.kind != KeyEventKind::Release {
            let release = KeyEvent::new_with_kind(key.code, key.modifiers, KeyEventKind::Release);
            self.dispatcher.handle_crossterm(&release);
        }
    }

    /// Advance timers and collect output.
    pub fn update(&mut self) -> anyhow::Result<Vec<Output>> {
        let mut output = Vec::new();

        self.dispatcher.tick();

        if let Some(seq) = self.progress.borrow_mut().take() {
            output.push(Output::Progress(self.display.format_sequence(&seq)));
        }

        for seq in self.finished.borrow_mut().drain(..) {
            self.completed += 1;
            info!(sequence = %seq.join(" "), "recording delivered");
            output.push(Output::Finished {
                canonical: seq.join(" "),
                display: self.display.format_sequence(&seq),
            });
        }

        match self.dispatcher.inner_mut().take_command() {
            Some(Command::Record) => {
                self.start_recording()?;
                output.push(Output::Started);
            }
            Some(Command::Quit) => self.quit = true,
            None => {}
        }

        Ok(output)
    }
}
