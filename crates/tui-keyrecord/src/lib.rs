//! # tui-keyrecord
//!
//! Key-combo sequence recording for the TUI Suite.
//!
//! While a recording is active, key events that would normally reach the
//! keybinding dispatcher are captured instead. Keys pressed together form a
//! combo, combos are separated by key releases (or by a second character key
//! arriving while one is already held), and the whole sequence is delivered
//! once no new combo has closed for the configured idle timeout.
//!
//! ## Features
//!
//! - Drop-in wrapper around any [`KeyDispatcher`]
//! - Canonical combo strings (`"ctrl+k"`) that compare reliably
//! - Optional progress reporting while the user is still typing
//! - Auto-repeat filtering and default-action suppression
//! - crossterm key event adapter
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use std::time::{Duration, Instant};
//! use tui_keyrecord::{KeyInput, RawKeyEvent, RecordOptions, RecordingDispatcher};
//!
//! let passthrough = |_: &str, _: &[String], _: &mut dyn RawKeyEvent| {};
//! let mut dispatcher = RecordingDispatcher::new(passthrough);
//!
//! let recorded = Rc::new(RefCell::new(None));
//! let sink = Rc::clone(&recorded);
//! dispatcher
//!     .record(move |seq| *sink.borrow_mut() = Some(seq), RecordOptions::new())
//!     .unwrap();
//!
//! let start = Instant::now();
//! let ctrl = vec!["ctrl".to_string()];
//! dispatcher.handle_key_at("k", &ctrl, &mut KeyInput::keydown(), start);
//! dispatcher.handle_key_at("k", &ctrl, &mut KeyInput::keyup(), start);
//! dispatcher.tick_at(start + Duration::from_millis(1200));
//!
//! assert_eq!(*recorded.borrow(), Some(vec!["ctrl+k".to_string()]));
//! ```

mod combo;
mod config;
mod display;
mod error;
mod event;
mod normalize;
mod parser;
mod recorder;
mod shim;
mod timer;

pub use combo::{canonical_key, is_character_key, Combo, KeyAccumulator, Sequence, PLUS_KEY};
pub use config::{RecordOptions, RecorderConfig, SessionSettings, DEFAULT_TIMEOUT_MS};
pub use display::{KeyDisplayConfig, KeyDisplayFormat};
pub use error::{RecordError, RecordResult};
pub use event::{from_crossterm, key_name, modifier_names, DispatchedKey, KeyEventType, KeyInput, RawKeyEvent};
pub use normalize::{normalize_combo, normalize_keys, normalize_sequence};
pub use parser::{parse_combo, parse_sequence, ParseError};
pub use recorder::{CompletionCallback, ProgressCallback, Recorder, RecordingSession};
pub use shim::{KeyDispatcher, RecordingDispatcher};
pub use timer::IdleTimer;

/// Helper to build a modifier list from string slices.
pub fn modifiers(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}
