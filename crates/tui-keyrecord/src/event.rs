//! Inbound key events and the crossterm adapter.

use crate::combo::PLUS_KEY;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

/// Whether a key went down or came up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEventType {
    KeyDown,
    KeyUp,
}

/// The platform event accompanying a dispatched key.
pub trait RawKeyEvent {
    /// Keydown or keyup.
    fn event_type(&self) -> KeyEventType;

    /// Whether this keydown was generated by holding the key.
    fn is_repeat(&self) -> bool;

    /// Suppress the platform's default handling of this event.
    fn prevent_default(&mut self);
}

/// A concrete key event, as produced by [`from_crossterm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    /// Keydown or keyup
    pub event_type: KeyEventType,
    /// Auto-repeat flag
    pub repeat: bool,
    default_prevented: bool,
}

impl KeyInput {
    /// Create an event of the given type.
    pub fn new(event_type: KeyEventType) -> Self {
        Self {
            event_type,
            repeat: false,
            default_prevented: false,
        }
    }

    /// Create a keydown event.
    pub fn keydown() -> Self {
        Self::new(KeyEventType::KeyDown)
    }

    /// Create a keyup event.
    pub fn keyup() -> Self {
        Self::new(KeyEventType::KeyUp)
    }

    /// Mark as an auto-repeat.
    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// Whether a handler asked for the default action to be suppressed.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

impl RawKeyEvent for KeyInput {
    fn event_type(&self) -> KeyEventType {
        self.event_type
    }

    fn is_repeat(&self) -> bool {
        self.repeat
    }

    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// A key event split into the `(character, modifiers, event)` form handlers receive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchedKey {
    /// Name of the key itself
    pub character: String,
    /// Names of the modifiers held, in dispatch order
    pub modifiers: Vec<String>,
    /// The raw event
    pub input: KeyInput,
}

/// Convert a crossterm key event.
///
/// Returns `None` for keys that have no name (null, media keys, ISO level
/// shifts).
pub fn from_crossterm(event: &KeyEvent) -> Option<DispatchedKey> {
    let character = key_name(event.code, event.modifiers)?;

    let input = match event.kind {
        KeyEventKind::Press => KeyInput::keydown(),
        KeyEventKind::Repeat => KeyInput::keydown().repeated(),
        KeyEventKind::Release => KeyInput::keyup(),
    };

    Some(DispatchedKey {
        character,
        modifiers: modifier_names(event.modifiers),
        input,
    })
}

/// Name of a crossterm key code.
///
/// Characters are reported lowercase when shift is held, since shift is
/// already present in the modifier list. Space and `+` are named so they never
/// collide with the combo separator.
pub fn key_name(code: KeyCode, modifiers: KeyModifiers) -> Option<String> {
    let name = match code {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char('+') => PLUS_KEY.to_string(),
        KeyCode::Char(c) if modifiers.contains(KeyModifiers::SHIFT) => {
            c.to_lowercase().to_string()
        }
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Esc => "esc".to_string(),
        KeyCode::Tab | KeyCode::BackTab => "tab".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Delete => "delete".to_string(),
        KeyCode::Insert => "insert".to_string(),
        KeyCode::Up => "up".to_string(),
        KeyCode::Down => "down".to_string(),
        KeyCode::Left => "left".to_string(),
        KeyCode::Right => "right".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pageup".to_string(),
        KeyCode::PageDown => "pagedown".to_string(),
        KeyCode::F(n) => format!("f{}", n),
        KeyCode::CapsLock => "capslock".to_string(),
        KeyCode::ScrollLock => "scrolllock".to_string(),
        KeyCode::NumLock => "numlock".to_string(),
        KeyCode::PrintScreen => "printscreen".to_string(),
        KeyCode::Pause => "pause".to_string(),
        KeyCode::Menu => "menu".to_string(),
        KeyCode::Modifier(modifier) => modifier_key_name(modifier)?.to_string(),
        _ => return None,
    };
    Some(name)
}

fn modifier_key_name(code: ModifierKeyCode) -> Option<&'static str> {
    let name = match code {
        ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => "shift",
        ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => "ctrl",
        ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => "alt",
        ModifierKeyCode::LeftMeta | ModifierKeyCode::RightMeta => "meta",
        ModifierKeyCode::LeftSuper | ModifierKeyCode::RightSuper => "super",
        ModifierKeyCode::LeftHyper | ModifierKeyCode::RightHyper => "hyper",
        _ => return None,
    };
    Some(name)
}

/// Names of the modifiers set in `modifiers`.
pub fn modifier_names(modifiers: KeyModifiers) -> Vec<String> {
    [
        (KeyModifiers::SHIFT, "shift"),
        (KeyModifiers::ALT, "alt"),
        (KeyModifiers::CONTROL, "ctrl"),
        (KeyModifiers::META, "meta"),
        (KeyModifiers::SUPER, "super"),
        (KeyModifiers::HYPER, "hyper"),
    ]
    .into_iter()
    .filter(|(flag, _)| modifiers.contains(*flag))
    .map(|(_, name)| name.to_string())
    .collect()
}
