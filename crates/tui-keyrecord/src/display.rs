//! Human-readable rendering of recorded sequences.

use crate::combo::is_character_key;
use crate::normalize::KEY_SEPARATOR;
use serde::{Deserialize, Serialize};

/// Format for displaying recorded combos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyDisplayFormat {
    /// Unicode symbols: ⌘S, ⌃P, ⇧Tab
    Symbolic,
    /// Text labels: Ctrl+S, Alt+P, Shift+Tab
    #[default]
    Text,
}

/// Configuration for key display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeyDisplayConfig {
    /// Display format
    pub format: KeyDisplayFormat,
}

impl KeyDisplayConfig {
    /// Create a symbolic display config.
    pub fn symbolic() -> Self {
        Self {
            format: KeyDisplayFormat::Symbolic,
        }
    }

    /// Create a text display config.
    pub fn text() -> Self {
        Self {
            format: KeyDisplayFormat::Text,
        }
    }

    /// Format a single key name.
    pub fn format_key(&self, key: &str) -> String {
        if is_character_key(key) {
            return key.to_uppercase();
        }

        let symbolic = self.format == KeyDisplayFormat::Symbolic;
        let label = match (symbolic, key) {
            (true, "ctrl") => "\u{2303}",
            (true, "alt") => "\u{2325}",
            (true, "shift") => "\u{21e7}",
            (true, "meta" | "super") => "\u{2318}",
            (true, "enter") => "\u{23ce}",
            (true, "esc") => "\u{238b}",
            (true, "tab") => "\u{21e5}",
            (true, "backspace") => "\u{232b}",
            (true, "delete") => "\u{2326}",
            (true, "space") => "\u{2423}",
            (true, "up") => "\u{2191}",
            (true, "down") => "\u{2193}",
            (true, "left") => "\u{2190}",
            (true, "right") => "\u{2192}",
            (_, "ctrl") => "Ctrl",
            (_, "alt") => "Alt",
            (_, "shift") => "Shift",
            (_, "meta") => "Meta",
            (_, "super") => "Super",
            (_, "hyper") => "Hyper",
            (_, "enter") => "Enter",
            (_, "esc") => "Escape",
            (_, "tab") => "Tab",
            (_, "backspace") => "Backspace",
            (_, "delete") => "Delete",
            (_, "insert") => "Insert",
            (_, "space") => "Space",
            (_, "plus") => "+",
            (_, "up") => "Up",
            (_, "down") => "Down",
            (_, "left") => "Left",
            (_, "right") => "Right",
            (_, "home") => "Home",
            (_, "end") => "End",
            (_, "pageup") => "PageUp",
            (_, "pagedown") => "PageDown",
            _ => return key.to_uppercase(),
        };
        label.to_string()
    }

    /// Format one normalized combo string such as `"ctrl+k"`.
    pub fn format_combo(&self, combo: &str) -> String {
        let joiner = match self.format {
            KeyDisplayFormat::Symbolic => "",
            KeyDisplayFormat::Text => "+",
        };
        combo
            .split(KEY_SEPARATOR)
            .filter(|key| !key.is_empty())
            .map(|key| self.format_key(key))
            .collect::<Vec<_>>()
            .join(joiner)
    }

    /// Format a normalized sequence, combos separated by spaces.
    pub fn format_sequence<S: AsRef<str>>(&self, sequence: &[S]) -> String {
        sequence
            .iter()
            .map(|combo| self.format_combo(combo.as_ref()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_format() {
        let config = KeyDisplayConfig::text();

        assert_eq!(config.format_key("ctrl"), "Ctrl");
        assert_eq!(config.format_key("enter"), "Enter");
        assert_eq!(config.format_key("a"), "A");
        assert_eq!(config.format_key("f5"), "F5");
    }

    #[test]
    fn test_symbolic_format() {
        let config = KeyDisplayConfig::symbolic();

        assert_eq!(config.format_key("ctrl"), "\u{2303}");
        assert_eq!(config.format_key("enter"), "\u{23ce}");
        assert_eq!(config.format_key("up"), "\u{2191}");
        assert_eq!(config.format_key("pageup"), "PageUp");
    }

    #[test]
    fn test_sequence_snapshots() {
        let sequence = ["ctrl+k", "c", "alt+shift+enter", "ctrl+plus"];

        insta::assert_snapshot!(
            KeyDisplayConfig::text().format_sequence(&sequence),
            @"Ctrl+K C Alt+Shift+Enter Ctrl++"
        );
        insta::assert_snapshot!(
            KeyDisplayConfig::symbolic().format_sequence(&sequence),
            @"⌃K C ⌥⇧⏎ ⌃+"
        );
    }
}
