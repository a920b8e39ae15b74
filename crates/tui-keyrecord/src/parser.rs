//! Combo notation parser.

use crate::combo::{is_character_key, Combo, Sequence, PLUS_KEY};
use std::str::FromStr;
use thiserror::Error;

/// Parse a combo string into a [`Combo`].
///
/// Supported formats:
/// - `"ctrl+k"`, `"k+ctrl"` - keys joined with `+`, in any order
/// - `"Ctrl+K"` - case-insensitive, names are stored lowercase
/// - `"ctrl++"`, `"+"` - a literal plus key, stored as `plus`
/// - `"control"`, `"option"`, `"cmd"`, `"return"`, `"escape"` - common aliases
pub fn parse_combo(s: &str) -> Result<Combo, ParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ParseError::Empty);
    }

    let (body, trailing_plus) = if s == "+" {
        ("", true)
    } else if let Some(rest) = s.strip_suffix("++") {
        (rest, true)
    } else {
        (s, false)
    };

    let mut names: Vec<String> = Vec::new();
    if !body.is_empty() {
        for part in body.split('+') {
            let part = part.trim();
            if part.is_empty() {
                return Err(ParseError::EmptyKey(s.to_string()));
            }
            names.push(canonical_name(part));
        }
    }
    if trailing_plus {
        names.push(PLUS_KEY.to_string());
    }

    let mut combo = Combo::new();
    for name in names {
        if !combo.insert(name.clone()) {
            return Err(ParseError::DuplicateKey(name));
        }
    }
    Ok(combo)
}

/// Parse a space-separated sequence of combos, e.g. `"ctrl+k c"`.
pub fn parse_sequence(s: &str) -> Result<Sequence, ParseError> {
    let combos = s
        .split_whitespace()
        .map(parse_combo)
        .collect::<Result<Vec<_>, _>>()?;

    if combos.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(Sequence::from(combos))
}

impl FromStr for Combo {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_combo(s)
    }
}

impl FromStr for Sequence {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_sequence(s)
    }
}

fn canonical_name(part: &str) -> String {
    if is_character_key(part) {
        return part.to_lowercase();
    }

    let lower = part.to_lowercase();
    let name = match lower.as_str() {
        "control" => "ctrl",
        "option" => "alt",
        "cmd" | "command" => "meta",
        "return" | "cr" => "enter",
        "escape" => "esc",
        "del" => "delete",
        "ins" => "insert",
        "pgup" => "pageup",
        "pgdn" | "pgdown" => "pagedown",
        "bs" => "backspace",
        other => other,
    };
    name.to_string()
}

/// Error parsing a combo notation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Empty input
    #[error("empty key notation")]
    Empty,
    /// A `+` with nothing on one side
    #[error("empty key in notation: {0}")]
    EmptyKey(String),
    /// The same key listed twice
    #[error("duplicate key: {0}")]
    DuplicateKey(String),
}
