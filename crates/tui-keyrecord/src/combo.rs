//! Key combo and sequence types.

use crate::normalize::{normalize_combo, normalize_sequence, KEY_SEPARATOR};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Check whether a key name denotes a character key.
///
/// Character keys are exactly one character long (`"k"`, `"/"`); everything
/// longer (`"ctrl"`, `"enter"`, `"f5"`) is a modifier or named key.
pub fn is_character_key(key: &str) -> bool {
    let mut chars = key.chars();
    chars.next().is_some() && chars.next().is_none()
}

/// Name under which the `+` key is stored.
///
/// `+` is the separator of the normalized form, so a literal `+` would make
/// `"shift++"` ambiguous.
pub const PLUS_KEY: &str = "plus";

/// Canonical spelling of a key name.
pub fn canonical_key(key: &str) -> &str {
    if key == KEY_SEPARATOR {
        PLUS_KEY
    } else {
        key
    }
}

/// A set of keys pressed together.
///
/// Keys are kept in the order they were added but compared as a set once
/// normalized. Duplicates are never stored, also when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Combo {
    /// The keys in this combo
    keys: Vec<String>,
}

impl Combo {
    /// Create an empty combo.
    pub fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Create a combo from key names, dropping duplicates.
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut combo = Self::new();
        for key in keys {
            combo.insert(key);
        }
        combo
    }

    /// Insert a key. Returns `false` if it was already present.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        let mut key = key.into();
        if key == KEY_SEPARATOR {
            key = PLUS_KEY.to_string();
        }
        if self.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Check whether a key is in this combo.
    pub fn contains(&self, key: &str) -> bool {
        let key = canonical_key(key);
        self.keys.iter().any(|k| k == key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Take the keys, in insertion order.
    pub fn into_keys(self) -> Vec<String> {
        self.keys
    }

    /// Check if any character key is present.
    pub fn has_character_key(&self) -> bool {
        self.keys.iter().any(|k| is_character_key(k))
    }

    /// Check if this combo is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Get the number of keys in this combo.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Canonical `+`-joined form.
    pub fn normalized(&self) -> String {
        normalize_combo(self)
    }
}

impl fmt::Display for Combo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalized())
    }
}

impl From<Vec<String>> for Combo {
    fn from(keys: Vec<String>) -> Self {
        Self::from_keys(keys)
    }
}

impl From<Combo> for Vec<String> {
    fn from(combo: Combo) -> Self {
        combo.keys
    }
}

/// Keys held down in the combo currently being built.
#[derive(Debug, Clone, Default)]
pub struct KeyAccumulator {
    combo: Combo,
    has_character_key: bool,
}

impl KeyAccumulator {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key. Returns `false` if the key was already held.
    pub fn add(&mut self, key: &str) -> bool {
        let key = canonical_key(key);
        if !self.combo.insert(key) {
            return false;
        }
        if is_character_key(key) {
            self.has_character_key = true;
        }
        true
    }

    /// Check whether a key is held.
    pub fn contains(&self, key: &str) -> bool {
        self.combo.contains(key)
    }

    /// Whether a character key was added since the last clear.
    pub fn has_character_key(&self) -> bool {
        self.has_character_key
    }

    /// Check if no keys are held.
    pub fn is_empty(&self) -> bool {
        self.combo.is_empty()
    }

    /// The combo built so far.
    pub fn combo(&self) -> &Combo {
        &self.combo
    }

    /// Forget all held keys.
    pub fn clear(&mut self) {
        self.combo = Combo::new();
        self.has_character_key = false;
    }

    /// Take the built combo, leaving the accumulator empty.
    pub fn take(&mut self) -> Combo {
        self.has_character_key = false;
        std::mem::take(&mut self.combo)
    }
}

/// An ordered list of combos forming one recorded gesture.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sequence {
    /// Combos in the order they were typed
    pub combos: Vec<Combo>,
}

impl Sequence {
    /// Create an empty sequence.
    pub fn new() -> Self {
        Self { combos: Vec::new() }
    }

    /// Append a closed combo.
    pub fn push(&mut self, combo: Combo) {
        self.combos.push(combo);
    }

    /// Check if this sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.combos.is_empty()
    }

    /// Get the number of combos in this sequence.
    pub fn len(&self) -> usize {
        self.combos.len()
    }

    /// Iterate over the combos.
    pub fn iter(&self) -> impl Iterator<Item = &Combo> {
        self.combos.iter()
    }

    /// Canonical string form of every combo, in order.
    pub fn normalized(&self) -> Vec<String> {
        normalize_sequence(self)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalized().join(" "))
    }
}

impl From<Vec<Combo>> for Sequence {
    fn from(combos: Vec<Combo>) -> Self {
        Self { combos }
    }
}

impl From<Combo> for Sequence {
    fn from(combo: Combo) -> Self {
        Self {
            combos: vec![combo],
        }
    }
}
