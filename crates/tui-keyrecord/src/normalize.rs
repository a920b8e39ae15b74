//! Canonical string form of combos and sequences.
//!
//! Modifier and named keys come first, then character keys, each group in
//! lexicographic order, joined with `+`. Two combos holding the same keys
//! always normalize to the same string regardless of press order.

use crate::combo::{canonical_key, is_character_key, Combo, Sequence};
use std::cmp::Ordering;

/// Separator between keys of one combo.
pub const KEY_SEPARATOR: &str = "+";

fn key_order(a: &str, b: &str) -> Ordering {
    is_character_key(a)
        .cmp(&is_character_key(b))
        .then_with(|| a.cmp(b))
}

/// Normalize an arbitrary collection of key names.
///
/// A literal `+` key is written as `plus`.
pub fn normalize_keys<I, S>(keys: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let keys: Vec<S> = keys.into_iter().collect();
    let mut names: Vec<&str> = keys.iter().map(|k| canonical_key(k.as_ref())).collect();
    names.sort_by(|a, b| key_order(a, b));
    names.join(KEY_SEPARATOR)
}

/// Normalize a single combo.
pub fn normalize_combo(combo: &Combo) -> String {
    normalize_keys(combo.keys())
}

/// Normalize every combo of a sequence, preserving combo order.
///
/// Borrows the sequence, so it is safe to call on live recording state.
pub fn normalize_sequence(sequence: &Sequence) -> Vec<String> {
    sequence.iter().map(normalize_combo).collect()
}

/// Normalize a finished sequence, consuming it.
pub(crate) fn into_normalized(sequence: Sequence) -> Vec<String> {
    sequence
        .combos
        .into_iter()
        .map(|combo| normalize_keys(combo.into_keys()))
        .collect()
}
