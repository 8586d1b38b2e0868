//! Overwrite-policy application for the two writable track fields.
//!
//! Both mergers are pure: they return `Some(new value)` when the field
//! should be written and `None` when it must be left untouched, so callers
//! can count actual writes.

use crate::keys;

/// Merge a resolved key label into the free-text grouping tag.
///
/// Any label from the key catalog already present in the tag is stripped
/// first (only the first one found, in catalog order; legacy data with
/// several labels keeps the rest). The new label then goes at the front iff
/// the tag had no label yet or `overwrite` is set. An empty `new_label`
/// never modifies the tag: an absent resolution must not erase a prior,
/// possibly better, annotation.
pub fn merge_grouping(current: &str, new_label: &str, overwrite: bool) -> Option<String> {
    let (stripped, had_label) = strip_key_label(current);

    if new_label.is_empty() || (had_label && !overwrite) {
        return None;
    }

    Some(format!("{new_label} {stripped}").trim().to_string())
}

/// Remove the first catalog label found in `tag`, rejoining the fragments
/// around it with a single space. Returns the cleaned tag and whether a
/// label was present.
fn strip_key_label(tag: &str) -> (String, bool) {
    for label in keys::KEYS {
        if let Some(pos) = tag.find(label) {
            let before = tag[..pos].trim();
            let after = tag[pos + label.len()..].trim();
            let joined = format!("{before} {after}");
            return (joined.trim().to_string(), true);
        }
    }
    (tag.to_string(), false)
}

/// Apply a resolved BPM to the library's tempo field. A write happens only
/// for a positive value, and only when the field is empty (0) or `overwrite`
/// is set. Zero or absent BPM never writes: 0 means "no value".
pub fn merge_bpm(current: f64, new: Option<f64>, overwrite: bool) -> Option<f64> {
    match new {
        Some(bpm) if bpm > 0.0 && (current == 0.0 || overwrite) => Some(bpm),
        _ => None,
    }
}
