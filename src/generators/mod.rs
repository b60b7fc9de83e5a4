//! The three independent voices of a composition.
//!
//! Each generator reads the mapped parameters and returns its own events in
//! non-decreasing tick order. None of them share state, so they can run in
//! any order; only the merge needs all three.

pub mod harmony;
pub mod melody;
pub mod rhythm;

/// Offset a key by some semitones, staying inside the MIDI key range.
pub(crate) fn transpose(root: u8, semitones: u8) -> u8 {
    root.saturating_add(semitones).min(127)
}
