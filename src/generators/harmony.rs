use crate::event::MidiEvent;
use crate::params::MusicalParams;
use crate::timing::{to_tick, TickClock};

use super::transpose;

pub const CHANNEL: u8 = 1;
pub const VELOCITY: u8 = 50;
pub const CHORD_SECS: f64 = 2.0;
/// Roll between successive chord notes, in ticks.
pub const STAGGER_TICKS: u32 = 10;

/// Stagger that keeps every note-on of a chord before every note-off.
fn stagger(span: u32, notes: usize) -> u32 {
    match u32::try_from(notes) {
        Ok(n) if n > 0 => STAGGER_TICKS.min(span / (2 * n)),
        _ => 0,
    }
}

/// Block chords cycling through the progression, one per two-second window.
///
/// Notes roll in upward and release in reverse, so each chord's events come
/// out already in tick order.
pub fn generate(params: &MusicalParams, ticks_per_quarter: u16, duration_secs: f64) -> Vec<MidiEvent> {
    let clock = TickClock::new(ticks_per_quarter, params.tempo_bpm);
    let end = clock.end_tick(duration_secs);
    let window = clock.position(CHORD_SECS);

    let mut events = Vec::new();
    for (index, chord) in params.progression.iter().cycle().enumerate() {
        let start = to_tick(index as f64 * window);
        if start >= end {
            break;
        }
        let stop = to_tick((index + 1) as f64 * window);
        let roll = stagger(stop - start, chord.len());
        tracing::trace!(start, stop, ?chord, "harmony chord");

        let mut offset = 0;
        for &interval in chord.iter() {
            let key = transpose(params.key_root, interval);
            events.push(MidiEvent::note_on(start + offset, CHANNEL, key, VELOCITY));
            offset += roll;
        }
        for &interval in chord.iter().rev() {
            offset -= roll;
            let key = transpose(params.key_root, interval);
            events.push(MidiEvent::note_off(stop - offset, CHANNEL, key));
        }
    }
    events
}
