use rand::Rng;

use crate::event::MidiEvent;
use crate::params::MusicalParams;
use crate::timing::{to_tick, TickClock, MAX_TICK};

use super::transpose;

pub const CHANNEL: u8 = 0;
pub const VELOCITY: u8 = 64;
/// Silence before the first melody note.
pub const LEAD_IN_SECS: f64 = 1.0;
pub const MIN_NOTE_SECS: f64 = 0.25;

const BETA_FLOOR: f64 = 10.0;
const BETA_CEIL: f64 = 30.0;

/// Slower alpha means longer notes, never shorter than a quarter second.
pub fn note_seconds(alpha: f64) -> f64 {
    (2.0 / alpha).max(MIN_NOTE_SECS)
}

/// Scale degree chosen by beta activity; wraps when beta exceeds the ceiling.
pub fn scale_index(beta: f64, scale_len: usize) -> usize {
    if scale_len == 0 {
        return 0;
    }
    let raw = (beta / BETA_CEIL * scale_len as f64).floor();
    if raw.is_finite() && raw > 0.0 {
        raw as usize % scale_len
    } else {
        0
    }
}

/// Back-to-back notes whose pitch follows a drifting beta reading.
///
/// After each note beta moves by a uniform step in [-1, 1) drawn from `rng`
/// and is clamped to [10, 30].
pub fn generate<R: Rng + ?Sized>(
    params: &MusicalParams,
    ticks_per_quarter: u16,
    duration_secs: f64,
    alpha: f64,
    beta: f64,
    rng: &mut R,
) -> Vec<MidiEvent> {
    let clock = TickClock::new(ticks_per_quarter, params.tempo_bpm);
    let end = clock.end_tick(duration_secs);
    let origin = clock.position(LEAD_IN_SECS);
    // A vanishing alpha gives an unbounded note; cap it so positions stay finite.
    let note_len = clock.position(note_seconds(alpha)).min(f64::from(MAX_TICK));
    let scale = params.scale.semitones();

    let mut events = Vec::new();
    let mut beta = beta;
    let mut step = 0u64;
    loop {
        let start = to_tick(origin + step as f64 * note_len);
        if start >= end {
            break;
        }
        let stop = to_tick(origin + (step + 1) as f64 * note_len);
        let key = transpose(params.key_root, scale[scale_index(beta, scale.len())]);

        tracing::trace!(start, stop, key, beta, "melody note");
        events.push(MidiEvent::note_on(start, CHANNEL, key, VELOCITY));
        events.push(MidiEvent::note_off(stop, CHANNEL, key));

        let drift: f64 = rng.gen_range(-1.0..1.0);
        beta = (beta + drift).clamp(BETA_FLOOR, BETA_CEIL);
        step += 1;
    }
    events
}
