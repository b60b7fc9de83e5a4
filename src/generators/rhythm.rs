use crate::event::MidiEvent;
use crate::params::MusicalParams;
use crate::timing::{to_tick, TickClock};

/// General MIDI percussion channel (the "10th channel").
pub const CHANNEL: u8 = 9;
pub const KICK: u8 = 36;
pub const SNARE: u8 = 38;
pub const KICK_VELOCITY: u8 = 100;
pub const SNARE_VELOCITY: u8 = 80;

const STEPS_PER_BEAT: u64 = 4;
const STEPS_PER_CYCLE: u64 = 2 * STEPS_PER_BEAT;

/// Which drum, if any, sounds on a sixteenth-note step.
///
/// Steps are grouped into two-beat cycles: the kick opens the first beat
/// and the snare opens the second, giving kicks on 1 and 3 and snares on 2
/// and 4 of a four-beat bar.
pub fn hit_at(step: u64) -> Option<(u8, u8)> {
    match step % STEPS_PER_CYCLE {
        0 => Some((KICK, KICK_VELOCITY)),
        STEPS_PER_BEAT => Some((SNARE, SNARE_VELOCITY)),
        _ => None,
    }
}

/// Kick and snare pattern paced by the rhythm pulse.
///
/// Each hit lasts an eighth of a beat.
pub fn generate(params: &MusicalParams, ticks_per_quarter: u16, duration_secs: f64) -> Vec<MidiEvent> {
    let clock = TickClock::new(ticks_per_quarter, params.tempo_bpm);
    let end = clock.end_tick(duration_secs);
    let beat = clock.beat_ticks(params.rhythm_bpm);
    let step_len = beat / STEPS_PER_BEAT as f64;
    let hit_len = beat / 8.0;

    let mut events = Vec::new();
    for step in 0u64.. {
        let position = step as f64 * step_len;
        let start = to_tick(position);
        if start >= end {
            break;
        }
        if let Some((key, velocity)) = hit_at(step) {
            events.push(MidiEvent::note_on(start, CHANNEL, key, velocity));
            events.push(MidiEvent::note_off(to_tick(position + hit_len), CHANNEL, key));
        }
    }
    events
}
