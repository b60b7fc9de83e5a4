use crate::event::MidiEvent;
use crate::smf::Track;

/// Merge per-voice event lists into one track.
///
/// Each list must already be in non-decreasing tick order. Ties go to the
/// earlier list, and within a list emission order is kept. The track opens
/// with the tempo event and closes with end-of-track at the last event's tick.
pub fn merge(micros_per_quarter: u32, voices: &[Vec<MidiEvent>]) -> Track {
    debug_assert!(voices
        .iter()
        .all(|v| v.windows(2).all(|w| w[0].tick <= w[1].tick)));

    let total: usize = voices.iter().map(Vec::len).sum();
    let mut events = Vec::with_capacity(total + 2);
    events.push(MidiEvent::tempo(micros_per_quarter));

    let mut cursors = vec![0usize; voices.len()];
    loop {
        let next = voices
            .iter()
            .zip(&cursors)
            .enumerate()
            .filter_map(|(voice, (list, &at))| list.get(at).map(|e| (e.tick, voice)))
            .min();
        let Some((_, voice)) = next else {
            break;
        };
        events.push(voices[voice][cursors[voice]]);
        cursors[voice] += 1;
    }

    let last = events.last().map_or(0, |e| e.tick);
    events.push(MidiEvent::end_of_track(last));
    Track::new(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;

    #[test]
    fn empty_voices_give_tempo_and_end() {
        let track = merge(500_000, &[vec![], vec![], vec![]]);
        assert_eq!(
            track.events(),
            &[MidiEvent::tempo(500_000), MidiEvent::end_of_track(0)]
        );
    }

    #[test]
    fn ties_keep_voice_then_emission_order() {
        let melody = vec![
            MidiEvent::note_on(10, 0, 60, 64),
            MidiEvent::note_off(20, 0, 60),
            MidiEvent::note_on(20, 0, 62, 64),
        ];
        let drums = vec![
            MidiEvent::note_on(0, 9, 36, 100),
            MidiEvent::note_off(20, 9, 36),
        ];
        let chords = vec![
            MidiEvent::note_on(0, 1, 48, 50),
            MidiEvent::note_on(10, 1, 52, 50),
            MidiEvent::note_off(30, 1, 52),
        ];
        let track = merge(1, &[melody, drums, chords]);
        let order: Vec<(u32, EventKind)> = track.events().iter().map(|e| (e.tick, e.kind)).collect();
        assert_eq!(
            order,
            vec![
                (0, EventKind::Tempo(1)),
                (0, EventKind::NoteOn { channel: 9, key: 36, velocity: 100 }),
                (0, EventKind::NoteOn { channel: 1, key: 48, velocity: 50 }),
                (10, EventKind::NoteOn { channel: 0, key: 60, velocity: 64 }),
                (10, EventKind::NoteOn { channel: 1, key: 52, velocity: 50 }),
                (20, EventKind::NoteOff { channel: 0, key: 60 }),
                (20, EventKind::NoteOn { channel: 0, key: 62, velocity: 64 }),
                (20, EventKind::NoteOff { channel: 9, key: 36 }),
                (30, EventKind::NoteOff { channel: 1, key: 52 }),
                (30, EventKind::EndOfTrack),
            ]
        );
    }
}
