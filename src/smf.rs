//! Standard MIDI File chunk layout for a single-track, format 0 file.

use crate::error::{Error, VlqError};
use crate::event::{EventKind, MidiEvent};
use crate::vlq;

pub const HEADER_TAG: &[u8; 4] = b"MThd";
pub const TRACK_TAG: &[u8; 4] = b"MTrk";
pub const HEADER_LEN: u32 = 6;
pub const FORMAT_SINGLE_TRACK: u16 = 0;

/// Absolute-tick events in playback order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Track {
    events: Vec<MidiEvent>,
}

impl Track {
    pub fn new(events: Vec<MidiEvent>) -> Self {
        Track { events }
    }

    pub fn events(&self) -> &[MidiEvent] {
        &self.events
    }

    fn has_end(&self) -> bool {
        matches!(
            self.events.last(),
            Some(MidiEvent {
                kind: EventKind::EndOfTrack,
                ..
            })
        )
    }

    /// Delta-encoded event stream, always closed by an end-of-track event.
    pub fn encode(&self) -> Result<Vec<u8>, VlqError> {
        let mut out = Vec::with_capacity(self.events.len() * 4 + 4);
        let mut last_tick = 0u32;
        for event in &self.events {
            vlq::write(event.tick.saturating_sub(last_tick), &mut out)?;
            last_tick = event.tick;
            out.extend_from_slice(&event.bytes());
        }
        if !self.has_end() {
            vlq::write(0, &mut out)?;
            out.extend_from_slice(&MidiEvent::end_of_track(last_tick).bytes());
        }
        Ok(out)
    }
}

/// A format 0 file: one header chunk and one track chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiFile {
    ticks_per_quarter: u16,
    track: Track,
}

impl MidiFile {
    pub fn new(ticks_per_quarter: u16, track: Track) -> Self {
        MidiFile {
            ticks_per_quarter,
            track,
        }
    }

    pub fn ticks_per_quarter(&self) -> u16 {
        self.ticks_per_quarter
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn header_chunk(&self) -> [u8; 14] {
        let mut chunk = [0u8; 14];
        chunk[0..4].copy_from_slice(HEADER_TAG);
        chunk[4..8].copy_from_slice(&HEADER_LEN.to_be_bytes());
        chunk[8..10].copy_from_slice(&FORMAT_SINGLE_TRACK.to_be_bytes());
        chunk[10..12].copy_from_slice(&1u16.to_be_bytes());
        chunk[12..14].copy_from_slice(&self.ticks_per_quarter.to_be_bytes());
        chunk
    }

    pub fn track_chunk(&self) -> Result<Vec<u8>, Error> {
        let stream = self.track.encode()?;
        let len = u32::try_from(stream.len()).map_err(|_| Error::TrackTooLarge(stream.len()))?;
        let mut chunk = Vec::with_capacity(8 + stream.len());
        chunk.extend_from_slice(TRACK_TAG);
        chunk.extend_from_slice(&len.to_be_bytes());
        chunk.extend_from_slice(&stream);
        Ok(chunk)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let track = self.track_chunk()?;
        let mut out = Vec::with_capacity(14 + track.len());
        out.extend_from_slice(&self.header_chunk());
        out.extend_from_slice(&track);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_layout() {
        let file = MidiFile::new(480, Track::default());
        assert_eq!(
            file.header_chunk(),
            [b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 0, 0, 1, 0x01, 0xE0]
        );
    }

    #[test]
    fn track_stream_uses_deltas() {
        let track = Track::new(vec![
            MidiEvent::tempo(500_000),
            MidiEvent::note_on(0, 0, 60, 64),
            MidiEvent::note_off(200, 0, 60),
            MidiEvent::end_of_track(200),
        ]);
        assert_eq!(
            track.encode().unwrap(),
            vec![
                0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, //
                0x00, 0x90, 60, 64, //
                0x81, 0x48, 0x80, 60, 0, //
                0x00, 0xFF, 0x2F, 0x00,
            ]
        );
    }

    #[test]
    fn missing_end_of_track_is_appended() {
        let track = Track::new(vec![MidiEvent::note_on(5, 0, 60, 64)]);
        let stream = track.encode().unwrap();
        assert_eq!(&stream[stream.len() - 4..], &[0x00, 0xFF, 0x2F, 0x00]);
        assert_eq!(Track::default().encode().unwrap(), vec![0x00, 0xFF, 0x2F, 0x00]);
    }

    #[test]
    fn track_length_matches_stream() {
        let file = MidiFile::new(
            96,
            Track::new(vec![
                MidiEvent::tempo(600_000),
                MidiEvent::note_on(1000, 9, 36, 100),
                MidiEvent::note_off(1100, 9, 36),
                MidiEvent::end_of_track(1100),
            ]),
        );
        let bytes = file.to_bytes().unwrap();
        assert_eq!(&bytes[14..18], TRACK_TAG);
        let declared = u32::from_be_bytes([bytes[18], bytes[19], bytes[20], bytes[21]]) as usize;
        assert_eq!(declared, bytes.len() - 22);
    }

    #[test]
    fn oversized_delta_is_an_error() {
        let track = Track::new(vec![MidiEvent::note_on(vlq::MAX_VALUE + 1, 0, 60, 64)]);
        let file = MidiFile::new(480, track);
        assert!(matches!(file.to_bytes(), Err(Error::Vlq(VlqError::Overflow(_)))));
    }
}
