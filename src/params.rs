//! Mapping from a snapshot to tempo, key, scale and chord progression.

use crate::note::Note;
use crate::snapshot::{BiometricSnapshot, Emotion};

pub const MIN_TEMPO: f64 = 60.0;
pub const MAX_TEMPO: f64 = 180.0;
pub const DEFAULT_TEMPO: f64 = 120.0;
/// Pulse assumed by the rhythm section when none was measured.
pub const DEFAULT_RHYTHM_PULSE: f64 = 72.0;
pub const DEFAULT_KEY_ROOT: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Major,
    Minor,
    Pentatonic,
}

impl Scale {
    pub fn semitones(self) -> &'static [u8] {
        match self {
            Scale::Major => &[0, 2, 4, 5, 7, 9, 11],
            Scale::Minor => &[0, 2, 3, 5, 7, 8, 10],
            Scale::Pentatonic => &[0, 2, 4, 7, 9],
        }
    }

    /// Pick the scale of the strictly dominant band.
    ///
    /// Alpha selects major, beta minor. Theta dominance and any tie at the
    /// top fall through to pentatonic.
    pub fn from_bands(alpha: f64, beta: f64, theta: f64) -> Scale {
        if alpha > beta && alpha > theta {
            Scale::Major
        } else if beta > alpha && beta > theta {
            Scale::Minor
        } else {
            Scale::Pentatonic
        }
    }
}

/// Chords as semitone offsets from the key root, cycled in order.
pub type ChordProgression = &'static [&'static [u8]];

const CALM_PROGRESSION: ChordProgression = &[&[0, 4, 7], &[5, 9, 12], &[3, 7, 10], &[0, 4, 7]];
const FOCUSED_PROGRESSION: ChordProgression = &[&[0, 3, 7], &[5, 8, 12], &[2, 5, 9], &[0, 3, 7]];
const ENERGIZED_PROGRESSION: ChordProgression =
    &[&[0, 4, 7], &[2, 5, 9], &[5, 9, 12], &[0, 4, 7]];
const RELAXED_PROGRESSION: ChordProgression = &[&[0, 4, 7], &[7, 11, 14], &[5, 9, 12], &[0, 4, 7]];

pub fn key_root(emotion: Option<Emotion>) -> u8 {
    match emotion {
        Some(Emotion::Calm) => 60,
        Some(Emotion::Focused) => 62,
        Some(Emotion::Energized) => 64,
        Some(Emotion::Relaxed) => 57,
        Some(Emotion::Stressed) => 58,
        Some(Emotion::Happy) => 67,
        Some(Emotion::Sad) => 65,
        None => DEFAULT_KEY_ROOT,
    }
}

pub fn progression(emotion: Option<Emotion>) -> ChordProgression {
    match emotion {
        Some(Emotion::Focused) => FOCUSED_PROGRESSION,
        Some(Emotion::Energized) => ENERGIZED_PROGRESSION,
        Some(Emotion::Relaxed) => RELAXED_PROGRESSION,
        Some(Emotion::Calm | Emotion::Stressed | Emotion::Happy | Emotion::Sad) | None => {
            CALM_PROGRESSION
        }
    }
}

pub fn clamp_tempo(bpm: f64) -> f64 {
    bpm.clamp(MIN_TEMPO, MAX_TEMPO)
}

/// Everything the generators need, derived once per call.
#[derive(Debug, Clone, PartialEq)]
pub struct MusicalParams {
    pub tempo_bpm: f64,
    /// Drives the rhythm grid. Equal to `tempo_bpm` whenever a pulse was measured.
    pub rhythm_bpm: f64,
    pub key_root: u8,
    pub scale: Scale,
    pub progression: ChordProgression,
}

impl MusicalParams {
    pub fn from_snapshot(snapshot: &BiometricSnapshot) -> Self {
        MusicalParams {
            tempo_bpm: clamp_tempo(snapshot.pulse_or(DEFAULT_TEMPO)),
            rhythm_bpm: clamp_tempo(snapshot.pulse_or(DEFAULT_RHYTHM_PULSE)),
            key_root: key_root(snapshot.emotion),
            scale: Scale::from_bands(snapshot.alpha(), snapshot.beta(), snapshot.theta()),
            progression: progression(snapshot.emotion),
        }
    }

    pub fn with_key(mut self, key: Note) -> Self {
        self.key_root = key.key();
        self
    }

    /// Microseconds per quarter note for the tempo meta event.
    pub fn micros_per_quarter(&self) -> u32 {
        (60_000_000.0 / self.tempo_bpm).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(alpha: f64, beta: f64, theta: f64) -> BiometricSnapshot {
        BiometricSnapshot {
            alpha: Some(alpha),
            beta: Some(beta),
            theta: Some(theta),
            ..Default::default()
        }
    }

    #[test]
    fn tempo_is_clamped_pulse() {
        let mut s = BiometricSnapshot::default();
        assert_eq!(MusicalParams::from_snapshot(&s).tempo_bpm, DEFAULT_TEMPO);
        assert_eq!(MusicalParams::from_snapshot(&s).rhythm_bpm, DEFAULT_RHYTHM_PULSE);

        s.pulse = Some(30.0);
        assert_eq!(MusicalParams::from_snapshot(&s).tempo_bpm, 60.0);
        s.pulse = Some(-30.0);
        assert_eq!(MusicalParams::from_snapshot(&s).tempo_bpm, 60.0);
        assert_eq!(MusicalParams::from_snapshot(&s).rhythm_bpm, 60.0);
        s.pulse = Some(f64::INFINITY);
        assert_eq!(MusicalParams::from_snapshot(&s).tempo_bpm, 180.0);
        s.pulse = Some(f64::NEG_INFINITY);
        assert_eq!(MusicalParams::from_snapshot(&s).tempo_bpm, 60.0);
        s.pulse = Some(0.0);
        assert_eq!(MusicalParams::from_snapshot(&s).tempo_bpm, DEFAULT_TEMPO);
        s.pulse = Some(400.0);
        assert_eq!(MusicalParams::from_snapshot(&s).tempo_bpm, 180.0);
        s.pulse = Some(95.5);
        let p = MusicalParams::from_snapshot(&s);
        assert_eq!(p.tempo_bpm, 95.5);
        assert_eq!(p.rhythm_bpm, 95.5);
    }

    #[test]
    fn key_table_is_exhaustive() {
        let expected = [60, 62, 64, 57, 58, 67, 65];
        for (emotion, key) in Emotion::ALL.into_iter().zip(expected) {
            assert_eq!(key_root(Some(emotion)), key, "{emotion}");
        }
        assert_eq!(key_root(None), 60);
    }

    #[test]
    fn progressions_fall_back_to_calm() {
        assert_eq!(progression(None), CALM_PROGRESSION);
        assert_eq!(progression(Some(Emotion::Happy)), CALM_PROGRESSION);
        assert_eq!(progression(Some(Emotion::Sad)), CALM_PROGRESSION);
        assert_eq!(progression(Some(Emotion::Stressed)), CALM_PROGRESSION);
        assert_eq!(progression(Some(Emotion::Relaxed))[1], &[7, 11, 14]);
        assert_eq!(progression(Some(Emotion::Focused))[0], &[0, 3, 7]);
        assert_eq!(progression(Some(Emotion::Energized))[1], &[2, 5, 9]);
        for e in Emotion::ALL {
            assert_eq!(progression(Some(e)).len(), 4);
        }
    }

    #[test]
    fn dominant_band_selects_scale() {
        assert_eq!(MusicalParams::from_snapshot(&snap(15.0, 10.0, 5.0)).scale, Scale::Major);
        assert_eq!(MusicalParams::from_snapshot(&snap(10.0, 20.0, 6.0)).scale, Scale::Minor);
        assert_eq!(MusicalParams::from_snapshot(&snap(4.0, 5.0, 9.0)).scale, Scale::Pentatonic);
        // Ties never resolve to alpha or beta.
        assert_eq!(Scale::from_bands(10.0, 10.0, 2.0), Scale::Pentatonic);
        assert_eq!(Scale::from_bands(10.0, 3.0, 10.0), Scale::Pentatonic);
        // Defaults: beta 20 over alpha 10 and theta 6.
        assert_eq!(
            MusicalParams::from_snapshot(&BiometricSnapshot::default()).scale,
            Scale::Minor
        );
    }

    #[test]
    fn micros_per_quarter_rounds() {
        let mut s = BiometricSnapshot::default();
        s.pulse = Some(72.0);
        assert_eq!(MusicalParams::from_snapshot(&s).micros_per_quarter(), 833_333);
        s.pulse = None;
        assert_eq!(MusicalParams::from_snapshot(&s).micros_per_quarter(), 500_000);
        s.pulse = Some(70.0);
        // 857142.857...
        assert_eq!(MusicalParams::from_snapshot(&s).micros_per_quarter(), 857_143);
    }

    #[test]
    fn key_override_replaces_emotion_key() {
        let p = MusicalParams::from_snapshot(&BiometricSnapshot::default())
            .with_key("D4".parse().unwrap());
        assert_eq!(p.key_root, 62);
    }
}
