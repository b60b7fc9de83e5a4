use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::ComposerConfig;
use crate::error::{ConfigError, Error};
use crate::generators::{harmony, melody, rhythm};
use crate::merge::merge;
use crate::note::Note;
use crate::params::MusicalParams;
use crate::smf::MidiFile;
use crate::snapshot::BiometricSnapshot;

/// Longest composition accepted; keeps every tick inside VLQ range at the
/// highest division and tempo.
pub const MAX_DURATION_SECS: f64 = 2_700.0;

/// Non-finite and non-positive durations collapse to zero.
pub fn clamp_duration(secs: f64) -> f64 {
    if secs.is_finite() && secs > 0.0 {
        secs.min(MAX_DURATION_SECS)
    } else {
        0.0
    }
}

/// Turns snapshots into MIDI files. Holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    config: ComposerConfig,
    key: Option<Note>,
}

impl Composer {
    pub fn new(config: ComposerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Composer { config, key: None })
    }

    /// Use a fixed key root instead of the one implied by the emotion.
    pub fn with_key(mut self, key: Note) -> Self {
        self.key = Some(key);
        self
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    pub fn params(&self, snapshot: &BiometricSnapshot) -> MusicalParams {
        let params = MusicalParams::from_snapshot(snapshot);
        match self.key {
            Some(key) => params.with_key(key),
            None => params,
        }
    }

    pub fn compose<R: Rng + ?Sized>(
        &self,
        snapshot: &BiometricSnapshot,
        duration_secs: f64,
        rng: &mut R,
    ) -> MidiFile {
        let duration = clamp_duration(duration_secs);
        let params = self.params(snapshot);
        let ppqn = self.config.ticks_per_quarter;
        debug!(
            tempo = params.tempo_bpm,
            rhythm = params.rhythm_bpm,
            key = params.key_root,
            scale = ?params.scale,
            duration,
            "mapped snapshot"
        );

        let melody = melody::generate(&params, ppqn, duration, snapshot.alpha(), snapshot.beta(), rng);
        let rhythm = rhythm::generate(&params, ppqn, duration);
        let harmony = harmony::generate(&params, ppqn, duration);
        debug!(
            melody = melody.len(),
            rhythm = rhythm.len(),
            harmony = harmony.len(),
            "generated voices"
        );

        let track = merge(params.micros_per_quarter(), &[melody, rhythm, harmony]);
        MidiFile::new(ppqn, track)
    }

    /// Compose and serialize in one step.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        snapshot: &BiometricSnapshot,
        duration_secs: f64,
        rng: &mut R,
    ) -> Result<Vec<u8>, Error> {
        let bytes = self.compose(snapshot, duration_secs, rng).to_bytes()?;
        debug!(bytes = bytes.len(), "encoded midi file");
        Ok(bytes)
    }

    /// Same as [`Composer::generate`] with a ChaCha8 stream seeded from `seed`.
    pub fn generate_seeded(
        &self,
        snapshot: &BiometricSnapshot,
        duration_secs: f64,
        seed: u64,
    ) -> Result<Vec<u8>, Error> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.generate(snapshot, duration_secs, &mut rng)
    }
}
