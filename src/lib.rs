//! Biometric MIDI generator
//!
//! Turns a snapshot of physiological readings (EEG-like band amplitudes, a
//! pulse rate and an emotion label) into a short Standard MIDI File, format 0,
//! single track. Output is fully determined by the snapshot, the duration and
//! the seed of the random source.
//!
//! Layout:
//! - snapshot.rs: input readings, defaults for missing values, emotion labels
//! - params.rs: tempo, key root, scale and chord progression mapping
//! - timing.rs: seconds/beats to ticks, the single floor-once rounding rule
//! - generators/: melody (channel 0), rhythm (channel 9), harmony (channel 1)
//! - merge.rs: stable merge of the three voices plus tempo and end-of-track
//! - vlq.rs: variable-length quantity codec for delta-times
//! - smf.rs: MThd/MTrk chunk layout
//! - composer.rs: the entry point tying the stages together
//! - config.rs / note.rs / error.rs: settings, pitch names, error types

pub mod composer;
pub mod config;
pub mod error;
pub mod event;
pub mod generators;
pub mod merge;
pub mod note;
pub mod params;
pub mod smf;
pub mod snapshot;
pub mod timing;
pub mod vlq;

pub use composer::Composer;
pub use config::ComposerConfig;
pub use error::{ConfigError, Error, VlqError};
pub use event::{EventKind, MidiEvent};
pub use note::Note;
pub use params::{MusicalParams, Scale};
pub use smf::{MidiFile, Track};
pub use snapshot::{BiometricSnapshot, Emotion};

/// Generate a file with the default configuration and a seeded random source.
pub fn generate(snapshot: &BiometricSnapshot, duration_secs: f64, seed: u64) -> Result<Vec<u8>, Error> {
    Composer::default().generate_seeded(snapshot, duration_secs, seed)
}
