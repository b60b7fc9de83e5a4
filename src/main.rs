use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use biometric_midi_gen::{config, BiometricSnapshot, Composer, ComposerConfig, Emotion, Note};

#[derive(Debug, Parser)]
#[command(
    name = "biomidi",
    version,
    about = "Seeded MIDI (format 0) generator driven by biometric readings"
)]
struct Cli {
    /// Output .mid path (if omitted, a timestamped name is generated)
    #[arg(short, long)]
    out: Option<String>,

    /// JSON config file (ticks_per_quarter, default_duration_secs, seed)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON snapshot file; individual flags below override its fields
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Alpha band amplitude
    #[arg(long)]
    alpha: Option<f64>,

    /// Beta band amplitude
    #[arg(long)]
    beta: Option<f64>,

    /// Theta band amplitude
    #[arg(long)]
    theta: Option<f64>,

    /// Delta band amplitude
    #[arg(long)]
    delta: Option<f64>,

    /// Pulse in beats per minute
    #[arg(long)]
    pulse: Option<f64>,

    /// Emotion label (Calm, Focused, Energized, Relaxed, Stressed, Happy, Sad)
    #[arg(long)]
    emotion: Option<String>,

    /// Derive the emotion from the bands and pulse when none is given
    #[arg(long, default_value_t = false)]
    classify: bool,

    /// Key root in scientific pitch notation (e.g. C4, A3, F#5), overriding the emotion's key
    #[arg(long)]
    key: Option<Note>,

    /// Length in seconds
    #[arg(long)]
    duration: Option<f64>,

    /// RNG seed (same seed => same MIDI)
    #[arg(long)]
    seed: Option<u64>,

    /// Ticks per quarter note (PPQN)
    #[arg(long)]
    ppqn: Option<u16>,
}

fn default_out_path(seed: u64) -> String {
    let ts = chrono::Local::now().format("%Y%m%d_%H%M%S");
    format!("out/biometric_{ts}_{seed}.mid")
}

fn read_snapshot(path: &Path) -> Result<BiometricSnapshot> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("reading snapshot {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing snapshot {}", path.display()))
}

fn build_snapshot(cli: &Cli) -> Result<BiometricSnapshot> {
    let mut snapshot = match &cli.snapshot {
        Some(path) => read_snapshot(path)?,
        None => BiometricSnapshot::default(),
    };

    snapshot.alpha = cli.alpha.or(snapshot.alpha);
    snapshot.beta = cli.beta.or(snapshot.beta);
    snapshot.theta = cli.theta.or(snapshot.theta);
    snapshot.delta = cli.delta.or(snapshot.delta);
    snapshot.pulse = cli.pulse.or(snapshot.pulse);

    if let Some(label) = &cli.emotion {
        match label.parse::<Emotion>() {
            Ok(emotion) => snapshot.emotion = Some(emotion),
            Err(err) => {
                warn!(%err, "falling back to Calm");
                snapshot.emotion = None;
            }
        }
    }

    if cli.classify {
        snapshot = snapshot.with_classified_emotion();
    }
    Ok(snapshot)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => config::load(path)?,
        None => ComposerConfig::default(),
    };
    if let Some(ppqn) = cli.ppqn {
        settings.ticks_per_quarter = ppqn;
    }
    let seed = cli.seed.unwrap_or(settings.seed);
    let duration = cli.duration.unwrap_or(settings.default_duration_secs);

    let mut composer = Composer::new(settings)?;
    if let Some(key) = cli.key {
        composer = composer.with_key(key);
    }

    let snapshot = build_snapshot(&cli)?;
    let params = composer.params(&snapshot);
    info!(
        tempo = params.tempo_bpm,
        key = params.key_root,
        scale = ?params.scale,
        emotion = snapshot.emotion.map_or("Calm (default)", Emotion::label),
        seed,
        ppqn = composer.config().ticks_per_quarter,
        "composing"
    );

    let bytes = composer.generate_seeded(&snapshot, duration, seed)?;

    let out_path = cli.out.clone().unwrap_or_else(|| default_out_path(seed));
    if let Some(parent) = Path::new(&out_path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    fs::write(&out_path, &bytes).with_context(|| format!("writing {out_path}"))?;
    info!(path = %out_path, bytes = bytes.len(), "wrote midi file");
    Ok(())
}
