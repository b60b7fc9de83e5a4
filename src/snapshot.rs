//! Physiological input to a generation call.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

pub const DEFAULT_ALPHA: f64 = 10.0;
pub const DEFAULT_BETA: f64 = 20.0;
pub const DEFAULT_THETA: f64 = 6.0;

/// Resting pulse used as the neutral point for arousal.
const RESTING_PULSE: f64 = 72.0;

/// Emotional-state label attached to a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emotion {
    Calm,
    Focused,
    Energized,
    Relaxed,
    Stressed,
    Happy,
    Sad,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Calm,
        Emotion::Focused,
        Emotion::Energized,
        Emotion::Relaxed,
        Emotion::Stressed,
        Emotion::Happy,
        Emotion::Sad,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Emotion::Calm => "Calm",
            Emotion::Focused => "Focused",
            Emotion::Energized => "Energized",
            Emotion::Relaxed => "Relaxed",
            Emotion::Stressed => "Stressed",
            Emotion::Happy => "Happy",
            Emotion::Sad => "Sad",
        }
    }

    /// Classify from band amplitudes and pulse.
    ///
    /// Valence is the alpha share of alpha+beta; arousal grows with pulse
    /// deviation from rest and with beta. Never yields `Happy` or `Sad`.
    pub fn classify(alpha: f64, beta: f64, pulse: f64) -> Emotion {
        let valence = alpha / (alpha + beta);
        let deviation = (pulse - RESTING_PULSE).abs() / 28.0;
        let arousal = (deviation + beta / 30.0).min(1.0);

        if valence > 0.6 && arousal < 0.4 {
            Emotion::Calm
        } else if valence > 0.6 && arousal > 0.6 {
            Emotion::Energized
        } else if valence < 0.4 && arousal > 0.6 {
            Emotion::Stressed
        } else if valence < 0.4 && arousal < 0.4 {
            Emotion::Relaxed
        } else {
            Emotion::Focused
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Emotion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Emotion::ALL
            .into_iter()
            .find(|e| e.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown emotion: {wanted:?}"))
    }
}

/// One reading of the band amplitudes, pulse and emotion label.
///
/// Every field is optional; absent or unusable values fall back to defaults
/// at the point of use.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BiometricSnapshot {
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
    pub theta: Option<f64>,
    pub delta: Option<f64>,
    pub pulse: Option<f64>,
    #[serde(deserialize_with = "lenient_emotion")]
    pub emotion: Option<Emotion>,
}

/// Missing, zero, negative and non-finite readings all count as absent.
fn band_or(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => default,
    }
}

impl BiometricSnapshot {
    pub fn alpha(&self) -> f64 {
        band_or(self.alpha, DEFAULT_ALPHA)
    }

    pub fn beta(&self) -> f64 {
        band_or(self.beta, DEFAULT_BETA)
    }

    pub fn theta(&self) -> f64 {
        band_or(self.theta, DEFAULT_THETA)
    }

    /// Pulse with a caller-chosen default; each mapping picks its own.
    ///
    /// Only a missing, zero or NaN pulse takes the default. Negative and
    /// infinite readings pass through for the tempo clamp to bound.
    pub fn pulse_or(&self, default: f64) -> f64 {
        match self.pulse {
            Some(p) if !p.is_nan() && p != 0.0 => p,
            _ => default,
        }
    }

    /// Fill in a missing emotion by classifying the bands and pulse.
    pub fn with_classified_emotion(mut self) -> Self {
        if self.emotion.is_none() {
            let emotion = Emotion::classify(self.alpha(), self.beta(), self.pulse_or(RESTING_PULSE));
            tracing::debug!(%emotion, "classified snapshot emotion");
            self.emotion = Some(emotion);
        }
        self
    }
}

fn lenient_emotion<'de, D>(deserializer: D) -> Result<Option<Emotion>, D::Error>
where
    D: Deserializer<'de>,
{
    let label: Option<String> = Option::deserialize(deserializer)?;
    Ok(label.and_then(|l| l.parse().ok()))
}
