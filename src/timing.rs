//! Conversion between seconds, beats and ticks.
//!
//! Positions are kept as fractional ticks and floored exactly once, when an
//! event is stamped. Grid positions are always `origin + n * interval` so no
//! rounding error accumulates across steps.

use crate::vlq;

/// Latest tick any event may land on; keeps every delta inside VLQ range.
pub const MAX_TICK: u32 = vlq::MAX_VALUE;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickClock {
    ticks_per_quarter: u16,
    bpm: f64,
}

impl TickClock {
    pub fn new(ticks_per_quarter: u16, bpm: f64) -> Self {
        TickClock {
            ticks_per_quarter,
            bpm,
        }
    }

    pub fn ticks_per_second(&self) -> f64 {
        f64::from(self.ticks_per_quarter) * self.bpm / 60.0
    }

    /// Length in ticks of one beat of a pulse running at `bpm`.
    pub fn beat_ticks(&self, bpm: f64) -> f64 {
        f64::from(self.ticks_per_quarter) * self.bpm / bpm
    }

    /// Fractional tick position of a point in time.
    pub fn position(&self, seconds: f64) -> f64 {
        seconds * self.ticks_per_second()
    }

    /// End of the composition: the first tick at which no new step may start.
    pub fn end_tick(&self, duration_secs: f64) -> u32 {
        to_tick(self.position(duration_secs))
    }
}

/// Floor a fractional position to a tick, saturating at [`MAX_TICK`].
pub fn to_tick(position: f64) -> u32 {
    if position.is_nan() || position <= 0.0 {
        0
    } else if position >= f64::from(MAX_TICK) {
        MAX_TICK
    } else {
        position.floor() as u32
    }
}
