//! Tempo context for bar computation

use serde::{Deserialize, Serialize};

use crate::error::{LyricsError, Result};

/// Beats per bar when none is given (common time)
pub const DEFAULT_BEATS_PER_BAR: u32 = 4;

/// Offset of bar 1 from the start of the track when none is given
pub const DEFAULT_OFFSET_SECS: f64 = 0.0;

/// Tempo and bar grid used to place lyric lines
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TempoContext {
    /// Beats per minute (> 0)
    pub bpm: f64,

    /// Beats in one bar (> 0)
    pub beats_per_bar: u32,

    /// Seconds from the start of the track to the first beat of bar 1;
    /// negative means bar 1 starts before the track does
    pub offset: f64,
}

impl TempoContext {
    /// Tempo in common time with bar 1 at 0 s
    pub fn new(bpm: f64) -> Self {
        Self {
            bpm,
            beats_per_bar: DEFAULT_BEATS_PER_BAR,
            offset: DEFAULT_OFFSET_SECS,
        }
    }

    /// Set beats per bar
    #[must_use]
    pub fn with_beats_per_bar(mut self, beats_per_bar: u32) -> Self {
        self.beats_per_bar = beats_per_bar;
        self
    }

    /// Set the offset of bar 1 in seconds
    #[must_use]
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Check every parameter, naming the first bad one
    pub fn validate(&self) -> Result<()> {
        if !self.bpm.is_finite() || self.bpm <= 0.0 {
            return Err(LyricsError::invalid_tempo(
                "bpm",
                format!("{} (must be a finite number greater than 0)", self.bpm),
            ));
        }
        if self.beats_per_bar == 0 {
            return Err(LyricsError::invalid_tempo(
                "beats_per_bar",
                "0 (must be a positive integer)",
            ));
        }
        if !self.offset.is_finite() {
            return Err(LyricsError::invalid_tempo(
                "offset",
                format!("{} (must be finite)", self.offset),
            ));
        }
        Ok(())
    }

    /// Length of one bar in seconds
    pub fn seconds_per_bar(&self) -> f64 {
        (60.0 / self.bpm) * f64::from(self.beats_per_bar)
    }

    /// 1-indexed bar containing `timestamp`
    ///
    /// Bar 1 starts at `offset`. Anything earlier falls in bar 0 or a
    /// negative bar; the value is never clamped.
    pub fn bar_for(&self, timestamp: f64) -> i64 {
        let adjusted = timestamp - self.offset;
        (adjusted / self.seconds_per_bar()).floor() as i64 + 1
    }
}
