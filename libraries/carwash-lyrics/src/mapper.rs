//! Lyric line → bar mapping

use crate::error::{LyricsError, Result};
use crate::lrc::LyricLine;
use crate::mapping::{BarKey, BarMapping};
use crate::tempo::TempoContext;
use std::cmp::Ordering;

/// Place every lyric line on the bar grid described by `tempo`
///
/// Lines are ordered by timestamp (stable, so equal timestamps keep their
/// input order) and inserted in that order. Bar numbers are the floor of
/// `(timestamp - offset) / seconds_per_bar` plus one; lines before the offset
/// land in bar 0 or below and are kept as-is.
///
/// Two lines share a key only when their timestamps are identical. The line
/// that comes later in the input wins and the earlier text is dropped.
///
/// # Errors
/// - [`LyricsError::InvalidTempo`] if `tempo` fails validation
/// - [`LyricsError::InvalidTimestamp`] if a line's timestamp is NaN or infinite
pub fn map_lyrics(mut lines: Vec<LyricLine>, tempo: &TempoContext) -> Result<BarMapping> {
    tempo.validate()?;

    if let Some((index, line)) = lines
        .iter()
        .enumerate()
        .find(|(_, line)| !line.timestamp.is_finite())
    {
        return Err(LyricsError::InvalidTimestamp {
            index,
            timestamp: line.timestamp,
        });
    }

    // Timestamps are finite here; -0.0 and 0.0 compare equal and keep input order
    lines.sort_by(|a, b| {
        a.timestamp
            .partial_cmp(&b.timestamp)
            .unwrap_or(Ordering::Equal)
    });

    let mut mapping = BarMapping::new();
    let mut collisions = 0_usize;
    for line in lines {
        let key = BarKey::new(tempo.bar_for(line.timestamp), line.timestamp);
        if mapping.insert(key, line.text).is_some() {
            collisions += 1;
        }
    }

    if collisions > 0 {
        tracing::debug!(collisions, "Lines with identical timestamps replaced earlier text");
    }
    tracing::debug!(
        entries = mapping.len(),
        seconds_per_bar = tempo.seconds_per_bar(),
        "Mapped lyrics to bars"
    );

    Ok(mapping)
}
