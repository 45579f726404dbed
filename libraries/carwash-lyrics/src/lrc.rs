//! LRC tokenizer
//!
//! Accepts the usual `[mm:ss]` / `[mm:ss.xx]` time tags at the start of a
//! line. A line may carry several time tags in a row; each one yields a
//! separate [`LyricLine`] with the same text. Lines without a leading time
//! tag (blank lines, `[ar:...]`/`[ti:...]` metadata, free text) are skipped.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One timed line of lyrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricLine {
    /// Seconds from the start of the track
    pub timestamp: f64,

    /// Lyric text (may be empty)
    pub text: String,
}

impl LyricLine {
    /// Create a new lyric line
    pub fn new(timestamp: f64, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            text: text.into(),
        }
    }
}

fn time_tag() -> &'static Regex {
    static TIME_TAG: OnceLock<Regex> = OnceLock::new();
    TIME_TAG.get_or_init(|| {
        Regex::new(r"^\[(\d+):(\d+(?:\.\d+)?)\]").expect("valid LRC time tag regex")
    })
}

/// Parse LRC text into lyric lines, in file order
pub fn parse_lrc(text: &str) -> Vec<LyricLine> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = Vec::new();

    for (line_no, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let mut rest = line;
        let mut timestamps = Vec::new();
        while let Some(caps) = time_tag().captures(rest) {
            let (Ok(minutes), Ok(seconds)) = (caps[1].parse::<u32>(), caps[2].parse::<f64>())
            else {
                break;
            };
            timestamps.push(f64::from(minutes) * 60.0 + seconds);
            rest = rest[caps[0].len()..].trim_start();
        }

        if timestamps.is_empty() {
            tracing::trace!(line = line_no + 1, "Skipping line without a time tag");
            continue;
        }

        let lyric = rest.trim();
        lines.extend(
            timestamps
                .into_iter()
                .map(|timestamp| LyricLine::new(timestamp, lyric)),
        );
    }

    lines
}

/// Read and parse a UTF-8 LRC file
pub fn read_lrc_file(path: impl AsRef<Path>) -> Result<Vec<LyricLine>> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let lines = parse_lrc(&text);
    tracing::debug!(
        path = %path.as_ref().display(),
        lines = lines.len(),
        "Parsed LRC file"
    );
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_lines() {
        let lines = parse_lrc("[00:12.50]Soap on the hood\n[01:03]Rinse cycle\n");

        assert_eq!(
            lines,
            vec![
                LyricLine::new(12.5, "Soap on the hood"),
                LyricLine::new(63.0, "Rinse cycle"),
            ]
        );
    }

    #[test]
    fn test_skips_blank_and_metadata_lines() {
        let text = "[ar:The Sponges]\n[ti:Car Wash]\n\n   \nno tag here\n[00:01.00]First\n";
        let lines = parse_lrc(text);

        assert_eq!(lines, vec![LyricLine::new(1.0, "First")]);
    }

    #[test]
    fn test_empty_text_is_kept() {
        let lines = parse_lrc("[00:05.00]\n[00:06.00]   \n");

        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.text.is_empty()));
    }

    #[test]
    fn test_repeated_time_tags() {
        let lines = parse_lrc("[00:10.00][00:40.00] [01:10.00]Chorus\n");

        let stamps: Vec<f64> = lines.iter().map(|l| l.timestamp).collect();
        assert_eq!(stamps, vec![10.0, 40.0, 70.0]);
        assert!(lines.iter().all(|l| l.text == "Chorus"));
    }

    #[test]
    fn test_preserves_file_order() {
        let lines = parse_lrc("[00:09.00]B\n[00:03.00]A\n");
        assert_eq!(lines[0].text, "B");
        assert_eq!(lines[1].text, "A");
    }

    #[test]
    fn test_trims_whitespace_and_bom() {
        let lines = parse_lrc("\u{feff}  [00:02.25]  Wax on  \r\n");
        assert_eq!(lines, vec![LyricLine::new(2.25, "Wax on")]);
    }

    #[test]
    fn test_tag_must_lead_the_line() {
        let lines = parse_lrc("intro [00:01.00]late tag\n");
        assert!(lines.is_empty());
    }

    #[test]
    fn test_millisecond_precision() {
        let lines = parse_lrc("[02:03.456]Dry\n");
        assert!((lines[0].timestamp - 123.456).abs() < 1e-9);
    }
}
