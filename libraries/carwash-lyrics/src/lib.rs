//! Lyric timing for Car Wash Mixer
//!
//! Turns a line-timed LRC file into a mapping keyed by musical bar and
//! timestamp:
//!
//! ```text
//! ┌──────────┐     ┌──────────────┐     ┌────────────┐     ┌────────────┐
//! │ LRC text │ ──► │ LRC tokenizer│ ──► │ Bar mapper │ ──► │ BarMapping │ ──► JSON
//! └──────────┘     └──────────────┘     └────────────┘     └────────────┘
//!                                             ▲
//!                                       TempoContext
//! ```
//!
//! # Example
//!
//! ```
//! use carwash_lyrics::{map_lyrics, parse_lrc, TempoContext};
//!
//! let lines = parse_lrc("[00:00.00]Scrub\n[00:02.00]Rinse\n");
//! let mapping = map_lyrics(lines, &TempoContext::new(120.0)).unwrap();
//!
//! assert_eq!(mapping.get(1, 0.0), Some("Scrub"));
//! assert_eq!(mapping.get(2, 2.0), Some("Rinse"));
//! ```

#![deny(unsafe_code)]

mod error;
mod lrc;
mod mapper;
mod mapping;
mod tempo;

pub use error::{LyricsError, Result};
pub use lrc::{parse_lrc, read_lrc_file, LyricLine};
pub use mapper::map_lyrics;
pub use mapping::{BarKey, BarMapping};
pub use tempo::{TempoContext, DEFAULT_BEATS_PER_BAR, DEFAULT_OFFSET_SECS};
