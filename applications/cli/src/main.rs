/// wash-mix - Car Wash Mixer command-line tool
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "wash-mix")]
#[command(about = "Loudness-normalize tracks and map LRC lyrics onto bars", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Normalize a track's integrated loudness and write it as WAV
    Mix {
        /// Input audio file (mp3, flac, ogg, wav, m4a, aac)
        #[arg(long)]
        input: PathBuf,

        /// Output WAV file
        #[arg(long)]
        output: PathBuf,

        /// Target integrated loudness in LUFS
        #[arg(
            long,
            default_value_t = carwash_loudness::STREAMING_TARGET_LUFS,
            allow_negative_numbers = true
        )]
        target_lufs: f64,

        /// Mix preset name (recorded in logs only)
        #[arg(long, default_value = "car-wash")]
        preset: String,
    },

    /// Convert LRC lyrics to a JSON mapping keyed by bar and timestamp
    MapLyrics {
        /// Input LRC file
        #[arg(long)]
        lyrics: PathBuf,

        /// Beats per minute
        #[arg(long)]
        bpm: f64,

        /// Beats per bar
        #[arg(long, default_value_t = carwash_lyrics::DEFAULT_BEATS_PER_BAR)]
        beats_per_bar: u32,

        /// Seconds from the start of the track to the first beat of bar 1
        #[arg(
            long,
            default_value_t = carwash_lyrics::DEFAULT_OFFSET_SECS,
            allow_negative_numbers = true
        )]
        offset: f64,

        /// Output JSON file
        #[arg(long)]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wash_mix=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Mix {
            input,
            output,
            target_lufs,
            preset,
        } => {
            let report = commands::mix(&input, &output, target_lufs, &preset)?;
            println!("{report}");
            if report.peak_limited {
                tracing::warn!(
                    "Peak limit reached: output is {:.2} dB short of the target",
                    report.ideal_gain_db - report.applied_gain_db
                );
            }
        }
        Commands::MapLyrics {
            lyrics,
            bpm,
            beats_per_bar,
            offset,
            output,
        } => {
            let count = commands::map_lyrics(&lyrics, bpm, beats_per_bar, offset, &output)?;
            println!("Wrote {} mappings to {}", count, output.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_defaults() {
        let cli = Cli::try_parse_from([
            "wash-mix", "mix", "--input", "in.mp3", "--output", "out.wav",
        ])
        .unwrap();

        match cli.command {
            Commands::Mix {
                target_lufs,
                preset,
                ..
            } => {
                assert_eq!(target_lufs, -14.0);
                assert_eq!(preset, "car-wash");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn mix_accepts_negative_target() {
        let cli = Cli::try_parse_from([
            "wash-mix",
            "mix",
            "--input",
            "in.flac",
            "--output",
            "out.wav",
            "--target-lufs",
            "-23",
        ])
        .unwrap();

        assert!(matches!(
            cli.command,
            Commands::Mix { target_lufs, .. } if target_lufs == -23.0
        ));
    }

    #[test]
    fn map_lyrics_defaults_and_negative_offset() {
        let cli = Cli::try_parse_from([
            "wash-mix",
            "map-lyrics",
            "--lyrics",
            "song.lrc",
            "--bpm",
            "128",
            "--offset",
            "-0.5",
            "--output",
            "bars.json",
        ])
        .unwrap();

        match cli.command {
            Commands::MapLyrics {
                bpm,
                beats_per_bar,
                offset,
                ..
            } => {
                assert_eq!(bpm, 128.0);
                assert_eq!(beats_per_bar, 4);
                assert_eq!(offset, -0.5);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn map_lyrics_requires_bpm() {
        let result = Cli::try_parse_from([
            "wash-mix",
            "map-lyrics",
            "--lyrics",
            "song.lrc",
            "--output",
            "bars.json",
        ]);
        assert!(result.is_err());
    }
}
