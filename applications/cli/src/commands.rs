/// Subcommand implementations
use anyhow::Context;
use carwash_audio::{MixPipeline, MixReport};
use carwash_lyrics::{map_lyrics as map_to_bars, read_lrc_file, TempoContext};
use std::path::Path;

/// Normalize `input` to `target_lufs` and write `output`
pub fn mix(
    input: &Path,
    output: &Path,
    target_lufs: f64,
    preset: &str,
) -> anyhow::Result<MixReport> {
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        target_lufs,
        preset,
        "Mixing"
    );

    MixPipeline::standard()
        .run(input, output, target_lufs)
        .with_context(|| format!("Failed to mix {}", input.display()))
}

/// Map the LRC file at `lyrics` onto bars and write the JSON mapping
///
/// Returns the number of entries written.
pub fn map_lyrics(
    lyrics: &Path,
    bpm: f64,
    beats_per_bar: u32,
    offset: f64,
    output: &Path,
) -> anyhow::Result<usize> {
    let tempo = TempoContext::new(bpm)
        .with_beats_per_bar(beats_per_bar)
        .with_offset(offset);
    tempo.validate()?;

    let lines = read_lrc_file(lyrics)
        .with_context(|| format!("Failed to read lyrics from {}", lyrics.display()))?;
    let mapping = map_to_bars(lines, &tempo)?;
    mapping
        .write_json(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(mapping.len())
}
