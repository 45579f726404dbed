/// Lyric bar-mapping API routes
use crate::error::{Result, ServerError};
use axum::{extract::rejection::JsonRejection, Json};
use carwash_lyrics::{map_lyrics as map_to_bars, read_lrc_file, TempoContext};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapLyricsRequest {
    /// Server-side path of the LRC file
    pub lyrics: PathBuf,

    pub bpm: f64,

    #[serde(default = "default_beats_per_bar")]
    pub beats_per_bar: u32,

    #[serde(default)]
    pub offset: f64,

    /// Server-side path of the JSON file to write
    pub output: PathBuf,
}

fn default_beats_per_bar() -> u32 {
    carwash_lyrics::DEFAULT_BEATS_PER_BAR
}

#[derive(Debug, Serialize)]
pub struct MapLyricsResponse {
    pub message: String,
    pub count: usize,
}

/// POST /api/map-lyrics
/// Map an LRC file onto bars and write the JSON mapping
pub async fn map_lyrics(
    payload: std::result::Result<Json<MapLyricsRequest>, JsonRejection>,
) -> Result<Json<MapLyricsResponse>> {
    let Json(req) = payload?;
    let tempo = TempoContext::new(req.bpm)
        .with_beats_per_bar(req.beats_per_bar)
        .with_offset(req.offset);
    tempo.validate()?;

    if !req.lyrics.exists() {
        return Err(ServerError::NotFound(format!(
            "Lyrics file not found: {}",
            req.lyrics.display()
        )));
    }

    let count = tokio::task::spawn_blocking(move || -> Result<usize> {
        let lines = read_lrc_file(&req.lyrics)?;
        let mapping = map_to_bars(lines, &tempo)?;
        mapping.write_json(&req.output)?;
        Ok(mapping.len())
    })
    .await
    .map_err(|e| ServerError::Internal(format!("Lyrics task failed: {}", e)))??;

    Ok(Json(MapLyricsResponse {
        message: format!("Wrote {} mappings", count),
        count,
    }))
}
