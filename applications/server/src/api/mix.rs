/// Loudness normalization API routes
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MixRequest {
    /// Server-side path of the track to normalize
    pub input: PathBuf,

    /// Server-side path of the WAV to write
    pub output: PathBuf,

    /// Target in LUFS; the configured default when absent
    pub target_lufs: Option<f64>,

    /// Preset name, logged only
    pub preset: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MixResponse {
    pub message: String,
    pub original_loudness: f64,
    pub applied_gain_db: f64,
    pub target_lufs: f64,
    pub peak_limited: bool,
}

/// POST /api/mix
/// Normalize a track on disk and write the result as WAV
pub async fn mix(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<MixRequest>, JsonRejection>,
) -> Result<Json<MixResponse>> {
    let Json(req) = payload?;
    let target_lufs = req.target_lufs.unwrap_or(app_state.default_target_lufs);
    let preset = req.preset.unwrap_or_else(|| "car-wash".to_string());

    tracing::info!(
        input = %req.input.display(),
        output = %req.output.display(),
        target_lufs,
        preset = %preset,
        "Mix requested"
    );

    let pipeline = app_state.pipeline.clone();
    let report = tokio::task::spawn_blocking(move || {
        pipeline.run(&req.input, &req.output, target_lufs)
    })
    .await
    .map_err(|e| ServerError::Internal(format!("Mix task failed: {}", e)))??;

    Ok(Json(MixResponse {
        message: report.to_string(),
        original_loudness: report.original_loudness,
        applied_gain_db: report.applied_gain_db,
        target_lufs: report.target_lufs,
        peak_limited: report.peak_limited,
    }))
}
