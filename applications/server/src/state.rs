/// Shared application state
use carwash_audio::MixPipeline;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<MixPipeline>,
    pub default_target_lufs: f64,
}

impl AppState {
    pub fn new(default_target_lufs: f64) -> Self {
        Self {
            pipeline: Arc::new(MixPipeline::standard()),
            default_target_lufs,
        }
    }
}
