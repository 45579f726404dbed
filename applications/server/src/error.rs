/// Server error types
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use carwash_audio::AudioError;
use carwash_lyrics::LyricsError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("Lyrics error: {0}")]
    Lyrics(#[from] LyricsError),
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Audio(e) => audio_status(e),
            ServerError::Lyrics(e) => lyrics_status(e),
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Caller mistakes surface with their message; codec failures are logged
fn audio_status(err: AudioError) -> (StatusCode, String) {
    match err {
        AudioError::FileNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        AudioError::UnsupportedFormat(_) | AudioError::Loudness(_) => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        other => {
            tracing::error!("Audio processing error: {:?}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Audio processing failed".to_string(),
            )
        }
    }
}

fn lyrics_status(err: LyricsError) -> (StatusCode, String) {
    match err {
        LyricsError::InvalidTempo { .. } | LyricsError::InvalidTimestamp { .. } => {
            (StatusCode::BAD_REQUEST, err.to_string())
        }
        LyricsError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound => {
            (StatusCode::NOT_FOUND, err.to_string())
        }
        other => {
            tracing::error!("Lyrics processing error: {:?}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Lyrics processing failed".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carwash_loudness::LoudnessError;

    #[test]
    fn status_mapping() {
        let cases = [
            (ServerError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ServerError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (
                ServerError::Audio(AudioError::FileNotFound("in.wav".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                ServerError::Audio(AudioError::Loudness(LoudnessError::SilentInput {
                    target_lufs: -14.0,
                })),
                StatusCode::BAD_REQUEST,
            ),
            (
                ServerError::Audio(AudioError::DecodeError("corrupt".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ServerError::Lyrics(LyricsError::invalid_tempo("bpm", "0")),
                StatusCode::BAD_REQUEST,
            ),
            (
                ServerError::Lyrics(LyricsError::Io(std::io::Error::from(
                    std::io::ErrorKind::NotFound,
                ))),
                StatusCode::NOT_FOUND,
            ),
            (
                ServerError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
