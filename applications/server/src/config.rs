/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_audio")]
    pub audio: AudioSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Requests running longer than this are answered with 408
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AudioSettings {
    /// Used when a mix request does not name a target
    #[serde(default = "default_target_lufs")]
    pub target_lufs: f64,
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// With `path`, that file must exist. Without it, `config.toml` in the
    /// working directory is read if present. Environment variables prefixed
    /// with `CARWASH_` override both, using `__` between nesting levels
    /// (`CARWASH_AUDIO__TARGET_LUFS`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) if !path.exists() => {
                return Err(ServerError::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("CARWASH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.audio.target_lufs.is_finite() {
            return Err(ServerError::Config(format!(
                "audio.target_lufs must be finite, got {}",
                self.audio.target_lufs
            )));
        }

        if self.server.request_timeout_secs == 0 {
            return Err(ServerError::Config(
                "server.request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
        request_timeout_secs: default_request_timeout_secs(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_audio() -> AudioSettings {
    AudioSettings {
        target_lufs: default_target_lufs(),
    }
}

fn default_target_lufs() -> f64 {
    carwash_loudness::STREAMING_TARGET_LUFS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            audio: default_audio(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.audio.target_lufs, -14.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_values_override_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[server]\nport = 8088\n\n[audio]\ntarget_lufs = -23.0").unwrap();

        let config = ServerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.audio.target_lufs, -23.0);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let result = ServerConfig::load(Some(Path::new("/nonexistent/carwash.toml")));
        assert!(matches!(result, Err(ServerError::Config(_))));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut config = ServerConfig::default();
        config.audio.target_lufs = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.server.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
