//! Configuration management for Studyshare
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, StudyshareError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for Studyshare
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Where and how the session blob is persisted
    #[serde(default)]
    pub session: SessionConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base address every operation path is resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional per-request timeout (seconds). Requests never time out when unset.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:5000/api/v1".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
        }
    }
}

/// Persistence backend for the session slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// JSON file in the user's data directory
    #[default]
    File,
    /// OS native credential store
    Keyring,
}

impl std::str::FromStr for SessionBackend {
    type Err = StudyshareError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(Self::File),
            "keyring" => Ok(Self::Keyring),
            other => Err(StudyshareError::Config(format!(
                "Invalid session backend: {}. Must be one of: file, keyring",
                other
            ))),
        }
    }
}

/// Session persistence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Slot backend
    #[serde(default)]
    pub backend: SessionBackend,

    /// Explicit session file path (file backend only)
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Fixed key the session blob is stored under
    #[serde(default = "default_session_key")]
    pub key: String,
}

fn default_session_key() -> String {
    "user".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: SessionBackend::default(),
            path: None,
            key: default_session_key(),
        }
    }
}

impl Config {
    /// Load configuration from file, environment, and CLI arguments
    ///
    /// A missing file is not an error: defaults are used and a warning is
    /// logged. Environment variables override the file, and CLI flags
    /// override both.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| StudyshareError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| StudyshareError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("STUDYSHARE_API_BASE_URL") {
            self.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("STUDYSHARE_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.api.timeout_seconds = Some(value);
            } else {
                tracing::warn!("Invalid STUDYSHARE_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(backend) = std::env::var("STUDYSHARE_SESSION_BACKEND") {
            match backend.parse() {
                Ok(value) => self.session.backend = value,
                Err(e) => tracing::warn!("Ignoring STUDYSHARE_SESSION_BACKEND: {}", e),
            }
        }

        if let Ok(path) = std::env::var("STUDYSHARE_SESSION_PATH") {
            self.session.path = Some(PathBuf::from(path));
        }

        if let Ok(key) = std::env::var("STUDYSHARE_SESSION_KEY") {
            self.session.key = key;
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(api_url) = &cli.api_url {
            self.api.base_url = api_url.clone();
        }
        if let Some(session_file) = &cli.session_file {
            self.session.backend = SessionBackend::File;
            self.session.path = Some(session_file.clone());
        }
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not an absolute http(s) URL, if a
    /// zero timeout is configured, or if the session key is unusable as a
    /// slot name
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.api.base_url).map_err(|e| {
            StudyshareError::Config(format!(
                "Invalid api.base_url '{}': {}",
                self.api.base_url, e
            ))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(StudyshareError::Config(format!(
                "api.base_url must use http or https, got {}",
                url.scheme()
            ))
            .into());
        }

        if self.api.timeout_seconds == Some(0) {
            return Err(StudyshareError::Config(
                "api.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if self.session.key.trim().is_empty() {
            return Err(
                StudyshareError::Config("session.key cannot be empty".to_string()).into(),
            );
        }

        if self.session.key.contains(['/', '\\']) {
            return Err(StudyshareError::Config(
                "session.key must not contain path separators".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
