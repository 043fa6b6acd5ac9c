use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use gracile_core::FormKind;
use gracile_engine::SubmitSettings;
use serde::Deserialize;
use thiserror::Error;

use super::cli::{Cli, FormChoice};
use super::logging::LogDestination;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Settings read from a RON file, e.g.
///
/// ```ron
/// (
///     base_url: "http://127.0.0.1:5000",
///     form: Process,
///     request_timeout_ms: 5000,
///     log: Both,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub form: FormChoice,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_reply_bytes: u64,
    pub log: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let submit = SubmitSettings::default();
        Self {
            base_url: submit.base_url,
            form: FormChoice::AddSubscription,
            connect_timeout_ms: submit.connect_timeout.as_millis() as u64,
            request_timeout_ms: submit.request_timeout.as_millis() as u64,
            max_reply_bytes: submit.max_bytes,
            log: LogDestination::default(),
        }
    }
}

impl AppConfig {
    /// Reads the config file, or returns defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Command line flags win over file values.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(form) = cli.form {
            self.form = form;
        }
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        self
    }

    pub fn form_kind(&self) -> FormKind {
        self.form.into()
    }

    pub fn submit_settings(&self) -> SubmitSettings {
        SubmitSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_reply_bytes,
            ..SubmitSettings::default()
        }
    }
}
