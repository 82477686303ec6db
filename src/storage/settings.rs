//! Settings storage
//!
//! Manages persistence of user preferences and sync configuration.

use crate::storage::{get_data_dir, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default collection endpoint used for sync
pub const DEFAULT_REMOTE_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";

/// What to do when posting a new quote to the remote fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum PushPolicy {
    /// Single attempt; a failure is only reported
    #[default]
    BestEffort,
    /// Retry inside the same push with exponential backoff
    Retry { max_attempts: u32 },
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Collection endpoint for GET (fetch) and POST (push)
    #[serde(default = "default_remote_endpoint")]
    pub remote_endpoint: String,
    /// Period between sync ticks, in milliseconds
    #[serde(default = "default_sync_interval_ms")]
    pub sync_interval_ms: u64,
    /// Number of remote records consumed per fetch
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,
    /// How long a status notification stays visible, in milliseconds
    #[serde(default = "default_status_duration_ms")]
    pub status_duration_ms: u64,
    /// Per-request timeout for remote calls
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Outbound push failure handling
    #[serde(default)]
    pub push_policy: PushPolicy,
}

fn default_remote_endpoint() -> String {
    DEFAULT_REMOTE_ENDPOINT.to_string()
}

fn default_sync_interval_ms() -> u64 {
    30_000
}

fn default_fetch_limit() -> usize {
    5
}

fn default_status_duration_ms() -> u64 {
    4_000
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            remote_endpoint: default_remote_endpoint(),
            sync_interval_ms: default_sync_interval_ms(),
            fetch_limit: default_fetch_limit(),
            status_duration_ms: default_status_duration_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            push_policy: PushPolicy::default(),
        }
    }
}

impl AppSettings {
    /// Validate settings values
    ///
    /// Ensures all parameters are within acceptable ranges.
    pub fn validate(&mut self) {
        if self.remote_endpoint.trim().is_empty() {
            self.remote_endpoint = default_remote_endpoint();
        }

        self.sync_interval_ms = self.sync_interval_ms.max(1_000);
        self.fetch_limit = self.fetch_limit.clamp(1, 100);
        self.status_duration_ms = self.status_duration_ms.clamp(500, 60_000);
        self.request_timeout_secs = self.request_timeout_secs.clamp(1, 300);

        if let PushPolicy::Retry { max_attempts } = &mut self.push_policy {
            *max_attempts = (*max_attempts).clamp(1, 10);
        }
    }

    pub fn sync_interval(&self) -> Duration {
        Duration::from_millis(self.sync_interval_ms)
    }

    pub fn status_duration(&self) -> Duration {
        Duration::from_millis(self.status_duration_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Get the settings file path
fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join("settings.json"))
}

/// Load settings from disk
///
/// Returns default settings if the file doesn't exist or is corrupted
pub fn load_settings() -> AppSettings {
    match load_settings_internal() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            AppSettings::default()
        }
    }
}

fn load_settings_internal() -> Result<AppSettings, StorageError> {
    let path = get_settings_path()?;

    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(AppSettings::default());
    }

    let json = fs::read_to_string(&path)?;
    let mut settings = parse_settings(&json)?;
    settings.validate();

    tracing::debug!("Loaded settings from disk");
    Ok(settings)
}

/// Parse settings JSON, filling missing fields with defaults
pub fn parse_settings(json: &str) -> Result<AppSettings, StorageError> {
    Ok(serde_json::from_str(json)?)
}

/// Save settings to disk
pub fn save_settings(settings: &AppSettings) -> Result<(), StorageError> {
    let path = get_settings_path()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;

    tracing::debug!("Saved settings to disk");
    Ok(())
}
