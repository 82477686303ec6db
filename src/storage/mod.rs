//! Persistent storage
//!
//! This module handles all data persistence: the durable and ephemeral
//! key-value stores backing the quote book, and the application settings.

pub mod kv;
pub mod settings;

use std::path::PathBuf;
use thiserror::Error;

pub use kv::{FileStore, KeyValueStore, MemoryStore};

/// Durable key holding the serialized quote list
pub const QUOTES_KEY: &str = "quotes";
/// Durable key holding the last selected category filter
pub const FILTER_KEY: &str = "lastCategoryFilter";
/// Ephemeral key holding the last displayed quote
pub const LAST_QUOTE_KEY: &str = "lastQuote";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not determine the application data directory")]
    NoDataDir,
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Get the platform data directory for the application
///
/// Linux: ~/.local/share/QuoteBoard
/// macOS: ~/Library/Application Support/com.QuoteBoard.QuoteBoard
/// Windows: %APPDATA%\QuoteBoard\QuoteBoard\data
pub fn get_data_dir() -> Result<PathBuf, StorageError> {
    directories::ProjectDirs::from("com", "QuoteBoard", "QuoteBoard")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StorageError::NoDataDir)
}

/// Directory where exported documents are written
///
/// Prefers the user's download folder, falls back to the data directory.
pub fn get_export_dir() -> Result<PathBuf, StorageError> {
    if let Some(dir) = directories::UserDirs::new().and_then(|u| u.download_dir().map(PathBuf::from)) {
        return Ok(dir);
    }
    get_data_dir()
}
