//! Import/export of the quote list as a JSON document

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::quotes::{QuoteError, QuoteStore};
use crate::storage::KeyValueStore;

/// File name used for exported documents
pub const EXPORT_FILE_NAME: &str = "quotes.json";

/// Pretty-printed JSON array mirroring the store
pub fn export_document(store: &QuoteStore) -> Result<String, QuoteError> {
    serde_json::to_string_pretty(store.quotes())
        .map_err(|e| QuoteError::Format(format!("failed to serialize quotes: {e}")))
}

/// Write the export document as `quotes.json` inside `dir`
pub fn export_to_dir(store: &QuoteStore, dir: &Path) -> Result<PathBuf, QuoteError> {
    let document = export_document(store)?;
    fs::create_dir_all(dir).map_err(crate::storage::StorageError::from)?;

    let path = dir.join(EXPORT_FILE_NAME);
    fs::write(&path, document).map_err(crate::storage::StorageError::from)?;

    tracing::info!(path = %path.display(), count = store.len(), "Exported quotes");
    Ok(path)
}

/// Parse raw document text into its records
///
/// The top-level value must be an array; its elements are validated later.
pub fn parse_document(raw: &str) -> Result<Vec<Value>, QuoteError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| QuoteError::Format(format!("not valid JSON: {e}")))?;

    match value {
        Value::Array(records) => Ok(records),
        other => Err(QuoteError::Format(format!(
            "expected a JSON array, found {}",
            json_kind(&other)
        ))),
    }
}

/// Parse `raw` and append its records to the store
pub fn import_document(
    store: &mut QuoteStore,
    durable: &mut dyn KeyValueStore,
    raw: &str,
) -> Result<usize, QuoteError> {
    let records = parse_document(raw)?;
    store.import_many(durable, records)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
