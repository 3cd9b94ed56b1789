//! JSON encoding of persisted entries, shared by every backend.

use std::collections::BTreeMap;

use sawadee_core::model::{AnswerStat, Settings, StatsMap};
use serde_json::Value;
use tracing::warn;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// # Errors
///
/// Returns `StorageError::Serialization` if the mapping cannot be encoded.
pub fn encode_stats(stats: &StatsMap) -> Result<String, StorageError> {
    serde_json::to_string(stats).map_err(ser)
}

/// Decode a domain mapping entry by entry.
///
/// Entries with impossible counters (negative, or `correct > attempts`) are
/// dropped with a warning; every valid entry is kept.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if `raw` is not a JSON object.
pub fn decode_stats(raw: &str) -> Result<StatsMap, StorageError> {
    let entries: BTreeMap<String, Value> = serde_json::from_str(raw).map_err(ser)?;
    let mut stats = StatsMap::new();
    for (item_key, value) in entries {
        match serde_json::from_value::<AnswerStat>(value) {
            Ok(stat) => stats.insert(item_key, stat),
            Err(err) => warn!(item = %item_key, error = %err, "dropping invalid answer stat"),
        }
    }
    Ok(stats)
}

/// # Errors
///
/// Returns `StorageError::Serialization` if the settings cannot be encoded.
pub fn encode_settings(settings: &Settings) -> Result<String, StorageError> {
    serde_json::to_string(settings).map_err(ser)
}

/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON.
pub fn decode_settings(raw: &str) -> Result<Settings, StorageError> {
    serde_json::from_str(raw).map_err(ser)
}
