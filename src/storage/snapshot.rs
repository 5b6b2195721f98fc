//! Persisted history layout
//!
//! The history owns two independent keys:
//!
//! - `historyData`: `{ "reports": [...], "filteredReports": [...], "lastSaved": "<RFC 3339>" }`
//! - `deletedReports`: `["<id>", ...]`

use super::kv::KeyValueStore;
use crate::report::{timestamp, Report};
use crate::{MaintlogError, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Key of the report lists
pub const HISTORY_KEY: &str = "historyData";

/// Key of the tombstoned identifiers
pub const TOMBSTONE_KEY: &str = "deletedReports";

/// Stored form of the report lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySnapshot {
    #[serde(default)]
    pub reports: Vec<Report>,

    #[serde(default)]
    pub filtered_reports: Vec<Report>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "timestamp::deserialize_option"
    )]
    pub last_saved: Option<DateTime<Utc>>,
}

/// Read and decode a JSON value; `Ok(None)` if the key is absent
pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| MaintlogError::Parse(format!("Malformed '{}': {}", key, e)))
}

/// Encode and write a JSON value
pub fn write_json<T: Serialize + ?Sized>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}
