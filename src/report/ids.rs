//! Type-safe report identifiers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-safe wrapper for report IDs
///
/// Locally created reports use a time-derived id (`rep-<unix millis>`);
/// reports ingested from the work-order system keep the id it supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(String);

impl ReportId {
    /// Prefix of locally generated ids
    pub const LOCAL_PREFIX: &'static str = "rep";

    /// Create a new ReportId from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an id from a creation instant
    pub fn generate(at: DateTime<Utc>) -> Self {
        Self(format!("{}-{}", Self::LOCAL_PREFIX, at.timestamp_millis()))
    }

    /// The same id with a disambiguating numeric suffix
    pub fn with_suffix(&self, n: u32) -> Self {
        Self(format!("{}-{}", self.0, n))
    }

    /// Get the underlying string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this id was generated locally
    pub fn is_local(&self) -> bool {
        self.0
            .strip_prefix(Self::LOCAL_PREFIX)
            .is_some_and(|rest| rest.starts_with('-'))
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ReportId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for ReportId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for ReportId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
