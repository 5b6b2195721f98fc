//! Report data structure
//!
//! Represents a single maintenance report in the history.

use super::{timestamp, ReportId};
use crate::{MaintlogError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Report status
///
/// Older history data spells these `in-progress` and `done`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    #[default]
    #[serde(alias = "in-progress")]
    Pending,
    #[serde(alias = "done")]
    Complete,
}

impl ReportStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::Complete => "complete",
        }
    }

    /// Parse a status name (case-insensitive)
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "in-progress" | "in_progress" => Ok(Self::Pending),
            "complete" | "completed" | "done" => Ok(Self::Complete),
            _ => Err(MaintlogError::Parse(format!(
                "Invalid status: {}. Use pending or complete",
                s
            ))),
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Report priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    #[serde(alias = "emergency")]
    Urgent,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    /// Parse a priority name (case-insensitive)
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "urgent" | "emergency" => Ok(Self::Urgent),
            _ => Err(MaintlogError::Parse(format!(
                "Invalid priority: {}. Use low, medium, high or urgent",
                s
            ))),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a report came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    /// Written in the history itself
    #[default]
    Native,
    /// Mirrored from the work-order system
    WorkOrder,
}

/// Who decides whether a report may be deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership<'a> {
    /// The history owns the record and deletes it itself
    Local,
    /// The work-order system owns the record; `section` locates it there
    External { section: &'a str },
}

/// A maintenance report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Unique identifier
    pub id: ReportId,

    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub status: ReportStatus,

    /// Date of record
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub date: DateTime<Utc>,

    /// Last modification; feeds may omit it
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "timestamp::deserialize_option"
    )]
    pub last_modified: Option<DateTime<Utc>>,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub equipment: String,

    #[serde(default)]
    pub technician: String,

    #[serde(rename = "type", default)]
    pub origin: Origin,

    /// Section of the work-order board, for mirrored reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl Report {
    /// Sort key: last-modified, falling back to the date of record
    pub fn modified_at(&self) -> DateTime<Utc> {
        self.last_modified.unwrap_or(self.date)
    }

    /// Whether the report mirrors an external record
    pub fn is_external(&self) -> bool {
        self.origin == Origin::WorkOrder
    }

    /// Deletion capability of this report
    pub fn ownership(&self) -> Ownership<'_> {
        match self.origin {
            Origin::Native => Ownership::Local,
            Origin::WorkOrder => Ownership::External {
                section: self.section.as_deref().unwrap_or_default(),
            },
        }
    }

    /// Case-insensitive substring match; `term` must already be lowercase
    pub fn matches(&self, term: &str) -> bool {
        [
            self.title.as_str(),
            self.description.as_str(),
            self.equipment.as_str(),
            self.technician.as_str(),
            self.status.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(term))
    }

    /// Set status and bump last-modified
    pub fn set_status(&mut self, status: ReportStatus, at: DateTime<Utc>) {
        self.status = status;
        self.last_modified = Some(at);
    }
}

/// Fields for a new report; anything left unset is filled in by the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDraft {
    #[serde(default)]
    pub id: Option<ReportId>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Option<ReportStatus>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub equipment: String,
    #[serde(default)]
    pub technician: String,
    #[serde(rename = "type", default)]
    pub origin: Origin,
    #[serde(default)]
    pub section: Option<String>,
}

impl ReportDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn equipment(mut self, equipment: impl Into<String>) -> Self {
        self.equipment = equipment.into();
        self
    }

    pub fn technician(mut self, technician: impl Into<String>) -> Self {
        self.technician = technician.into();
        self
    }

    pub fn status(mut self, status: ReportStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_id(mut self, id: impl Into<ReportId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Build the report, filling unset fields with `id` and `now`
    pub(crate) fn into_report(self, id: ReportId, now: DateTime<Utc>) -> Report {
        Report {
            id,
            title: self.title,
            description: self.description,
            status: self.status.unwrap_or_default(),
            date: self.date.unwrap_or(now),
            last_modified: Some(self.last_modified.unwrap_or(now)),
            priority: self.priority,
            equipment: self.equipment,
            technician: self.technician,
            origin: self.origin,
            section: self.section,
        }
    }
}
