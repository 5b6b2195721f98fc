//! Work-order board
//!
//! A small, type-safe model of a maintenance work-order system: work orders
//! grouped by section (e.g. "preventive", "corrective"), persisted as a
//! single JSON document.
//!
//! # Example
//!
//! ```no_run
//! use workorders::{WorkOrderBoard, WorkOrderStatus};
//!
//! let mut board = WorkOrderBoard::load_or_default("work_orders.json")?;
//!
//! let id = board.add("preventive", "Replace pump seal", "Pump C")?;
//! board.set_status(&id, WorkOrderStatus::Done)?;
//!
//! board.save("work_orders.json")?;
//! # Ok::<(), workorders::Error>(())
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when working with a board
#[derive(Error, Debug)]
pub enum Error {
    #[error("Work order not found: {0}")]
    NotFound(String),

    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    #[error("Work order title must not be empty")]
    EmptyTitle,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for board operations
pub type Result<T> = std::result::Result<T, Error>;

/// Work-order status, as spelled by the work-order system
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkOrderStatus {
    #[default]
    New,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
}

impl WorkOrderStatus {
    /// Whether the work is finished
    pub fn is_done(self) -> bool {
        self == Self::Done
    }

    /// Parse the board's status vocabulary (case-insensitive)
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(Self::New),
            "in progress" | "in_progress" | "in-progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkOrderStatus::New => write!(f, "New"),
            WorkOrderStatus::InProgress => write!(f, "In Progress"),
            WorkOrderStatus::Done => write!(f, "Done"),
        }
    }
}

/// Work-order priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkOrderPriority {
    Low,
    #[default]
    Medium,
    High,
    Emergency,
}

impl WorkOrderPriority {
    /// Parse a priority name (case-insensitive)
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "emergency" | "urgent" => Ok(Self::Emergency),
            _ => Err(Error::InvalidPriority(s.to_string())),
        }
    }
}

impl std::fmt::Display for WorkOrderPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkOrderPriority::Low => write!(f, "low"),
            WorkOrderPriority::Medium => write!(f, "medium"),
            WorkOrderPriority::High => write!(f, "high"),
            WorkOrderPriority::Emergency => write!(f, "emergency"),
        }
    }
}

/// A single work order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: WorkOrderStatus,
    #[serde(default)]
    pub priority: WorkOrderPriority,
    #[serde(default)]
    pub equipment: String,
    #[serde(default)]
    pub technician: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl WorkOrder {
    /// Create a work order with the required fields
    pub fn new(id: impl Into<String>, title: impl Into<String>, equipment: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            status: WorkOrderStatus::default(),
            priority: WorkOrderPriority::default(),
            equipment: equipment.into(),
            technician: String::new(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Last time the work order changed (creation time if never updated)
    pub fn last_changed(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }
}

/// A work order paired with the section it lives in
#[derive(Debug, Clone, Copy)]
pub struct SectionedWorkOrder<'a> {
    pub section: &'a str,
    pub work_order: &'a WorkOrder,
}

/// Work orders grouped by section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderBoard {
    #[serde(default)]
    sections: BTreeMap<String, Vec<WorkOrder>>,
    #[serde(default = "default_next_id")]
    next_id: u32,
}

fn default_next_id() -> u32 {
    1
}

impl WorkOrderBoard {
    /// Create an empty board
    pub fn new() -> Self {
        Self {
            sections: BTreeMap::new(),
            next_id: default_next_id(),
        }
    }

    /// Parse a board from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a board from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load a board from a file, or start empty if the file does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::new())
        }
    }

    /// Write the board to a file, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Create a work order in a section and return its id
    pub fn add(
        &mut self,
        section: impl Into<String>,
        title: impl Into<String>,
        equipment: impl Into<String>,
    ) -> Result<String> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }

        let id = format!("WO-{:04}", self.next_id);
        self.next_id += 1;

        self.insert(section, WorkOrder::new(id.clone(), title, equipment));
        Ok(id)
    }

    /// Insert a fully built work order into a section
    pub fn insert(&mut self, section: impl Into<String>, work_order: WorkOrder) {
        self.sections.entry(section.into()).or_default().push(work_order);
    }

    /// Look up a work order by id in any section
    pub fn get(&self, id: &str) -> Option<SectionedWorkOrder<'_>> {
        self.iter().find(|entry| entry.work_order.id == id)
    }

    /// Mutable access to a work order in any section
    pub fn get_mut(&mut self, id: &str) -> Option<&mut WorkOrder> {
        self.sections
            .values_mut()
            .flat_map(|orders| orders.iter_mut())
            .find(|wo| wo.id == id)
    }

    /// Change a work order's status
    pub fn set_status(&mut self, id: &str, status: WorkOrderStatus) -> Result<&WorkOrder> {
        let work_order = self
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        work_order.status = status;
        work_order.updated_at = Some(Utc::now());
        Ok(work_order)
    }

    /// Remove a work order from the given section
    pub fn remove(&mut self, id: &str, section: &str) -> Result<WorkOrder> {
        let orders = self
            .sections
            .get_mut(section)
            .ok_or_else(|| Error::SectionNotFound(section.to_string()))?;

        let index = orders
            .iter()
            .position(|wo| wo.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        Ok(orders.remove(index))
    }

    /// Iterate over every work order with its section
    pub fn iter(&self) -> impl Iterator<Item = SectionedWorkOrder<'_>> {
        self.sections.iter().flat_map(|(section, orders)| {
            orders.iter().map(move |work_order| SectionedWorkOrder {
                section: section.as_str(),
                work_order,
            })
        })
    }

    /// Section names
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(|s| s.as_str())
    }

    /// Total number of work orders
    pub fn len(&self) -> usize {
        self.sections.values().map(|orders| orders.len()).sum()
    }

    /// Whether the board holds no work orders
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
