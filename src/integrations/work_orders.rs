//! Work-order board adapter
//!
//! The board is the system of record for work orders. The history only ever
//! sees snapshots of it, converted to reports tagged `work-order` with the
//! section they live in.

use crate::history::{ExternalOwner, ReportStore, SyncStats};
use crate::report::{Origin, Priority, Report, ReportId, ReportStatus};
use crate::Result;
use std::path::{Path, PathBuf};
use workorders::{SectionedWorkOrder, WorkOrderBoard, WorkOrderPriority, WorkOrderStatus};

/// `Done` is complete, anything else is still pending
pub fn map_status(status: WorkOrderStatus) -> ReportStatus {
    if status.is_done() {
        ReportStatus::Complete
    } else {
        ReportStatus::Pending
    }
}

pub fn map_priority(priority: WorkOrderPriority) -> Priority {
    match priority {
        WorkOrderPriority::Low => Priority::Low,
        WorkOrderPriority::Medium => Priority::Medium,
        WorkOrderPriority::High => Priority::High,
        WorkOrderPriority::Emergency => Priority::Urgent,
    }
}

pub fn work_order_to_report(entry: SectionedWorkOrder<'_>) -> Report {
    let wo = entry.work_order;
    Report {
        id: ReportId::new(wo.id.as_str()),
        title: wo.title.clone(),
        description: wo.description.clone(),
        status: map_status(wo.status),
        date: wo.created_at,
        last_modified: Some(wo.last_changed()),
        priority: map_priority(wo.priority),
        equipment: wo.equipment.clone(),
        technician: wo.technician.clone(),
        origin: Origin::WorkOrder,
        section: Some(entry.section.to_string()),
    }
}

/// Snapshot of the whole board as reports
pub fn board_to_reports(board: &WorkOrderBoard) -> Vec<Report> {
    board.iter().map(work_order_to_report).collect()
}

/// Replace the mirrored reports in `store` with the board's current contents
pub fn sync(store: &mut ReportStore, board: &WorkOrderBoard) -> SyncStats {
    let reports = board_to_reports(board);
    tracing::debug!(work_orders = reports.len(), "Syncing work-order board");
    store.bulk_replace_external(reports)
}

/// A board loaded from disk, saved after every change
#[derive(Debug)]
pub struct WorkOrderOwner {
    board: WorkOrderBoard,
    path: PathBuf,
}

impl WorkOrderOwner {
    /// Load the board at `path`, or start an empty one if the file is missing
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let board = WorkOrderBoard::load_or_default(&path)?;
        Ok(Self { board, path })
    }

    pub fn board(&self) -> &WorkOrderBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut WorkOrderBoard {
        &mut self.board
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<()> {
        self.board.save(&self.path)?;
        Ok(())
    }
}

impl ExternalOwner for WorkOrderOwner {
    fn delete_external(&mut self, id: &ReportId, section: &str) -> Result<()> {
        let removed = self.board.remove(id.as_str(), section)?;
        self.save()?;
        tracing::info!(
            id = %removed.id,
            section,
            board = %self.path().display(),
            "Work order removed from board"
        );
        Ok(())
    }
}
