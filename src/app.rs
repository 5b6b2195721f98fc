//! Application controller
//!
//! Ties the report history to its storage, the terminal and the work-order
//! board. The CLI runs one [`App`] per invocation.

use crate::config::{validate_config_result, MaintlogConfig};
use crate::history::{DeleteOutcome, DeleteReason, ExternalOwner, Notification, ReportStore, SyncStats};
use crate::integrations::work_orders::{self, WorkOrderOwner};
use crate::render::TerminalNotifier;
use crate::report::{Report, ReportDraft, ReportId, ReportStatus};
use crate::storage::FileStore;
use crate::{MaintlogError, Result};
use std::path::{Path, PathBuf};
use workorders::{WorkOrderPriority, WorkOrderStatus};

pub struct App {
    config: MaintlogConfig,
    store: ReportStore,
    board_path: PathBuf,
}

impl App {
    /// Open the history described by `config` and load it
    pub fn open(config: MaintlogConfig) -> Result<Self> {
        validate_config_result(&config)?;

        let storage = FileStore::open(&config.storage.directory)?.with_quota(config.storage.quota_bytes);
        let store = ReportStore::new(storage)
            .with_notifier(TerminalNotifier::new(config.notifications.enabled));

        Ok(Self::with_store(config, store))
    }

    /// Use an already configured store; it is loaded here
    pub fn with_store(config: MaintlogConfig, mut store: ReportStore) -> Self {
        if !store.load() {
            tracing::debug!("Starting with an empty history");
        }
        let board_path = config.work_orders.board_path.clone();
        Self {
            config,
            store,
            board_path,
        }
    }

    pub fn config(&self) -> &MaintlogConfig {
        &self.config
    }

    pub fn store(&self) -> &ReportStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ReportStore {
        &mut self.store
    }

    pub fn board_path(&self) -> &Path {
        &self.board_path
    }

    fn owner(&self) -> Result<WorkOrderOwner> {
        WorkOrderOwner::open(&self.board_path)
    }

    pub fn add_report(&mut self, draft: ReportDraft) -> ReportId {
        self.store.add(draft)
    }

    pub fn set_status(&mut self, id: &ReportId, status: ReportStatus) -> Result<()> {
        self.store.update_status(id, status)
    }

    pub fn search(&mut self, term: &str) -> &[Report] {
        self.store.search(term)
    }

    /// Delete a report, routing work orders through the board
    ///
    /// A deferred deletion is completed here once the board has dropped the
    /// work order, so the returned outcome tells the caller who removed it.
    pub fn delete_report(&mut self, id: &ReportId, reason: &DeleteReason) -> Result<DeleteOutcome> {
        let mut owner = BoardOnDemand {
            path: &self.board_path,
        };
        let outcome = self.store.delete(id, reason, &mut owner)?;

        if let DeleteOutcome::Deferred { section } = &outcome {
            self.store.delete_by_id(id);
            tracing::info!(id = %id, section = %section, reason = %reason, "Work order deleted");
            self.store
                .notify(Notification::success("Work order deleted successfully"));
        }

        Ok(outcome)
    }

    /// Pull the board's current contents into the history
    pub fn sync_work_orders(&mut self) -> Result<SyncStats> {
        let owner = self.owner()?;
        Ok(work_orders::sync(&mut self.store, owner.board()))
    }

    /// Create a work order on the board and mirror it
    pub fn add_work_order(
        &mut self,
        section: Option<&str>,
        title: &str,
        equipment: &str,
        priority: WorkOrderPriority,
    ) -> Result<String> {
        let section = section.unwrap_or(&self.config.work_orders.default_section).to_string();

        let mut owner = self.owner()?;
        let id = owner.board_mut().add(section.as_str(), title, equipment)?;
        if let Some(wo) = owner.board_mut().get_mut(&id) {
            wo.priority = priority;
        }
        owner.save()?;

        work_orders::sync(&mut self.store, owner.board());
        Ok(id)
    }

    /// Change a work order's status on the board and mirror it
    pub fn set_work_order_status(&mut self, id: &str, status: WorkOrderStatus) -> Result<()> {
        let mut owner = self.owner()?;
        owner.board_mut().set_status(id, status)?;
        owner.save()?;

        let report_id = ReportId::new(id);
        if self.store.is_deleted(&report_id) {
            tracing::debug!(id, "Work order was deleted from the history, not mirroring status");
            return Ok(());
        }

        match self
            .store
            .update_external_status(&report_id, work_orders::map_status(status))
        {
            Ok(()) => Ok(()),
            Err(MaintlogError::ReportNotFound(_)) => {
                // Never synced; bring the whole board over
                work_orders::sync(&mut self.store, owner.board());
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

/// Opens the board only when a work-order report is actually deleted
struct BoardOnDemand<'a> {
    path: &'a Path,
}

impl ExternalOwner for BoardOnDemand<'_> {
    fn delete_external(&mut self, id: &ReportId, section: &str) -> Result<()> {
        WorkOrderOwner::open(self.path)?.delete_external(id, section)
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("store", &self.store)
            .field("board_path", &self.board_path)
            .finish()
    }
}
