//! Report history
//!
//! [`ReportStore`] owns the list of maintenance reports, a filtered view of
//! it driven by a search term, and the set of deleted ids. Every mutation is
//! mirrored to a [`KeyValueStore`].
//!
//! # Invariants
//!
//! - Ids are unique within the active list.
//! - A tombstoned id never re-enters the active list, including through
//!   [`ReportStore::bulk_replace_external`].
//! - Both lists are sorted by last-modified, most recent first; equal
//!   timestamps keep their insertion order.
//!
//! # Persistence
//!
//! Persistence is best-effort. Read and write failures are logged and never
//! returned to the caller; the in-memory lists stay authoritative for the
//! session.

mod clock;
mod deletion;
mod notify;
mod tombstones;

pub use clock::{Clock, ManualClock, SystemClock};
pub use deletion::{DeleteOutcome, DeleteReason, DeleteValidation, ExternalOwner};
pub use notify::{LogNotifier, Notification, NotificationLevel, Notifier, RecordingNotifier};
pub use tombstones::Tombstones;

use crate::report::{Origin, Ownership, Report, ReportDraft, ReportId, ReportStatus};
use crate::storage::{read_json, write_json, HistorySnapshot, KeyValueStore, HISTORY_KEY, TOMBSTONE_KEY};
use crate::{MaintlogError, Result};
use std::collections::HashSet;
use tracing::{debug, error, info, warn};

/// Counts from one external sync
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Records in the incoming batch
    pub received: usize,
    /// Previously mirrored records dropped before inserting the batch
    pub removed: usize,
    /// Records now in the active list
    pub inserted: usize,
    /// Records refused because their id is tombstoned
    pub skipped_deleted: usize,
    /// Records refused because their id is already taken
    pub skipped_duplicate: usize,
}

/// The maintenance report history
pub struct ReportStore {
    storage: Box<dyn KeyValueStore>,
    notifier: Box<dyn Notifier>,
    clock: Box<dyn Clock>,

    reports: Vec<Report>,
    filtered: Vec<Report>,
    search_term: String,
    tombstones: Tombstones,
    loaded_from_storage: bool,
}

impl ReportStore {
    /// Create an empty store over `storage`; call [`load`](Self::load) to hydrate it
    pub fn new(storage: impl KeyValueStore + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            notifier: Box::new(LogNotifier),
            clock: Box::new(SystemClock),
            reports: Vec::new(),
            filtered: Vec::new(),
            search_term: String::new(),
            tombstones: Tombstones::new(),
            loaded_from_storage: false,
        }
    }

    /// Create a store and load whatever `storage` holds
    pub fn open(storage: impl KeyValueStore + 'static) -> Self {
        let mut store = Self::new(storage);
        store.load();
        store
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // --- Loading ---

    /// Hydrate from storage
    ///
    /// Returns whether history data was found. Missing or malformed data
    /// leaves the store empty.
    pub fn load(&mut self) -> bool {
        self.tombstones = match read_json::<Vec<ReportId>>(&*self.storage, TOMBSTONE_KEY) {
            Ok(Some(ids)) => Tombstones::from_ids(ids),
            Ok(None) => Tombstones::new(),
            Err(e) => {
                error!(error = %e, key = TOMBSTONE_KEY, "Failed to load deleted reports");
                Tombstones::new()
            }
        };

        self.search_term.clear();
        self.loaded_from_storage = false;

        match read_json::<HistorySnapshot>(&*self.storage, HISTORY_KEY) {
            Ok(Some(snapshot)) => {
                self.reports = snapshot.reports;
                self.filtered = snapshot.filtered_reports;
                self.normalize();
                self.loaded_from_storage = true;

                info!(
                    reports = self.reports.len(),
                    deleted = self.tombstones.len(),
                    backend = self.storage.name(),
                    "History loaded from storage"
                );
                true
            }
            Ok(None) => {
                debug!("No stored history, starting empty");
                self.reports.clear();
                self.filtered.clear();
                false
            }
            Err(e) => {
                error!(error = %e, key = HISTORY_KEY, "Failed to load history, starting empty");
                self.reports.clear();
                self.filtered.clear();
                false
            }
        }
    }

    /// Whether the last [`load`](Self::load) found stored history
    pub fn has_loaded_from_storage(&self) -> bool {
        self.loaded_from_storage
    }

    /// Repair loaded lists: drop tombstoned and repeated ids, then sort
    fn normalize(&mut self) {
        let before = self.reports.len() + self.filtered.len();

        let tombstones = &self.tombstones;
        let mut seen = HashSet::new();
        self.reports
            .retain(|r| !tombstones.contains(&r.id) && seen.insert(r.id.clone()));

        let active: HashSet<&ReportId> = self.reports.iter().map(|r| &r.id).collect();
        let mut seen = HashSet::new();
        self.filtered
            .retain(|r| active.contains(&r.id) && seen.insert(r.id.clone()));

        let dropped = before - (self.reports.len() + self.filtered.len());
        if dropped > 0 {
            warn!(dropped, "Dropped stale entries from stored history");
        }

        self.sort();
    }

    // --- Reading ---

    /// All active reports, most recently modified first
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// The current filtered view
    pub fn filtered(&self) -> &[Report] {
        &self.filtered
    }

    /// The last search term (lowercased, trimmed)
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn get(&self, id: &ReportId) -> Option<&Report> {
        self.reports.iter().find(|r| &r.id == id)
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Whether `id` was deleted
    pub fn is_deleted(&self, id: &ReportId) -> bool {
        self.tombstones.contains(id)
    }

    pub fn tombstones(&self) -> &[ReportId] {
        self.tombstones.as_slice()
    }

    pub fn deleted_count(&self) -> usize {
        self.tombstones.len()
    }

    // --- Mutations ---

    /// Add a report, filling in id, timestamps and status where the draft has none
    pub fn add(&mut self, mut draft: ReportDraft) -> ReportId {
        let now = self.clock.now();

        let base = draft.id.take().unwrap_or_else(|| ReportId::generate(now));
        let id = self.unused_id(base);
        let report = draft.into_report(id.clone(), now);

        debug!(id = %id, title = %report.title, "Adding report");

        self.reports.insert(0, report.clone());
        self.filtered.insert(0, report);
        self.sort();
        self.persist();

        self.notifier
            .notify(&Notification::success("Report created successfully"));
        id
    }

    /// Change a report's status and bump its last-modified time
    pub fn update_status(&mut self, id: &ReportId, status: ReportStatus) -> Result<()> {
        self.apply_status(id, status, |_| true)
    }

    /// Status change pushed by the work-order system
    ///
    /// Only mirrored reports are considered.
    pub fn update_external_status(&mut self, id: &ReportId, status: ReportStatus) -> Result<()> {
        let result = self.apply_status(id, status, Report::is_external);
        if result.is_err() {
            warn!(id = %id, "Work-order report not found in history");
        }
        result
    }

    fn apply_status(
        &mut self,
        id: &ReportId,
        status: ReportStatus,
        eligible: impl Fn(&Report) -> bool,
    ) -> Result<()> {
        let now = self.clock.now();

        let report = self
            .reports
            .iter_mut()
            .find(|r| &r.id == id && eligible(&**r))
            .ok_or_else(|| MaintlogError::ReportNotFound(id.to_string()))?;
        report.set_status(status, now);

        if let Some(view) = self.filtered.iter_mut().find(|r| &r.id == id) {
            view.set_status(status, now);
        }

        info!(id = %id, status = %status, "Report status updated");

        self.sort();
        self.persist();
        Ok(())
    }

    /// Replace every mirrored report with `incoming`
    ///
    /// Ids that were deleted, that appear twice in the batch, or that belong
    /// to a native report are refused.
    pub fn bulk_replace_external(&mut self, incoming: Vec<Report>) -> SyncStats {
        let mut stats = SyncStats {
            received: incoming.len(),
            ..SyncStats::default()
        };

        let before = self.reports.len();
        self.reports.retain(|r| !r.is_external());
        self.filtered.retain(|r| !r.is_external());
        stats.removed = before - self.reports.len();

        let mut taken: HashSet<ReportId> = self.reports.iter().map(|r| r.id.clone()).collect();
        let mut survivors = Vec::with_capacity(incoming.len());

        for mut report in incoming {
            if self.tombstones.contains(&report.id) {
                debug!(id = %report.id, "Skipping deleted work-order report");
                stats.skipped_deleted += 1;
                continue;
            }
            if !taken.insert(report.id.clone()) {
                warn!(id = %report.id, "Skipping work-order report with duplicate id");
                stats.skipped_duplicate += 1;
                continue;
            }
            report.origin = Origin::WorkOrder;
            survivors.push(report);
        }

        stats.inserted = survivors.len();

        // Each survivor goes to the front, so the batch ends up reversed before sorting
        survivors.reverse();
        self.reports.splice(0..0, survivors.iter().cloned());
        self.filtered.splice(0..0, survivors);

        self.sort();
        self.persist();

        info!(
            received = stats.received,
            inserted = stats.inserted,
            skipped_deleted = stats.skipped_deleted,
            "Work-order reports synced"
        );
        stats
    }

    /// Delete a report
    ///
    /// Locally owned reports are removed and tombstoned. Reports owned by the
    /// work-order system are handed to `owner` and left untouched here; the
    /// owner is expected to call [`delete_by_id`](Self::delete_by_id) once
    /// its own record is gone.
    pub fn delete(
        &mut self,
        id: &ReportId,
        reason: &DeleteReason,
        owner: &mut dyn ExternalOwner,
    ) -> Result<DeleteOutcome> {
        let report = self
            .get(id)
            .ok_or_else(|| MaintlogError::ReportNotFound(id.to_string()))?;

        match report.ownership() {
            Ownership::External { section } => {
                let section = section.to_string();
                info!(id = %id, section = %section, "Deferring deletion of work-order report to its owner");
                owner.delete_external(id, &section)?;
                Ok(DeleteOutcome::Deferred { section })
            }
            Ownership::Local => {
                info!(id = %id, reason = %reason, "Deleting report");
                self.remove_and_tombstone(id);
                self.notifier
                    .notify(&Notification::success("Report deleted successfully"));
                Ok(DeleteOutcome::Removed)
            }
        }
    }

    /// Delete without reason or ownership checks
    ///
    /// The id is tombstoned even if no such report is present. Returns
    /// whether a report was removed.
    pub fn delete_by_id(&mut self, id: &ReportId) -> bool {
        debug!(id = %id, "Deleting report directly");
        self.remove_and_tombstone(id)
    }

    fn remove_and_tombstone(&mut self, id: &ReportId) -> bool {
        let before = self.reports.len();
        self.reports.retain(|r| &r.id != id);
        self.filtered.retain(|r| &r.id != id);
        let removed = self.reports.len() != before;

        if self.tombstones.insert(id.clone()) {
            self.persist_tombstones();
        }
        self.persist();
        removed
    }

    /// Recompute the filtered view
    ///
    /// Case-insensitive substring match over title, description, equipment,
    /// technician and status. An empty term shows everything.
    pub fn search(&mut self, term: &str) -> &[Report] {
        self.search_term = term.trim().to_lowercase();

        self.filtered = if self.search_term.is_empty() {
            self.reports.clone()
        } else {
            let term = &self.search_term;
            self.reports.iter().filter(|r| r.matches(term)).cloned().collect()
        };

        debug!(term = %self.search_term, matches = self.filtered.len(), "Search applied");
        &self.filtered
    }

    /// Forget every tombstone; deleted work orders may sync back in afterwards
    pub fn clear_tombstones(&mut self) {
        self.tombstones.clear();
        if let Err(e) = self.storage.remove(TOMBSTONE_KEY) {
            error!(error = %e, "Failed to clear deleted reports");
        }
        info!("Deleted reports list cleared");
        self.notifier
            .notify(&Notification::info("Deleted reports list cleared"));
    }

    /// Drop all reports and tombstones, in memory and in storage
    pub fn clear_all(&mut self) -> bool {
        self.reports.clear();
        self.filtered.clear();
        self.tombstones.clear();
        self.search_term.clear();

        let mut ok = true;
        for key in [HISTORY_KEY, TOMBSTONE_KEY] {
            if let Err(e) = self.storage.remove(key) {
                error!(error = %e, key, "Failed to clear stored history");
                ok = false;
            }
        }

        info!("All history data cleared");
        if ok {
            self.notifier
                .notify(&Notification::info("All history data cleared"));
        } else {
            self.notifier
                .notify(&Notification::error("History cleared for this session only"));
        }
        ok
    }

    /// Show a notification through the store's notifier
    pub fn notify(&mut self, notification: Notification) {
        self.notifier.notify(&notification);
    }

    // --- Internals ---

    /// `base` if free, otherwise `base-1`, `base-2`, ...
    fn unused_id(&self, base: ReportId) -> ReportId {
        let taken = |id: &ReportId| self.tombstones.contains(id) || self.get(id).is_some();
        if !taken(&base) {
            return base;
        }

        let mut n = 1;
        loop {
            let candidate = base.with_suffix(n);
            if !taken(&candidate) {
                debug!(base = %base, id = %candidate, "Id already used, picked a new one");
                return candidate;
            }
            n += 1;
        }
    }

    /// Most recently modified first; `sort_by` is stable so ties keep their order
    fn sort(&mut self) {
        let newest_first = |a: &Report, b: &Report| b.modified_at().cmp(&a.modified_at());
        self.reports.sort_by(newest_first);
        self.filtered.sort_by(newest_first);
    }

    fn persist(&mut self) {
        let snapshot = HistorySnapshot {
            reports: self.reports.clone(),
            filtered_reports: self.filtered.clone(),
            last_saved: Some(self.clock.now()),
        };

        match write_json(&mut *self.storage, HISTORY_KEY, &snapshot) {
            Ok(()) => debug!(reports = self.reports.len(), "History saved"),
            Err(e) => error!(error = %e, "Failed to save history; keeping changes in memory"),
        }
    }

    fn persist_tombstones(&mut self) {
        if let Err(e) = write_json(&mut *self.storage, TOMBSTONE_KEY, self.tombstones.as_slice()) {
            error!(error = %e, "Failed to save deleted reports");
        }
    }
}

impl std::fmt::Debug for ReportStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportStore")
            .field("backend", &self.storage.name())
            .field("reports", &self.reports.len())
            .field("filtered", &self.filtered.len())
            .field("deleted", &self.tombstones.len())
            .finish()
    }
}
