//! Integration tests for maintlog
//!
//! These tests verify the full workflow from config loading through the
//! history, file storage and the work-order board.

use chrono::{Duration, TimeZone, Utc};
use maintlog::app::App;
use maintlog::config::{validate_config, MaintlogConfig};
use maintlog::history::{
    DeleteOutcome, DeleteReason, ExternalOwner, ManualClock, RecordingNotifier, ReportStore,
};
use maintlog::report::{Origin, Priority, Report, ReportDraft, ReportId, ReportStatus};
use maintlog::storage::{FileStore, KeyValueStore, MemoryStore, HISTORY_KEY, TOMBSTONE_KEY};
use maintlog::MaintlogError;
use tempfile::TempDir;
use workorders::{WorkOrderBoard, WorkOrderPriority, WorkOrderStatus};

/// Owner that refuses nothing and remembers nothing
struct NoOwner;

impl ExternalOwner for NoOwner {
    fn delete_external(&mut self, _id: &ReportId, _section: &str) -> maintlog::Result<()> {
        Ok(())
    }
}

fn clock() -> ManualClock {
    ManualClock::new(Utc.with_ymd_and_hms(2025, 3, 14, 8, 30, 0).unwrap())
}

/// Helper to create a mirrored work-order report
fn external_report(id: &str, title: &str) -> Report {
    Report {
        id: ReportId::new(id),
        title: title.to_string(),
        description: String::new(),
        status: ReportStatus::Pending,
        date: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        last_modified: None,
        priority: Priority::High,
        equipment: "Boiler 2".to_string(),
        technician: String::new(),
        origin: Origin::WorkOrder,
        section: Some("corrective".to_string()),
    }
}

mod history_tests {
    use super::*;

    #[test]
    fn test_pump_check_scenario() {
        let clock = clock();
        let mut store = ReportStore::new(MemoryStore::new()).with_clock(clock.clone());

        let id = store.add(ReportDraft::new("Pump check").priority(Priority::Medium));
        let created = store.get(&id).unwrap().clone();
        assert!(id.is_local());
        assert_eq!(created.status, ReportStatus::Pending);

        clock.advance(Duration::minutes(5));
        store.update_status(&id, ReportStatus::Complete).unwrap();
        let updated = store.get(&id).unwrap();
        assert_eq!(updated.status, ReportStatus::Complete);
        assert!(updated.modified_at() > created.modified_at());

        let outcome = store.delete(&id, &DeleteReason::Mistake, &mut NoOwner).unwrap();
        assert_eq!(outcome, DeleteOutcome::Removed);
        assert!(store.get(&id).is_none());
        assert!(store.is_deleted(&id));

        let mut resurrect = external_report(id.as_str(), "Pump check");
        resurrect.section = Some("preventive".to_string());
        let stats = store.bulk_replace_external(vec![resurrect]);
        assert_eq!(stats.skipped_deleted, 1);
        assert!(store.get(&id).is_none());
        assert!(store.reports().iter().all(|r| r.id != id));
    }

    #[test]
    fn test_sorted_after_every_mutation() {
        let clock = clock();
        let mut store = ReportStore::new(MemoryStore::new()).with_clock(clock.clone());

        let mut ids = Vec::new();
        for n in 0..5 {
            clock.advance(Duration::minutes(1));
            ids.push(store.add(ReportDraft::new(format!("Inspection {}", n))));
        }
        clock.advance(Duration::minutes(1));
        store.update_status(&ids[1], ReportStatus::Complete).unwrap();
        store.bulk_replace_external(vec![external_report("WO-0001", "Old boiler leak")]);
        store.delete_by_id(&ids[3]);

        let order: Vec<&str> = store.reports().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            order,
            vec![
                ids[1].as_str(),
                ids[4].as_str(),
                ids[2].as_str(),
                ids[0].as_str(),
                "WO-0001"
            ]
        );
    }

    #[test]
    fn test_empty_search_equals_active_list() {
        let clock = clock();
        let mut store = ReportStore::new(MemoryStore::new()).with_clock(clock.clone());
        store.add(ReportDraft::new("Filter change").equipment("Air handler 4"));
        clock.advance(Duration::seconds(1));
        store.add(ReportDraft::new("Valve repack"));

        assert_eq!(store.search("air handler").len(), 1);

        let active: Vec<ReportId> = store.reports().iter().map(|r| r.id.clone()).collect();
        let all: Vec<ReportId> = store.search("").iter().map(|r| r.id.clone()).collect();
        assert_eq!(all, active);
    }

    #[test]
    fn test_delete_validation_leaves_store_untouched() {
        let mut store = ReportStore::new(MemoryStore::new());
        let id = store.add(ReportDraft::new("Pump check"));

        let err = DeleteReason::from_selection(Some("other"), Some("")).unwrap_err();
        assert_eq!(err.field(), "other");
        let err: MaintlogError = err.into();
        assert!(matches!(err, MaintlogError::Validation(_)));

        assert!(store.get(&id).is_some());
        assert_eq!(store.deleted_count(), 0);
    }
}

mod storage_tests {
    use super::*;

    #[test]
    fn test_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();

        let (id, original) = {
            let mut store = ReportStore::new(FileStore::open(temp_dir.path()).unwrap());
            let id = store.add(
                ReportDraft::new("Monthly Maintenance Report - Filling Line 3")
                    .description("Replaced worn seals")
                    .priority(Priority::High)
                    .equipment("Filling Line 3")
                    .technician("John Smith"),
            );
            store.delete_by_id(&ReportId::new("WO-0042"));
            let original = store.get(&id).unwrap().clone();
            (id, original)
        };

        assert!(temp_dir.path().join("historyData.json").exists());
        assert!(temp_dir.path().join("deletedReports.json").exists());

        let mut reloaded = ReportStore::new(FileStore::open(temp_dir.path()).unwrap());
        assert!(reloaded.load());
        assert_eq!(reloaded.get(&id), Some(&original));
        assert!(reloaded.is_deleted(&ReportId::new("WO-0042")));
    }

    #[test]
    fn test_quota_exceeded_keeps_session_state() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStore::open(temp_dir.path()).unwrap().with_quota(Some(16));
        let mut store = ReportStore::new(storage);

        let id = store.add(ReportDraft::new("Too big to store"));
        assert!(store.get(&id).is_some());
        assert!(!temp_dir.path().join("historyData.json").exists());

        let mut direct = FileStore::open(temp_dir.path()).unwrap().with_quota(Some(4));
        assert!(matches!(
            direct.set(HISTORY_KEY, "[1,2,3]"),
            Err(MaintlogError::QuotaExceeded { limit: 4, .. })
        ));
    }

    #[test]
    fn test_legacy_history_document() {
        let temp_dir = TempDir::new().unwrap();
        let mut files = FileStore::open(temp_dir.path()).unwrap();
        files
            .set(
                HISTORY_KEY,
                r#"{
                    "reports": [
                        {"id": "rep-001", "title": "Monthly Maintenance Report - Filling Line 3",
                         "status": "done", "date": "2023-06-15T14:30:00",
                         "priority": "medium", "equipment": "Filling Line 3", "technician": "John Smith"},
                        {"id": "WO-7", "title": "Emergency Repair - Warehouse Conveyor",
                         "status": "in-progress", "date": "2023-06-16T09:00:00",
                         "lastModified": "2023-06-17T10:00:00.000Z",
                         "priority": "emergency", "type": "work-order", "section": "corrective"}
                    ],
                    "filteredReports": [],
                    "lastSaved": "2023-06-17T10:00:00.000Z"
                }"#,
            )
            .unwrap();
        files.set(TOMBSTONE_KEY, r#"["rep-000"]"#).unwrap();

        let store = ReportStore::open(files);
        assert!(store.has_loaded_from_storage());
        assert_eq!(store.len(), 2);

        let first = &store.reports()[0];
        assert_eq!(first.id.as_str(), "WO-7");
        assert!(first.is_external());
        assert_eq!(first.priority, Priority::Urgent);
        assert_eq!(store.reports()[1].status, ReportStatus::Complete);
        assert_eq!(store.tombstones(), &[ReportId::new("rep-000")]);
    }

    #[test]
    fn test_corrupt_file_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("historyData.json"), "{{{").unwrap();

        let mut store = ReportStore::new(FileStore::open(temp_dir.path()).unwrap());
        assert!(!store.load());
        assert!(store.is_empty());

        // The next write replaces the corrupt document
        store.add(ReportDraft::new("Fresh start"));
        let reloaded = ReportStore::open(FileStore::open(temp_dir.path()).unwrap());
        assert_eq!(reloaded.len(), 1);
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = MaintlogConfig::rooted_at(temp_dir.path());
        config.storage.quota_bytes = Some(5 * 1024 * 1024);
        config.work_orders.default_section = "corrective".to_string();
        config.save(&config_path).unwrap();

        let loaded = MaintlogConfig::load(&config_path).unwrap();
        assert_eq!(loaded.storage.directory, temp_dir.path().join("storage"));
        assert_eq!(loaded.storage.quota_bytes, Some(5 * 1024 * 1024));
        assert_eq!(loaded.work_orders.default_section, "corrective");
        assert!(validate_config(&loaded).is_ok());
    }

    #[test]
    fn test_missing_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = MaintlogConfig::load(temp_dir.path().join("nope.yaml"));
        assert!(matches!(result, Err(MaintlogError::Config(_))));
    }
}

mod app_tests {
    use super::*;

    fn open_app(dir: &TempDir) -> (App, RecordingNotifier) {
        let config = MaintlogConfig::rooted_at(dir.path());
        let recorder = RecordingNotifier::new();
        let store = ReportStore::new(FileStore::open(&config.storage.directory).unwrap())
            .with_notifier(recorder.clone());
        (App::with_store(config, store), recorder)
    }

    #[test]
    fn test_board_sync_respects_deletions_across_sessions() {
        let temp_dir = TempDir::new().unwrap();
        let board_path = temp_dir.path().join("work_orders.json");

        let mut board = WorkOrderBoard::new();
        let kept = board.add("preventive", "Grease conveyor", "Conveyor A1").unwrap();
        let dropped = board.add("preventive", "Check belts", "Conveyor A1").unwrap();
        board.save(&board_path).unwrap();

        {
            let (mut app, _) = open_app(&temp_dir);
            let stats = app.sync_work_orders().unwrap();
            assert_eq!(stats.inserted, 2);

            // Tombstone directly, as if deleted on another device
            app.store_mut().delete_by_id(&ReportId::new(dropped.as_str()));
        }

        let (mut app, _) = open_app(&temp_dir);
        let stats = app.sync_work_orders().unwrap();
        assert_eq!(stats.received, 2);
        assert_eq!(stats.skipped_deleted, 1);
        assert!(app.store().get(&ReportId::new(kept.as_str())).is_some());
        assert!(app.store().get(&ReportId::new(dropped.as_str())).is_none());
    }

    #[test]
    fn test_local_delete_notifies() {
        let temp_dir = TempDir::new().unwrap();
        let (mut app, recorder) = open_app(&temp_dir);

        let id = app.add_report(ReportDraft::new("Safety audit"));
        let reason = DeleteReason::from_selection(Some("other"), Some("training data")).unwrap();
        let outcome = app.delete_report(&id, &reason).unwrap();

        assert_eq!(outcome, DeleteOutcome::Removed);
        assert_eq!(
            recorder.messages(),
            vec!["Report created successfully", "Report deleted successfully"]
        );
    }

    #[test]
    fn test_work_order_lifecycle() {
        let temp_dir = TempDir::new().unwrap();
        let (mut app, _) = open_app(&temp_dir);

        let wo = app
            .add_work_order(Some("corrective"), "Fix leak", "Boiler 2", WorkOrderPriority::Emergency)
            .unwrap();
        app.set_work_order_status(&wo, WorkOrderStatus::InProgress).unwrap();

        let id = ReportId::new(wo.as_str());
        assert_eq!(app.store().get(&id).unwrap().status, ReportStatus::Pending);

        app.set_work_order_status(&wo, WorkOrderStatus::Done).unwrap();
        assert_eq!(app.store().get(&id).unwrap().status, ReportStatus::Complete);

        app.delete_report(&id, &DeleteReason::Duplicate).unwrap();
        let board = WorkOrderBoard::load(app.board_path()).unwrap();
        assert!(board.is_empty());
        assert!(app.store().is_deleted(&id));
    }
}
