//! External Integrations
//!
//! Adapters for systems that own some of the reports shown in the history.
//!
//! # Sync Flow
//!
//! 1. **Ingress** (board → history): the whole board is converted to reports
//!    and pushed through [`ReportStore::bulk_replace_external`](crate::history::ReportStore::bulk_replace_external)
//! 2. **Status**: status changes on the board are mirrored one report at a time
//! 3. **Deletion**: deleting a mirrored report removes the work order from the
//!    board first, then tombstones it in the history

pub mod work_orders;

pub use work_orders::{
    board_to_reports, map_priority, map_status, sync, work_order_to_report, WorkOrderOwner,
};
