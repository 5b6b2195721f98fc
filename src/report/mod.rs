//! Report data model
//!
//! Defines Report, ReportDraft, ReportId and the status/priority/origin
//! vocabularies. Serialized field names match the persisted history layout.

mod ids;
mod record;
pub mod timestamp;

pub use ids::ReportId;
pub use record::{Origin, Ownership, Priority, Report, ReportDraft, ReportStatus};
