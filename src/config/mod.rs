//! Configuration system
//!
//! Loads ~/.config/maintlog/config.yaml with support for:
//! - Storage location and an optional byte quota
//! - Notification output
//! - The work-order board the history syncs from

mod maintlog_config;
pub mod validation;

pub use maintlog_config::{MaintlogConfig, NotificationConfig, StorageConfig, WorkOrderConfig};
pub use validation::{validate_config, validate_config_result, ValidationError};
