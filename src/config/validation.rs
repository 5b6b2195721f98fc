//! Configuration validation
//!
//! Validates maintlog configuration for correctness:
//! - Storage directory and board path are set and distinct
//! - Quota, when present, is non-zero
//! - Default work-order section is a usable name

use super::maintlog_config::MaintlogConfig;
use crate::MaintlogError;

/// Validation error details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// Validate a maintlog configuration
pub fn validate_config(config: &MaintlogConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.storage.directory.as_os_str().is_empty() {
        errors.push(ValidationError::new(
            "storage.directory",
            "Storage directory cannot be empty",
        ));
    }

    if config.storage.quota_bytes == Some(0) {
        errors.push(ValidationError::new(
            "storage.quota_bytes",
            "Quota must be greater than 0 (omit it for no limit)",
        ));
    }

    if config.work_orders.board_path.as_os_str().is_empty() {
        errors.push(ValidationError::new(
            "work_orders.board_path",
            "Board path cannot be empty",
        ));
    } else if config.work_orders.board_path.starts_with(&config.storage.directory) {
        // The storage directory is owned by the history store
        errors.push(ValidationError::new(
            "work_orders.board_path",
            "Board must not live inside the storage directory",
        ));
    }

    let section = &config.work_orders.default_section;
    if section.trim().is_empty() {
        errors.push(ValidationError::new(
            "work_orders.default_section",
            "Default section cannot be empty",
        ));
    } else if section.chars().any(char::is_whitespace) {
        errors.push(ValidationError::new(
            "work_orders.default_section",
            format!("Section name '{}' must not contain whitespace", section),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate and convert to a maintlog Result
pub fn validate_config_result(config: &MaintlogConfig) -> crate::Result<()> {
    validate_config(config).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        MaintlogError::Config(format!(
            "Configuration validation failed:\n  - {}",
            messages.join("\n  - ")
        ))
    })
}
