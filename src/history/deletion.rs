//! Report deletion: reasons, validation and ownership dispatch
//!
//! Locally owned reports are deleted by the store itself. Reports mirrored
//! from the work-order system are handed to their [`ExternalOwner`], which
//! removes its own record and then asks the history to forget it.

use crate::report::ReportId;
use thiserror::Error;

/// Why a report is being deleted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteReason {
    Mistake,
    Duplicate,
    Irrelevant,
    Other(String),
}

/// Rejected delete request; nothing was changed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeleteValidation {
    #[error("a reason for deleting the report is required")]
    MissingReason,

    #[error("please specify the reason for deleting the report")]
    MissingOtherText,

    #[error("unknown deletion reason '{0}' (expected mistake, duplicate, irrelevant or other)")]
    UnknownReason(String),
}

impl DeleteValidation {
    /// Input that should be highlighted for the user
    pub fn field(&self) -> &'static str {
        match self {
            DeleteValidation::MissingReason | DeleteValidation::UnknownReason(_) => "reason",
            DeleteValidation::MissingOtherText => "other",
        }
    }
}

impl DeleteReason {
    /// Build a reason from an interactive selection
    ///
    /// `selected` is the chosen option, `other_text` the free-text field that
    /// only matters when `other` is selected.
    pub fn from_selection(
        selected: Option<&str>,
        other_text: Option<&str>,
    ) -> Result<Self, DeleteValidation> {
        let selected = selected.map(str::trim).unwrap_or_default();

        match selected.to_lowercase().as_str() {
            "" => Err(DeleteValidation::MissingReason),
            "mistake" => Ok(Self::Mistake),
            "duplicate" => Ok(Self::Duplicate),
            "irrelevant" => Ok(Self::Irrelevant),
            "other" => match other_text.map(str::trim) {
                Some(text) if !text.is_empty() => Ok(Self::Other(text.to_string())),
                _ => Err(DeleteValidation::MissingOtherText),
            },
            _ => Err(DeleteValidation::UnknownReason(selected.to_string())),
        }
    }
}

impl std::fmt::Display for DeleteReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteReason::Mistake => write!(f, "mistake"),
            DeleteReason::Duplicate => write!(f, "duplicate"),
            DeleteReason::Irrelevant => write!(f, "irrelevant"),
            DeleteReason::Other(text) => write!(f, "{}", text),
        }
    }
}

/// The system of record for externally owned reports
pub trait ExternalOwner {
    /// Delete the external record `id` living in `section`
    fn delete_external(&mut self, id: &ReportId, section: &str) -> crate::Result<()>;
}

/// What a delete request did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Removed from the history and tombstoned
    Removed,
    /// Handed to the external owner; the history is unchanged
    Deferred { section: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_reasons() {
        assert_eq!(
            DeleteReason::from_selection(Some("duplicate"), None).unwrap(),
            DeleteReason::Duplicate
        );
        assert_eq!(
            DeleteReason::from_selection(Some("Mistake"), Some("ignored")).unwrap(),
            DeleteReason::Mistake
        );
    }

    #[test]
    fn test_missing_reason() {
        let err = DeleteReason::from_selection(None, None).unwrap_err();
        assert_eq!(err, DeleteValidation::MissingReason);
        assert_eq!(err.field(), "reason");

        assert_eq!(
            DeleteReason::from_selection(Some("  "), None).unwrap_err(),
            DeleteValidation::MissingReason
        );
    }

    #[test]
    fn test_other_requires_text() {
        let err = DeleteReason::from_selection(Some("other"), Some("   ")).unwrap_err();
        assert_eq!(err, DeleteValidation::MissingOtherText);
        assert_eq!(err.field(), "other");

        let reason = DeleteReason::from_selection(Some("other"), Some(" test data ")).unwrap();
        assert_eq!(reason, DeleteReason::Other("test data".to_string()));
        assert_eq!(reason.to_string(), "test data");
    }

    #[test]
    fn test_unknown_reason() {
        assert!(matches!(
            DeleteReason::from_selection(Some("boredom"), None),
            Err(DeleteValidation::UnknownReason(r)) if r == "boredom"
        ));
    }
}
