//! Terminal rendering for the CLI
//!
//! Report cards, notification lines and validation hints. Nothing in here
//! touches report state.

use crate::history::{DeleteValidation, Notification, NotificationLevel, Notifier};
use crate::report::{Ownership, Report};
use crate::style;

/// Prints notifications as styled lines on stderr
#[derive(Debug, Clone, Copy)]
pub struct TerminalNotifier {
    enabled: bool,
}

impl TerminalNotifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&mut self, notification: &Notification) {
        tracing::debug!(text = %notification.message, "notification");
        if !self.enabled {
            return;
        }

        let message = match notification.level {
            NotificationLevel::Success => style::success(&notification.message),
            NotificationLevel::Info => style::dim(&notification.message),
            NotificationLevel::Warning => style::warning(&notification.message),
            NotificationLevel::Error => style::error(&notification.message),
        };
        eprintln!("{} {}", style::level_style(notification.level), message);
    }
}

/// Date format used on report cards
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One-line summary for listings
pub fn print_report_summary(report: &Report) {
    println!("{}", format_report_summary(report));
}

pub fn format_report_summary(report: &Report) -> String {
    let mut line = format!(
        "{} {} {} {}: {}",
        style::status_indicator(report.status),
        style::priority_style(report.priority),
        style::status_style(report.status),
        style::report_id(report.id.as_str()),
        report.title
    );

    if !report.equipment.is_empty() {
        line.push_str(&format!(" {}", style::dim(&format!("({})", report.equipment))));
    }

    if let Ownership::External { section } = report.ownership() {
        line.push_str(&format!(" {}", style::work_order_tag(section)));
    }

    line
}

pub fn print_report_detailed(report: &Report) {
    println!("{}: {}", style::report_id(report.id.as_str()), style::header(&report.title));
    println!("Status:       {}", style::status_style(report.status));
    println!("Priority:     {}", style::priority_style(report.priority));
    println!("Date:         {}", report.date.format(DATE_FORMAT));
    println!("Modified:     {}", report.modified_at().format(DATE_FORMAT));

    if !report.equipment.is_empty() {
        println!("Equipment:    {}", report.equipment);
    }

    if !report.technician.is_empty() {
        println!("Technician:   {}", report.technician);
    }

    if let Ownership::External { section } = report.ownership() {
        println!("Work order:   section {}", section);
    }

    if !report.description.is_empty() {
        println!();
        println!("{}", report.description);
    }
}

/// Point the user at the delete option they have to fix
pub fn print_validation_highlight(err: &DeleteValidation) {
    let flag = match err.field() {
        "other" => "--other <TEXT>",
        _ => "--reason <mistake|duplicate|irrelevant|other>",
    };
    eprintln!("{} {}", style::error("Error:"), err);
    eprintln!("       {}", style::highlight(flag));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Origin, ReportDraft, ReportId};
    use chrono::Utc;

    #[test]
    fn test_summary_mentions_fields() {
        let mut report = ReportDraft::new("Belt alignment")
            .equipment("Conveyor B2")
            .into_report(ReportId::new("rep-42"), Utc::now());

        let line = format_report_summary(&report);
        assert!(line.contains("rep-42"));
        assert!(line.contains("Belt alignment"));
        assert!(line.contains("(Conveyor B2)"));
        assert!(!line.contains("work-order"));

        report.origin = Origin::WorkOrder;
        report.section = Some("corrective".to_string());
        assert!(format_report_summary(&report).contains("work-order:corrective"));
    }

    #[test]
    fn test_disabled_notifier_is_silent() {
        let mut notifier = TerminalNotifier::new(false);
        notifier.notify(&Notification::success("Report created successfully"));
    }
}
