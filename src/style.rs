//! Terminal styling utilities
//!
//! One color scheme for report listings and notifications.
//! Uses crossterm for cross-platform terminal colors.

use crate::history::NotificationLevel;
use crate::report::{Priority, ReportStatus};
use crossterm::style::{StyledContent, Stylize};

/// Priority badge
/// - urgent: Red, bold
/// - high: Orange-ish
/// - medium: Yellow
/// - low: Dim
pub fn priority_style(priority: Priority) -> StyledContent<String> {
    let label = format!("[{}]", priority.as_str());
    match priority {
        Priority::Urgent => label.red().bold(),
        Priority::High => label.dark_yellow().bold(),
        Priority::Medium => label.yellow(),
        Priority::Low => label.dark_grey(),
    }
}

/// Status label
pub fn status_style(status: ReportStatus) -> StyledContent<String> {
    let label = status.as_str().to_string();
    match status {
        ReportStatus::Pending => label.yellow(),
        ReportStatus::Complete => label.green(),
    }
}

/// Status indicator
pub fn status_indicator(status: ReportStatus) -> StyledContent<&'static str> {
    match status {
        ReportStatus::Pending => "◐".yellow(),
        ReportStatus::Complete => "✓".green(),
    }
}

/// Marker for reports mirrored from the work-order board
pub fn work_order_tag(section: &str) -> StyledContent<String> {
    format!("<work-order:{}>", section).magenta()
}

/// Notification prefix
pub fn level_style(level: NotificationLevel) -> StyledContent<&'static str> {
    match level {
        NotificationLevel::Success => "✓".green().bold(),
        NotificationLevel::Info => "i".cyan(),
        NotificationLevel::Warning => "!".yellow().bold(),
        NotificationLevel::Error => "✗".red().bold(),
    }
}

pub fn count_normal(n: usize) -> StyledContent<String> {
    n.to_string().white()
}

/// Section headers
pub fn header(text: &str) -> StyledContent<String> {
    text.to_string().bold()
}

/// Dim/muted text
pub fn dim(text: &str) -> StyledContent<String> {
    text.to_string().dark_grey()
}

pub fn success(text: &str) -> StyledContent<String> {
    text.to_string().green()
}

pub fn warning(text: &str) -> StyledContent<String> {
    text.to_string().yellow()
}

pub fn error(text: &str) -> StyledContent<String> {
    text.to_string().red()
}

/// Report ID styling
pub fn report_id(id: &str) -> StyledContent<String> {
    id.to_string().cyan()
}

/// Highlight the input the user has to fix
pub fn highlight(text: &str) -> StyledContent<String> {
    text.to_string().yellow().bold().underlined()
}

/// Path styling
pub fn path(p: &str) -> StyledContent<String> {
    p.to_string().blue()
}
