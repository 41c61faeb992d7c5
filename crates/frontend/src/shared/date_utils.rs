/// Utilities for date and time formatting
use chrono::{DateTime, Utc};

/// Format a UTC timestamp as DD.MM.YYYY HH:MM:SS, or a dash when absent
/// Example: 2024-03-15T14:02:26Z -> "15.03.2024 14:02:26"
pub fn format_requested_at(at: Option<DateTime<Utc>>) -> String {
    match at {
        Some(at) => at.format("%d.%m.%Y %H:%M:%S").to_string(),
        None => "—".to_string(),
    }
}
