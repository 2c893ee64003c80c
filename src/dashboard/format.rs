//! Tile formatting
//!
//! Turns a [`DashboardStats`] snapshot into the text shown in the five
//! aggregate tiles. Missing values render as zero.

use crate::api::DashboardStats;

/// Whole-number rendering of a counter
pub fn format_count(value: f64) -> String {
    format!("{}", value.round() as i64)
}

/// `"{minutes}m {seconds}s"` for an average length given in seconds
///
/// Minutes are `floor(seconds / 60)` of the raw value and the remainder is
/// truncated to whole seconds, so the seconds part is always below 60.
pub fn format_duration(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0).floor() as u64;
    let remainder = (seconds % 60.0).floor() as u64;
    format!("{}m {}s", minutes, remainder)
}

/// Integer percentage with a `%` suffix
pub fn format_rate(percent: f64) -> String {
    format!("{}%", percent.round() as i64)
}

/// Display text of the dashboard's aggregate tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatTiles {
    pub total_conversations: String,
    pub completed: String,
    pub abandoned: String,
    pub average_length: String,
    pub completion_rate: String,
}

impl From<&DashboardStats> for StatTiles {
    fn from(stats: &DashboardStats) -> Self {
        Self {
            total_conversations: format_count(stats.total_conversations()),
            completed: format_count(stats.completed()),
            abandoned: format_count(stats.abandoned()),
            average_length: format_duration(stats.average_duration_secs()),
            completion_rate: format_rate(stats.success_rate_percent()),
        }
    }
}

impl StatTiles {
    /// `(label, value)` pairs in display order
    pub fn entries(&self) -> [(&'static str, &str); 5] {
        [
            ("Total Conversations", self.total_conversations.as_str()),
            ("Completed", self.completed.as_str()),
            ("Abandoned", self.abandoned.as_str()),
            ("Average Length", self.average_length.as_str()),
            ("Completion Rate", self.completion_rate.as_str()),
        ]
    }
}
