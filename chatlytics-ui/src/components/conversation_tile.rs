//! Conversation Tile Component
//!
//! Entry of the recent-conversations list; clicking it opens the
//! conversation insights page.

use chatlytics::dashboard::ConversationSummary;
use leptos::*;

/// `YYYY-MM-DD HH:MM` for an RFC 3339 timestamp, otherwise the raw text
pub fn format_started(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[component]
pub fn ConversationTile(
    summary: ConversationSummary,
    #[prop(into)]
    on_select: Callback<usize>,
) -> impl IntoView {
    let index = summary.index;
    let started = summary
        .record
        .text_field("startTime")
        .map(format_started)
        .unwrap_or_else(|| "Unknown start".to_string());

    view! {
        <button
            class="w-full text-left bg-gray-800 hover:bg-gray-700 rounded-lg p-4 border border-gray-700 transition-colors"
            on:click=move |_| on_select.call(index)
        >
            <div class="flex items-center justify-between">
                <span class="font-semibold">{format!("Conversation {}", summary.record.id)}</span>
                <span class="text-gray-500 text-xs">{format!("#{}", index + 1)}</span>
            </div>
            <div class="text-gray-400 text-sm mt-1">{started}</div>
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_started() {
        assert_eq!(format_started("2024-03-01T10:05:00Z"), "2024-03-01 10:05");
        assert_eq!(format_started("yesterday"), "yesterday");
    }
}
