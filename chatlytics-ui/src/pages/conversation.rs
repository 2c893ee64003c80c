//! Conversation Insights Page
//!
//! Details of one conversation, addressed by its position in the recent
//! list (`?index=N`).

use chatlytics::navigation::parse_index_param;
use chatlytics::{AppContext, ConversationSummary, LoadState};
use leptos::*;
use leptos_router::{use_query_map, A};

use crate::components::{format_started, Loading};
use crate::pages::dashboard::mount_loader;

#[component]
pub fn ConversationInsights() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext not found");
    let query = use_query_map();
    let index =
        create_memo(move |_| query.with(|q| parse_index_param(q.get("index").map(String::as_str))));

    let (loader, state) = mount_loader(&ctx);

    view! {
        <div class="space-y-6">
            <A href="/dashboard" class="text-primary-400 hover:underline">"← Back to dashboard"</A>

            {move || match state.get() {
                LoadState::Idle | LoadState::Loading => {
                    view! { <Loading label="Loading conversation..." /> }.into_view()
                }
                LoadState::Failed(message) => view! {
                    <div class="bg-red-900/40 border border-red-700 rounded-lg p-4 text-red-300">
                        {format!("Error loading conversation: {}", message)}
                    </div>
                }
                .into_view(),
                LoadState::Ready(_) => match index.get().and_then(|i| loader.conversation(i)) {
                    Some(summary) => view! { <ConversationDetail summary /> }.into_view(),
                    None => view! {
                        <p class="text-gray-400">"Conversation not found"</p>
                    }
                    .into_view(),
                },
            }}
        </div>
    }
}

#[component]
fn ConversationDetail(summary: ConversationSummary) -> impl IntoView {
    let started = summary
        .record
        .text_field("startTime")
        .map(format_started)
        .unwrap_or_else(|| "Unknown start".to_string());
    let fields = serde_json::to_string_pretty(&summary.record.fields).unwrap_or_default();

    view! {
        <section class="bg-gray-800 rounded-xl p-6 space-y-4">
            <h1 class="text-2xl font-bold">{format!("Conversation {}", summary.record.id)}</h1>
            <p class="text-gray-400">{format!("Started {}", started)}</p>
            <pre class="bg-gray-900 rounded-lg p-4 text-sm overflow-x-auto">{fields}</pre>
        </section>
    }
}
