//! Dashboard Page
//!
//! Aggregate conversation stats and the recent-conversations list.

use chatlytics::{AppContext, DashboardLoader, DashboardSnapshot, LoadState};
use leptos::*;
use std::rc::Rc;

use crate::components::{ConversationTile, Loading, StatTile};
use crate::state::NoticeState;

/// Create a loader whose transitions feed a signal, start it behind the
/// session guard and dispose it with the owning page
pub(crate) fn mount_loader(ctx: &AppContext) -> (Rc<DashboardLoader>, RwSignal<LoadState>) {
    let loader = Rc::new(ctx.dashboard_loader());
    let state = create_rw_signal(LoadState::Idle);

    loader.on_transition(move |next| {
        if let LoadState::Failed(message) = next {
            web_sys::console::error_1(&format!("Failed to load dashboard: {}", message).into());
        }
        state.set(next.clone());
    });

    let guard = ctx.guard();
    let activating = Rc::clone(&loader);
    spawn_local(async move {
        activating.activate(&guard).await;
    });

    let disposing = Rc::clone(&loader);
    on_cleanup(move || disposing.dispose());

    (loader, state)
}

#[component]
pub fn Dashboard() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext not found");
    let notices = use_context::<NoticeState>().expect("NoticeState not found");

    let (loader, state) = mount_loader(&ctx);
    let on_select = Callback::new(move |index: usize| {
        loader.select_conversation(index);
    });

    let guard = ctx.guard();
    let on_logout = move |_: ev::MouseEvent| {
        if let Err(e) = guard.logout() {
            notices.show_error(&format!("Logout failed: {}", e));
        }
    };

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">"Chatbot Factory Analytics - BEFACH International"</h1>
                <button
                    class="px-4 py-2 rounded-lg bg-gray-700 hover:bg-gray-600 transition-colors"
                    on:click=on_logout
                >
                    "Logout"
                </button>
            </div>

            {move || match state.get() {
                LoadState::Idle | LoadState::Loading => {
                    view! { <Loading label="Loading dashboard..." /> }.into_view()
                }
                LoadState::Failed(message) => view! {
                    <div class="bg-red-900/40 border border-red-700 rounded-lg p-4 text-red-300">
                        {format!("Error loading dashboard data: {}", message)}
                    </div>
                }
                .into_view(),
                LoadState::Ready(snapshot) => {
                    view! { <DashboardContent snapshot on_select /> }.into_view()
                }
            }}
        </div>
    }
}

#[component]
fn DashboardContent(snapshot: DashboardSnapshot, on_select: Callback<usize>) -> impl IntoView {
    let tiles = snapshot.tiles();
    let tile_views = tiles
        .entries()
        .into_iter()
        .map(|(label, value)| view! { <StatTile label value /> })
        .collect_view();

    view! {
        <section>
            <div class="grid grid-cols-2 md:grid-cols-5 gap-4">{tile_views}</div>
        </section>

        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Recent Conversations"</h2>
            {if snapshot.conversations.is_empty() {
                view! { <p class="text-gray-400">"No recent conversations"</p> }.into_view()
            } else {
                view! {
                    <div class="space-y-3">
                        {snapshot
                            .conversations
                            .into_iter()
                            .map(|summary| view! { <ConversationTile summary on_select /> })
                            .collect_view()}
                    </div>
                }
                .into_view()
            }}
        </section>
    }
}
