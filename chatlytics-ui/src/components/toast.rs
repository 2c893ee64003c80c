//! Toast Notification Component
//!
//! Renders the app-wide notices; a click dismisses one early.

use leptos::*;

use crate::state::NoticeState;

#[derive(Clone, Copy, PartialEq)]
enum Tone {
    Success,
    Error,
}

impl Tone {
    fn icon(self) -> &'static str {
        match self {
            Tone::Success => "✓",
            Tone::Error => "✕",
        }
    }

    fn background(self) -> &'static str {
        match self {
            Tone::Success => "bg-green-600",
            Tone::Error => "bg-red-600",
        }
    }
}

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let notices = use_context::<NoticeState>().expect("NoticeState not found");

    view! {
        <div class="fixed bottom-4 right-4 z-50 space-y-2">
            <Notice current=notices.success tone=Tone::Success />
            <Notice current=notices.error tone=Tone::Error />
        </div>
    }
}

#[component]
fn Notice(current: RwSignal<Option<String>>, tone: Tone) -> impl IntoView {
    move || {
        current.get().map(|message| {
            view! {
                <div
                    class=format!(
                        "flex items-center space-x-3 {} text-white px-4 py-3 rounded-lg shadow-lg cursor-pointer animate-slide-in",
                        tone.background()
                    )
                    title="Dismiss"
                    on:click=move |_| current.set(None)
                >
                    <span class="text-lg">{tone.icon()}</span>
                    <span class="text-sm font-medium">{message}</span>
                </div>
            }
        })
    }
}
