//! Signup Page

use chatlytics::{AppContext, AuthError};
use leptos::*;
use leptos_router::A;
use std::rc::Rc;

use crate::components::InlineLoading;
use crate::state::NoticeState;

#[component]
pub fn Signup() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext not found");
    let notices = use_context::<NoticeState>().expect("NoticeState not found");
    let form = Rc::new(ctx.auth_form());

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (confirm, set_confirm) = create_signal(String::new());
    let error = create_rw_signal(None::<String>);
    let submitting = create_rw_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let form = Rc::clone(&form);
        let email = email.get_untracked();
        let password = password.get_untracked();
        let confirm = confirm.get_untracked();

        error.set(None);
        submitting.set(true);

        spawn_local(async move {
            match form.submit_signup(&email, &password, &confirm).await {
                // The controller has already moved on to the login page
                Ok(notice) => notices.show_success(notice),
                Err(AuthError::InProgress) => {}
                Err(e) => {
                    error.set(Some(e.to_string()));
                    submitting.set(false);
                }
            }
        });
    };

    view! {
        <div class="max-w-md mx-auto mt-16 bg-gray-800 rounded-xl p-8">
            <h1 class="text-2xl font-bold mb-6">"Sign Up"</h1>

            <form on:submit=on_submit class="space-y-4">
                <div>
                    <label class="block text-sm text-gray-400 mb-1">"Email"</label>
                    <input
                        type="email"
                        required
                        class="w-full bg-gray-700 rounded-lg px-4 py-2"
                        prop:value=email
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-1">"Password"</label>
                    <input
                        type="password"
                        required
                        class="w-full bg-gray-700 rounded-lg px-4 py-2"
                        prop:value=password
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-1">"Confirm Password"</label>
                    <input
                        type="password"
                        required
                        class="w-full bg-gray-700 rounded-lg px-4 py-2"
                        prop:value=confirm
                        on:input=move |ev| set_confirm.set(event_target_value(&ev))
                    />
                </div>

                {move || error.get().map(|msg| view! {
                    <p class="text-red-400 text-sm">{msg}</p>
                })}

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           disabled:cursor-not-allowed rounded-lg py-3 font-semibold"
                >
                    {move || if submitting.get() {
                        view! { <InlineLoading /> }.into_view()
                    } else {
                        "Sign Up".into_view()
                    }}
                </button>
            </form>

            <p class="text-sm text-gray-400 mt-6">
                "Already have an account? "
                <A href="/login" class="text-primary-400 hover:underline">"Login"</A>
            </p>
        </div>
    }
}
