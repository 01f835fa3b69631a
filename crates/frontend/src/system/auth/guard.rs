use leptos::prelude::*;
use leptos_router::components::A;

use crate::layout::global_context::use_app_store;

/// Component that requires authentication
/// Shows a login prompt if not authenticated
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let store = use_app_store();

    view! {
        <Show
            when=move || store.auth.with(|a| a.is_authenticated())
            fallback=move || {
                view! {
                    <Show
                        when=move || store.auth.with(|a| a.initialized)
                        fallback=|| view! { <div class="page-loading">"Загрузка..."</div> }
                    >
                        <div class="access-denied">
                            "Войдите, чтобы продолжить. "
                            <A href="/login">"Вход"</A>
                        </div>
                    </Show>
                }
            }
        >
            {children()}
        </Show>
    }
}

/// Renders children only for moderators
#[component]
pub fn RequireModerator(children: ChildrenFn) -> impl IntoView {
    let store = use_app_store();

    view! {
        <Show when=move || store.auth.with(|a| a.is_moderator())>
            {children()}
        </Show>
    }
}
