use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::layout::global_context::use_app_store;
use crate::system::auth::context::do_logout;

#[component]
pub fn Header() -> impl IntoView {
    let store = use_app_store();
    let navigate = use_navigate();
    let logged_out = RwSignal::new(false);

    Effect::new(move |_| {
        if logged_out.get() {
            logged_out.set(false);
            navigate("/", Default::default());
        }
    });

    let logout = move |_| {
        spawn_local(async move {
            do_logout(store).await;
            logged_out.set(true);
        });
    };

    let draft_count = Memo::new(move |_| store.requests.with(|r| r.draft_count()));
    let is_authenticated = Memo::new(move |_| store.auth.with(|a| a.is_authenticated()));
    let username = Memo::new(move |_| {
        store
            .auth
            .with(|a| a.username().map(str::to_string))
            .unwrap_or_default()
    });

    view! {
        <header data-zone="header" class="header">
            <div class="header__content">
                <A href="/" attr:class="header__title">"Персональный CPI"</A>
                <nav class="header__nav">
                    <A href="/categories">"Категории"</A>
                    <Show when=move || is_authenticated.get()>
                        <A href="/requests">"Мои заявки"</A>
                    </Show>
                </nav>
            </div>
            <div class="header__actions">
                <Show when=move || is_authenticated.get()>
                    <A href="/draft" attr:class="header__draft">
                        "Черновик"
                        <span
                            class="header__draft-badge"
                            class:header__draft-badge--empty=move || draft_count.get() == 0
                        >
                            {move || draft_count.get()}
                        </span>
                    </A>
                </Show>
                <Show
                    when=move || is_authenticated.get()
                    fallback=|| view! { <A href="/login" attr:class="button button--ghost">"Войти"</A> }
                >
                    <A href="/profile" attr:class="header__user">{move || username.get()}</A>
                    <button class="button button--ghost" on:click=logout>"Выйти"</button>
                </Show>
            </div>
        </header>
    }
}
