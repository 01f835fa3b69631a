use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use thaw::{Button, ButtonAppearance, Card};

use crate::layout::global_context::use_app_store;
use crate::system::auth::context::{do_login, do_register};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    fn title(self) -> &'static str {
        match self {
            AuthMode::Login => "Вход",
            AuthMode::Register => "Регистрация",
        }
    }

    fn submit_label(self, loading: bool) -> &'static str {
        match (self, loading) {
            (AuthMode::Login, false) => "Войти",
            (AuthMode::Login, true) => "Вход...",
            (AuthMode::Register, false) => "Зарегистрироваться",
            (AuthMode::Register, true) => "Регистрация...",
        }
    }

    fn switch_label(self) -> &'static str {
        match self {
            AuthMode::Login => "Нет аккаунта? Зарегистрироваться",
            AuthMode::Register => "Уже есть аккаунт? Войти",
        }
    }

    fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }
}

#[component]
pub fn LoginPage(#[prop(default = AuthMode::Login)] mode: AuthMode) -> impl IntoView {
    let store = use_app_store();
    let navigate = use_navigate();

    let mode = RwSignal::new(mode);
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error_message = RwSignal::new(Option::<String>::None);
    let is_loading = Memo::new(move |_| store.auth.with(|a| a.loading));
    let done = RwSignal::new(false);

    Effect::new(move |_| {
        if done.get() {
            navigate("/categories", Default::default());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let username_val = username.get_untracked().trim().to_string();
        let password_val = password.get_untracked();
        if username_val.is_empty() || password_val.is_empty() {
            error_message.set(Some("Введите логин и пароль".to_string()));
            return;
        }
        error_message.set(None);

        let current = mode.get_untracked();
        spawn_local(async move {
            let result = match current {
                AuthMode::Login => do_login(store, username_val, password_val).await,
                AuthMode::Register => do_register(store, username_val, password_val).await,
            };
            match result {
                Ok(()) => done.set(true),
                Err(message) => error_message.set(Some(message)),
            }
        });
    };

    let toggle = move |_| {
        error_message.set(None);
        mode.update(|m| *m = m.toggled());
    };

    view! {
        <div class="login-container">
            <Card class="login-box">
                <h2>{move || mode.get().title()}</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">"Логин"</label>
                        <input
                            type="text"
                            id="username"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Пароль"</label>
                        <input
                            type="password"
                            id="password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || mode.get().submit_label(is_loading.get())}
                    </button>
                </form>

                <Button appearance=ButtonAppearance::Transparent on_click=toggle>
                    {move || mode.get().switch_label()}
                </Button>
            </Card>
        </div>
    }
}
