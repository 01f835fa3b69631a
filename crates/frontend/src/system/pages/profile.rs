use contracts::system::auth::UserCredentials;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Button, ButtonAppearance, Card, Flex, FlexGap};

use crate::layout::global_context::use_app_store;
use crate::system::auth::context::{do_change_password, do_update_profile};
use crate::system::auth::guard::RequireAuth;

const MIN_PASSWORD_LEN: usize = 6;

/// Why a password change cannot be sent yet
fn password_change_error(old: &str, new: &str, confirm: &str) -> Option<&'static str> {
    if old.is_empty() || new.is_empty() {
        Some("Заполните все поля")
    } else if new.chars().count() < MIN_PASSWORD_LEN {
        Some("Пароль должен содержать не менее 6 символов")
    } else if new != confirm {
        Some("Пароли не совпадают")
    } else {
        None
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    view! {
        <RequireAuth>
            <Profile />
        </RequireAuth>
    }
}

#[component]
fn Profile() -> impl IntoView {
    let store = use_app_store();
    let loading = Memo::new(move |_| store.auth.with(|a| a.loading));

    let username = RwSignal::new(
        store
            .auth
            .with_untracked(|a| a.username().unwrap_or_default().to_string()),
    );
    let old_password = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let message = RwSignal::new(Option::<String>::None);

    let save_profile = move |_| {
        let name = username.get_untracked().trim().to_string();
        if name.is_empty() {
            message.set(Some("Логин не может быть пустым".to_string()));
            return;
        }
        let credentials = UserCredentials {
            username: Some(name),
            password: None,
        };
        spawn_local(async move {
            match do_update_profile(store, credentials).await {
                Ok(()) => message.set(Some("Профиль сохранён".to_string())),
                Err(e) => message.set(Some(e)),
            }
        });
    };

    let change_password = move |_| {
        let old = old_password.get_untracked();
        let new = new_password.get_untracked();
        if let Some(err) = password_change_error(&old, &new, &confirm_password.get_untracked()) {
            message.set(Some(err.to_string()));
            return;
        }
        spawn_local(async move {
            match do_change_password(store, old, new).await {
                Ok(()) => {
                    old_password.set(String::new());
                    new_password.set(String::new());
                    confirm_password.set(String::new());
                    message.set(Some("Пароль изменён".to_string()));
                }
                Err(e) => message.set(Some(e)),
            }
        });
    };

    view! {
        <div class="page profile-page">
            <h2 class="profile-title">"Личный кабинет"</h2>

            {move || message.get().map(|m| view! { <div class="profile-message">{m}</div> })}

            <Flex gap=FlexGap::Large>
                <Card>
                    <h4>"Профиль"</h4>
                    <div class="form-group">
                        <label>"Логин"</label>
                        <input
                            type="text"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                        />
                    </div>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || loading.get())
                        on_click=save_profile
                    >
                        {move || if loading.get() { "Сохранение..." } else { "Сохранить" }}
                    </Button>
                </Card>

                <Card>
                    <h4>"Смена пароля"</h4>
                    <div class="form-group">
                        <label>"Текущий пароль"</label>
                        <input
                            type="password"
                            prop:value=move || old_password.get()
                            on:input=move |ev| old_password.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label>"Новый пароль"</label>
                        <input
                            type="password"
                            prop:value=move || new_password.get()
                            on:input=move |ev| new_password.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label>"Подтверждение нового пароля"</label>
                        <input
                            type="password"
                            prop:value=move || confirm_password.get()
                            on:input=move |ev| confirm_password.set(event_target_value(&ev))
                        />
                    </div>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || loading.get())
                        on_click=change_password
                    >
                        {move || if loading.get() { "Изменение..." } else { "Изменить пароль" }}
                    </Button>
                </Card>
            </Flex>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_change_checks() {
        assert_eq!(password_change_error("", "secret1", "secret1"), Some("Заполните все поля"));
        assert!(password_change_error("old", "short", "short").is_some());
        assert_eq!(
            password_change_error("old", "secret1", "secret2"),
            Some("Пароли не совпадают")
        );
        assert_eq!(password_change_error("old", "secret1", "secret1"), None);
    }
}
