use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a002_calculate_cpi::actions;
use crate::layout::global_context::AppStore;
use crate::routes::routes::AppRoutes;
use crate::shared::config::AppConfig;
use crate::system::auth::context::restore_session;

#[component]
pub fn App() -> impl IntoView {
    // Provide the AppStore to the whole app via context.
    let store = AppStore::new(AppConfig::default());
    provide_context(store);

    spawn_local(restore_session(store));

    // Draft indicator follows the session
    let is_authenticated = Memo::new(move |_| store.auth.with(|a| a.is_authenticated()));
    Effect::new(move |_| {
        if is_authenticated.get() {
            spawn_local(actions::load_draft(store));
        }
    });

    view! {
        <AppRoutes />
    }
}
