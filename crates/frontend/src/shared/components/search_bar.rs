use leptos::prelude::*;

/// Search input with a submit button; `on_submit` receives the trimmed query
#[component]
pub fn SearchBar(
    /// Query to start with
    #[prop(optional, into)]
    initial: String,
    #[prop(optional, into)]
    placeholder: MaybeProp<String>,
    on_submit: Callback<String>,
) -> impl IntoView {
    let query = RwSignal::new(initial);
    let placeholder =
        move || placeholder.get().unwrap_or_else(|| "Введите название категории".to_string());

    view! {
        <form
            class="search-bar"
            on:submit=move |ev| {
                ev.prevent_default();
                on_submit.run(query.get_untracked().trim().to_string());
            }
        >
            <input
                type="text"
                class="search-bar__input"
                placeholder=placeholder
                prop:value=move || query.get()
                on:input=move |ev| query.set(event_target_value(&ev))
            />
            <button type="submit" class="button button--primary">"Найти"</button>
        </form>
    }
}
