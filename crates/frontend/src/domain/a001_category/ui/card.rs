use contracts::domain::a001_category::Category;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use thaw::{Button, ButtonAppearance, Card};

use crate::domain::a002_calculate_cpi::actions;
use crate::layout::global_context::use_app_store;
use crate::shared::number_format::format_rubles;

/// Category image or a placeholder when none is uploaded
#[component]
pub fn CategoryImage(image_url: Option<String>, #[prop(into)] class: String) -> impl IntoView {
    match image_url {
        Some(url) => view! {
            <div class=class style=format!("background-image: url({}); background-size: cover; background-position: center;", url)></div>
        }
        .into_any(),
        None => view! {
            <div class=format!("{} image-placeholder", class)>
                <span>"Нет изображения"</span>
            </div>
        }
        .into_any(),
    }
}

/// Button that attaches a category to the user's draft
#[component]
pub fn AddToDraftButton(category_id: i64) -> impl IntoView {
    let store = use_app_store();
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let add = move |_| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        error.set(None);
        spawn_local(async move {
            if let Err(message) = actions::add_category(store, category_id).await {
                error.set(Some(message));
            }
            busy.set(false);
        });
    };

    view! {
        <Show
            when=move || store.auth.with(|a| a.is_authenticated())
            fallback=|| view! { <A href="/login">"Войдите, чтобы добавить категорию"</A> }
        >
            <Button
                appearance=ButtonAppearance::Secondary
                disabled=Signal::derive(move || busy.get())
                on_click=add
            >
                "Добавить категорию"
            </Button>
        </Show>
        {move || error.get().map(|e| view! { <div class="error-text">{e}</div> })}
    }
}

#[component]
pub fn CategoryCard(category: Category) -> impl IntoView {
    let store = use_app_store();
    let image_url = category.image_url(&store.image_base());
    let href = format!("/categories/{}", category.id);
    let title = category.title.clone();
    let summary = category.summary().to_string();
    let base_price = format_rubles(category.base_price);
    let category_id = category.id;

    view! {
        <Card class="category-card">
            <A href=href>
                <div class="category-card__body">
                    <h3 class="category-card__title">{title}</h3>
                    <p class="category-card__summary">{summary}</p>
                    <p class="category-card__price">
                        "Базовая стоимость: " {base_price}
                    </p>
                    <CategoryImage image_url=image_url class="category-card__image" />
                </div>
            </A>
            <div class="category-card__footer">
                <AddToDraftButton category_id=category_id />
            </div>
        </Card>
    }
}
