use contracts::domain::a001_category::Category;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use thaw::Spinner;

use super::card::{AddToDraftButton, CategoryImage};
use crate::domain::a001_category::api;
use crate::layout::global_context::use_app_store;
use crate::shared::components::breadcrumbs::{Breadcrumbs, Crumb};
use crate::shared::number_format::format_rubles;

#[component]
pub fn CategoryDetailsPage() -> impl IntoView {
    let store = use_app_store();
    let params = use_params_map();
    let category = RwSignal::new(None::<Category>);
    let loading = RwSignal::new(true);

    let id = Memo::new(move |_| params.with(|p| p.get("id")).and_then(|id| id.parse::<i64>().ok()));

    Effect::new(move |_| {
        let Some(id) = id.get() else {
            loading.set(false);
            return;
        };
        let base = store.api_base();
        loading.set(true);
        spawn_local(async move {
            category.set(api::get_category(&base, id).await);
            loading.set(false);
        });
    });

    let crumbs = Signal::derive(move || {
        let mut items = vec![Crumb::link("Категории", "/categories")];
        if let Some(c) = category.get() {
            items.push(Crumb::current(c.title));
        }
        items
    });

    view! {
        <div class="page category-details">
            <Breadcrumbs items=crumbs />
            {move || {
                if loading.get() {
                    return view! { <Spinner /> }.into_any();
                }
                match category.get() {
                    None => view! { <div class="not-found">"Категория не найдена"</div> }.into_any(),
                    Some(c) => {
                        let image_url = c.image_url(&store.image_base());
                        let description = c
                            .description
                            .clone()
                            .filter(|d| !d.trim().is_empty())
                            .unwrap_or_else(|| c.short_description.clone());
                        view! {
                            <div class="category-details__content">
                                <div class="category-details__text">
                                    <h1>{c.title.clone()}</h1>
                                    <h5>"Базовая стоимость: " {format_rubles(c.base_price)}</h5>
                                    <p>{description}</p>
                                    <AddToDraftButton category_id=c.id />
                                </div>
                                <CategoryImage image_url=image_url class="category-details__image" />
                            </div>
                        }
                        .into_any()
                    }
                }
            }}
        </div>
    }
}
