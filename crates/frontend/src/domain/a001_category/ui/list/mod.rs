mod state;

use contracts::domain::a001_category::{CategorySortBy, SortOrder};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_query_map;
use thaw::{Flex, FlexGap, Label, Select, Spinner};

use super::card::CategoryCard;
use crate::domain::a001_category::api;
use crate::layout::global_context::use_app_store;
use crate::shared::components::breadcrumbs::{Breadcrumbs, Crumb};
use crate::shared::components::search_bar::SearchBar;
use state::CategoriesListState;

#[component]
pub fn CategoriesPage() -> impl IntoView {
    let store = use_app_store();
    let query = use_query_map();
    let state = RwSignal::new(CategoriesListState::default());

    let title = RwSignal::new(
        query
            .with_untracked(|q| q.get("title"))
            .filter(|t| !t.is_empty()),
    );

    Effect::new(move |_| {
        let title = title.get();
        let base = store.api_base();
        state.update(|s| s.loading = true);
        spawn_local(async move {
            let categories = api::list_categories(&base, title.as_deref()).await;
            state.update(|s| s.loaded(categories, title));
        });
    });

    let on_search = Callback::new(move |query: String| {
        replace_search(&query);
        title.set(Some(query).filter(|q| !q.is_empty()));
    });

    let sort_by = RwSignal::new(sort_by_value(store.filters.get_untracked().sort_by).to_string());
    let order = RwSignal::new(order_value(store.filters.get_untracked().order).to_string());
    Effect::new(move |_| {
        let sort_by = match sort_by.get().as_str() {
            "alphabet" => CategorySortBy::Alphabet,
            _ => CategorySortBy::Price,
        };
        let order = match order.get().as_str() {
            "desc" => SortOrder::Desc,
            _ => SortOrder::Asc,
        };
        store.filters.update(|f| {
            f.sort_by = sort_by;
            f.order = order;
        });
    });

    let sorted = Memo::new(move |_| {
        let filters = store.filters.get();
        state.with(|s| s.sorted(&filters))
    });

    view! {
        <div class="page categories-page">
            <Breadcrumbs items=Signal::derive(|| vec![Crumb::current("Категории")]) />
            <SearchBar initial=title.get_untracked().unwrap_or_default() on_submit=on_search />

            <Flex gap=FlexGap::Medium class="category-filters">
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Сортировать по:"</Label>
                    <Select value=sort_by>
                        <option value="price">"По цене"</option>
                        <option value="alphabet">"По алфавиту"</option>
                    </Select>
                </Flex>
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Порядок:"</Label>
                    <Select value=order>
                        <option value="asc">"По возрастанию"</option>
                        <option value="desc">"По убыванию"</option>
                    </Select>
                </Flex>
            </Flex>

            {move || {
                if state.with(|s| s.loading) {
                    return view! { <Spinner /> }.into_any();
                }
                let categories = sorted.get();
                if categories.is_empty() {
                    let searched = state.with(|s| s.searched_title.is_some());
                    return view! {
                        <div class="not-found">
                            {if searched { "Категории не найдены" } else { "" }}
                        </div>
                    }
                    .into_any();
                }
                view! {
                    <div class="cards-container">
                        {categories
                            .into_iter()
                            .map(|category| view! { <CategoryCard category=category /> })
                            .collect_view()}
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}

/// Keep `?title=` in the address bar so the search survives a reload
fn replace_search(query: &str) {
    let new_url = if query.is_empty() {
        "/categories".to_string()
    } else {
        format!("/categories?title={}", urlencoding::encode(query))
    };
    if let Some(w) = web_sys::window() {
        if let Ok(history) = w.history() {
            let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&new_url));
        }
    }
}

fn sort_by_value(sort_by: CategorySortBy) -> &'static str {
    match sort_by {
        CategorySortBy::Price => "price",
        CategorySortBy::Alphabet => "alphabet",
    }
}

fn order_value(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Asc => "asc",
        SortOrder::Desc => "desc",
    }
}
