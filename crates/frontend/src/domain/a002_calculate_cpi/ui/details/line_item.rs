use contracts::domain::a002_calculate_cpi::{LineItem, UpdateLineItemBody};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Button, ButtonAppearance, ButtonSize};

use crate::domain::a001_category::ui::card::CategoryImage;
use crate::domain::a002_calculate_cpi::actions;
use crate::layout::global_context::use_app_store;
use crate::shared::number_format::{format_coefficient, format_number_with_decimals};

/// One category of a request with its spend
#[component]
pub fn LineItemRow(
    request_id: i64,
    position: usize,
    item: LineItem,
    read_only: bool,
    /// Called with the category id when the user removes the item
    on_remove: Callback<i64>,
) -> impl IntoView {
    let store = use_app_store();
    let category_id = item.category_id();
    let image_url = item.category.image_url(&store.image_base());
    let spent = RwSignal::new(item.user_spent.map(|v| v.to_string()).unwrap_or_default());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let save = move || {
        let body = match UpdateLineItemBody::parse(&spent.get_untracked()) {
            Ok(body) => body,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        error.set(None);
        saving.set(true);
        spawn_local(async move {
            if let Err(message) =
                actions::update_amount(store, request_id, category_id, body.user_spent).await
            {
                error.set(Some(message));
            }
            saving.set(false);
        });
    };

    let description = {
        let summary = item.category.summary();
        if summary.is_empty() { "—".to_string() } else { summary.to_string() }
    };
    let placeholder = format!("{}", item.category.base_price);

    view! {
        <div class="line-item">
            <p class="line-item__number">{position}</p>
            <CategoryImage image_url=image_url class="line-item__image" />
            <div class="line-item__text">
                <p class="line-item__title">{item.category.title.clone()}</p>
                <p class="line-item__description">{description}</p>
                <p class="line-item__coefficient">
                    "Коэффициент: " {format_coefficient(item.coefficient)}
                </p>
            </div>
            <div class="line-item__spend">
                {if read_only {
                    view! {
                        <span>
                            {format_number_with_decimals(item.user_spent.unwrap_or(0.0), 2)} " руб."
                        </span>
                    }
                    .into_any()
                } else {
                    view! {
                        <input
                            type="number"
                            min="0"
                            step="0.01"
                            class="line-item__input"
                            placeholder=placeholder
                            prop:value=move || spent.get()
                            on:input=move |ev| spent.set(event_target_value(&ev))
                            on:keydown=move |ev| {
                                if ev.key() == "Enter" {
                                    save();
                                }
                            }
                        />
                        <span class="line-item__currency">"руб."</span>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Secondary
                            disabled=Signal::derive(move || saving.get())
                            on_click=move |_| save()
                        >
                            "Сохранить"
                        </Button>
                    }
                    .into_any()
                }}
                {move || error.get().map(|e| view! { <div class="error-text">{e}</div> })}
            </div>
            {(!read_only).then(|| {
                view! {
                    <button
                        class="line-item__remove"
                        title="Удалить категорию из заявки"
                        on:click=move |_| on_remove.run(category_id)
                    >
                        "✕"
                    </button>
                }
            })}
        </div>
    }
}
