mod line_item;
pub mod view_model;

use contracts::domain::a002_calculate_cpi::{CalculationOutcome, CalculationRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params_map};
use thaw::{Button, ButtonAppearance, Flex, FlexGap, Spinner};

use crate::domain::a002_calculate_cpi::actions;
use crate::layout::global_context::use_app_store;
use crate::shared::components::breadcrumbs::{Breadcrumbs, Crumb};
use crate::shared::components::ui::StatusBadge;
use crate::shared::date_utils::{
    format_date_long, format_datetime, parse_input_value, to_input_value,
};
use crate::shared::number_format::format_cpi;
use crate::system::auth::guard::{RequireAuth, RequireModerator};
use line_item::LineItemRow;
use view_model::{leaves_request, shown_request, RequestPermissions};

/// The user's current draft
#[component]
pub fn DraftPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <RequestView draft_view=true request_id=Signal::derive(|| None) />
        </RequireAuth>
    }
}

/// A request opened by id (`/requests/:id`)
#[component]
pub fn RequestDetailsPage() -> impl IntoView {
    let params = use_params_map();
    let request_id = Signal::derive(move || {
        params
            .with(|p| p.get("id"))
            .and_then(|id| id.parse::<i64>().ok())
    });

    view! {
        <RequireAuth>
            <RequestView draft_view=false request_id=request_id />
        </RequireAuth>
    }
}

#[component]
fn RequestView(draft_view: bool, request_id: Signal<Option<i64>>) -> impl IntoView {
    let store = use_app_store();
    let navigate = use_navigate();
    let action_error = RwSignal::new(None::<String>);
    let redirect = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        if let Some(target) = redirect.get() {
            navigate(&target, Default::default());
        }
    });

    Effect::new(move |_| {
        let id = request_id.get();
        spawn_local(async move {
            if draft_view {
                actions::load_draft(store).await;
            } else if let Some(id) = id {
                actions::load_request(store, id).await;
            }
        });
    });

    let request = Memo::new(move |_| {
        let id = request_id.get();
        store.requests.with(|r| {
            shown_request(
                draft_view,
                r.current_draft.as_ref(),
                r.current_request.as_ref(),
                id,
            )
        })
    });
    let permissions = Memo::new(move |_| {
        let user = store.auth.with(|a| a.user.clone());
        request.with(|r| RequestPermissions::resolve(r.as_ref(), user.as_ref()))
    });
    let loading = Memo::new(move |_| store.requests.with(|r| r.loading));
    let error = Memo::new(move |_| store.requests.with(|r| r.error.clone()));

    let on_remove = Callback::new(move |category_id: i64| {
        let Some(id) = request.get_untracked().and_then(|r| r.id) else {
            return;
        };
        action_error.set(None);
        spawn_local(async move {
            match actions::remove_line_item(store, id, category_id).await {
                Ok(removed) => {
                    let has_draft = store.requests.with_untracked(|r| r.has_draft);
                    if leaves_request(draft_view, removed, has_draft) {
                        redirect.set(Some("/categories".to_string()));
                    }
                }
                Err(message) => action_error.set(Some(message)),
            }
        });
    });

    let clear_all = move |_| {
        let Some(current) = request.get_untracked() else {
            return;
        };
        let Some(id) = current.id else {
            return;
        };
        let category_ids: Vec<i64> = current.line_items.iter().map(|i| i.category_id()).collect();
        spawn_local(async move {
            actions::clear_draft(store, id, category_ids).await;
            redirect.set(Some("/categories".to_string()));
        });
    };

    let submit = move |_| {
        let Some(id) = request.get_untracked().and_then(|r| r.id) else {
            return;
        };
        action_error.set(None);
        spawn_local(async move {
            match actions::submit(store, id).await {
                Ok(formed) => {
                    let target = formed.id.unwrap_or(id);
                    redirect.set(Some(format!("/requests/{}", target)));
                }
                Err(message) => action_error.set(Some(message)),
            }
        });
    };

    let moderate = move |approve: bool| {
        let Some(id) = request.get_untracked().and_then(|r| r.id) else {
            return;
        };
        spawn_local(async move {
            match actions::moderate(store, id, approve).await {
                Ok(()) => actions::load_request(store, id).await,
                Err(message) => action_error.set(Some(message)),
            }
        });
    };

    let title = if draft_view { "Черновик расчёта CPI" } else { "Расчёт CPI" };
    let crumbs = Signal::derive(move || {
        if draft_view {
            vec![Crumb::link("Категории", "/categories"), Crumb::current("Черновик")]
        } else {
            let mut items = vec![Crumb::link("Мои заявки", "/requests")];
            if let Some(id) = request_id.get() {
                items.push(Crumb::current(format!("Расчёт №{}", id)));
            }
            items
        }
    });

    view! {
        <div class="page request-page">
            <Breadcrumbs items=crumbs />
            <h1 class="request-page__title">{title}</h1>

            {move || request.get().map(|r| view! { <RequestMeta request=r /> })}

            <Show when=move || permissions.get().can_edit>
                <ComparisonDateEditor request=request />
            </Show>

            {move || loading.get().then(|| view! { <Spinner /> })}
            {move || error.get().map(|e| view! { <div class="error-banner">{e}</div> })}
            {move || action_error.get().map(|e| view! { <div class="error-banner">{e}</div> })}

            {move || {
                if loading.get() {
                    return ().into_any();
                }
                match request.get() {
                    None => {
                        let text = if draft_view {
                            "Черновик отсутствует. Добавьте категории, чтобы создать расчёт."
                        } else {
                            "Расчёт не найден."
                        };
                        view! { <div class="not-found">{text}</div> }.into_any()
                    }
                    Some(r) => {
                        let read_only = permissions.get_untracked().read_only();
                        let Some(id) = r.id else {
                            return view! { <div class="not-found">"Расчёт не найден."</div> }.into_any();
                        };
                        view! {
                            <CpiResult request=r.clone() />
                            <div class="line-items">
                                {if r.line_items.is_empty() {
                                    view! { <p class="line-items__empty">"Категории не добавлены"</p> }.into_any()
                                } else {
                                    r.line_items
                                        .iter()
                                        .cloned()
                                        .enumerate()
                                        .map(|(idx, item)| {
                                            view! {
                                                <LineItemRow
                                                    request_id=id
                                                    position=idx + 1
                                                    item=item
                                                    read_only=read_only
                                                    on_remove=on_remove
                                                />
                                            }
                                        })
                                        .collect_view()
                                        .into_any()
                                }}
                            </div>
                        }
                        .into_any()
                    }
                }
            }}

            <Show when=move || permissions.get().can_edit>
                <Flex gap=FlexGap::Medium class="request-page__actions">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=Signal::derive(move || {
                            loading.get() || request.with(|r| r.as_ref().map_or(true, |r| r.line_items.is_empty()))
                        })
                        on_click=clear_all
                    >
                        "Очистить все"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || loading.get())
                        on_click=submit
                    >
                        "Оформить расчёт"
                    </Button>
                </Flex>
            </Show>

            <RequireModerator>
                <Show when=move || permissions.get().can_moderate>
                    <Flex gap=FlexGap::Medium class="request-page__actions">
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || loading.get())
                            on_click=move |_| moderate(true)
                        >
                            {move || if loading.get() { "Обработка..." } else { "Завершить заявку" }}
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            disabled=Signal::derive(move || loading.get())
                            on_click=move |_| moderate(false)
                        >
                            {move || if loading.get() { "Обработка..." } else { "Отклонить заявку" }}
                        </Button>
                    </Flex>
                </Show>
            </RequireModerator>
        </div>
    }
}

#[component]
fn RequestMeta(request: CalculationRequest) -> impl IntoView {
    view! {
        <div class="request-page__meta">
            <StatusBadge status=request.status />
            {request.comparison_date.map(|d| view! {
                <span class="request-page__meta-item">"Дата сравнения: " {format_date_long(d)}</span>
            })}
            {request.created_at.clone().map(|v| view! {
                <span class="request-page__meta-item">"Создан: " {format_datetime(Some(v.as_str()))}</span>
            })}
            {request.formed_at.clone().map(|v| view! {
                <span class="request-page__meta-item">"Оформлен: " {format_datetime(Some(v.as_str()))}</span>
            })}
            {request.completed_at.clone().map(|v| view! {
                <span class="request-page__meta-item">"Завершён: " {format_datetime(Some(v.as_str()))}</span>
            })}
        </div>
    }
}

/// Personal CPI of a completed request
#[component]
fn CpiResult(request: CalculationRequest) -> impl IntoView {
    match request.outcome() {
        CalculationOutcome::Pending => ().into_any(),
        CalculationOutcome::Success(value) => view! {
            <div class="cpi-result">
                "Ваш персональный ИПЦ - " <span class="cpi-result__value">{format_cpi(value)}</span>
            </div>
        }
        .into_any(),
        CalculationOutcome::Failed => view! {
            <div class="cpi-result cpi-result--failed">
                "Произошла ошибка при расчёте персонального ИПЦ"
            </div>
        }
        .into_any(),
    }
}

/// Date the personal CPI is compared against
#[component]
fn ComparisonDateEditor(request: Memo<Option<CalculationRequest>>) -> impl IntoView {
    let store = use_app_store();
    let value = RwSignal::new(String::new());
    let saving = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        value.set(to_input_value(request.with(|r| r.as_ref().and_then(|r| r.comparison_date))));
    });

    let save = move |_| {
        let Some(current) = request.get_untracked() else {
            return;
        };
        let Some(id) = current.id else {
            return;
        };
        let date = parse_input_value(&value.get_untracked());
        saving.set(true);
        error.set(None);
        spawn_local(async move {
            if let Err(message) = actions::update_comparison_date(store, current, id, date).await {
                error.set(Some(message));
            }
            saving.set(false);
        });
    };

    view! {
        <div class="comparison-date">
            <label class="comparison-date__label">"Дата сравнения"</label>
            <input
                type="date"
                class="comparison-date__input"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <Button
                appearance=ButtonAppearance::Secondary
                disabled=Signal::derive(move || saving.get())
                on_click=save
            >
                {move || if saving.get() { "Сохранение..." } else { "Сохранить" }}
            </Button>
            <p class="comparison-date__hint">
                "Выберите дату для базовой цены P_i(t0) в расчёте персонального ИПЦ"
            </p>
            {move || error.get().map(|e| view! { <div class="error-text">{e}</div> })}
        </div>
    }
}
