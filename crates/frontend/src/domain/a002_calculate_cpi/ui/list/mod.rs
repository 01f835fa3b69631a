mod state;

use contracts::enums::RequestStatus;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use thaw::{
    Flex, FlexGap, Label, Select, Spinner, Table, TableBody, TableCell, TableHeader,
    TableHeaderCell, TableRow,
};

use crate::domain::a002_calculate_cpi::actions;
use crate::layout::global_context::use_app_store;
use crate::shared::components::breadcrumbs::{Breadcrumbs, Crumb};
use crate::shared::components::ui::StatusBadge;
use crate::shared::date_utils::{format_datetime, parse_input_value, to_input_value};
use crate::shared::number_format::{format_cpi, format_number_with_decimals};
use crate::system::auth::guard::RequireAuth;
use state::{row_href, total_spent, RequestsListState};

#[component]
pub fn RequestsListPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <RequestsList />
        </RequireAuth>
    }
}

#[component]
fn RequestsList() -> impl IntoView {
    let store = use_app_store();
    let state = RwSignal::new(RequestsListState::default());

    let from = RwSignal::new(to_input_value(Some(state.get_untracked().filter.from)));
    let to = RwSignal::new(to_input_value(Some(state.get_untracked().filter.to)));
    let status = RwSignal::new(state.with_untracked(|s| s.status_code().to_string()));

    // Inputs -> filter; an empty or broken date keeps the previous bound
    Effect::new(move |_| {
        let from = parse_input_value(&from.get());
        let to = parse_input_value(&to.get());
        let status = status.get();
        state.update(|s| {
            if let Some(from) = from {
                s.filter.from = from;
            }
            if let Some(to) = to {
                s.filter.to = to;
            }
            s.set_status_code(&status);
        });
    });

    // One fetch per page visit; filtering happens on the client
    state.update(|s| s.loading = true);
    spawn_local(async move {
        match actions::list_requests(store).await {
            Ok(all) => state.update(|s| {
                s.all = all;
                s.loading = false;
            }),
            Err(message) => state.update(|s| {
                s.error = Some(message);
                s.loading = false;
            }),
        }
    });

    let visible = Memo::new(move |_| state.with(|s| s.visible()));
    let has_any = Memo::new(move |_| state.with(|s| !s.all.is_empty()));

    let is_moderator = Memo::new(move |_| store.auth.with(|a| a.is_moderator()));

    view! {
        <div class="page requests-page">
            <Breadcrumbs items=Signal::derive(|| vec![Crumb::current("Мои заявки")]) />
            <h1 class="requests-page__title">"Мои расчёты CPI"</h1>

            <Flex gap=FlexGap::Medium class="requests-filters">
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"С даты"</Label>
                    <input
                        type="date"
                        prop:value=move || from.get()
                        on:input=move |ev| from.set(event_target_value(&ev))
                    />
                </Flex>
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"По дату"</Label>
                    <input
                        type="date"
                        prop:value=move || to.get()
                        on:input=move |ev| to.set(event_target_value(&ev))
                    />
                </Flex>
                <Flex vertical=true gap=FlexGap::Small>
                    <Label>"Статус"</Label>
                    <Select value=status>
                        <option value="ALL">"Любой"</option>
                        {RequestStatus::all()
                            .into_iter()
                            .map(|s| view! { <option value=s.code()>{s.display_name()}</option> })
                            .collect_view()}
                    </Select>
                </Flex>
            </Flex>

            {move || state.with(|s| s.error.clone()).map(|e| view! { <div class="error-banner">{e}</div> })}

            {move || {
                if state.with(|s| s.loading) {
                    return view! { <Spinner /> }.into_any();
                }
                let items = visible.get();
                if items.is_empty() {
                    let text = if has_any.get() {
                        "Нет заявок, соответствующих выбранным фильтрам"
                    } else {
                        "У вас пока нет расчетов"
                    };
                    return view! { <div class="not-found">{text}</div> }.into_any();
                }
                let show_creator = is_moderator.get();
                view! {
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"№"</TableHeaderCell>
                                <TableHeaderCell>"Статус"</TableHeaderCell>
                                <TableHeaderCell>"Дата создания"</TableHeaderCell>
                                <TableHeaderCell>"Дата оформления"</TableHeaderCell>
                                {show_creator.then(|| view! { <TableHeaderCell>"Создатель"</TableHeaderCell> })}
                                <TableHeaderCell>"Категорий"</TableHeaderCell>
                                <TableHeaderCell>"Сумма расходов"</TableHeaderCell>
                                <TableHeaderCell>"Персональный CPI"</TableHeaderCell>
                                <TableHeaderCell>"Действия"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {items
                                .into_iter()
                                .enumerate()
                                .map(|(idx, request)| {
                                    let href = row_href(&request);
                                    let cpi = request
                                        .personal_cpi
                                        .map(format_cpi)
                                        .unwrap_or_else(|| "—".to_string());
                                    let creator = request.creator_username.clone().unwrap_or_default();
                                    let status = request.status;
                                    let created_at = format_datetime(request.created_at.as_deref());
                                    let formed_at = format_datetime(request.formed_at.as_deref());
                                    let line_item_count = request.line_item_count();
                                    let spent = format_number_with_decimals(total_spent(&request), 2);
                                    view! {
                                        <TableRow>
                                            <TableCell>{idx + 1}</TableCell>
                                            <TableCell><StatusBadge status=status /></TableCell>
                                            <TableCell>{created_at}</TableCell>
                                            <TableCell>{formed_at}</TableCell>
                                            {show_creator.then(|| view! { <TableCell>{creator}</TableCell> })}
                                            <TableCell>{line_item_count}</TableCell>
                                            <TableCell>
                                                {spent} " руб."
                                            </TableCell>
                                            <TableCell>{cpi}</TableCell>
                                            <TableCell>
                                                {href.map(|href| view! { <A href=href>"Открыть"</A> })}
                                            </TableCell>
                                        </TableRow>
                                    }
                                })
                                .collect_view()}
                        </TableBody>
                    </Table>
                }
                .into_any()
            }}
        </div>
    }
}
