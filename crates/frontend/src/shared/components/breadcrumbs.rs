use leptos::prelude::*;
use leptos_router::components::A;

#[derive(Debug, Clone, PartialEq)]
pub struct Crumb {
    pub label: String,
    /// `None` for the current page
    pub href: Option<String>,
}

impl Crumb {
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: Some(href.into()),
        }
    }

    pub fn current(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: None,
        }
    }
}

#[component]
pub fn Breadcrumbs(#[prop(into)] items: Signal<Vec<Crumb>>) -> impl IntoView {
    view! {
        <nav class="breadcrumbs" aria-label="Breadcrumb">
            <ol class="breadcrumbs__list">
                {move || {
                    items
                        .get()
                        .into_iter()
                        .enumerate()
                        .map(|(index, crumb)| {
                            view! {
                                <li class="breadcrumbs__item">
                                    {(index > 0).then(|| view! { <span class="breadcrumbs__separator">" > "</span> })}
                                    {match crumb.href {
                                        Some(href) => view! { <A href=href>{crumb.label}</A> }.into_any(),
                                        None => view! { <span class="breadcrumbs__current">{crumb.label}</span> }.into_any(),
                                    }}
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ol>
        </nav>
    }
}
