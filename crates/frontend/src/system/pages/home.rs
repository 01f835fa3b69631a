use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <section class="hero-section">
            <div class="hero-content">
                <h1 class="hero-title">"Система расчета индекса потребительских цен"</h1>
                <p class="hero-description">
                    "Комплексная платформа для расчета и анализа ИПЦ на основе категорий услуг "
                    "и их ценовых данных. Отслеживайте инфляцию и оценивайте изменения в стоимости жизни."
                </p>
                <A href="/categories" attr:class="button button--primary">"Перейти к категориям"</A>
            </div>
        </section>
    }
}
