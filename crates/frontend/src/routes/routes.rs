use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::domain::a001_category::ui::details::CategoryDetailsPage;
use crate::domain::a001_category::ui::list::CategoriesPage;
use crate::domain::a002_calculate_cpi::ui::details::{DraftPage, RequestDetailsPage};
use crate::domain::a002_calculate_cpi::ui::list::RequestsListPage;
use crate::layout::Shell;
use crate::system::pages::home::HomePage;
use crate::system::pages::login::{AuthMode, LoginPage};
use crate::system::pages::profile::ProfilePage;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Shell>
                <Routes fallback=|| view! { <div class="not-found">"Страница не найдена"</div> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/categories") view=CategoriesPage />
                    <Route path=path!("/categories/:id") view=CategoryDetailsPage />
                    <Route path=path!("/draft") view=DraftPage />
                    <Route path=path!("/requests") view=RequestsListPage />
                    <Route path=path!("/requests/:id") view=RequestDetailsPage />
                    <Route path=path!("/login") view=|| view! { <LoginPage mode=AuthMode::Login /> } />
                    <Route path=path!("/register") view=|| view! { <LoginPage mode=AuthMode::Register /> } />
                    <Route path=path!("/profile") view=ProfilePage />
                </Routes>
            </Shell>
        </Router>
    }
}
