pub mod breadcrumbs;
pub mod search_bar;
pub mod ui;
