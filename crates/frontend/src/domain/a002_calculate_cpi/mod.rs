pub mod actions;
pub mod api;
pub mod lifecycle;
pub mod notifier;
pub mod service;
pub mod state;
pub mod ui;
