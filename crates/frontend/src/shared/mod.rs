pub mod api_error;
pub mod api_utils;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod number_format;
pub mod retry;
