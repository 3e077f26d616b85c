pub mod api_utils;
pub mod config;
pub mod date_utils;
pub mod http;
pub mod icons;
pub mod list_utils;
pub mod modal;
pub mod number_format;
