pub mod aggregate;
pub mod analytics;
pub mod details;
