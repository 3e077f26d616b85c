pub mod api;
pub mod filter;
pub mod form;
pub mod orchestrator;
pub mod state;
pub mod statistics;
pub mod ui;
