pub mod create;
pub mod details;
pub mod list;
pub mod notices;
