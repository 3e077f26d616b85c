pub mod envelope;
pub mod master_data;
pub mod serde_utils;
