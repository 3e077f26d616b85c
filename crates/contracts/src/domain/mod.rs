pub mod a001_opportunity;
pub mod a002_lead;
