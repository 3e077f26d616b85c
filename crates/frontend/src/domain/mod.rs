pub mod a001_opportunity;
