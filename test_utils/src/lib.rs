pub mod fixtures;
pub mod generator;
