pub mod config;
pub mod errors;
pub mod generator;
pub mod model;
pub mod sampling;

pub mod report;
pub mod storage;
