pub mod aggregator;
pub mod analyzer;
pub mod collector;
mod model;

pub use model::*;
