pub mod models;
pub mod utils;

pub use models::{PatternName, SimulationResult, StockSymbol};
