mod engine;
mod options;
mod search;

pub use engine::Engine;
pub use options::{EngineOptions, StrategyKind};
pub use search::{SearchOptions, SearchReport};
