//! Vespene - adversarial macro-management planner for resource economies

pub mod ai;
pub mod core;
pub mod engine;
pub mod utils;

// Re-export commonly used items
pub use ai::{PlanStep, SearchDriver};
pub use core::{standard_catalog, ActionCatalog, EconomyState};
pub use engine::Engine;
