//! Adversarial planning search over two economies
pub mod belief;
pub mod driver;
pub mod mcts;
pub mod node;
pub mod strategy;
pub mod tree;

// Re-export key types
pub use belief::{BeliefStrategy, Posture, PostureBelief};
pub use driver::{Advance, PlanStep, SearchDriver};
pub use mcts::MonteCarloStrategy;
pub use node::{NodeId, NodeStats, NodeStatus, SearchNode};
pub use strategy::{ucb1, ExplorationPolicy, SearchConfig, SearchContext, Selection, Strategy};
pub use tree::{SearchTree, TreeStats};

#[cfg(test)]
pub mod tests;
