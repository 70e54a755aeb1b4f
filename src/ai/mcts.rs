//! Monte-Carlo strategy: uniform action sampling for both sides

use super::node::NodeId;
use super::strategy::{uniform_action, ActionPair, SearchContext, Strategy};
use super::tree::SearchTree;
use crate::core::{Side, SideArray};
use rand::prelude::*;

#[derive(Debug, Clone, Copy, Default)]
pub struct MonteCarloStrategy;

impl MonteCarloStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for MonteCarloStrategy {
    fn name(&self) -> &'static str {
        "mcts"
    }

    fn sample_actions(
        &self,
        _tree: &SearchTree,
        _node: NodeId,
        legal: &SideArray<Vec<&str>>,
        ctx: &SearchContext<'_>,
        rng: &mut impl Rng,
    ) -> Vec<ActionPair> {
        (0..ctx.config.samples)
            .map(|_| {
                let owned = uniform_action(&legal[Side::Owned], rng);
                let opponent = uniform_action(&legal[Side::Opponent], rng);
                SideArray::new(owned, opponent)
            })
            .collect()
    }
}
