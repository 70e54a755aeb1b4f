//! Time-bounded plan generation

use super::node::NodeId;
use super::strategy::{SearchConfig, SearchContext, Selection, Strategy};
use super::tree::{SearchTree, TreeStats};
use crate::core::{ActionCatalog, EconomyState, Side};
use crate::utils::make_rng;
use derive_where::derive_where;
use rand::rngs::StdRng;
use std::time::Instant;
use tracing::debug;

/// One recommended action and where it leaves the owned side
#[derive(Debug, Clone, PartialEq)]
pub struct PlanStep {
    /// `None` when the owned side holds for this ply
    pub action: Option<String>,
    pub worth: f64,
    pub depth: usize,
}

/// Owns a search tree and walks it one ply at a time
#[derive_where(Debug)]
pub struct SearchDriver<'c, S: Strategy> {
    tree: SearchTree,
    current: NodeId,
    #[derive_where(skip)]
    strategy: S,
    context: SearchContext<'c>,
    rng: StdRng,
}

impl<'c, S: Strategy> SearchDriver<'c, S> {
    pub fn new(
        owned: EconomyState,
        opponent: EconomyState,
        catalog: &'c ActionCatalog,
        strategy: S,
        config: SearchConfig,
    ) -> Self {
        let max_depth = owned.horizon().max(opponent.horizon());
        let tree = SearchTree::new(owned, opponent);

        Self {
            current: tree.root(),
            tree,
            strategy,
            context: SearchContext {
                catalog,
                config,
                max_depth,
            },
            rng: make_rng(config.seed),
        }
    }

    /// Steps of the plan until `deadline` passes or the plan runs out.
    ///
    /// Picks up wherever the previous call stopped.
    pub fn advance(&mut self, deadline: Instant) -> Advance<'_, 'c, S> {
        Advance {
            driver: self,
            deadline,
            done: false,
        }
    }

    /// Move one ply down the tree, ignoring the clock
    pub fn step(&mut self) -> Option<PlanStep> {
        let selection = self.strategy.select(
            &mut self.tree,
            self.current,
            &self.context,
            &mut self.rng,
        );

        let child = match selection {
            Selection::Child(child) => child,
            Selection::None => {
                debug!(node = %self.current, "no selection");
                return None;
            }
        };

        if self.context.config.prune {
            let released = self.tree.prune_siblings(child);
            debug!(node = %child, released, "pruned siblings");
        }

        self.current = child;
        Some(self.plan_step(child))
    }

    /// Move back to the root so the plan can be walked again
    pub fn reset(&mut self) {
        self.current = self.tree.root();
    }

    fn plan_step(&self, id: NodeId) -> PlanStep {
        let node = self.tree.get(id);
        let owned = node.state(Side::Owned);

        PlanStep {
            action: owned.last_action().map(str::to_string),
            worth: owned.worth(),
            depth: node.depth(),
        }
    }

    /// Steps from the root to the current node
    pub fn principal_line(&self) -> Vec<PlanStep> {
        self.tree
            .path_to(self.current)
            .into_iter()
            .skip(1)
            .map(|id| self.plan_step(id))
            .collect()
    }

    pub fn tree_stats(&self) -> TreeStats {
        self.tree.stats()
    }

    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn max_depth(&self) -> usize {
        self.context.max_depth
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }
}

/// Lazy plan produced by [`SearchDriver::advance`]
pub struct Advance<'d, 'c, S: Strategy> {
    driver: &'d mut SearchDriver<'c, S>,
    deadline: Instant,
    done: bool,
}

impl<S: Strategy> Iterator for Advance<'_, '_, S> {
    type Item = PlanStep;

    fn next(&mut self) -> Option<PlanStep> {
        if self.done || Instant::now() >= self.deadline {
            self.done = true;
            return None;
        }

        let step = self.driver.step();
        self.done = step.is_none();
        step
    }
}
