//! The select / expand / evaluate / backpropagate contract shared by every
//! search strategy.

use super::node::{NodeId, NodeStats, NodeStatus};
use super::tree::SearchTree;
use crate::core::{ActionCatalog, EconomyState, Side, SideArray};
use rand::prelude::*;
use tracing::{debug, trace};

/// How to score a child that has never been visited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExplorationPolicy {
    /// Undefined score terms count as zero, so unvisited children score 0
    #[default]
    ZeroUnvisited,
    /// Unvisited children score infinity and are tried first
    PreferUnvisited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Action pairs drawn per expansion
    pub samples: usize,
    pub exploration: ExplorationPolicy,
    /// Release siblings of each node the plan moves through
    pub prune: bool,
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            samples: 3,
            exploration: ExplorationPolicy::default(),
            prune: true,
            seed: None,
        }
    }
}

/// Everything a strategy reads but never changes during a search
#[derive(Debug, Clone, Copy)]
pub struct SearchContext<'c> {
    pub catalog: &'c ActionCatalog,
    pub config: SearchConfig,
    pub max_depth: usize,
}

/// Outcome of selecting at a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Child(NodeId),
    /// The path ends here: horizon reached or nobody can act
    None,
}

impl Selection {
    pub fn child(self) -> Option<NodeId> {
        match self {
            Selection::Child(id) => Some(id),
            Selection::None => None,
        }
    }
}

/// The actions each side takes in one ply; `None` means the side holds
pub type ActionPair = SideArray<Option<String>>;

fn finite_or_zero(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

/// UCB1: win rate plus `sqrt(2 ln(parent visits) / visits)`
pub fn ucb1(stats: NodeStats, parent_visits: u32, policy: ExplorationPolicy) -> f64 {
    if stats.visits == 0 && policy == ExplorationPolicy::PreferUnvisited {
        return f64::INFINITY;
    }

    let visits = stats.visits as f64;
    let exploit = stats.wins as f64 / visits;
    let explore = (2.0 * (parent_visits as f64).ln() / visits).sqrt();

    finite_or_zero(exploit) + finite_or_zero(explore)
}

pub trait Strategy {
    fn name(&self) -> &'static str;

    /// Draw the action pairs that `node`'s children will be built from.
    ///
    /// `legal` holds each side's legal actions at `node`; at least one side
    /// has some.
    fn sample_actions(
        &self,
        tree: &SearchTree,
        node: NodeId,
        legal: &SideArray<Vec<&str>>,
        ctx: &SearchContext<'_>,
        rng: &mut impl Rng,
    ) -> Vec<ActionPair>;

    /// Pick the child of `node` to move to, expanding `node` first if needed
    fn select(
        &self,
        tree: &mut SearchTree,
        node: NodeId,
        ctx: &SearchContext<'_>,
        rng: &mut impl Rng,
    ) -> Selection {
        if tree.get(node).depth >= ctx.max_depth {
            tree.get_mut(node).status = NodeStatus::Terminal;
            return Selection::None;
        }

        if tree.get(node).status == NodeStatus::Unvisited {
            self.expand(tree, node, ctx, rng);
        }

        let parent = tree.get(node);
        let parent_visits = parent.stats.visits;

        let mut best = None;
        let mut best_score = f64::NEG_INFINITY;
        for &child in parent.children.iter() {
            let score = ucb1(tree.get(child).stats, parent_visits, ctx.config.exploration);
            trace!(node = %node, child = %child, score, "ucb1");

            if score > best_score {
                best = Some(child);
                best_score = score;
            }
        }

        match best {
            Some(child) => {
                tree.get_mut(node).chosen = Some(child);
                Selection::Child(child)
            }
            None => Selection::None,
        }
    }

    /// Populate the children of an unexpanded node and score each one
    fn expand(
        &self,
        tree: &mut SearchTree,
        node: NodeId,
        ctx: &SearchContext<'_>,
        rng: &mut impl Rng,
    ) {
        let current = tree.get(node);
        if current.status != NodeStatus::Unvisited || current.depth >= ctx.max_depth {
            return;
        }

        let legal = current
            .states
            .map(|_, state| ctx.catalog.legal_actions(state));

        if legal.iter().all(Vec::is_empty) {
            debug!(node = %node, depth = current.depth, "terminal: no legal actions");
            tree.get_mut(node).status = NodeStatus::Terminal;
            return;
        }

        let pairs = self.sample_actions(tree, node, &legal, ctx, rng);
        let clock = current.depth as u32;
        let states: Vec<_> = pairs
            .iter()
            .map(|pair| {
                current
                    .states
                    .map(|side, state| successor(ctx.catalog, state, pair[side].as_deref(), clock))
            })
            .collect();

        debug!(
            node = %node,
            depth = clock,
            owned = legal[Side::Owned].len(),
            opponent = legal[Side::Opponent].len(),
            children = states.len(),
            "expand"
        );

        tree.get_mut(node).status = NodeStatus::Expanded;
        for child_states in states {
            let child = tree.add_child(node, child_states);
            let won = self.evaluate(tree, child);
            self.backpropagate(tree, child, won);
        }
    }

    /// One-ply heuristic: did the owned side come out at least even?
    fn evaluate(&self, tree: &SearchTree, child: NodeId) -> bool {
        tree.get(child).owned_ahead()
    }

    fn backpropagate(&self, tree: &mut SearchTree, child: NodeId, won: bool) {
        tree.backpropagate(child, won);
    }
}

/// The state that follows `state` taking `action`, or holding on `None`.
///
/// Actions come from the catalog's own legal set, so a failure here is a
/// broken catalog and aborts the search.
fn successor(
    catalog: &ActionCatalog,
    state: &EconomyState,
    action: Option<&str>,
    clock: u32,
) -> EconomyState {
    match action {
        Some(action) => catalog
            .apply_action(state, action, clock)
            .unwrap_or_else(|err| panic!("sampled action {} is not applicable: {}", action, err)),
        None => state.hold(),
    }
}

/// Uniform draw from one side's legal actions, `None` when there are none
pub fn uniform_action(legal: &[&str], rng: &mut impl Rng) -> Option<String> {
    legal.choose(rng).map(|action| action.to_string())
}
