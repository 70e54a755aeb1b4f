use crate::ai::{
    BeliefStrategy, MonteCarloStrategy, NodeId, PlanStep, SearchContext, SearchTree, Strategy,
    TreeStats,
};
use crate::ai::strategy::ActionPair;
use crate::core::SideArray;

use super::options::StrategyKind;

use anyhow::{bail, ensure, Context};
use rand::prelude::*;
use std::str::FromStr;

/// Options for configuring the search behavior
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Maximum time to search in milliseconds
    pub move_time: u64,
    /// Maximum number of plies to produce
    pub plies: usize,
}

impl FromStr for SearchOptions {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut i = 0;
        let mut search_options = SearchOptions::default();

        let parts = s.split_whitespace().collect::<Vec<_>>();

        while i < parts.len() {
            match parts[i] {
                "movetime" if i + 1 < parts.len() => {
                    let time = parts[i + 1].parse().context("invalid movetime")?;
                    search_options.move_time = time;
                    i += 1;
                }
                "plies" if i + 1 < parts.len() => {
                    let n: usize = parts[i + 1].parse().context("invalid plies")?;
                    ensure!(n > 0, "plies must be positive");
                    search_options.plies = n;
                    i += 1;
                }
                p => bail!("invalid go argument {}", p),
            }
            i += 1;
        }
        Ok(search_options)
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            move_time: 1000,
            plies: usize::MAX,
        }
    }
}

/// What one `go` produced
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub steps: Vec<PlanStep>,
    pub stats: TreeStats,
    /// Seconds spent
    pub elapsed: f64,
}

impl Strategy for StrategyKind {
    fn name(&self) -> &'static str {
        match self {
            StrategyKind::MonteCarlo => MonteCarloStrategy.name(),
            StrategyKind::Belief => BeliefStrategy.name(),
        }
    }

    fn sample_actions(
        &self,
        tree: &SearchTree,
        node: NodeId,
        legal: &SideArray<Vec<&str>>,
        ctx: &SearchContext<'_>,
        rng: &mut impl Rng,
    ) -> Vec<ActionPair> {
        match self {
            StrategyKind::MonteCarlo => {
                MonteCarloStrategy.sample_actions(tree, node, legal, ctx, rng)
            }
            StrategyKind::Belief => BeliefStrategy.sample_actions(tree, node, legal, ctx, rng),
        }
    }
}
