/// Configuration options for the engine
use crate::ai::{ExplorationPolicy, SearchConfig};
use anyhow::{bail, ensure, Context, Result};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    #[default]
    MonteCarlo,
    Belief,
}

impl FromStr for StrategyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mcts" => Ok(StrategyKind::MonteCarlo),
            "belief" => Ok(StrategyKind::Belief),
            _ => bail!("Unknown strategy: {}", s),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::MonteCarlo => write!(f, "mcts"),
            StrategyKind::Belief => write!(f, "belief"),
        }
    }
}

fn parse_exploration(value: &str) -> Result<ExplorationPolicy> {
    match value {
        "zero" => Ok(ExplorationPolicy::ZeroUnvisited),
        "infinite" => Ok(ExplorationPolicy::PreferUnvisited),
        _ => bail!("Unknown exploration policy: {}", value),
    }
}

fn parse_seed(value: &str) -> Result<Option<u64>> {
    match value {
        "none" => Ok(None),
        _ => Ok(Some(value.parse().context("Invalid seed")?)),
    }
}

#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Whether protocol errors abort the process
    pub strict_mode: bool,
    pub strategy: StrategyKind,
    pub search: SearchConfig,
    /// Horizon given to both sides by `position startpos`
    pub horizon: usize,
}

impl EngineOptions {
    /// Returns whether the change invalidates an existing search
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<bool> {
        match name {
            "strictmode" => {
                self.strict_mode = value.parse()?;
                return Ok(false);
            }
            "strategy" => self.strategy = value.parse()?,
            "seed" => self.search.seed = parse_seed(value)?,
            "samples" => {
                let samples: usize = value.parse().context("Invalid samples")?;
                ensure!(samples > 0, "samples must be positive");
                self.search.samples = samples;
            }
            "exploration" => self.search.exploration = parse_exploration(value)?,
            "prune" => self.search.prune = value.parse()?,
            "horizon" => self.horizon = value.parse().context("Invalid horizon")?,
            _ => bail!("Unknown option: {}", name),
        }

        Ok(true)
    }
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            strict_mode: false,
            strategy: StrategyKind::default(),
            search: SearchConfig::default(),
            horizon: 10,
        }
    }
}
