use crate::ai::{PlanStep, SearchDriver, Strategy};
use crate::core::{
    render_action, render_states, standard_catalog, ActionCatalog, EconomyState, Observation,
    Side, SideArray,
};

use super::options::{EngineOptions, StrategyKind};
use super::search::{SearchOptions, SearchReport};

use anyhow::{Context, Result};
use std::time::{Duration, Instant};
use tracing::info;

/// Engine holds both economies and the search planning over them
pub struct Engine {
    pub catalog: &'static ActionCatalog,
    pub options: EngineOptions,
    histories: SideArray<Vec<Observation>>,
    states: SideArray<Option<EconomyState>>,
    planner: Option<SearchDriver<'static, StrategyKind>>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create a new engine over the standard catalog with default options
    pub fn new() -> Self {
        Self {
            catalog: standard_catalog(),
            options: EngineOptions::default(),
            histories: SideArray::new(Vec::new(), Vec::new()),
            states: SideArray::new(None, None),
            planner: None,
        }
    }

    /// Set engine options
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<()> {
        if self.options.set_option(name, value)? {
            self.planner = None;
        }
        Ok(())
    }

    /// Both sides start from the standard opening
    pub fn set_startpos(&mut self) {
        let horizon = self.options.horizon;
        self.histories = SideArray::new(Vec::new(), Vec::new());
        self.states = SideArray::new(
            Some(EconomyState::starting("self", horizon, self.catalog)),
            Some(EconomyState::starting("enemy", horizon, self.catalog)),
        );
        self.planner = None;
    }

    pub fn clear(&mut self) {
        self.histories = SideArray::new(Vec::new(), Vec::new());
        self.states = SideArray::new(None, None);
        self.planner = None;
    }

    /// Append observations to `side`'s history and rebuild its economy
    pub fn observe(&mut self, side: Side, observations: Vec<Observation>) -> Result<()> {
        let mut history = self.histories[side].clone();
        history.extend(observations);

        let state = EconomyState::from_observations(&history, self.catalog)
            .with_context(|| format!("Cannot build {} economy", side))?;

        self.histories[side] = history;
        self.states[side] = Some(state);
        self.planner = None;
        Ok(())
    }

    pub fn state(&self, side: Side) -> Option<&EconomyState> {
        self.states[side].as_ref()
    }

    fn planner(&mut self) -> Result<&mut SearchDriver<'static, StrategyKind>> {
        if self.planner.is_none() {
            let owned = self.states[Side::Owned]
                .clone()
                .context("No owned economy; send position or observe first")?;
            let opponent = self.states[Side::Opponent]
                .clone()
                .context("No opponent economy; send position or observe first")?;

            let driver = SearchDriver::new(
                owned,
                opponent,
                self.catalog,
                self.options.strategy,
                self.options.search,
            );
            info!(
                strategy = driver.strategy().name(),
                max_depth = driver.max_depth(),
                "new search"
            );
            self.planner = Some(driver);
        }

        self.planner.as_mut().context("No search available")
    }

    /// Continue the plan within the options' time and ply limits
    pub fn go(&mut self, search_options: &SearchOptions) -> Result<SearchReport> {
        let start_time = Instant::now();
        let deadline = start_time + Duration::from_millis(search_options.move_time);

        let planner = self.planner()?;
        let steps: Vec<PlanStep> = planner
            .advance(deadline)
            .take(search_options.plies)
            .collect();
        let stats = planner.tree_stats();

        let elapsed = start_time.elapsed().as_secs_f64();
        info!(
            plies = steps.len(),
            live_nodes = stats.live_nodes,
            root_visits = stats.root_stats.visits,
            elapsed,
            "search finished"
        );

        Ok(SearchReport {
            steps,
            stats,
            elapsed,
        })
    }

    /// Rewind the plan to the first ply
    pub fn reset(&mut self) -> Result<()> {
        self.planner()?.reset();
        Ok(())
    }

    /// The plan so far
    pub fn line(&mut self) -> Result<Vec<PlanStep>> {
        Ok(self.planner()?.principal_line())
    }

    /// Both economies, followed by the plan so far if a search is running
    pub fn display(&self) -> String {
        let mut out = match (&self.states[Side::Owned], &self.states[Side::Opponent]) {
            (Some(owned), Some(opponent)) => {
                render_states(&SideArray::new(owned.clone(), opponent.clone()))
            }
            _ => return "No position set".to_string(),
        };

        if let Some(planner) = &self.planner {
            let actions: Vec<String> = planner
                .principal_line()
                .iter()
                .map(|step| match &step.action {
                    Some(action) => render_action(self.catalog, action),
                    None => "hold".to_string(),
                })
                .collect();
            out.push_str(&format!("Plan: {}\n", actions.join(" ")));
        }

        out
    }
}
