use super::catalog::ActionCatalog;
use super::record::Observation;
use anyhow::{ensure, Result};
use hashbag::HashBag;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Resources {
    pub mineral: f64,
    pub vespene: f64,
    pub supply_used: u32,
    pub supply_cap: u32,
}

impl Resources {
    pub const fn new(mineral: f64, vespene: f64, supply_used: u32, supply_cap: u32) -> Self {
        Self {
            mineral,
            vespene,
            supply_used,
            supply_cap,
        }
    }
}

impl fmt::Display for Resources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}m/{}v/{}of{}s",
            self.mineral, self.vespene, self.supply_used, self.supply_cap
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub item: String,
    pub created_at: u32,
}

impl RosterEntry {
    pub fn new(item: &str, created_at: u32) -> Self {
        Self {
            item: item.to_string(),
            created_at,
        }
    }
}

/// Everything an agent has produced, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Roster {
    entries: Vec<RosterEntry>,
}

impl Roster {
    pub fn new(entries: Vec<RosterEntry>) -> Self {
        Self { entries }
    }

    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a str>, created_at: u32) -> Self {
        Self {
            entries: items
                .into_iter()
                .map(|item| RosterEntry::new(item, created_at))
                .collect(),
        }
    }

    pub fn entries(&self) -> &[RosterEntry] {
        &self.entries
    }

    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.item.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items().any(|i| i == item)
    }

    pub fn count(&self, item: &str) -> usize {
        self.items().filter(|&i| i == item).count()
    }

    pub fn counts(&self) -> HashBag<&str> {
        self.items().collect()
    }

    /// A copy of this roster with `entry` appended
    pub(crate) fn with(&self, entry: RosterEntry) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.extend_from_slice(&self.entries);
        entries.push(entry);
        Self { entries }
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, entry: RosterEntry) {
        self.entries.push(entry);
    }
}

/// One agent's economy at one point of the plan.
///
/// States are values: transitions always build a new state and never alter
/// the one they start from, so sibling branches of a search tree cannot see
/// each other's rosters.
#[derive(Debug, Clone, PartialEq)]
pub struct EconomyState {
    owner: String,
    resources: Resources,
    roster: Roster,
    worth: f64,
    last_action: Option<String>,
    horizon: usize,
}

impl EconomyState {
    pub fn new(
        owner: &str,
        resources: Resources,
        roster: Roster,
        horizon: usize,
        catalog: &ActionCatalog,
    ) -> Self {
        let worth = worth_of(&resources, &roster, catalog);
        Self {
            owner: owner.to_string(),
            resources,
            roster,
            worth,
            last_action: None,
            horizon,
        }
    }

    /// The usual opening: 12 workers and a base, 50 minerals, 12 of 15 supply
    pub fn starting(owner: &str, horizon: usize, catalog: &ActionCatalog) -> Self {
        let mut items = vec!["TERRAN_SCV"; 12];
        items.push("TERRAN_COMMANDCENTER");

        Self::new(
            owner,
            Resources::new(50.0, 0.0, 12, 15),
            Roster::from_items(items, 0),
            horizon,
            catalog,
        )
    }

    /// Build from an agent's observation history, newest record last.
    ///
    /// The latest record gives the current economy; the number of records
    /// gives how far ahead a plan for this agent may look.
    pub fn from_observations(history: &[Observation], catalog: &ActionCatalog) -> Result<Self> {
        let Some(latest) = history.last() else {
            anyhow::bail!("Cannot build an economy from an empty history");
        };

        ensure!(
            history.iter().all(|obs| obs.owner == latest.owner),
            "Observation history mixes owners"
        );

        Ok(Self::new(
            &latest.owner,
            latest.resources,
            latest.roster.clone(),
            history.len(),
            catalog,
        ))
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn worth(&self) -> f64 {
        self.worth
    }

    pub fn last_action(&self) -> Option<&str> {
        self.last_action.as_deref()
    }

    /// How many plies ahead this agent's plan may go
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Successor for a ply in which this agent had nothing to do
    pub fn hold(&self) -> Self {
        Self {
            last_action: None,
            ..self.clone()
        }
    }

    pub(crate) fn transition(
        &self,
        resources: Resources,
        roster: Roster,
        action: &str,
        catalog: &ActionCatalog,
    ) -> Self {
        let worth = worth_of(&resources, &roster, catalog);
        Self {
            owner: self.owner.clone(),
            resources,
            roster,
            worth,
            last_action: Some(action.to_string()),
            horizon: self.horizon,
        }
    }

    #[cfg(test)]
    pub(crate) fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }
}

/// Weighted sum of roster rank, mineral, vespene and supply in use
pub fn worth_of(resources: &Resources, roster: &Roster, catalog: &ActionCatalog) -> f64 {
    let (rank, mineral, vespene) = roster.items().fold((0.0, 0.0, 0.0), |acc, item| {
        let value = catalog.item_value(item);
        (
            acc.0 + value.rank as f64,
            acc.1 + value.mineral,
            acc.2 + value.vespene,
        )
    });

    let weights = catalog.weights();
    weights.rank * rank
        + weights.mineral * (resources.mineral + mineral)
        + weights.vespene * (resources.vespene + vespene)
        + weights.supply * resources.supply_used as f64
}
