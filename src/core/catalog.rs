//! Production actions, their costs and prerequisites, and the rules that
//! decide which of them an economy can take next.

use super::convert::{FromIndex, Indexed, ToIndex};
use super::economy::{EconomyState, Resources, RosterEntry};
use anyhow::anyhow;
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("unknown action: {0}")]
    UnknownAction(String),

    #[error("insufficient resources for {action}: needs {needed}, has {available}")]
    InsufficientResources {
        action: String,
        needed: Cost,
        available: Resources,
    },

    #[error("{action} requires {item} in the roster")]
    MissingPrerequisite { action: String, item: String },

    #[error("{action} can only be taken once")]
    AlreadyProduced { action: String },

    #[error("duplicate action in catalog: {0}")]
    DuplicateAction(String),
}

/// Broad purpose of an action, used to model an agent's posture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
pub enum Category {
    Army,
    Economy,
    Tech,
}

impl FromIndex for Category {
    fn from_index(idx: usize) -> anyhow::Result<Self> {
        FromPrimitive::from_usize(idx).ok_or_else(|| anyhow!("Invalid category index: {}", idx))
    }
}

impl ToIndex for Category {
    fn to_index(&self) -> anyhow::Result<usize> {
        ToPrimitive::to_usize(self).ok_or_else(|| anyhow!("Invalid category value"))
    }
}

impl Indexed for Category {
    const COUNT: usize = 3;
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Army => write!(f, "Army"),
            Category::Economy => write!(f, "Economy"),
            Category::Tech => write!(f, "Tech"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cost {
    pub mineral: f64,
    pub vespene: f64,
    pub supply: u32,
}

impl Cost {
    pub const FREE: Cost = Cost::new(0.0, 0.0, 0);

    pub const fn new(mineral: f64, vespene: f64, supply: u32) -> Self {
        Self {
            mineral,
            vespene,
            supply,
        }
    }

    pub const fn minerals(mineral: f64) -> Self {
        Self::new(mineral, 0.0, 0)
    }

    /// Supply only binds actions that consume it, so an economy over its cap
    /// can still gather or build supply
    pub fn affordable(&self, resources: &Resources) -> bool {
        let supply_fits = self.supply == 0
            || resources
                .supply_used
                .checked_add(self.supply)
                .is_some_and(|used| used <= resources.supply_cap);

        self.mineral <= resources.mineral && self.vespene <= resources.vespene && supply_fits
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}m/{}v/{}s",
            self.mineral, self.vespene, self.supply
        )
    }
}

/// What an item in a roster is worth when ranking an economy
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ItemValue {
    pub rank: i32,
    pub mineral: f64,
    pub vespene: f64,
    pub supply: u32,
}

impl ItemValue {
    pub const fn new(rank: i32, mineral: f64, vespene: f64, supply: u32) -> Self {
        Self {
            rank,
            mineral,
            vespene,
            supply,
        }
    }
}

/// Weights of the four worth components
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorthWeights {
    pub rank: f64,
    pub mineral: f64,
    pub vespene: f64,
    pub supply: f64,
}

impl Default for WorthWeights {
    fn default() -> Self {
        Self {
            rank: 0.25,
            mineral: 0.25,
            vespene: 0.25,
            supply: 0.25,
        }
    }
}

/// Passive gathering applied after every transition
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeModel {
    pub worker: String,
    pub base: String,
    pub refinery: String,
    /// Minerals per mineral worker per base
    pub mineral_rate: f64,
    /// Vespene per worker assigned to a refinery
    pub vespene_rate: f64,
    pub workers_per_refinery: usize,
}

impl IncomeModel {
    /// Mineral and vespene gained by a roster in one step
    pub fn gather(&self, counts: &hashbag::HashBag<&str>) -> (f64, f64) {
        let workers = counts.contains(self.worker.as_str());
        let bases = counts.contains(self.base.as_str());
        let refineries = counts.contains(self.refinery.as_str());

        let vespene_workers = (refineries * self.workers_per_refinery).min(workers);
        let mineral_workers = workers - vespene_workers;

        (
            self.mineral_rate * (mineral_workers * bases) as f64,
            self.vespene_rate * vespene_workers as f64,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub id: String,
    /// `None` for pure economy steps that add nothing to the roster
    pub produces: Option<String>,
    pub cost: Cost,
    pub rank: i32,
    pub prerequisites: Vec<String>,
    /// Roster item that must be present for the action to be offered at all
    pub source: Option<String>,
    pub supply_provided: u32,
    pub category: Option<Category>,
    /// Offered only while the produced item is absent from the roster
    pub once: bool,
}

impl CatalogEntry {
    /// An action that produces an item named like itself
    pub fn new(id: &str, cost: Cost) -> Self {
        Self {
            id: id.to_string(),
            produces: Some(id.to_string()),
            cost,
            rank: 0,
            prerequisites: Vec::new(),
            source: None,
            supply_provided: 0,
            category: None,
            once: false,
        }
    }

    pub fn produces(mut self, item: &str) -> Self {
        self.produces = Some(item.to_string());
        self
    }

    pub fn produces_nothing(mut self) -> Self {
        self.produces = None;
        self
    }

    pub fn rank(mut self, rank: i32) -> Self {
        self.rank = rank;
        self
    }

    pub fn requires(mut self, item: &str) -> Self {
        self.prerequisites.push(item.to_string());
        self
    }

    pub fn from_source(mut self, item: &str) -> Self {
        self.source = Some(item.to_string());
        self
    }

    pub fn provides_supply(mut self, supply: u32) -> Self {
        self.supply_provided = supply;
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    /// The first rule this entry breaks for `state`, if any
    fn check(&self, state: &EconomyState) -> Result<(), CatalogError> {
        let roster = state.roster();

        if let Some(source) = &self.source {
            if !roster.contains(source) {
                return Err(CatalogError::MissingPrerequisite {
                    action: self.id.clone(),
                    item: source.clone(),
                });
            }
        }

        if let Some(missing) = self.prerequisites.iter().find(|item| !roster.contains(item)) {
            return Err(CatalogError::MissingPrerequisite {
                action: self.id.clone(),
                item: missing.clone(),
            });
        }

        if self.once {
            if let Some(item) = &self.produces {
                if roster.contains(item) {
                    return Err(CatalogError::AlreadyProduced {
                        action: self.id.clone(),
                    });
                }
            }
        }

        if !self.cost.affordable(state.resources()) {
            return Err(CatalogError::InsufficientResources {
                action: self.id.clone(),
                needed: self.cost,
                available: *state.resources(),
            });
        }

        Ok(())
    }
}

/// Read-only table of every production action an agent may take.
///
/// Built once (see [`super::items::STANDARD_CATALOG`] for the default table) and
/// shared by reference between any number of searches.
#[derive(Debug, Clone)]
pub struct ActionCatalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
    items: HashMap<String, ItemValue>,
    item_categories: HashMap<String, Category>,
    weights: WorthWeights,
    income: Option<IncomeModel>,
}

impl ActionCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn weights(&self) -> &WorthWeights {
        &self.weights
    }

    pub fn income(&self) -> Option<&IncomeModel> {
        self.income.as_ref()
    }

    pub fn get(&self, id: &str) -> Result<&CatalogEntry, CatalogError> {
        self.index
            .get(id)
            .map(|&idx| &self.entries[idx])
            .ok_or_else(|| CatalogError::UnknownAction(id.to_string()))
    }

    pub fn category_of(&self, id: &str) -> Option<Category> {
        self.get(id).ok().and_then(|entry| entry.category)
    }

    /// Category of the action that produces `item`
    pub fn item_category(&self, item: &str) -> Option<Category> {
        self.item_categories.get(item).copied()
    }

    /// Whether any action carries a category
    pub fn has_categories(&self) -> bool {
        !self.item_categories.is_empty() || self.entries.iter().any(|e| e.category.is_some())
    }

    /// Unknown items are worth nothing
    pub fn item_value(&self, item: &str) -> ItemValue {
        self.items.get(item).copied().unwrap_or_default()
    }

    /// Identifiers of every action `state` can take right now, in catalog order
    pub fn legal_actions(&self, state: &EconomyState) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.check(state).is_ok())
            .map(|entry| entry.id.as_str())
            .collect()
    }

    pub fn is_legal(&self, state: &EconomyState, id: &str) -> bool {
        self.get(id).is_ok_and(|entry| entry.check(state).is_ok())
    }

    /// Produce the state that follows `state` taking `id` at time `clock`.
    ///
    /// Resources are debited, the produced item is appended to the roster,
    /// supply is adjusted and passive income is gathered. `state` is left
    /// untouched.
    pub fn apply_action(
        &self,
        state: &EconomyState,
        id: &str,
        clock: u32,
    ) -> Result<EconomyState, CatalogError> {
        let entry = self.get(id)?;
        entry.check(state)?;

        let mut resources = *state.resources();
        resources.mineral -= entry.cost.mineral;
        resources.vespene -= entry.cost.vespene;
        resources.supply_used = resources.supply_used.saturating_add(entry.cost.supply);
        resources.supply_cap = resources.supply_cap.saturating_add(entry.supply_provided);

        let roster = match &entry.produces {
            Some(item) => state.roster().with(RosterEntry::new(item, clock)),
            None => state.roster().clone(),
        };

        if let Some(income) = &self.income {
            let (mineral, vespene) = income.gather(&roster.counts());
            resources.mineral += mineral;
            resources.vespene += vespene;
        }

        Ok(state.transition(resources, roster, id, self))
    }
}

#[derive(Debug, Default)]
pub struct CatalogBuilder {
    entries: Vec<CatalogEntry>,
    items: HashMap<String, ItemValue>,
    weights: WorthWeights,
    income: Option<IncomeModel>,
}

impl CatalogBuilder {
    pub fn action(mut self, entry: CatalogEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Value of an item that no action produces (e.g. starting units), or an
    /// override for one that an action does
    pub fn item(mut self, item: &str, value: ItemValue) -> Self {
        self.items.insert(item.to_string(), value);
        self
    }

    pub fn weights(mut self, weights: WorthWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn income(mut self, income: IncomeModel) -> Self {
        self.income = Some(income);
        self
    }

    pub fn build(self) -> Result<ActionCatalog, CatalogError> {
        let mut index = HashMap::with_capacity(self.entries.len());
        let mut items = self.items;
        let mut item_categories = HashMap::new();

        for (idx, entry) in self.entries.iter().enumerate() {
            if index.insert(entry.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateAction(entry.id.clone()));
            }

            if let Some(item) = &entry.produces {
                items.entry(item.clone()).or_insert(ItemValue::new(
                    entry.rank,
                    entry.cost.mineral,
                    entry.cost.vespene,
                    entry.cost.supply,
                ));

                if let Some(category) = entry.category {
                    item_categories.entry(item.clone()).or_insert(category);
                }
            }
        }

        Ok(ActionCatalog {
            entries: self.entries,
            index,
            items,
            item_categories,
            weights: self.weights,
            income: self.income,
        })
    }
}
