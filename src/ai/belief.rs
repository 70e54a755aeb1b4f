//! Belief-weighted strategy.
//!
//! The opponent's roster is only partly observable, so instead of drawing its
//! actions uniformly we keep a belief over what it is aiming for (army,
//! economy or tech) and draw its actions from the matching category.

use super::node::NodeId;
use super::strategy::{uniform_action, ActionPair, SearchContext, Strategy};
use super::tree::SearchTree;
use crate::core::{ActionCatalog, Category, Indexed, Roster, Side, SideArray};
use rand::distr::{weighted::WeightedIndex, Distribution};
use rand::prelude::*;
use tracing::trace;

/// What an agent is building towards
pub type Posture = Category;

const POSTURES: [Posture; 3] = [Category::Army, Category::Economy, Category::Tech];

fn slot(posture: Posture) -> usize {
    match posture {
        Category::Army => 0,
        Category::Economy => 1,
        Category::Tech => 2,
    }
}

/// Probability of each posture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostureBelief {
    weights: [f64; Category::COUNT],
}

impl Default for PostureBelief {
    fn default() -> Self {
        Self::prior()
    }
}

impl PostureBelief {
    /// Before anything is observed an opponent is most likely expanding
    pub fn prior() -> Self {
        Self {
            weights: [0.20, 0.80, 0.00],
        }
    }

    /// The prior blended evenly with the category mix of `roster`
    pub fn observe(roster: &Roster, catalog: &ActionCatalog) -> Self {
        let mut counts = [0.0; Category::COUNT];
        for item in roster.items() {
            if let Some(category) = catalog.item_category(item) {
                counts[slot(category)] += 1.0;
            }
        }

        let total: f64 = counts.iter().sum();
        let prior = Self::prior();
        if total == 0.0 {
            return prior;
        }

        let mut weights = prior.weights;
        for (weight, count) in weights.iter_mut().zip(counts) {
            *weight = 0.5 * *weight + 0.5 * count / total;
        }

        Self { weights }
    }

    pub fn probability(&self, posture: Posture) -> f64 {
        self.weights[slot(posture)]
    }

    /// Postures the opponent may currently hold
    pub fn possible(&self) -> Vec<Posture> {
        POSTURES
            .into_iter()
            .filter(|&posture| self.probability(posture) > 0.0)
            .collect()
    }

    pub fn sample(&self, rng: &mut impl Rng) -> Option<Posture> {
        let dist = WeightedIndex::new(self.weights).ok()?;
        Some(POSTURES[dist.sample(rng)])
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BeliefStrategy;

impl BeliefStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for BeliefStrategy {
    fn name(&self) -> &'static str {
        "belief"
    }

    fn sample_actions(
        &self,
        tree: &SearchTree,
        node: NodeId,
        legal: &SideArray<Vec<&str>>,
        ctx: &SearchContext<'_>,
        rng: &mut impl Rng,
    ) -> Vec<ActionPair> {
        let catalog = ctx.catalog;
        let categorized = catalog.has_categories();

        let belief = PostureBelief::observe(tree.get(node).state(Side::Opponent).roster(), catalog);
        trace!(node = %node, belief = ?belief.possible(), "opponent postures");

        (0..ctx.config.samples)
            .map(|_| {
                let owned = uniform_action(&legal[Side::Owned], rng);

                let posture = if categorized { belief.sample(rng) } else { None };
                let opponent = match posture {
                    Some(posture) => {
                        let matching: Vec<&str> = legal[Side::Opponent]
                            .iter()
                            .copied()
                            .filter(|action| catalog.category_of(action) == Some(posture))
                            .collect();

                        if matching.is_empty() {
                            uniform_action(&legal[Side::Opponent], rng)
                        } else {
                            uniform_action(&matching, rng)
                        }
                    }
                    None => uniform_action(&legal[Side::Opponent], rng),
                };

                SideArray::new(owned, opponent)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{standard_catalog, CatalogEntry, Cost, EconomyState};
    use crate::utils::make_rng;

    #[test]
    fn test_prior() {
        let belief = PostureBelief::prior();

        assert_eq!(belief.probability(Category::Economy), 0.8);
        assert_eq!(belief.possible(), vec![Category::Army, Category::Economy]);
    }

    #[test]
    fn test_observe_shifts_towards_roster() {
        let catalog = standard_catalog();
        let roster = Roster::from_items(
            ["TERRAN_MARINE", "TERRAN_MARINE", "TERRAN_FACTORY", "TERRAN_ARMORY"],
            0,
        );

        let belief = PostureBelief::observe(&roster, catalog);

        // three army items and one tech item
        assert!((belief.probability(Category::Army) - (0.1 + 0.375)).abs() < 1e-12);
        assert!((belief.probability(Category::Tech) - 0.125).abs() < 1e-12);
        assert_eq!(belief.possible().len(), 3);
    }

    #[test]
    fn test_sample_respects_zero_weight() {
        let belief = PostureBelief::prior();
        let mut rng = make_rng(Some(1));

        for _ in 0..200 {
            assert_ne!(belief.sample(&mut rng), Some(Category::Tech));
        }
    }

    #[test]
    fn test_uncategorized_catalog_falls_back_to_uniform() {
        let catalog = ActionCatalog::builder()
            .action(CatalogEntry::new("a", Cost::FREE))
            .action(CatalogEntry::new("b", Cost::FREE))
            .build()
            .unwrap();
        let state = EconomyState::new("x", Default::default(), Roster::default(), 2, &catalog);
        let tree = SearchTree::new(state.clone(), state);
        let ctx = SearchContext {
            catalog: &catalog,
            config: Default::default(),
            max_depth: 2,
        };
        let legal = SideArray::new(vec!["a", "b"], vec!["a", "b"]);

        let mut rng = make_rng(Some(3));
        let pairs = BeliefStrategy.sample_actions(&tree, tree.root(), &legal, &ctx, &mut rng);

        assert_eq!(pairs.len(), 3);
        assert!(pairs.iter().all(|pair| pair[Side::Opponent].is_some()));
    }
}
