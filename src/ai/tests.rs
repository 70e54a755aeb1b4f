use std::time::{Duration, Instant};

use crate::{
    ai::{
        driver::{PlanStep, SearchDriver},
        mcts::MonteCarloStrategy,
        node::{NodeId, NodeStats, NodeStatus},
        strategy::{ExplorationPolicy, SearchConfig, SearchContext, Selection, Strategy},
        tree::SearchTree,
        BeliefStrategy,
    },
    core::{
        standard_catalog, ActionCatalog, CatalogEntry, Cost, EconomyState, Resources, Roster,
        Observation, RosterEntry, Side,
    },
    utils::make_rng,
};
use rand::prelude::*;
use test_case::test_case;

fn far_deadline() -> Instant {
    Instant::now() + Duration::from_secs(60)
}

fn seeded(seed: u64) -> SearchConfig {
    SearchConfig {
        seed: Some(seed),
        ..SearchConfig::default()
    }
}

fn standard_driver(
    horizon: usize,
    config: SearchConfig,
) -> SearchDriver<'static, MonteCarloStrategy> {
    let catalog = standard_catalog();
    SearchDriver::new(
        EconomyState::starting("self", horizon, catalog),
        EconomyState::starting("enemy", horizon, catalog),
        catalog,
        MonteCarloStrategy,
        config,
    )
}

/// Every node's stats keyed by id
fn snapshot(tree: &SearchTree) -> Vec<(NodeId, NodeStats)> {
    tree.iter().map(|(id, node)| (id, node.stats())).collect()
}

fn observed(record: &str) -> EconomyState {
    let observation: Observation = record.parse().unwrap();
    EconomyState::from_observations(&[observation], standard_catalog()).unwrap()
}

#[test_case("0,self,50,0,12/15:TERRAN_SCV*12,TERRAN_COMMANDCENTER" ; "opening")]
#[test_case("0,self,500,0,16/15:TERRAN_SCV*16,TERRAN_COMMANDCENTER" ; "over supply cap")]
#[test_case(
    "0,self,50,0,4294967295/4294967295:TERRAN_SCV,TERRAN_COMMANDCENTER" ;
    "supply at the integer limit"
)]
fn test_apply_defined_iff_legal(record: &str) {
    let catalog = standard_catalog();
    let mut rng = make_rng(Some(11));
    let mut state = observed(record);

    for clock in 0..60 {
        let legal = catalog.legal_actions(&state);

        for entry in catalog.entries() {
            let result = catalog.apply_action(&state, &entry.id, clock);
            assert_eq!(result.is_ok(), legal.contains(&entry.id.as_str()), "{}", entry.id);

            if let Ok(next) = result {
                let resources = next.resources();
                assert!(resources.mineral >= 0.0 && resources.vespene >= 0.0);
                if entry.cost.supply > 0 {
                    assert!(resources.supply_used <= resources.supply_cap);
                }
            }
        }

        let action = legal.choose(&mut rng).expect("harvesting is always legal");
        state = catalog.apply_action(&state, action, clock).unwrap();
    }
}

#[test]
fn test_over_cap_economy_plans_a_depot() {
    let catalog = standard_catalog();
    let over = observed("0,self,500,0,16/15:TERRAN_SCV*16,TERRAN_COMMANDCENTER");

    assert!(catalog.is_legal(&over, "BUILD_SUPPLYDEPOT"));
    assert!(!catalog.is_legal(&over, "TRAIN_SCV"));

    let mut driver = SearchDriver::new(
        over.clone(),
        over,
        catalog,
        MonteCarloStrategy,
        seeded(2),
    );
    assert_eq!(driver.advance(far_deadline()).count(), 1);
}

#[test]
fn test_counters_stay_consistent() {
    let config = SearchConfig {
        prune: false,
        ..seeded(5)
    };
    let mut driver = standard_driver(8, config);

    let mut before = snapshot(driver.tree());
    for _ in 0..4 {
        driver.step();
        let after = snapshot(driver.tree());

        for (id, stats) in after.iter() {
            assert!(stats.wins <= stats.visits);
            if let Some((_, old)) = before.iter().find(|(old_id, _)| old_id == id) {
                assert!(stats.visits >= old.visits);
                assert!(stats.wins >= old.wins);
            }
        }
        before = after;
    }
}

#[test]
fn test_sibling_states_are_independent() {
    let catalog = standard_catalog();
    let mut tree = SearchTree::new(
        EconomyState::starting("self", 3, catalog),
        EconomyState::starting("enemy", 3, catalog),
    );
    let ctx = SearchContext {
        catalog,
        config: seeded(2),
        max_depth: 3,
    };
    let root = tree.root();
    MonteCarloStrategy.expand(&mut tree, root, &ctx, &mut make_rng(Some(2)));

    let children = tree.get(root).children().to_vec();
    assert_eq!(children.len(), 3);

    let (first, second) = (children[0], children[1]);
    let before = tree.get(second).state(Side::Owned).roster().clone();

    tree.get_mut(first).states[Side::Owned]
        .roster_mut()
        .push(RosterEntry::new("INJECTED", 9));

    assert_eq!(tree.get(second).state(Side::Owned).roster(), &before);
    assert!(!tree.get(root).state(Side::Owned).roster().contains("INJECTED"));
}

#[test]
fn test_depth_invariant() {
    let config = SearchConfig {
        prune: false,
        ..seeded(9)
    };
    let mut driver = standard_driver(5, config);
    let steps: Vec<PlanStep> = driver.advance(far_deadline()).collect();

    assert_eq!(steps.len(), 5);
    assert_eq!(steps.iter().map(|s| s.depth).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);

    let tree = driver.tree();
    for (_, node) in tree.iter() {
        match node.parent() {
            Some(parent) => assert_eq!(node.depth(), tree.get(parent).depth() + 1),
            None => assert_eq!(node.depth(), 0),
        }

        if node.depth() >= driver.max_depth() {
            assert!(node.children().is_empty());
        }
    }

    // the plan stopped on a horizon node
    assert!(tree.get(driver.current()).is_terminal());
}

#[test]
fn test_zero_deadline_yields_nothing() {
    let catalog = standard_catalog();
    let state = |owner| {
        EconomyState::new(
            owner,
            Resources::new(50.0, 0.0, 15, 15),
            Roster::from_items(vec!["worker"; 12], 0),
            3,
            catalog,
        )
    };
    let mut driver = SearchDriver::new(
        state("self"),
        state("enemy"),
        catalog,
        MonteCarloStrategy,
        SearchConfig::default(),
    );

    let deadline = Instant::now();
    assert_eq!(driver.advance(deadline).count(), 0);
    assert_eq!(driver.tree().len(), 1);
}

#[test]
fn test_select_does_not_favour_unvisited_children() {
    let catalog = standard_catalog();
    let mut tree = SearchTree::new(
        EconomyState::starting("self", 3, catalog),
        EconomyState::starting("enemy", 3, catalog),
    );
    let root = tree.root();
    let states = tree.get(root).states().clone();
    let visited = tree.add_child(root, states.clone());
    let unvisited = tree.add_child(root, states);

    tree.get_mut(visited).stats = NodeStats { visits: 10, wins: 5 };
    tree.get_mut(root).stats = NodeStats { visits: 10, wins: 5 };
    tree.get_mut(root).status = NodeStatus::Expanded;

    let mut ctx = SearchContext {
        catalog,
        config: SearchConfig::default(),
        max_depth: 3,
    };
    let mut rng = make_rng(Some(0));

    assert_eq!(
        MonteCarloStrategy.select(&mut tree, root, &ctx, &mut rng),
        Selection::Child(visited)
    );
    assert_eq!(tree.get(root).chosen(), Some(visited));

    ctx.config.exploration = ExplorationPolicy::PreferUnvisited;
    assert_eq!(
        MonteCarloStrategy.select(&mut tree, root, &ctx, &mut rng),
        Selection::Child(unvisited)
    );
}

#[test]
fn test_select_ties_go_to_first_child() {
    let catalog = standard_catalog();
    let mut tree = SearchTree::new(
        EconomyState::starting("self", 3, catalog),
        EconomyState::starting("enemy", 3, catalog),
    );
    let root = tree.root();
    let states = tree.get(root).states().clone();
    let first = tree.add_child(root, states.clone());
    tree.add_child(root, states);
    tree.get_mut(root).status = NodeStatus::Expanded;

    let ctx = SearchContext {
        catalog,
        config: SearchConfig::default(),
        max_depth: 3,
    };

    let selection = MonteCarloStrategy.select(&mut tree, root, &ctx, &mut make_rng(None));
    assert_eq!(selection, Selection::Child(first));
}

#[test]
fn test_nothing_affordable_is_terminal() {
    let catalog = ActionCatalog::builder()
        .action(CatalogEntry::new("X", Cost::minerals(500.0)))
        .build()
        .unwrap();
    let state = EconomyState::new(
        "self",
        Resources::new(50.0, 0.0, 0, 0),
        Roster::default(),
        4,
        &catalog,
    );
    let mut driver = SearchDriver::new(
        state.clone(),
        state,
        &catalog,
        MonteCarloStrategy,
        SearchConfig::default(),
    );

    assert_eq!(driver.step(), None);
    assert!(driver.tree().get(driver.current()).is_terminal());
    assert_eq!(driver.advance(far_deadline()).count(), 0);
}

#[test]
fn test_side_without_actions_holds() {
    let catalog = ActionCatalog::builder()
        .action(CatalogEntry::new("X", Cost::minerals(10.0)))
        .build()
        .unwrap();
    let rich = EconomyState::new(
        "self",
        Resources::new(100.0, 0.0, 0, 0),
        Roster::default(),
        2,
        &catalog,
    );
    let broke = EconomyState::new("enemy", Resources::default(), Roster::default(), 2, &catalog);
    let mut driver = SearchDriver::new(rich, broke, &catalog, MonteCarloStrategy, seeded(1));

    let step = driver.step().unwrap();
    assert_eq!(step.action.as_deref(), Some("X"));

    let node = driver.tree().get(driver.current());
    assert_eq!(node.state(Side::Opponent).last_action(), None);
    assert_eq!(node.state(Side::Opponent).resources().mineral, 0.0);
}

#[test]
fn test_same_seed_same_plan() {
    let plan = |seed| {
        let mut driver = standard_driver(12, seeded(seed));
        driver
            .advance(far_deadline())
            .map(|step| step.action)
            .collect::<Vec<_>>()
    };

    assert_eq!(plan(42), plan(42));
    assert_eq!(plan(42).len(), 12);
}

#[test]
fn test_advance_resumes_and_reset_rewinds() {
    let mut driver = standard_driver(6, seeded(4));

    let first: Vec<_> = driver.advance(far_deadline()).take(2).collect();
    let rest: Vec<_> = driver.advance(far_deadline()).collect();
    assert_eq!(first.len(), 2);
    assert_eq!(rest.len(), 4);
    assert_eq!(rest[0].depth, 3);

    let line = driver.principal_line();
    assert_eq!(line.len(), 6);
    assert_eq!(line[..2], first[..]);

    driver.reset();
    assert_eq!(driver.current(), driver.tree().root());
    let replay: Vec<_> = driver.advance(far_deadline()).collect();
    assert_eq!(replay, line);
}

#[test]
fn test_pruning_bounds_tree_size() {
    let mut pruned = standard_driver(10, seeded(8));
    let mut full = standard_driver(
        10,
        SearchConfig {
            prune: false,
            ..seeded(8)
        },
    );

    assert_eq!(pruned.advance(far_deadline()).count(), 10);
    assert_eq!(full.advance(far_deadline()).count(), 10);

    // the root plus the node kept at each ply
    assert_eq!(pruned.tree_stats().live_nodes, 1 + 10);
    assert_eq!(full.tree_stats().live_nodes, 1 + 3 * 10);
    assert_eq!(pruned.tree_stats().root_stats.visits, 3 * 10);
}

#[test]
fn test_belief_strategy_plans_to_horizon() {
    let catalog = standard_catalog();
    let mut driver = SearchDriver::new(
        EconomyState::starting("self", 6, catalog),
        EconomyState::starting("enemy", 4, catalog),
        catalog,
        BeliefStrategy,
        seeded(21),
    );

    assert_eq!(driver.max_depth(), 6);
    let steps: Vec<_> = driver.advance(far_deadline()).collect();
    assert_eq!(steps.len(), 6);
    assert!(steps.iter().all(|step| step.action.is_some()));
}
