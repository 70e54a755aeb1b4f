//! The standard Terran production table

use super::catalog::{ActionCatalog, CatalogEntry, Category, Cost, IncomeModel, ItemValue};
use lazy_static::lazy_static;

pub const WORKER: &str = "TERRAN_SCV";
pub const BASE: &str = "TERRAN_COMMANDCENTER";
pub const REFINERY: &str = "TERRAN_REFINERY";

/// The action taken when there is nothing better to do
pub const HARVEST: &str = "HARVEST_RETURN";

/// Ranking value of research results, which carry no unit value of their own
const RESEARCH_RANK: i32 = 5;

struct ActionSpec {
    id: &'static str,
    produces: Option<&'static str>,
    source: &'static str,
    cost: Cost,
    requires: Option<&'static str>,
    supply_provided: u32,
    category: Option<Category>,
    once: bool,
}

const fn build(
    id: &'static str,
    produces: &'static str,
    source: &'static str,
    cost: Cost,
    requires: Option<&'static str>,
    category: Option<Category>,
) -> ActionSpec {
    ActionSpec {
        id,
        produces: Some(produces),
        source,
        cost,
        requires,
        supply_provided: 0,
        category,
        once: false,
    }
}

const fn research(
    id: &'static str,
    produces: &'static str,
    source: &'static str,
    cost: Cost,
) -> ActionSpec {
    ActionSpec {
        id,
        produces: Some(produces),
        source,
        cost,
        requires: None,
        supply_provided: 0,
        category: Some(Category::Tech),
        once: true,
    }
}

const ARMY: Option<Category> = Some(Category::Army);
const ECONOMY: Option<Category> = Some(Category::Economy);
const TECH: Option<Category> = Some(Category::Tech);

const fn cost(mineral: f64, vespene: f64, supply: u32) -> Cost {
    Cost::new(mineral, vespene, supply)
}

/// (item, rank, mineral, vespene, supply) for everything that can be in a roster
#[rustfmt::skip]
const ITEM_VALUES: [(&str, ItemValue); 35] = [
    ("TERRAN_SCV", ItemValue::new(20, 50.0, 0.0, 1)),
    ("TERRAN_MARINE", ItemValue::new(20, 50.0, 0.0, 1)),
    ("TERRAN_MARAUDER", ItemValue::new(20, 100.0, 25.0, 2)),
    ("TERRAN_REAPER", ItemValue::new(20, 50.0, 50.0, 1)),
    ("TERRAN_GHOST", ItemValue::new(20, 150.0, 125.0, 2)),
    ("TERRAN_HELLION", ItemValue::new(20, 100.0, 0.0, 2)),
    ("TERRAN_HELLIONTANK", ItemValue::new(20, 100.0, 0.0, 2)),
    ("TERRAN_SIEGETANK", ItemValue::new(20, 150.0, 125.0, 3)),
    ("TERRAN_CYCLONE", ItemValue::new(20, 150.0, 100.0, 3)),
    ("TERRAN_WIDOWMINE", ItemValue::new(19, 75.0, 25.0, 2)),
    ("TERRAN_THOR", ItemValue::new(20, 300.0, 200.0, 6)),
    ("TERRAN_AUTOTURRET", ItemValue::new(20, 0.0, 0.0, 0)),
    ("TERRAN_VIKINGFIGHTER", ItemValue::new(20, 150.0, 75.0, 2)),
    ("TERRAN_VIKINGASSAULT", ItemValue::new(20, 150.0, 75.0, 2)),
    ("TERRAN_MEDIVAC", ItemValue::new(20, 100.0, 100.0, 2)),
    ("TERRAN_LIBERATOR", ItemValue::new(20, 150.0, 150.0, 3)),
    ("TERRAN_RAVEN", ItemValue::new(20, 100.0, 200.0, 2)),
    ("TERRAN_BANSHEE", ItemValue::new(20, 150.0, 100.0, 3)),
    ("TERRAN_BATTLECRUISER", ItemValue::new(20, 400.0, 300.0, 6)),
    ("TERRAN_PLANETARYFORTRESS", ItemValue::new(20, 550.0, 150.0, 0)),
    ("TERRAN_BUNKER", ItemValue::new(20, 100.0, 0.0, 0)),
    ("TERRAN_MISSILETURRET", ItemValue::new(19, 100.0, 0.0, 0)),
    ("TERRAN_COMMANDCENTER", ItemValue::new(11, 400.0, 0.0, 0)),
    ("TERRAN_ORBITALCOMMAND", ItemValue::new(11, 550.0, 0.0, 0)),
    ("TERRAN_SUPPLYDEPOT", ItemValue::new(11, 100.0, 0.0, 0)),
    ("TERRAN_REFINERY", ItemValue::new(11, 75.0, 0.0, 0)),
    ("TERRAN_BARRACKS", ItemValue::new(11, 150.0, 0.0, 0)),
    ("TERRAN_ENGINEERINGBAY", ItemValue::new(11, 125.0, 0.0, 0)),
    ("TERRAN_SENSORTOWER", ItemValue::new(11, 125.0, 100.0, 0)),
    ("TERRAN_FACTORY", ItemValue::new(11, 150.0, 100.0, 0)),
    ("TERRAN_GHOSTACADEMY", ItemValue::new(11, 150.0, 100.0, 0)),
    ("TERRAN_STARPORT", ItemValue::new(11, 150.0, 100.0, 0)),
    ("TERRAN_ARMORY", ItemValue::new(11, 150.0, 100.0, 0)),
    ("TERRAN_FUSIONCORE", ItemValue::new(11, 150.0, 150.0, 0)),
    ("TERRAN_TECHLAB", ItemValue::new(11, 50.0, 25.0, 0)),
];

#[rustfmt::skip]
const TERRAN_ACTIONS: [ActionSpec; 59] = [
    // Worker construction
    ActionSpec { supply_provided: 15, ..build("BUILD_COMMANDCENTER", "TERRAN_COMMANDCENTER", WORKER, cost(400.0, 0.0, 0), None, ECONOMY) },
    build("BUILD_REFINERY", "TERRAN_REFINERY", WORKER, cost(75.0, 0.0, 0), None, ECONOMY),
    ActionSpec { supply_provided: 8, ..build("BUILD_SUPPLYDEPOT", "TERRAN_SUPPLYDEPOT", WORKER, cost(100.0, 0.0, 0), None, ECONOMY) },
    build("BUILD_BARRACKS", "TERRAN_BARRACKS", WORKER, cost(150.0, 0.0, 0), Some("TERRAN_SUPPLYDEPOT"), ARMY),
    build("BUILD_BUNKER", "TERRAN_BUNKER", WORKER, cost(100.0, 0.0, 0), Some("TERRAN_BARRACKS"), ARMY),
    build("BUILD_GHOSTACADEMY", "TERRAN_GHOSTACADEMY", WORKER, cost(150.0, 100.0, 0), Some("TERRAN_BARRACKS"), TECH),
    build("BUILD_FACTORY", "TERRAN_FACTORY", WORKER, cost(150.0, 100.0, 0), Some("TERRAN_BARRACKS"), ARMY),
    build("BUILD_ARMORY", "TERRAN_ARMORY", WORKER, cost(150.0, 100.0, 0), Some("TERRAN_FACTORY"), TECH),
    build("BUILD_STARPORT", "TERRAN_STARPORT", WORKER, cost(150.0, 100.0, 0), Some("TERRAN_FACTORY"), ARMY),
    build("BUILD_FUSIONCORE", "TERRAN_FUSIONCORE", WORKER, cost(150.0, 150.0, 0), Some("TERRAN_STARPORT"), TECH),
    build("BUILD_ENGINEERINGBAY", "TERRAN_ENGINEERINGBAY", WORKER, cost(125.0, 0.0, 0), Some("TERRAN_COMMANDCENTER"), TECH),
    build("BUILD_MISSILETURRET", "TERRAN_MISSILETURRET", WORKER, cost(100.0, 0.0, 0), Some("TERRAN_ENGINEERINGBAY"), ARMY),
    build("BUILD_SENSORTOWER", "TERRAN_SENSORTOWER", WORKER, cost(125.0, 100.0, 0), Some("TERRAN_ENGINEERINGBAY"), TECH),
    ActionSpec { produces: None, ..build(HARVEST, "", WORKER, Cost::FREE, None, ECONOMY) },

    // Command center
    build("TRAIN_SCV", "TERRAN_SCV", BASE, cost(50.0, 0.0, 1), None, ECONOMY),
    build("MORPH_ORBITALCOMMAND", "TERRAN_ORBITALCOMMAND", BASE, cost(150.0, 0.0, 0), Some("TERRAN_BARRACKS"), None),
    build("MORPH_PLANETARYFORTRESS", "TERRAN_PLANETARYFORTRESS", BASE, cost(150.0, 150.0, 0), Some("TERRAN_ENGINEERINGBAY"), None),

    // Barracks
    build("TRAIN_MARINE", "TERRAN_MARINE", "TERRAN_BARRACKS", cost(50.0, 0.0, 1), None, ARMY),
    build("TRAIN_REAPER", "TERRAN_REAPER", "TERRAN_BARRACKS", cost(50.0, 50.0, 1), None, ARMY),
    build("TRAIN_MARAUDER", "TERRAN_MARAUDER", "TERRAN_BARRACKS", cost(100.0, 25.0, 2), None, ARMY),
    build("TRAIN_GHOST", "TERRAN_GHOST", "TERRAN_BARRACKS", cost(150.0, 125.0, 2), Some("TERRAN_GHOSTACADEMY"), ARMY),
    build("BUILD_TECHLAB_BARRACKS", "TERRAN_BARRACKSTECHLAB", "TERRAN_BARRACKS", cost(50.0, 25.0, 0), None, TECH),
    build("BUILD_REACTOR_BARRACKS", "TERRAN_BARRACKSREACTOR", "TERRAN_BARRACKS", cost(50.0, 50.0, 0), None, TECH),

    // Factory
    build("TRAIN_HELLION", "TERRAN_HELLION", "TERRAN_FACTORY", cost(100.0, 0.0, 2), None, ARMY),
    build("TRAIN_WIDOWMINE", "TERRAN_WIDOWMINE", "TERRAN_FACTORY", cost(75.0, 25.0, 2), None, ARMY),
    build("TRAIN_SIEGETANK", "TERRAN_SIEGETANK", "TERRAN_FACTORY", cost(150.0, 125.0, 3), None, ARMY),
    build("TRAIN_CYCLONE", "TERRAN_CYCLONE", "TERRAN_FACTORY", cost(150.0, 100.0, 3), None, ARMY),
    build("TRAIN_HELLBAT", "TERRAN_HELLIONTANK", "TERRAN_FACTORY", cost(100.0, 0.0, 2), Some("TERRAN_ARMORY"), ARMY),
    build("TRAIN_THOR", "TERRAN_THOR", "TERRAN_FACTORY", cost(300.0, 200.0, 6), Some("TERRAN_ARMORY"), ARMY),
    build("BUILD_TECHLAB_FACTORY", "TERRAN_FACTORYTECHLAB", "TERRAN_FACTORY", cost(50.0, 25.0, 0), None, TECH),
    build("BUILD_REACTOR_FACTORY", "TERRAN_FACTORYREACTOR", "TERRAN_FACTORY", cost(50.0, 50.0, 0), None, TECH),

    // Starport
    build("TRAIN_VIKINGFIGHTER", "TERRAN_VIKINGFIGHTER", "TERRAN_STARPORT", cost(150.0, 75.0, 2), None, ARMY),
    build("TRAIN_MEDIVAC", "TERRAN_MEDIVAC", "TERRAN_STARPORT", cost(100.0, 100.0, 2), None, ARMY),
    build("TRAIN_LIBERATOR", "TERRAN_LIBERATOR", "TERRAN_STARPORT", cost(150.0, 150.0, 3), None, ARMY),
    build("TRAIN_RAVEN", "TERRAN_RAVEN", "TERRAN_STARPORT", cost(100.0, 200.0, 2), None, ARMY),
    build("TRAIN_BANSHEE", "TERRAN_BANSHEE", "TERRAN_STARPORT", cost(150.0, 100.0, 3), None, ARMY),
    build("TRAIN_BATTLECRUISER", "TERRAN_BATTLECRUISER", "TERRAN_STARPORT", cost(400.0, 300.0, 6), Some("TERRAN_FUSIONCORE"), ARMY),
    build("BUILD_TECHLAB_STARPORT", "TERRAN_STARPORTTECHLAB", "TERRAN_STARPORT", cost(50.0, 25.0, 0), None, TECH),
    build("BUILD_REACTOR_STARPORT", "TERRAN_STARPORTREACTOR", "TERRAN_STARPORT", cost(50.0, 50.0, 0), None, TECH),

    // Research
    research("RESEARCH_COMBATSHIELD", "COMBATSHIELD", "TERRAN_BARRACKSTECHLAB", cost(100.0, 100.0, 0)),
    research("RESEARCH_STIMPACK", "STIMPACK", "TERRAN_BARRACKSTECHLAB", cost(100.0, 100.0, 0)),
    research("RESEARCH_CONCUSSIVESHELLS", "CONCUSSIVESHELLS", "TERRAN_BARRACKSTECHLAB", cost(50.0, 50.0, 0)),
    research("RESEARCH_INFERNALPREIGNITER", "INFERNALPREIGNITER", "TERRAN_FACTORYTECHLAB", cost(150.0, 150.0, 0)),
    research("RESEARCH_MAGFIELDLAUNCHERS", "MAGFIELDLAUNCHERS", "TERRAN_FACTORYTECHLAB", cost(100.0, 100.0, 0)),
    research("RESEARCH_DRILLINGCLAWS", "DRILLINGCLAWS", "TERRAN_FACTORYTECHLAB", cost(75.0, 75.0, 0)),
    research("RESEARCH_HIGHCAPACITYFUELTANKS", "HIGHCAPACITYFUELTANKS", "TERRAN_STARPORTTECHLAB", cost(100.0, 100.0, 0)),
    research("RESEARCH_RAVENCORVIDREACTOR", "RAVENCORVIDREACTOR", "TERRAN_STARPORTTECHLAB", cost(150.0, 150.0, 0)),
    research("RESEARCH_BANSHEECLOAKINGFIELD", "BANSHEECLOAKINGFIELD", "TERRAN_STARPORTTECHLAB", cost(100.0, 100.0, 0)),
    research("RESEARCH_BANSHEEHYPERFLIGHTROTORS", "BANSHEEHYPERFLIGHTROTORS", "TERRAN_STARPORTTECHLAB", cost(150.0, 150.0, 0)),
    research("RESEARCH_ADVANCEDBALLISTICS", "ADVANCEDBALLISTICS", "TERRAN_STARPORTTECHLAB", cost(150.0, 150.0, 0)),
    research("RESEARCH_BATTLECRUISERWEAPONREFIT", "BATTLECRUISERWEAPONREFIT", "TERRAN_FUSIONCORE", cost(150.0, 150.0, 0)),
    research("RESEARCH_HISECAUTOTRACKING", "HISECAUTOTRACKING", "TERRAN_ENGINEERINGBAY", cost(100.0, 100.0, 0)),
    research("RESEARCH_TERRANSTRUCTUREARMORUPGRADE", "TERRANSTRUCTUREARMORUPGRADE", "TERRAN_ENGINEERINGBAY", cost(150.0, 150.0, 0)),
    research("RESEARCH_TERRANINFANTRYWEAPONSLEVEL1", "TERRANINFANTRYWEAPONSLEVEL1", "TERRAN_ENGINEERINGBAY", cost(100.0, 100.0, 0)),
    research("RESEARCH_TERRANINFANTRYARMORLEVEL1", "TERRANINFANTRYARMORSLEVEL1", "TERRAN_ENGINEERINGBAY", cost(100.0, 100.0, 0)),
    research("RESEARCH_TERRANVEHICLEWEAPONSLEVEL1", "TERRANVEHICLEWEAPONSLEVEL1", "TERRAN_ARMORY", cost(100.0, 100.0, 0)),
    research("RESEARCH_TERRANSHIPWEAPONSLEVEL1", "TERRANSHIPWEAPONSLEVEL1", "TERRAN_ARMORY", cost(100.0, 100.0, 0)),
    research("RESEARCH_TERRANVEHICLEANDSHIPPLATINGLEVEL1", "TERRANVEHICLEANDSHIPARMORSLEVEL1", "TERRAN_ARMORY", cost(100.0, 100.0, 0)),
    research("RESEARCH_PERSONALCLOAKING", "PERSONALCLOAKING", "TERRAN_GHOSTACADEMY", cost(150.0, 150.0, 0)),
];

lazy_static! {
    pub static ref STANDARD_CATALOG: ActionCatalog = {
        let mut builder = ActionCatalog::builder().income(IncomeModel {
            worker: WORKER.to_string(),
            base: BASE.to_string(),
            refinery: REFINERY.to_string(),
            mineral_rate: 5.0,
            vespene_rate: 4.0,
            workers_per_refinery: 3,
        });

        for (item, value) in ITEM_VALUES.iter() {
            builder = builder.item(item, *value);
        }

        for spec in TERRAN_ACTIONS.iter() {
            let rank = spec
                .produces
                .and_then(|item| ITEM_VALUES.iter().find(|(name, _)| *name == item))
                .map_or(RESEARCH_RANK, |(_, value)| value.rank);

            let mut entry = CatalogEntry::new(spec.id, spec.cost)
                .from_source(spec.source)
                .provides_supply(spec.supply_provided)
                .rank(rank);

            entry = match spec.produces {
                Some(item) => entry.produces(item),
                None => entry.produces_nothing().rank(0),
            };
            if let Some(item) = spec.requires {
                entry = entry.requires(item);
            }
            if let Some(category) = spec.category {
                entry = entry.category(category);
            }
            if spec.once {
                entry = entry.once();
            }

            builder = builder.action(entry);
        }

        builder.build().expect("standard action ids are unique")
    };
}

/// The shared standard catalog
pub fn standard_catalog() -> &'static ActionCatalog {
    &STANDARD_CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::economy::{EconomyState, Resources, Roster};
    use test_case::test_case;

    #[test]
    fn test_standard_catalog_builds() {
        let catalog = standard_catalog();
        assert_eq!(catalog.len(), TERRAN_ACTIONS.len());
        assert!(catalog.has_categories());
        assert_eq!(catalog.category_of("TRAIN_MARINE"), Some(Category::Army));
        assert_eq!(catalog.item_category("TERRAN_SCV"), Some(Category::Economy));
        assert_eq!(catalog.item_value("TERRAN_THOR").vespene, 200.0);
    }

    #[test]
    fn test_opening_actions() {
        let catalog = standard_catalog();
        let state = EconomyState::starting("self", 1, catalog);

        // 50 minerals buys an SCV and nothing else
        assert_eq!(catalog.legal_actions(&state), vec![HARVEST, "TRAIN_SCV"]);
    }

    #[test_case("BUILD_BARRACKS", "TERRAN_SUPPLYDEPOT" ; "barracks needs a depot")]
    #[test_case("BUILD_FACTORY", "TERRAN_BARRACKS" ; "factory needs barracks")]
    #[test_case("BUILD_FUSIONCORE", "TERRAN_STARPORT" ; "fusion core needs a starport")]
    fn test_tech_tree(action: &str, prerequisite: &str) {
        let catalog = standard_catalog();
        let rich = Resources::new(10_000.0, 10_000.0, 12, 200);
        let mut items = vec![WORKER, BASE];

        let roster = Roster::from_items(items.clone(), 0);
        let without = EconomyState::new("self", rich, roster, 1, catalog);
        assert!(!catalog.is_legal(&without, action));

        items.push(prerequisite);
        let roster = Roster::from_items(items, 0);
        let with = EconomyState::new("self", rich, roster, 1, catalog);
        assert!(catalog.is_legal(&with, action));
    }

    #[test]
    fn test_income_after_transition() {
        let catalog = standard_catalog();
        let state = EconomyState::starting("self", 1, catalog);

        let next = catalog.apply_action(&state, "TRAIN_SCV", 1).unwrap();

        // 13 workers on one base
        assert_eq!(next.resources().mineral, 65.0);
        assert_eq!(next.resources().supply_used, 13);
        assert_eq!(next.roster().count(WORKER), 13);
    }

    #[test]
    fn test_supply_depot_raises_cap() {
        let catalog = standard_catalog();
        let state = EconomyState::new(
            "self",
            Resources::new(100.0, 0.0, 12, 15),
            Roster::from_items([WORKER], 0),
            1,
            catalog,
        );

        let next = catalog.apply_action(&state, "BUILD_SUPPLYDEPOT", 1).unwrap();
        assert_eq!(next.resources().supply_cap, 23);
    }
}
