//! Economy representations and production rules

pub mod catalog;
pub mod convert;
pub mod display;
pub mod economy;
pub mod items;
pub mod record;
pub mod side;

pub use catalog::{
    ActionCatalog, CatalogBuilder, CatalogEntry, CatalogError, Category, Cost, IncomeModel,
    ItemValue, WorthWeights,
};
pub use convert::{FromIndex, Indexed, ToIndex};
pub use display::{render_action, render_states};
pub use economy::{EconomyState, Resources, Roster, RosterEntry};
pub use items::{standard_catalog, STANDARD_CATALOG};
pub use record::Observation;
pub use side::{Side, SideArray};
