use colored::Colorize;
use std::fmt;

use super::{
    catalog::{ActionCatalog, Category},
    economy::EconomyState,
    side::{Side, SideArray},
};

impl fmt::Display for EconomyState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resources = self.resources();

        writeln!(f, "Owner: {}", self.owner().bold())?;
        writeln!(
            f,
            "Mineral: {}  Vespene: {}  Supply: {}/{}",
            resources.mineral.to_string().bright_cyan(),
            resources.vespene.to_string().bright_green(),
            resources.supply_used,
            resources.supply_cap
        )?;
        writeln!(f, "Worth: {:.2}", self.worth())?;
        if let Some(action) = self.last_action() {
            writeln!(f, "Last action: {}", action)?;
        }

        let counts = self.roster().counts();
        let mut items: Vec<_> = counts.set_iter().collect();
        items.sort();

        writeln!(f, "Roster ({} items):", self.roster().len())?;
        for (item, count) in items {
            writeln!(f, "  {:<32} x{}", item, count)?;
        }

        Ok(())
    }
}

fn side_label(side: Side) -> colored::ColoredString {
    match side {
        Side::Owned => side.to_string().bright_blue(),
        Side::Opponent => side.to_string().bright_red(),
    }
}

/// Both economies side by side, as printed by the `display` command
pub fn render_states(states: &SideArray<EconomyState>) -> String {
    let mut out = String::new();
    for (side, state) in states.sides() {
        out.push_str(&format!("[{}]\n{}\n", side_label(side), state));
    }
    out
}

/// Colour an action id by its category
pub fn render_action(catalog: &ActionCatalog, action: &str) -> String {
    match catalog.category_of(action) {
        Some(Category::Army) => action.red().to_string(),
        Some(Category::Economy) => action.yellow().to_string(),
        Some(Category::Tech) => action.purple().to_string(),
        None => action.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::items::standard_catalog;

    #[test]
    fn test_render_states_lists_both_sides() {
        colored::control::set_override(false);

        let catalog = standard_catalog();
        let states = SideArray::new(
            EconomyState::starting("self", 1, catalog),
            EconomyState::starting("enemy", 1, catalog),
        );

        let text = render_states(&states);
        assert!(text.contains("[owned]"));
        assert!(text.contains("[opponent]"));
        assert!(text.contains("TERRAN_SCV"));
        assert!(text.contains("x12"));
    }
}
