//! Search tree nodes

use crate::core::{EconomyState, Side, SideArray};
use std::fmt;

/// Index of a node in a [`super::tree::SearchTree`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeStats {
    pub visits: u32,
    /// Simulations through this node that the owned side won
    pub wins: u32,
}

impl NodeStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, won: bool) {
        self.visits += 1;
        if won {
            self.wins += 1;
        }
    }

    /// `NaN` while unvisited
    pub fn win_rate(&self) -> f64 {
        self.wins as f64 / self.visits as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    /// Not expanded yet
    Unvisited,
    Expanded,
    /// At the horizon, or neither side could act. Never expands.
    Terminal,
}

/// One ply of the plan: both economies after both sides acted
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub(crate) states: SideArray<EconomyState>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) stats: NodeStats,
    pub(crate) chosen: Option<NodeId>,
    pub(crate) depth: usize,
    pub(crate) status: NodeStatus,
}

impl SearchNode {
    pub fn new_root(owned: EconomyState, opponent: EconomyState) -> Self {
        Self {
            states: SideArray::new(owned, opponent),
            parent: None,
            children: Vec::new(),
            stats: NodeStats::new(),
            chosen: None,
            depth: 0,
            status: NodeStatus::Unvisited,
        }
    }

    pub fn new_child(parent: NodeId, parent_depth: usize, states: SideArray<EconomyState>) -> Self {
        Self {
            states,
            parent: Some(parent),
            children: Vec::new(),
            stats: NodeStats::new(),
            chosen: None,
            depth: parent_depth + 1,
            status: NodeStatus::Unvisited,
        }
    }

    pub fn state(&self, side: Side) -> &EconomyState {
        &self.states[side]
    }

    pub fn states(&self) -> &SideArray<EconomyState> {
        &self.states
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn stats(&self) -> NodeStats {
        self.stats
    }

    /// The child picked by the last selection at this node
    pub fn chosen(&self) -> Option<NodeId> {
        self.chosen
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn status(&self) -> NodeStatus {
        self.status
    }

    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn is_terminal(&self) -> bool {
        self.status == NodeStatus::Terminal
    }

    /// Whether the owned side is at least as well off as the opponent
    pub fn owned_ahead(&self) -> bool {
        self.states[Side::Owned].worth() >= self.states[Side::Opponent].worth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_update() {
        let mut stats = NodeStats::new();
        assert!(stats.win_rate().is_nan());

        stats.update(true);
        stats.update(false);

        assert_eq!(stats, NodeStats { visits: 2, wins: 1 });
        assert_eq!(stats.win_rate(), 0.5);
    }
}
