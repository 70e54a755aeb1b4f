//! Search tree with arena allocation.
//!
//! Nodes live in a `Vec` and refer to each other by [`NodeId`]. Parents are
//! plain indices, so a subtree can be released without touching anything
//! that points at it from below. Released slots go on a free list and are
//! handed out again by [`SearchTree::allocate`].

use super::node::{NodeId, NodeStats, SearchNode};
use crate::core::{EconomyState, SideArray};
use tracing::trace;

#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<Option<SearchNode>>,
    free: Vec<NodeId>,
    root: NodeId,
    live: usize,
}

impl SearchTree {
    pub fn new(owned: EconomyState, opponent: EconomyState) -> Self {
        Self {
            nodes: vec![Some(SearchNode::new_root(owned, opponent))],
            free: Vec::new(),
            root: NodeId(0),
            live: 1,
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Panics if the node was released
    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode {
        match self.try_get(id) {
            Some(node) => node,
            None => panic!("search node {} was released", id),
        }
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        match self.nodes.get_mut(id.index()).and_then(Option::as_mut) {
            Some(node) => node,
            None => panic!("search node {} was released", id),
        }
    }

    pub fn try_get(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    pub fn allocate(&mut self, node: SearchNode) -> NodeId {
        self.live += 1;

        if let Some(id) = self.free.pop() {
            self.nodes[id.index()] = Some(node);
            return id;
        }

        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(node));
        id
    }

    /// Attach a new node holding `states` under `parent`
    pub fn add_child(&mut self, parent: NodeId, states: SideArray<EconomyState>) -> NodeId {
        let depth = self.get(parent).depth;
        let child = self.allocate(SearchNode::new_child(parent, depth, states));
        self.get_mut(parent).children.push(child);
        child
    }

    /// Credit one simulation to `leaf` and every ancestor up to the root
    pub fn backpropagate(&mut self, leaf: NodeId, won: bool) {
        let mut current = Some(leaf);

        while let Some(id) = current {
            let node = self.get_mut(id);
            node.stats.update(won);
            trace!(node = %id, visits = node.stats.visits, wins = node.stats.wins, "backpropagate");

            current = node.parent;
        }
    }

    /// Release every child of `keep`'s parent except `keep`, with their subtrees
    pub fn prune_siblings(&mut self, keep: NodeId) -> usize {
        let Some(parent) = self.get(keep).parent else {
            return 0;
        };

        let siblings: Vec<NodeId> = self
            .get(parent)
            .children
            .iter()
            .copied()
            .filter(|&id| id != keep)
            .collect();

        let parent_node = self.get_mut(parent);
        parent_node.children.retain(|&id| id == keep);
        parent_node.chosen = Some(keep);

        siblings.into_iter().map(|id| self.release(id)).sum()
    }

    /// Drop `id` and all its descendants; returns how many nodes went
    fn release(&mut self, id: NodeId) -> usize {
        let mut stack = vec![id];
        let mut released = 0;

        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes[id.index()].take() {
                stack.extend(node.children);
                self.free.push(id);
                self.live -= 1;
                released += 1;
            }
        }

        released
    }

    /// Node ids from the root down to `id`
    pub fn path_to(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = self.get(id).parent;

        while let Some(parent) = current {
            path.push(parent);
            current = self.get(parent).parent;
        }

        path.reverse();
        path
    }

    /// Number of live nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Every live node, in arena order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode)> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(idx, node)| node.as_ref().map(|node| (NodeId(idx as u32), node)))
    }

    pub fn stats(&self) -> TreeStats {
        TreeStats {
            live_nodes: self.live,
            root_stats: self.get(self.root).stats,
            max_depth: self.iter().map(|(_, node)| node.depth).max().unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    pub live_nodes: usize,
    pub root_stats: NodeStats,
    pub max_depth: usize,
}
