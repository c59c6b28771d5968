//! Best-first search machinery shared by the hint and route searches.
//!
//! Nodes of one search call live in a [`SearchTree`] arena and refer to their
//! parent by index. The tree is dropped when the call returns. The
//! [`Frontier`] orders entries by `(priority, insertion sequence)` so ties
//! always resolve the same way.
mod guidance;
mod route;

use std::cmp::Ordering;
use std::collections::BinaryHeap;

pub use guidance::{GuidanceOutcome, GuidanceSearch, StopReason};
pub use route::{Route, RouteSearch};

/// Handle of a node inside a [`SearchTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One node of a search tree.
#[derive(Clone, Debug)]
pub struct SearchNode<S> {
    pub state: S,
    pub parent: Option<NodeId>,
    /// Action text that produced this node from its parent.
    pub action: Option<String>,
    /// Cumulative path cost from the root.
    pub cost: f64,
    /// Number of actions from the root.
    pub depth: usize,
}

/// Per-call arena of search nodes.
#[derive(Debug)]
pub struct SearchTree<S> {
    nodes: Vec<SearchNode<S>>,
}

impl<S> SearchTree<S> {
    pub fn with_root(state: S) -> (Self, NodeId) {
        let root = SearchNode {
            state,
            parent: None,
            action: None,
            cost: 0.0,
            depth: 0,
        };
        (Self { nodes: vec![root] }, NodeId(0))
    }

    /// Adds a child of `parent` reached by `action` at additional cost `step`.
    pub fn push_child(&mut self, parent: NodeId, state: S, action: String, step: f64) -> NodeId {
        let (cost, depth) = {
            let parent = &self.nodes[parent.0];
            (parent.cost + step, parent.depth + 1)
        };
        let id = NodeId(self.nodes.len());
        self.nodes.push(SearchNode {
            state,
            parent: Some(parent),
            action: Some(action),
            cost,
            depth,
        });
        id
    }

    pub fn get(&self, id: NodeId) -> &SearchNode<S> {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes from the root down to `id`, root first.
    pub fn lineage(&self, id: NodeId) -> Vec<&SearchNode<S>> {
        let mut chain = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = &self.nodes[current.0];
            chain.push(node);
            cursor = node.parent;
        }
        chain.reverse();
        chain
    }

    /// Actions along the path from the root to `id`.
    pub fn actions_to(&self, id: NodeId) -> Vec<String> {
        self.lineage(id)
            .into_iter()
            .filter_map(|node| node.action.clone())
            .collect()
    }
}

#[derive(Debug)]
struct FrontierEntry {
    priority: f64,
    seq: u64,
    node: NodeId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    // Reversed so the max-heap pops the lowest (priority, seq) first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-priority queue with insertion-order tie breaking.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, priority: f64, node: NodeId) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(FrontierEntry {
            priority,
            seq,
            node,
        });
    }

    pub fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|entry| entry.node)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontier_pops_lowest_priority_then_oldest() {
        let mut frontier = Frontier::new();
        frontier.push(3.0, NodeId(0));
        frontier.push(1.0, NodeId(1));
        frontier.push(1.0, NodeId(2));
        frontier.push(-2.0, NodeId(3));

        let order: Vec<NodeId> = std::iter::from_fn(|| frontier.pop()).collect();
        assert_eq!(order, vec![NodeId(3), NodeId(1), NodeId(2), NodeId(0)]);
    }

    #[test]
    fn tree_tracks_cost_depth_and_actions() {
        let (mut tree, root) = SearchTree::with_root("a");
        let b = tree.push_child(root, "b", "go b".into(), 2.0);
        let c = tree.push_child(b, "c", "go c".into(), 3.5);

        assert_eq!(tree.get(c).cost, 5.5);
        assert_eq!(tree.get(c).depth, 2);
        assert_eq!(tree.actions_to(c), vec!["go b".to_string(), "go c".to_string()]);
        assert!(tree.actions_to(root).is_empty());
        assert_eq!(tree.len(), 3);
    }
}
