//! Uniform-cost routing over the location graph.

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use super::{Frontier, SearchTree};
use crate::error::GuidanceError;
use crate::graph::{LocationGraph, LocationId};

/// Multiplier applied to edges that enter a locked location.
pub const LOCKED_EDGE_FACTOR: f64 = 3.0;

/// Least-cost path between two locations.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    /// `"Move to X"` for every step after the start.
    pub moves: Vec<String>,
    /// Locations from start to goal, both included. Empty when unreachable.
    pub locations: Vec<LocationId>,
    /// Sum of adjusted edge weights.
    pub total_cost: f64,
}

impl Route {
    pub fn unreachable() -> Self {
        Self {
            moves: Vec::new(),
            locations: Vec::new(),
            total_cost: 0.0,
        }
    }

    /// False when the goal could not be reached. A route from a location to
    /// itself is reachable and has no moves.
    pub fn is_reachable(&self) -> bool {
        !self.locations.is_empty()
    }
}

/// Adjusted-weight pathfinder.
#[derive(Clone, Copy, Debug, Default)]
pub struct RouteSearch;

impl RouteSearch {
    pub fn new() -> Self {
        Self
    }

    /// Weight of the edge `_ -> to` for a player carrying `inventory`.
    pub fn edge_weight(
        graph: &LocationGraph,
        to: &LocationId,
        base: u32,
        inventory: &BTreeSet<String>,
        protective_items: &BTreeSet<String>,
    ) -> Result<f64, GuidanceError> {
        let node = graph.require(to)?;
        let mut weight = f64::from(base);
        if node.is_locked(inventory) {
            weight *= LOCKED_EDGE_FACTOR;
        }
        let protected = !inventory.is_disjoint(protective_items);
        if !node.hazards.is_empty() && !protected {
            weight += f64::from(node.hazard_penalty()) / 2.0;
        }
        Ok(weight)
    }

    pub fn find(
        &self,
        graph: &LocationGraph,
        start: &LocationId,
        goal: &LocationId,
        inventory: &BTreeSet<String>,
        protective_items: &BTreeSet<String>,
    ) -> Result<Route, GuidanceError> {
        graph.require(start)?;
        graph.require(goal)?;

        let (mut tree, root) = SearchTree::with_root(start.clone());
        let mut frontier = Frontier::new();
        frontier.push(0.0, root);
        let mut explored: HashSet<LocationId> = HashSet::new();

        while let Some(current) = frontier.pop() {
            let node = tree.get(current);
            if &node.state == goal {
                let lineage = tree.lineage(current);
                let route = Route {
                    moves: tree.actions_to(current),
                    locations: lineage.iter().map(|step| step.state.clone()).collect(),
                    total_cost: node.cost,
                };
                debug!(
                    from = %start,
                    to = %goal,
                    cost = route.total_cost,
                    steps = route.moves.len(),
                    "route found"
                );
                return Ok(route);
            }

            if !explored.insert(node.state.clone()) {
                continue;
            }

            let here = node.state.clone();
            for (next, base) in graph.neighbors(&here)? {
                if explored.contains(next) {
                    continue;
                }
                let weight = Self::edge_weight(graph, next, *base, inventory, protective_items)?;
                let child = tree.push_child(current, next.clone(), format!("Move to {next}"), weight);
                frontier.push(tree.get(child).cost, child);
            }
        }

        debug!(from = %start, to = %goal, "no route");
        Ok(Route::unreachable())
    }
}
