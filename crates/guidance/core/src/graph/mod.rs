//! Weighted directed graph of gated locations.
//!
//! The graph is the leaf dependency of both searches. Read access goes through
//! the query methods; the session controller drives the small set of mutation
//! hooks between search calls.
mod node;

use std::collections::{BTreeSet, HashMap};
use std::fmt;

pub use node::{BossState, LocationNode, PuzzleHints, PuzzleState};

use crate::error::{GraphError, GuidanceError};

/// Stable identifier of a location (its display name).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LocationId(String);

impl LocationId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for LocationId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for LocationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The labyrinth: nodes in definition order plus an id index.
#[derive(Clone, Debug, PartialEq)]
pub struct LocationGraph {
    nodes: Vec<LocationNode>,
    index: HashMap<LocationId, usize>,
}

impl LocationGraph {
    /// Builds a graph, rejecting duplicate ids and edges to unknown locations.
    pub fn new(nodes: Vec<LocationNode>) -> Result<Self, GraphError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (slot, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), slot).is_some() {
                return Err(GraphError::DuplicateLocation(node.id.clone()));
            }
        }

        for node in &nodes {
            if let Some((to, _)) = node.neighbors.iter().find(|(to, _)| !index.contains_key(to)) {
                return Err(GraphError::DanglingEdge {
                    from: node.id.clone(),
                    to: to.clone(),
                });
            }
        }

        Ok(Self { nodes, index })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &LocationId) -> bool {
        self.index.contains_key(id)
    }

    pub fn node(&self, id: &LocationId) -> Option<&LocationNode> {
        self.index.get(id).map(|&slot| &self.nodes[slot])
    }

    /// Like [`Self::node`], but an absent id is an `UnknownLocation` error.
    pub fn require(&self, id: &LocationId) -> Result<&LocationNode, GuidanceError> {
        self.node(id)
            .ok_or_else(|| GuidanceError::UnknownLocation(id.clone()))
    }

    /// Nodes in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &LocationNode> {
        self.nodes.iter()
    }

    pub fn neighbors(&self, id: &LocationId) -> Result<&[(LocationId, u32)], GuidanceError> {
        Ok(&self.require(id)?.neighbors)
    }

    /// True iff the location has requirements that `inventory` does not cover.
    pub fn is_locked(
        &self,
        id: &LocationId,
        inventory: &BTreeSet<String>,
    ) -> Result<bool, GuidanceError> {
        Ok(self.require(id)?.is_locked(inventory))
    }

    /// Sum of all hazard damages at the location.
    pub fn hazard_penalty(&self, id: &LocationId) -> Result<u32, GuidanceError> {
        Ok(self.require(id)?.hazard_penalty())
    }

    /// First location, in definition order, where `item` is lying.
    pub fn owner_of(&self, item: &str) -> Option<&LocationId> {
        self.nodes
            .iter()
            .find(|node| node.items.iter().any(|held| held == item))
            .map(|node| &node.id)
    }

    /// Number of locations that carry a puzzle, solved or not.
    pub fn total_puzzles(&self) -> u32 {
        self.nodes.iter().filter(|node| node.puzzle.is_some()).count() as u32
    }

    // ===== session-controller mutation hooks =====

    fn require_mut(&mut self, id: &LocationId) -> Result<&mut LocationNode, GuidanceError> {
        match self.index.get(id) {
            Some(&slot) => Ok(&mut self.nodes[slot]),
            None => Err(GuidanceError::UnknownLocation(id.clone())),
        }
    }

    /// Marks the location visited; returns true on the first visit.
    pub fn mark_visited(&mut self, id: &LocationId) -> Result<bool, GuidanceError> {
        let node = self.require_mut(id)?;
        let first = !node.visited;
        node.visited = true;
        Ok(first)
    }

    /// Counts one more attempt on the location's puzzle. Returns the new count,
    /// or `None` when the location has no puzzle.
    pub fn record_puzzle_attempt(&mut self, id: &LocationId) -> Result<Option<u32>, GuidanceError> {
        let node = self.require_mut(id)?;
        Ok(node.puzzle.as_mut().map(|puzzle| {
            puzzle.attempts += 1;
            puzzle.attempts
        }))
    }

    /// Returns true if an unsolved puzzle was marked solved.
    pub fn mark_puzzle_solved(&mut self, id: &LocationId) -> Result<bool, GuidanceError> {
        let node = self.require_mut(id)?;
        match node.puzzle.as_mut() {
            Some(puzzle) if !puzzle.solved => {
                puzzle.solved = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Returns true if a standing boss was marked defeated.
    pub fn mark_boss_defeated(&mut self, id: &LocationId) -> Result<bool, GuidanceError> {
        let node = self.require_mut(id)?;
        match node.boss.as_mut() {
            Some(boss) if !boss.defeated => {
                boss.defeated = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Removes and returns every item lying at the location.
    pub fn collect_items(&mut self, id: &LocationId) -> Result<Vec<String>, GuidanceError> {
        let node = self.require_mut(id)?;
        Ok(std::mem::take(&mut node.items))
    }

    /// Removes a single item; returns true if it was present.
    pub fn remove_item(&mut self, id: &LocationId, item: &str) -> Result<bool, GuidanceError> {
        let node = self.require_mut(id)?;
        match node.items.iter().position(|held| held == item) {
            Some(slot) => {
                node.items.remove(slot);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Shifts the stuck counter by `delta`, saturating at zero.
    pub fn adjust_stuck(&mut self, id: &LocationId, delta: i32) -> Result<u32, GuidanceError> {
        let node = self.require_mut(id)?;
        node.stuck_count = node.stuck_count.saturating_add_signed(delta);
        Ok(node.stuck_count)
    }
}
