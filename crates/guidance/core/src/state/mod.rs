//! Immutable player/world snapshots fed into the searches.
//!
//! A [`GameStateSnapshot`] is produced fresh by the session controller for each
//! call. Search code never mutates one in place: applying a hint clones the
//! snapshot into a new [`HintState`].
mod key;

use std::collections::{BTreeMap, BTreeSet};

pub use key::StateKey;

use crate::graph::LocationId;

/// Player and world facts the guidance engine reasons about.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameStateSnapshot {
    pub location: LocationId,
    pub inventory: BTreeSet<String>,
    pub solved_puzzles: u32,
    pub total_puzzles: u32,
    pub turns: u32,
    pub health: i32,
    /// Every hint issued this session, oldest first, repeats included.
    pub hint_history: Vec<String>,
    pub visits: BTreeMap<LocationId, u32>,
    /// Puzzles the player walked away from.
    pub skipped_puzzles: u32,
}

impl GameStateSnapshot {
    pub const FULL_HEALTH: i32 = 100;

    /// Fresh-game snapshot at `location`.
    pub fn new(location: impl Into<LocationId>, total_puzzles: u32) -> Self {
        Self {
            location: location.into(),
            inventory: BTreeSet::new(),
            solved_puzzles: 0,
            total_puzzles,
            turns: 0,
            health: Self::FULL_HEALTH,
            hint_history: Vec::new(),
            visits: BTreeMap::new(),
            skipped_puzzles: 0,
        }
    }

    #[must_use]
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.inventory.insert(item.into());
        self
    }

    #[must_use]
    pub fn with_visit(mut self, location: impl Into<LocationId>, count: u32) -> Self {
        self.visits.insert(location.into(), count);
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint_history.push(hint.into());
        self
    }

    pub fn has_visited(&self, location: &LocationId) -> bool {
        self.visits.get(location).is_some_and(|&count| count > 0)
    }

    /// Number of times `hint` appears in the history.
    pub fn hint_occurrences(&self, hint: &str) -> usize {
        self.hint_history.iter().filter(|past| *past == hint).count()
    }
}

/// A node state of the hint search: a snapshot plus the hint that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HintState {
    pub snapshot: GameStateSnapshot,
    pub last_hint: Option<String>,
}

impl HintState {
    pub fn root(snapshot: GameStateSnapshot) -> Self {
        Self {
            snapshot,
            last_hint: None,
        }
    }

    /// Copy-on-write hint application.
    ///
    /// The hint joins the history only if it is not already there; `last_hint`
    /// always records it.
    pub fn apply(&self, hint: &str) -> Self {
        let mut snapshot = self.snapshot.clone();
        if !snapshot.hint_history.iter().any(|past| past == hint) {
            snapshot.hint_history.push(hint.to_string());
        }
        Self {
            snapshot,
            last_hint: Some(hint.to_string()),
        }
    }

    pub fn key(&self) -> StateKey {
        StateKey::of(&self.snapshot, self.last_hint.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_leaves_parent_untouched() {
        let root = HintState::root(GameStateSnapshot::new("Hall", 1));
        let child = root.apply("Look up.");

        assert!(root.snapshot.hint_history.is_empty());
        assert_eq!(root.last_hint, None);
        assert_eq!(child.snapshot.hint_history, vec!["Look up.".to_string()]);
        assert_eq!(child.last_hint.as_deref(), Some("Look up."));
    }

    #[test]
    fn apply_does_not_duplicate_history() {
        let state = HintState::root(GameStateSnapshot::new("Hall", 1).with_hint("Look up."));
        let child = state.apply("Look up.");
        assert_eq!(child.snapshot.hint_occurrences("Look up."), 1);
        assert_ne!(state.key(), child.key());
    }
}
