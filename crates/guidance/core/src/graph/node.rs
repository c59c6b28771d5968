//! Location, puzzle and boss value types.

use std::collections::{BTreeMap, BTreeSet};

use super::LocationId;

/// One room of the labyrinth.
///
/// Nodes are handed out by [`super::LocationGraph`] as shared references only;
/// the visit/solve/defeat/collect hooks on the graph are the sole mutation path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationNode {
    pub id: LocationId,
    pub description: String,
    /// 1-based depth tier; deeper levels get more cryptic hint phrasing.
    pub level: u32,
    /// Outgoing edges in definition order.
    pub neighbors: Vec<(LocationId, u32)>,
    /// Items that must all be held to enter.
    pub required_items: BTreeSet<String>,
    /// Hazard name to damage dealt on entry.
    pub hazards: BTreeMap<String, u32>,
    pub puzzle: Option<PuzzleState>,
    pub boss: Option<BossState>,
    /// Items still lying in the room.
    pub items: Vec<String>,
    pub visited: bool,
    /// Turns spent here without progress.
    pub stuck_count: u32,
}

impl LocationNode {
    pub fn new(id: impl Into<LocationId>, level: u32) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            level,
            neighbors: Vec::new(),
            required_items: BTreeSet::new(),
            hazards: BTreeMap::new(),
            puzzle: None,
            boss: None,
            items: Vec::new(),
            visited: false,
            stuck_count: 0,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_edge(mut self, to: impl Into<LocationId>, weight: u32) -> Self {
        self.neighbors.push((to.into(), weight));
        self
    }

    #[must_use]
    pub fn with_required_item(mut self, item: impl Into<String>) -> Self {
        self.required_items.insert(item.into());
        self
    }

    #[must_use]
    pub fn with_hazard(mut self, name: impl Into<String>, damage: u32) -> Self {
        self.hazards.insert(name.into(), damage);
        self
    }

    #[must_use]
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.items.push(item.into());
        self
    }

    #[must_use]
    pub fn with_puzzle(mut self, puzzle: PuzzleState) -> Self {
        self.puzzle = Some(puzzle);
        self
    }

    #[must_use]
    pub fn with_boss(mut self, boss: BossState) -> Self {
        self.boss = Some(boss);
        self
    }

    /// The puzzle in this room, if one exists and is still unsolved.
    pub fn open_puzzle(&self) -> Option<&PuzzleState> {
        self.puzzle.as_ref().filter(|puzzle| !puzzle.solved)
    }

    /// The boss in this room, if one exists and is still standing.
    pub fn active_boss(&self) -> Option<&BossState> {
        self.boss.as_ref().filter(|boss| !boss.defeated)
    }

    /// Required items not present in `inventory`, in sorted order.
    pub fn missing_items<'a>(&'a self, inventory: &BTreeSet<String>) -> Vec<&'a str> {
        self.required_items
            .iter()
            .filter(|item| !inventory.contains(*item))
            .map(String::as_str)
            .collect()
    }

    pub fn is_locked(&self, inventory: &BTreeSet<String>) -> bool {
        !self.required_items.is_empty() && !self.required_items.is_subset(inventory)
    }

    pub fn hazard_penalty(&self) -> u32 {
        self.hazards.values().sum()
    }
}

/// Multiple-choice puzzle placed in a room.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PuzzleState {
    pub question: String,
    pub options: Vec<String>,
    pub correct_option: usize,
    /// Base complexity (1..=5) before stage scaling.
    pub complexity: f64,
    pub solved: bool,
    pub attempts: u32,
    /// Short authored clue, used as the generic "specific" hint.
    pub clue: Option<String>,
    pub hints: PuzzleHints,
    /// Score awarded on a correct answer.
    pub reward: u32,
}

impl PuzzleState {
    pub const DEFAULT_REWARD: u32 = 50;

    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        correct_option: usize,
        complexity: f64,
    ) -> Self {
        Self {
            question: question.into(),
            options,
            correct_option,
            complexity,
            solved: false,
            attempts: 0,
            clue: None,
            hints: PuzzleHints::default(),
            reward: Self::DEFAULT_REWARD,
        }
    }

    #[must_use]
    pub fn with_clue(mut self, clue: impl Into<String>) -> Self {
        self.clue = Some(clue.into());
        self
    }

    #[must_use]
    pub fn with_hints(mut self, hints: PuzzleHints) -> Self {
        self.hints = hints;
        self
    }

    pub fn correct_answer(&self) -> Option<&str> {
        self.options.get(self.correct_option).map(String::as_str)
    }
}

/// Authored hint texts for the three puzzle hint tiers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PuzzleHints {
    pub general: Option<String>,
    pub specific: Option<String>,
    pub near_exact: Option<String>,
}

/// Guardian fought inside a room.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossState {
    pub name: String,
    /// Base health before stage scaling.
    pub health: u32,
    pub attacks: Vec<String>,
    pub weakness: Option<String>,
    pub defeated: bool,
}

impl BossState {
    pub fn new(name: impl Into<String>, health: u32) -> Self {
        Self {
            name: name.into(),
            health,
            attacks: Vec::new(),
            weakness: None,
            defeated: false,
        }
    }

    #[must_use]
    pub fn with_attack(mut self, attack: impl Into<String>) -> Self {
        self.attacks.push(attack.into());
        self
    }

    #[must_use]
    pub fn with_weakness(mut self, item: impl Into<String>) -> Self {
        self.weakness = Some(item.into());
        self
    }
}
