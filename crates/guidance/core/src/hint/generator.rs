//! Rule-based hint candidate generation.
//!
//! Six independent rule families look at the current room and the snapshot;
//! every family that applies contributes candidates. A redundancy surcharge is
//! applied afterwards so repeated hints get progressively more expensive.

use tracing::trace;

use super::{HintCandidate, HintRule, HintSource};
use crate::config::GeneratorConfig;
use crate::difficulty::{DifficultyModel, HintBand};
use crate::error::GuidanceError;
use crate::graph::{LocationGraph, LocationNode, PuzzleState};
use crate::state::GameStateSnapshot;

/// Base costs of each rule.
mod cost {
    pub const PRIMARY_PUZZLE: u32 = 1;
    pub const BACKUP_PUZZLE: u32 = 3;
    pub const LOCKED_PATH: u32 = 2;
    pub const BOSS_WEAKNESS_HELD: u32 = 2;
    pub const BOSS_WEAKNESS_UNKNOWN: u32 = 4;
    pub const NAVIGATION: u32 = 3;
    pub const HEALTH_FIRST: u32 = 1;
    pub const HEALTH_SECOND: u32 = 2;
    pub const BEHAVIORAL: u32 = 4;
}

/// Enumerates hint candidates for a snapshot.
#[derive(Clone, Debug, Default)]
pub struct HintCandidateGenerator {
    config: GeneratorConfig,
}

impl HintCandidateGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates every applicable candidate, surcharges included.
    pub fn generate(
        &self,
        graph: &LocationGraph,
        snapshot: &GameStateSnapshot,
        difficulty: &DifficultyModel,
    ) -> Result<Vec<HintCandidate>, GuidanceError> {
        let node = graph.require(&snapshot.location)?;
        let mut candidates = Vec::new();

        if let Some(puzzle) = node.open_puzzle() {
            let band =
                difficulty.hint_band_when_stuck(node.stuck_count, self.config.stuck_band_step);
            self.puzzle_hints(node, puzzle, band, &mut candidates);
        }
        self.locked_path_hints(graph, node, snapshot, &mut candidates);
        self.boss_hints(node, snapshot, &mut candidates);
        self.navigation_hints(node, snapshot, &mut candidates);
        self.health_hints(snapshot, &mut candidates);
        self.behavioral_hints(snapshot, &mut candidates);

        for candidate in &mut candidates {
            let repeats = snapshot.hint_occurrences(&candidate.text) as u32;
            candidate.cost = candidate.base_cost + self.config.redundancy_surcharge * repeats;
        }

        trace!(
            location = %node.id,
            count = candidates.len(),
            "generated hint candidates"
        );

        Ok(candidates)
    }

    fn plain_phrasing(&self, node: &LocationNode) -> bool {
        node.level <= self.config.plain_phrasing_max_level
    }

    fn puzzle_hints(
        &self,
        node: &LocationNode,
        puzzle: &PuzzleState,
        band: HintBand,
        out: &mut Vec<HintCandidate>,
    ) {
        let general = puzzle
            .hints
            .general
            .clone()
            .unwrap_or_else(|| format!("Focus on the puzzle in {}.", node.id));
        let specific = puzzle
            .hints
            .specific
            .clone()
            .or_else(|| puzzle.clue.clone())
            .unwrap_or_else(|| "Look at the options.".to_string());
        let near_exact = puzzle.hints.near_exact.clone().unwrap_or_else(|| {
            match puzzle.correct_answer() {
                Some(answer) => format!("The answer is {answer}."),
                None => "The correct answer is not available.".to_string(),
            }
        });

        match band {
            HintBand::Easy => {
                out.push(HintCandidate::new(near_exact, cost::PRIMARY_PUZZLE, HintRule::Puzzle));
                out.push(HintCandidate::new(specific, cost::BACKUP_PUZZLE, HintRule::Puzzle));
            }
            HintBand::Medium => {
                out.push(HintCandidate::new(specific, cost::PRIMARY_PUZZLE, HintRule::Puzzle));
                out.push(HintCandidate::new(general, cost::BACKUP_PUZZLE, HintRule::Puzzle));
            }
            HintBand::Hard => {
                out.push(HintCandidate::new(general, cost::PRIMARY_PUZZLE, HintRule::Puzzle));
            }
        }
    }

    fn locked_path_hints(
        &self,
        graph: &LocationGraph,
        node: &LocationNode,
        snapshot: &GameStateSnapshot,
        out: &mut Vec<HintCandidate>,
    ) {
        for item in node.missing_items(&snapshot.inventory) {
            let owners = graph
                .iter()
                .filter(|owner| owner.items.iter().any(|held| held == item));
            for owner in owners {
                let text = if self.plain_phrasing(node) {
                    format!("You need to find the {item} in the {}.", owner.id)
                } else {
                    format!("A key from {} will unlock this path.", owner.id)
                };
                out.push(HintCandidate::new(text, cost::LOCKED_PATH, HintRule::LockedPath));
            }
        }
    }

    fn boss_hints(
        &self,
        node: &LocationNode,
        snapshot: &GameStateSnapshot,
        out: &mut Vec<HintCandidate>,
    ) {
        let Some(boss) = node.active_boss() else {
            return;
        };
        let held = boss
            .weakness
            .as_deref()
            .filter(|weakness| snapshot.inventory.contains(*weakness));

        // a boss without a weakness item still gets the vague hint
        let plain = self.plain_phrasing(node);
        if let Some(weakness) = held {
            let text = if plain {
                format!("Use the {weakness} against {}!", boss.name)
            } else {
                "Your elemental treasure will be effective here.".to_string()
            };
            out.push(HintCandidate::new(text, cost::BOSS_WEAKNESS_HELD, HintRule::Boss));
        } else {
            let text = if plain {
                format!("{} has a weakness to something elemental.", boss.name)
            } else {
                "Balance the elements to defeat what lies ahead.".to_string()
            };
            out.push(HintCandidate::new(text, cost::BOSS_WEAKNESS_UNKNOWN, HintRule::Boss));
        }
    }

    fn navigation_hints(
        &self,
        node: &LocationNode,
        snapshot: &GameStateSnapshot,
        out: &mut Vec<HintCandidate>,
    ) {
        let named = node.level <= self.config.named_navigation_max_level;
        for (next, _) in &node.neighbors {
            if snapshot.has_visited(next) {
                continue;
            }
            let text = if named {
                format!("You should explore the {next} next.")
            } else {
                "An unexplored path leads to new discoveries.".to_string()
            };
            out.push(HintCandidate::new(text, cost::NAVIGATION, HintRule::Navigation));
        }
    }

    fn health_hints(&self, snapshot: &GameStateSnapshot, out: &mut Vec<HintCandidate>) {
        if snapshot.health >= self.config.low_health_threshold {
            return;
        }
        out.push(HintCandidate::new(
            "Consider finding a way to restore your health.",
            cost::HEALTH_FIRST,
            HintRule::Health,
        ));
        out.push(HintCandidate::new(
            "Some items or locations might offer healing.",
            cost::HEALTH_SECOND,
            HintRule::Health,
        ));
    }

    fn behavioral_hints(&self, snapshot: &GameStateSnapshot, out: &mut Vec<HintCandidate>) {
        if snapshot.skipped_puzzles > self.config.avoidance_threshold {
            out.push(HintCandidate::new(
                "Don't avoid challenges. Facing them is key.",
                cost::BEHAVIORAL,
                HintRule::Behavioral,
            ));
        }
    }
}

impl HintSource for HintCandidateGenerator {
    fn candidates(
        &self,
        graph: &LocationGraph,
        snapshot: &GameStateSnapshot,
        difficulty: &DifficultyModel,
    ) -> Result<Vec<HintCandidate>, GuidanceError> {
        self.generate(graph, snapshot, difficulty)
    }
}
