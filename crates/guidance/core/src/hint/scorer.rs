//! Multi-factor heuristic over hint-search states.
//!
//! The score is a relative priority, lower is explored first. It is not
//! guaranteed to be non-negative: a full inventory can outweigh every other
//! term.

use crate::config::HeuristicWeights;
use crate::difficulty::DifficultyModel;
use crate::error::GuidanceError;
use crate::graph::LocationGraph;
use crate::state::HintState;

/// Individual heuristic terms for one state.
///
/// Kept separate so tests and debug logs can see which factor dominates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeuristicBreakdown {
    pub puzzle_value: f64,
    pub urgency: f64,
    pub stuck_penalty: f64,
    pub time_factor: f64,
    pub health_factor: f64,
    pub inventory_progress: f64,
    pub redundancy_factor: f64,
}

impl HeuristicBreakdown {
    pub fn total(&self) -> f64 {
        self.puzzle_value
            + self.urgency
            + self.stuck_penalty
            + self.time_factor
            + self.health_factor
            - self.inventory_progress
            + self.redundancy_factor
    }
}

/// Scores hint-search states with stage-scaled weights.
#[derive(Clone, Debug, Default)]
pub struct HeuristicScorer {
    weights: HeuristicWeights,
}

impl HeuristicScorer {
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }

    pub fn score(
        &self,
        graph: &LocationGraph,
        state: &HintState,
        difficulty: &DifficultyModel,
    ) -> Result<f64, GuidanceError> {
        Ok(self.breakdown(graph, state, difficulty)?.total())
    }

    pub fn breakdown(
        &self,
        graph: &LocationGraph,
        state: &HintState,
        difficulty: &DifficultyModel,
    ) -> Result<HeuristicBreakdown, GuidanceError> {
        let snapshot = &state.snapshot;
        let node = graph.require(&snapshot.location)?;
        let weights = difficulty.scaled_weights(&self.weights);
        let stage = f64::from(difficulty.stage().get());

        let puzzle_value = node.open_puzzle().map_or(0.0, |puzzle| {
            difficulty.puzzle_complexity(puzzle.complexity)
                * weights.puzzle
                * (1.0 + 0.5 * f64::from(puzzle.attempts))
        });

        let mut urgency = 0.0;
        if node.is_locked(&snapshot.inventory) {
            urgency += weights.urgency;
        }
        if node.active_boss().is_some() {
            urgency += 2.0 * weights.urgency * stage;
        }

        let stuck_penalty = f64::from(node.stuck_count) * weights.stuck * stage;

        let time_factor = if weights.time > 0.0 {
            (f64::from(snapshot.turns) / weights.time).min(weights.time_cap)
        } else {
            weights.time_cap
        };

        let health_deficit = (weights.health_threshold - snapshot.health).max(0);
        let health_factor = weights.health * f64::from(health_deficit);

        let inventory_progress = snapshot.inventory.len() as f64 * weights.inventory;

        let redundancy_factor = match state.last_hint.as_deref() {
            Some(last) if repeats_earlier(&snapshot.hint_history, last) => {
                weights.redundancy * snapshot.hint_occurrences(last) as f64
            }
            _ => 0.0,
        };

        Ok(HeuristicBreakdown {
            puzzle_value,
            urgency,
            stuck_penalty,
            time_factor,
            health_factor,
            inventory_progress,
            redundancy_factor,
        })
    }
}

/// True if `hint` occurs in the history before its final entry.
fn repeats_earlier(history: &[String], hint: &str) -> bool {
    match history.split_last() {
        Some((_, earlier)) => earlier.iter().any(|past| past == hint),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{BossState, LocationNode, PuzzleState};
    use crate::state::GameStateSnapshot;

    fn keyboard_riddle() -> PuzzleState {
        PuzzleState::new(
            "What has keys but no locks?",
            vec!["A Piano".into(), "A Keyboard".into()],
            1,
            1.0,
        )
    }

    fn graph_with(node: LocationNode) -> LocationGraph {
        LocationGraph::new(vec![node]).expect("valid graph")
    }

    #[test]
    fn fresh_puzzle_scores_its_weighted_complexity() {
        let graph = graph_with(LocationNode::new("Entrance", 1).with_puzzle(keyboard_riddle()));
        let state = HintState::root(GameStateSnapshot::new("Entrance", 5));

        let score = HeuristicScorer::default()
            .score(&graph, &state, &DifficultyModel::from_progress(0, 5))
            .unwrap();
        assert_eq!(score, 5.0);
    }

    #[test]
    fn failed_attempts_raise_puzzle_value() {
        let mut puzzle = keyboard_riddle();
        puzzle.attempts = 2;
        let graph = graph_with(LocationNode::new("Entrance", 1).with_puzzle(puzzle));
        let state = HintState::root(GameStateSnapshot::new("Entrance", 5));

        let score = HeuristicScorer::default()
            .score(&graph, &state, &DifficultyModel::from_progress(0, 5))
            .unwrap();
        assert_eq!(score, 10.0);
    }

    #[test]
    fn lock_and_boss_add_urgency() {
        let graph = graph_with(
            LocationNode::new("Library", 5)
                .with_required_item("Elemental Key")
                .with_boss(BossState::new("Chronos Guardian", 100)),
        );
        let state = HintState::root(GameStateSnapshot::new("Library", 5));

        let breakdown = HeuristicScorer::default()
            .breakdown(&graph, &state, &DifficultyModel::from_progress(0, 5))
            .unwrap();
        // 15 for the lock, 2 * 15 * stage 1 for the boss
        assert_eq!(breakdown.urgency, 45.0);
    }

    #[test]
    fn time_health_and_inventory_terms() {
        let graph = graph_with(LocationNode::new("Hall", 1));
        let mut snapshot = GameStateSnapshot::new("Hall", 5)
            .with_item("Shield")
            .with_item("Torch");
        snapshot.turns = 40;
        snapshot.health = 25;

        let breakdown = HeuristicScorer::default()
            .breakdown(
                &graph,
                &HintState::root(snapshot),
                &DifficultyModel::from_progress(0, 5),
            )
            .unwrap();
        assert_eq!(breakdown.time_factor, 20.0);
        assert_eq!(breakdown.health_factor, 50.0);
        assert_eq!(breakdown.inventory_progress, 6.0);
        assert_eq!(breakdown.total(), 64.0);
    }

    #[test]
    fn stuck_penalty_scales_with_stage() {
        let mut node = LocationNode::new("Hall", 1);
        node.stuck_count = 3;
        let graph = graph_with(node);
        let state = HintState::root(GameStateSnapshot::new("Hall", 5));

        // 2 of 5 solved is stage 3
        let breakdown = HeuristicScorer::default()
            .breakdown(&graph, &state, &DifficultyModel::from_progress(2, 5))
            .unwrap();
        assert_eq!(breakdown.stuck_penalty, 18.0);
    }

    #[test]
    fn redundancy_counts_only_repeated_last_hint() {
        let graph = graph_with(LocationNode::new("Hall", 1));
        let difficulty = DifficultyModel::from_progress(0, 5);
        let scorer = HeuristicScorer::default();

        let fresh = HintState::root(GameStateSnapshot::new("Hall", 5)).apply("Look up.");
        assert_eq!(
            scorer.breakdown(&graph, &fresh, &difficulty).unwrap().redundancy_factor,
            0.0
        );

        let repeated = HintState::root(
            GameStateSnapshot::new("Hall", 5)
                .with_hint("Look up.")
                .with_hint("Look down."),
        )
        .apply("Look up.");
        assert_eq!(
            scorer.breakdown(&graph, &repeated, &difficulty).unwrap().redundancy_factor,
            5.0
        );
    }
}
