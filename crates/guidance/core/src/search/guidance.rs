//! Bounded best-first exploration over hint-application states.
//!
//! There is no goal state: the search keeps expanding the most promising
//! hint sequence until the depth bound, the node bound or an empty frontier
//! stops it, and then answers with the configured fallback hint. Callers
//! rely on that; do not add a goal test.

use std::collections::HashSet;

use tracing::debug;

use super::{Frontier, SearchTree};
use crate::config::SearchLimits;
use crate::difficulty::DifficultyModel;
use crate::error::GuidanceError;
use crate::graph::LocationGraph;
use crate::hint::{HeuristicScorer, HintSource};
use crate::state::{GameStateSnapshot, HintState, StateKey};

/// Why a hint search returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum StopReason {
    /// A popped node's path reached `max_depth` hints.
    DepthBound,
    /// More than `max_nodes` nodes were popped.
    NodeBound,
    /// Every reachable state was explored.
    FrontierExhausted,
}

/// Result of one [`GuidanceSearch::run`].
#[derive(Clone, Debug, PartialEq)]
pub struct GuidanceOutcome {
    /// Returned hint sequence; callers use the first entry.
    pub hints: Vec<String>,
    pub reason: StopReason,
    /// Nodes taken off the frontier, duplicates included.
    pub popped: usize,
    /// Nodes whose candidates were generated.
    pub expanded: usize,
}

impl GuidanceOutcome {
    /// First hint of the sequence.
    pub fn first_hint(&self) -> &str {
        self.hints.first().map(String::as_str).unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default)]
pub struct GuidanceSearch {
    limits: SearchLimits,
    scorer: HeuristicScorer,
}

impl GuidanceSearch {
    pub fn new(limits: SearchLimits, scorer: HeuristicScorer) -> Self {
        Self { limits, scorer }
    }

    pub fn limits(&self) -> &SearchLimits {
        &self.limits
    }

    /// Explores hint sequences starting from `snapshot`.
    ///
    /// Fails only if the snapshot, or a state reached from it, names a
    /// location that is not in `graph`.
    pub fn run<H>(
        &self,
        source: &H,
        graph: &LocationGraph,
        snapshot: &GameStateSnapshot,
    ) -> Result<GuidanceOutcome, GuidanceError>
    where
        H: HintSource + ?Sized,
    {
        graph.require(&snapshot.location)?;
        let difficulty =
            DifficultyModel::from_progress(snapshot.solved_puzzles, snapshot.total_puzzles);

        let root_state = HintState::root(snapshot.clone());
        let root_priority = self.scorer.score(graph, &root_state, &difficulty)?;
        let (mut tree, root) = SearchTree::with_root(root_state);

        let mut frontier = Frontier::new();
        frontier.push(root_priority, root);

        let mut explored: HashSet<StateKey> = HashSet::new();
        let mut popped = 0usize;
        let mut expanded = 0usize;

        let reason = loop {
            let Some(current) = frontier.pop() else {
                break StopReason::FrontierExhausted;
            };
            popped += 1;

            let node = tree.get(current);
            if !explored.insert(node.state.key()) {
                continue;
            }

            if node.depth >= self.limits.max_depth {
                break StopReason::DepthBound;
            }
            if popped > self.limits.max_nodes {
                break StopReason::NodeBound;
            }

            let parent_state = node.state.clone();
            let candidates = source.candidates(graph, &parent_state.snapshot, &difficulty)?;
            expanded += 1;

            for candidate in candidates {
                let child_state = parent_state.apply(&candidate.text);
                let heuristic = self.scorer.score(graph, &child_state, &difficulty)?;
                let child = tree.push_child(
                    current,
                    child_state,
                    candidate.text,
                    f64::from(candidate.cost),
                );
                frontier.push(tree.get(child).cost + heuristic, child);
            }
        };

        debug!(
            location = %snapshot.location,
            reason = %reason,
            popped,
            expanded,
            tree_size = tree.len(),
            "hint search finished"
        );

        Ok(GuidanceOutcome {
            hints: vec![self.limits.fallback_hint.clone()],
            reason,
            popped,
            expanded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{LocationNode, PuzzleState};
    use crate::hint::{HintCandidate, HintCandidateGenerator, HintRule};

    /// Emits fresh texts forever, so no state ever repeats.
    struct EndlessSource;

    impl HintSource for EndlessSource {
        fn candidates(
            &self,
            _graph: &LocationGraph,
            snapshot: &GameStateSnapshot,
            _difficulty: &DifficultyModel,
        ) -> Result<Vec<HintCandidate>, GuidanceError> {
            let depth = snapshot.hint_history.len();
            Ok((0..3)
                .map(|branch| {
                    HintCandidate::new(format!("hint {depth}.{branch}"), 1, HintRule::Navigation)
                })
                .collect())
        }
    }

    /// Single chain of zero-cost hints with a strongly falling heuristic.
    struct ChainSource;

    impl HintSource for ChainSource {
        fn candidates(
            &self,
            _graph: &LocationGraph,
            snapshot: &GameStateSnapshot,
            _difficulty: &DifficultyModel,
        ) -> Result<Vec<HintCandidate>, GuidanceError> {
            let depth = snapshot.hint_history.len();
            Ok(vec![HintCandidate::new(
                format!("step {depth}"),
                0,
                HintRule::Behavioral,
            )])
        }
    }

    struct SilentSource;

    impl HintSource for SilentSource {
        fn candidates(
            &self,
            _graph: &LocationGraph,
            _snapshot: &GameStateSnapshot,
            _difficulty: &DifficultyModel,
        ) -> Result<Vec<HintCandidate>, GuidanceError> {
            Ok(Vec::new())
        }
    }

    fn single_room() -> LocationGraph {
        LocationGraph::new(vec![LocationNode::new("Hall", 1)]).expect("valid graph")
    }

    #[test]
    fn unbounded_source_hits_node_bound_with_fallback() {
        let search = GuidanceSearch::default();
        let outcome = search
            .run(&EndlessSource, &single_room(), &GameStateSnapshot::new("Hall", 1))
            .unwrap();

        assert_eq!(outcome.hints, vec![SearchLimits::DEFAULT_FALLBACK_HINT.to_string()]);
        assert_eq!(outcome.reason, StopReason::NodeBound);
        assert!(outcome.expanded <= SearchLimits::DEFAULT_MAX_NODES);
    }

    #[test]
    fn deep_chain_hits_depth_bound() {
        let limits = SearchLimits {
            max_depth: 10,
            ..SearchLimits::default()
        };
        let search = GuidanceSearch::new(limits, HeuristicScorer::default());
        let outcome = search
            .run(&ChainSource, &single_room(), &GameStateSnapshot::new("Hall", 1))
            .unwrap();

        assert_eq!(outcome.reason, StopReason::DepthBound);
        assert_eq!(outcome.expanded, 10);
        assert_eq!(outcome.first_hint(), SearchLimits::DEFAULT_FALLBACK_HINT);
    }

    #[test]
    fn empty_source_exhausts_frontier() {
        let outcome = GuidanceSearch::default()
            .run(&SilentSource, &single_room(), &GameStateSnapshot::new("Hall", 1))
            .unwrap();
        assert_eq!(outcome.reason, StopReason::FrontierExhausted);
        assert_eq!(outcome.popped, 1);
        assert_eq!(outcome.expanded, 1);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let graph = LocationGraph::new(vec![
            LocationNode::new("Entrance", 1)
                .with_edge("Caverns", 2)
                .with_puzzle(PuzzleState::new(
                    "What has keys but no locks?",
                    vec!["A Keyboard".into(), "A Map".into()],
                    0,
                    1.0,
                )),
            LocationNode::new("Caverns", 2).with_edge("Entrance", 1),
        ])
        .unwrap();
        let snapshot = GameStateSnapshot::new("Entrance", 1);
        let source = HintCandidateGenerator::default();
        let search = GuidanceSearch::default();

        let first = search.run(&source, &graph, &snapshot).unwrap();
        let second = search.run(&source, &graph, &snapshot).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_location_fails_before_searching() {
        let err = GuidanceSearch::default()
            .run(&EndlessSource, &single_room(), &GameStateSnapshot::new("Attic", 1))
            .unwrap_err();
        assert_eq!(err, GuidanceError::UnknownLocation("Attic".into()));
    }
}
