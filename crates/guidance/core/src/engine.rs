//! Entry points of the guidance core.
//!
//! [`GuidanceEngine`] wires the hint generator, the heuristic scorer, the
//! bounded hint search and the economy into `select_hint`, and exposes the
//! route search as `find_route`. Both calls are deterministic for identical
//! inputs.
//!
//! Alongside the searched hint, every selection carries the tier text the
//! [`TierHintTable`] holds for the player's room.

use std::collections::BTreeSet;

use tracing::info;

use crate::config::GuidanceConfig;
use crate::economy::{Charge, HintEconomyLedger, HintTier};
use crate::error::GuidanceError;
use crate::graph::{LocationGraph, LocationId};
use crate::hint::{HeuristicScorer, HintCandidateGenerator, HintContext, HintSource, TierHintTable};
use crate::search::{GuidanceOutcome, GuidanceSearch, Route, RouteSearch};
use crate::state::GameStateSnapshot;

/// Result of an accepted hint request.
#[derive(Clone, Debug, PartialEq)]
pub struct HintSelection {
    pub hint: String,
    /// Tier text for the player's room; richer tiers say more.
    pub guidance: String,
    pub charge: Charge,
    /// The snapshot's hint history with `hint` appended.
    pub history: Vec<String>,
    pub outcome: GuidanceOutcome,
}

#[derive(Clone, Debug, Default)]
pub struct GuidanceEngine {
    config: GuidanceConfig,
    generator: HintCandidateGenerator,
    search: GuidanceSearch,
    tier_hints: TierHintTable,
}

impl GuidanceEngine {
    pub fn new(config: GuidanceConfig) -> Self {
        let generator = HintCandidateGenerator::new(config.generator.clone());
        let search = GuidanceSearch::new(
            config.search.clone(),
            HeuristicScorer::new(config.weights.clone()),
        );
        Self {
            config,
            generator,
            search,
            tier_hints: TierHintTable::default(),
        }
    }

    pub fn with_tier_hints(mut self, tier_hints: TierHintTable) -> Self {
        self.tier_hints = tier_hints;
        self
    }

    pub fn tier_hints(&self) -> &TierHintTable {
        &self.tier_hints
    }

    pub fn config(&self) -> &GuidanceConfig {
        &self.config
    }

    /// Picks the next hint for `snapshot` and charges `tier` to `ledger`.
    ///
    /// On `InsufficientResources` the ledger is unchanged.
    pub fn select_hint(
        &self,
        graph: &LocationGraph,
        snapshot: &GameStateSnapshot,
        ledger: &mut HintEconomyLedger,
        tier: HintTier,
    ) -> Result<HintSelection, GuidanceError> {
        self.select_hint_from(&self.generator, graph, snapshot, ledger, tier)
    }

    /// Like [`Self::select_hint`] with a caller-supplied candidate source.
    pub fn select_hint_from<H>(
        &self,
        source: &H,
        graph: &LocationGraph,
        snapshot: &GameStateSnapshot,
        ledger: &mut HintEconomyLedger,
        tier: HintTier,
    ) -> Result<HintSelection, GuidanceError>
    where
        H: HintSource + ?Sized,
    {
        let outcome = self.search.run(source, graph, snapshot)?;
        let charge = ledger.request(&snapshot.location, tier, &self.config.economy)?;

        let hint = outcome.first_hint().to_string();
        let mut history = snapshot.hint_history.clone();
        history.push(hint.clone());

        let context = graph
            .node(&snapshot.location)
            .map_or(HintContext::General, HintContext::of);
        let guidance = self
            .tier_hints
            .text_for(&snapshot.location, context, tier)
            .to_string();

        info!(
            location = %snapshot.location,
            %tier,
            %context,
            cost = charge.final_cost,
            reason = %outcome.reason,
            "hint selected"
        );

        Ok(HintSelection {
            hint,
            guidance,
            charge,
            history,
            outcome,
        })
    }

    pub fn find_route(
        &self,
        graph: &LocationGraph,
        start: &LocationId,
        goal: &LocationId,
        inventory: &BTreeSet<String>,
        protective_items: &BTreeSet<String>,
    ) -> Result<Route, GuidanceError> {
        RouteSearch::new().find(graph, start, goal, inventory, protective_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchLimits;
    use crate::economy::Funding;
    use crate::graph::{LocationNode, PuzzleState};

    fn labyrinth() -> LocationGraph {
        LocationGraph::new(vec![
            LocationNode::new("Entrance", 1)
                .with_edge("Caverns", 2)
                .with_item("Bronze Key")
                .with_puzzle(PuzzleState::new(
                    "What has keys but no locks?",
                    vec!["A Piano".into(), "A Keyboard".into()],
                    1,
                    1.0,
                )),
            LocationNode::new("Caverns", 2)
                .with_edge("Maze", 3)
                .with_edge("Entrance", 1),
            LocationNode::new("Maze", 3)
                .with_edge("Caverns", 2)
                .with_required_item("Bronze Key"),
        ])
        .expect("valid graph")
    }

    #[test]
    fn select_hint_returns_fallback_and_charges_ledger() {
        let engine = GuidanceEngine::default();
        let config = engine.config().economy.clone();
        let mut ledger = HintEconomyLedger::new(&config).with_score(20);
        let snapshot = GameStateSnapshot::new("Entrance", 1).with_hint("Look around.");

        let selection = engine
            .select_hint(&labyrinth(), &snapshot, &mut ledger, HintTier::Moderate)
            .unwrap();

        assert_eq!(selection.hint, SearchLimits::DEFAULT_FALLBACK_HINT);
        assert_eq!(
            selection.history,
            vec!["Look around.".to_string(), selection.hint.clone()]
        );
        assert_eq!(selection.charge.funding, Funding::Score);
        assert_eq!(ledger.score(), 17);
    }

    #[test]
    fn guidance_text_follows_the_requested_tier() {
        use crate::hint::{LocationTierHints, TierTexts};

        let engine = GuidanceEngine::default().with_tier_hints(
            TierHintTable::default().with_location(
                "Entrance",
                LocationTierHints {
                    general: None,
                    puzzle: Some(TierTexts::new(
                        "Patterns reveal themselves to the patient observer...",
                        "Symbols can have multiple meanings.",
                        "The order matters as much as the symbols themselves.",
                        "Arrange the stone tiles to match the ceiling pattern.",
                    )),
                },
            ),
        );
        let graph = labyrinth();
        let snapshot = GameStateSnapshot::new("Entrance", 1);
        let mut ledger = HintEconomyLedger::new(&engine.config().economy).with_score(100);

        let vague = engine
            .select_hint(&graph, &snapshot, &mut ledger, HintTier::Vague)
            .unwrap();
        let explicit = engine
            .select_hint(&graph, &snapshot, &mut ledger, HintTier::Explicit)
            .unwrap();

        assert_eq!(vague.hint, explicit.hint);
        assert_eq!(vague.guidance, "Patterns reveal themselves to the patient observer...");
        assert_eq!(explicit.guidance, "Arrange the stone tiles to match the ceiling pattern.");

        // no entry for the room: table defaults
        let caverns = GameStateSnapshot::new("Caverns", 1);
        let selection = engine
            .select_hint(&graph, &caverns, &mut ledger, HintTier::Moderate)
            .unwrap();
        assert_eq!(
            selection.guidance,
            "The path forward is not always clear, but it exists."
        );
    }

    #[test]
    fn rejected_request_leaves_ledger_unchanged() {
        let engine = GuidanceEngine::default();
        let mut ledger = HintEconomyLedger::new(&engine.config().economy);
        let before = ledger.clone();

        let err = engine
            .select_hint(
                &labyrinth(),
                &GameStateSnapshot::new("Entrance", 1),
                &mut ledger,
                HintTier::Explicit,
            )
            .unwrap_err();
        assert!(matches!(err, GuidanceError::InsufficientResources { .. }));
        assert_eq!(ledger, before);
    }

    #[test]
    fn identical_inputs_give_identical_results() {
        let engine = GuidanceEngine::default();
        let graph = labyrinth();
        let snapshot = GameStateSnapshot::new("Entrance", 1).with_visit("Entrance", 1);
        let config = engine.config().economy.clone();

        let mut first_ledger = HintEconomyLedger::new(&config);
        let mut second_ledger = first_ledger.clone();
        let first = engine
            .select_hint(&graph, &snapshot, &mut first_ledger, HintTier::Vague)
            .unwrap();
        let second = engine
            .select_hint(&graph, &snapshot, &mut second_ledger, HintTier::Vague)
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(first_ledger, second_ledger);

        let none = BTreeSet::new();
        let route_a = engine
            .find_route(&graph, &"Entrance".into(), &"Maze".into(), &none, &none)
            .unwrap();
        let route_b = engine
            .find_route(&graph, &"Entrance".into(), &"Maze".into(), &none, &none)
            .unwrap();
        assert_eq!(route_a, route_b);
        assert_eq!(route_a.total_cost, 11.0);
    }
}
