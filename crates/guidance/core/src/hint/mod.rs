//! Hint candidates, the rules that produce them, and the heuristic that ranks
//! the states they lead to.
//!
//! # Core Components
//!
//! - [`HintCandidateGenerator`]: enumerates every admissible hint for a state
//! - [`HeuristicScorer`]: turns a state into a relative priority
//! - [`HintSource`]: the seam the hint search expands through
//! - [`TierHintTable`]: authored per-location text for each hint tier
pub mod generator;
pub mod scorer;
pub mod tiers;

pub use generator::HintCandidateGenerator;
pub use scorer::{HeuristicBreakdown, HeuristicScorer};
pub use tiers::{HintContext, LocationTierHints, TierHintTable, TierTexts};

use crate::difficulty::DifficultyModel;
use crate::error::GuidanceError;
use crate::graph::LocationGraph;
use crate::state::GameStateSnapshot;

/// Rule family that produced a candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum HintRule {
    Puzzle,
    LockedPath,
    Boss,
    Navigation,
    Health,
    Behavioral,
}

/// One hint the guide could give next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HintCandidate {
    pub text: String,
    /// Cost assigned by the rule.
    pub base_cost: u32,
    /// `base_cost` plus the redundancy surcharge.
    pub cost: u32,
    pub rule: HintRule,
}

impl HintCandidate {
    pub fn new(text: impl Into<String>, base_cost: u32, rule: HintRule) -> Self {
        Self {
            text: text.into(),
            base_cost,
            cost: base_cost,
            rule,
        }
    }
}

/// Anything that can enumerate hint candidates for a snapshot.
pub trait HintSource {
    fn candidates(
        &self,
        graph: &LocationGraph,
        snapshot: &GameStateSnapshot,
        difficulty: &DifficultyModel,
    ) -> Result<Vec<HintCandidate>, GuidanceError>;
}
