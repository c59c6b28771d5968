//! Deterministic hint-selection and routing core for the LUMOS labyrinth guide.
//!
//! `guidance-core` owns the algorithmic part of the guide: the gated
//! [`graph::LocationGraph`], the progress-driven [`difficulty::DifficultyModel`],
//! the hint candidate rules and heuristic, the two bounded searches, and the
//! [`economy::HintEconomyLedger`]. Everything here is synchronous and free of
//! I/O; the session controller feeds snapshots in and applies results back.
//! [`engine::GuidanceEngine`] exposes the two public entry points,
//! `select_hint` and `find_route`.
pub mod config;
pub mod difficulty;
pub mod economy;
pub mod engine;
pub mod error;
pub mod graph;
pub mod hint;
pub mod rng;
pub mod search;
pub mod state;

pub use config::{EconomyConfig, GeneratorConfig, GuidanceConfig, HeuristicWeights, SearchLimits};
pub use difficulty::{DifficultyModel, HintBand, Stage};
pub use economy::{Charge, Funding, HintEconomyLedger, HintTier};
pub use engine::{GuidanceEngine, HintSelection};
pub use error::{ErrorSeverity, GraphError, GuidanceError, GuidanceFault};
pub use graph::{BossState, LocationGraph, LocationId, LocationNode, PuzzleHints, PuzzleState};
pub use hint::{
    HeuristicScorer, HintCandidate, HintCandidateGenerator, HintContext, HintRule, HintSource,
    LocationTierHints, TierHintTable, TierTexts,
};
pub use rng::{ActionSeed, PcgRng, RngOracle, compute_seed};
pub use search::{GuidanceOutcome, GuidanceSearch, Route, RouteSearch, StopReason};
pub use state::{GameStateSnapshot, HintState, StateKey};
