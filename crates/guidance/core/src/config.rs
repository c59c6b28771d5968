//! Guidance configuration constants and tunable parameters.
//!
//! Every section has a `Default` that reproduces the hand-tuned values of the
//! labyrinth guide, so a TOML file only needs to name the fields it changes.

use crate::economy::HintTier;

/// Top-level tuning knobs for the guidance engine.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GuidanceConfig {
    pub search: SearchLimits,
    pub economy: EconomyConfig,
    pub weights: HeuristicWeights,
    pub generator: GeneratorConfig,
}

impl GuidanceConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Bounds for the best-first hint search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchLimits {
    /// Path length at which the search gives up and returns the fallback.
    pub max_depth: usize,
    /// Number of popped nodes after which the search gives up.
    pub max_nodes: usize,
    /// Hint returned whenever the search stops without reaching a goal.
    pub fallback_hint: String,
}

impl SearchLimits {
    pub const DEFAULT_MAX_DEPTH: usize = 50;
    pub const DEFAULT_MAX_NODES: usize = 1000;
    pub const DEFAULT_FALLBACK_HINT: &'static str = "Consider the puzzle carefully...";
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_nodes: Self::DEFAULT_MAX_NODES,
            fallback_hint: Self::DEFAULT_FALLBACK_HINT.to_string(),
        }
    }
}

/// Prices and penalty thresholds of the hint economy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EconomyConfig {
    pub starting_tokens: u32,
    /// Requests at one location above this count add a +0.5 multiplier.
    pub location_penalty_threshold: u32,
    /// Back-to-back requests above this count add a further +0.5 multiplier.
    pub consecutive_penalty_threshold: u32,
    /// Health drained by a score-funded explicit hint.
    pub explicit_health_cost: i32,
    pub vague_cost: u32,
    pub moderate_cost: u32,
    pub specific_cost: u32,
    pub explicit_cost: u32,
}

impl EconomyConfig {
    pub const DEFAULT_STARTING_TOKENS: u32 = 3;
    pub const PENALTY_STEP: f64 = 0.5;

    pub fn tier_cost(&self, tier: HintTier) -> u32 {
        match tier {
            HintTier::Vague => self.vague_cost,
            HintTier::Moderate => self.moderate_cost,
            HintTier::Specific => self.specific_cost,
            HintTier::Explicit => self.explicit_cost,
        }
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_tokens: Self::DEFAULT_STARTING_TOKENS,
            location_penalty_threshold: 3,
            consecutive_penalty_threshold: 2,
            explicit_health_cost: 5,
            vague_cost: 1,
            moderate_cost: 3,
            specific_cost: 5,
            explicit_cost: 10,
        }
    }
}

/// Base weights of the heuristic factors (stage 1 values).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeuristicWeights {
    pub puzzle: f64,
    pub urgency: f64,
    pub stuck: f64,
    pub time: f64,
    pub inventory: f64,
    pub redundancy: f64,
    pub health: f64,
    /// Ceiling of the time factor.
    pub time_cap: f64,
    /// Health below which the health factor starts to grow.
    pub health_threshold: i32,
}

impl HeuristicWeights {
    /// Puzzle weight gained per stage above the first.
    pub const PUZZLE_STEP: f64 = 1.0;
    /// Urgency weight gained per stage above the first.
    pub const URGENCY_STEP: f64 = 2.0;
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            puzzle: 5.0,
            urgency: 15.0,
            stuck: 2.0,
            time: 1.0,
            inventory: 3.0,
            redundancy: 5.0,
            health: 10.0,
            time_cap: 20.0,
            health_threshold: 30,
        }
    }
}

/// Thresholds and surcharges of the hint candidate rules.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    /// Cost added per previous occurrence of the same hint text.
    pub redundancy_surcharge: u32,
    /// Health below which self-care hints are offered.
    pub low_health_threshold: i32,
    /// Puzzle skips above this count trigger the encouragement hint.
    pub avoidance_threshold: u32,
    /// Highest level that still gets plain locked-path and boss phrasing.
    pub plain_phrasing_max_level: u32,
    /// Highest level whose navigation hints name the neighbor.
    pub named_navigation_max_level: u32,
    /// Turns stuck per band step toward terser puzzle hints; 0 disables.
    pub stuck_band_step: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            redundancy_surcharge: 5,
            low_health_threshold: 30,
            avoidance_threshold: 2,
            plain_phrasing_max_level: 3,
            named_navigation_max_level: 2,
            stuck_band_step: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tuned_values() {
        let config = GuidanceConfig::new();
        assert_eq!(config.search.max_depth, 50);
        assert_eq!(config.search.max_nodes, 1000);
        assert_eq!(config.economy.tier_cost(HintTier::Vague), 1);
        assert_eq!(config.economy.tier_cost(HintTier::Explicit), 10);
        assert_eq!(config.weights.urgency, 15.0);
        assert_eq!(config.generator.redundancy_surcharge, 5);
        assert_eq!(config.generator.stuck_band_step, 0);
    }
}
