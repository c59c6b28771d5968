//! Hint economy: the per-session ledger of tokens, score and health.
//!
//! A request walks a fixed sequence of rules: bump the per-location and
//! consecutive counters, derive the penalty multiplier, then fund the hint
//! from a free token (lowest tier only) or from score. A request that cannot
//! be funded leaves the ledger exactly as it was.

use std::collections::BTreeMap;

use tracing::debug;

use crate::config::EconomyConfig;
use crate::error::GuidanceError;
use crate::graph::LocationId;
use crate::state::GameStateSnapshot;

/// Hint directness tier, ascending cost.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HintTier {
    Vague,
    Moderate,
    Specific,
    Explicit,
}

impl HintTier {
    /// The only tier that free tokens can pay for.
    pub const fn lowest() -> Self {
        Self::Vague
    }

    /// The tier that drains health when paid with score.
    pub const fn highest() -> Self {
        Self::Explicit
    }
}

/// How a request was paid for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Funding {
    Token,
    Score,
}

/// Receipt of an accepted hint request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Charge {
    pub tier: HintTier,
    /// Score deducted; 0 when a token paid.
    pub final_cost: u32,
    pub penalty_multiplier: f64,
    pub funding: Funding,
    /// Health deducted alongside the score charge.
    pub health_cost: i32,
}

/// Per-session economy state.
#[derive(Clone, Debug, PartialEq)]
pub struct HintEconomyLedger {
    tokens: u32,
    location_requests: BTreeMap<LocationId, u32>,
    consecutive: u32,
    score: i32,
    health: i32,
}

impl HintEconomyLedger {
    pub fn new(config: &EconomyConfig) -> Self {
        Self {
            tokens: config.starting_tokens,
            location_requests: BTreeMap::new(),
            consecutive: 0,
            score: 0,
            health: GameStateSnapshot::FULL_HEALTH,
        }
    }

    #[must_use]
    pub fn with_score(mut self, score: i32) -> Self {
        self.score = score;
        self
    }

    #[must_use]
    pub fn with_tokens(mut self, tokens: u32) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn tokens(&self) -> u32 {
        self.tokens
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn consecutive_requests(&self) -> u32 {
        self.consecutive
    }

    pub fn requests_at(&self, location: &LocationId) -> u32 {
        self.location_requests.get(location).copied().unwrap_or(0)
    }

    /// Multiplier a request would get with the given post-increment counters.
    pub fn penalty_multiplier(config: &EconomyConfig, at_location: u32, consecutive: u32) -> f64 {
        let mut multiplier = 1.0;
        if at_location > config.location_penalty_threshold {
            multiplier += EconomyConfig::PENALTY_STEP;
        }
        if consecutive > config.consecutive_penalty_threshold {
            multiplier += EconomyConfig::PENALTY_STEP;
        }
        multiplier
    }

    /// Charges a hint request of `tier` made at `location`.
    ///
    /// On `InsufficientResources` nothing is mutated, counters included.
    pub fn request(
        &mut self,
        location: &LocationId,
        tier: HintTier,
        config: &EconomyConfig,
    ) -> Result<Charge, GuidanceError> {
        let at_location = self.requests_at(location) + 1;
        let consecutive = self.consecutive + 1;
        let penalty_multiplier = Self::penalty_multiplier(config, at_location, consecutive);
        let base = config.tier_cost(tier);
        let final_cost = (f64::from(base) * penalty_multiplier).round_ties_even() as u32;

        let funding = if tier == HintTier::lowest() && self.tokens > 0 {
            Funding::Token
        } else if i64::from(self.score) >= i64::from(final_cost) {
            Funding::Score
        } else {
            debug!(
                %location,
                %tier,
                final_cost,
                score = self.score,
                "hint request rejected"
            );
            return Err(GuidanceError::InsufficientResources {
                required: final_cost,
                available: self.score,
            });
        };

        self.location_requests.insert(location.clone(), at_location);
        self.consecutive = consecutive;

        let (charged, health_cost) = match funding {
            Funding::Token => {
                self.tokens -= 1;
                (0, 0)
            }
            Funding::Score => {
                self.score -= final_cost as i32;
                let health_cost = if tier == HintTier::highest() {
                    config.explicit_health_cost
                } else {
                    0
                };
                self.health -= health_cost;
                (final_cost, health_cost)
            }
        };

        debug!(
            %location,
            %tier,
            %funding,
            cost = charged,
            multiplier = penalty_multiplier,
            "hint charged"
        );

        Ok(Charge {
            tier,
            final_cost: charged,
            penalty_multiplier,
            funding,
            health_cost,
        })
    }

    /// Withdraws the most recent request from the consecutive streak.
    pub fn cancel(&mut self) {
        self.consecutive = self.consecutive.saturating_sub(1);
    }

    /// Moving to another location breaks the consecutive streak.
    pub fn enter_location(&mut self) {
        self.consecutive = 0;
    }

    pub fn credit_score(&mut self, amount: i32) {
        self.score += amount;
    }

    pub fn debit_score(&mut self, amount: i32) {
        self.score -= amount;
    }

    /// Shifts health by `delta`, capped at full health. Returns the new value.
    pub fn adjust_health(&mut self, delta: i32) -> i32 {
        self.health = (self.health + delta).min(GameStateSnapshot::FULL_HEALTH);
        self.health
    }

    pub fn grant_token(&mut self) {
        self.tokens += 1;
    }
}
