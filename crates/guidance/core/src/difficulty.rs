//! Progress-driven difficulty scaling.
//!
//! All values are pure functions of `(solved_puzzles, total_puzzles)` and are
//! recomputed on every call; nothing here caches a stage across a solve.

use crate::config::HeuristicWeights;

/// Discrete game stage, 1 through 5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stage(u8);

impl Stage {
    pub const FIRST: Stage = Stage(1);
    pub const LAST: Stage = Stage(5);

    /// Clamps `value` into `1..=5`.
    pub fn new(value: u8) -> Self {
        Self(value.clamp(Self::FIRST.0, Self::LAST.0))
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Stages above the first, as a float factor.
    fn steps(self) -> f64 {
        f64::from(self.0 - 1)
    }
}

/// Directness band used for puzzle hints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum HintBand {
    /// Under 30% progress: near-exact help is cheap.
    Easy,
    /// 30% to 70%.
    Medium,
    /// 70% and above: only general nudges.
    Hard,
}

impl HintBand {
    /// The band `steps` above this one, capped at [`HintBand::Hard`].
    pub fn raised(self, steps: u32) -> Self {
        let index = match self {
            Self::Easy => 0,
            Self::Medium => 1,
            Self::Hard => 2,
        };
        match index + steps.min(2) {
            0 => Self::Easy,
            1 => Self::Medium,
            _ => Self::Hard,
        }
    }
}

/// Stage-dependent parameters derived from puzzle progress.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DifficultyModel {
    solved_puzzles: u32,
    total_puzzles: u32,
}

impl DifficultyModel {
    pub const MAX_ENCOUNTER_CHANCE: f64 = 0.3;
    pub const MAX_PUZZLE_COMPLEXITY: f64 = 5.0;

    pub fn from_progress(solved_puzzles: u32, total_puzzles: u32) -> Self {
        Self {
            solved_puzzles,
            total_puzzles,
        }
    }

    /// Percentage of puzzles solved; 0 when the labyrinth has no puzzles.
    pub fn progress_pct(&self) -> f64 {
        if self.total_puzzles == 0 {
            return 0.0;
        }
        100.0 * f64::from(self.solved_puzzles) / f64::from(self.total_puzzles)
    }

    pub fn stage(&self) -> Stage {
        let raw = 1.0 + (self.progress_pct() / 20.0).floor();
        Stage::new(raw.min(f64::from(Stage::LAST.0)) as u8)
    }

    pub fn hint_band(&self) -> HintBand {
        let pct = self.progress_pct();
        if pct < 30.0 {
            HintBand::Easy
        } else if pct < 70.0 {
            HintBand::Medium
        } else {
            HintBand::Hard
        }
    }

    /// [`Self::hint_band`] raised one band per `step` turns stuck, by at
    /// most two. A `step` of 0 leaves the band alone.
    pub fn hint_band_when_stuck(&self, stuck_count: u32, step: u32) -> HintBand {
        let band = self.hint_band();
        match stuck_count.checked_div(step) {
            Some(raise) => band.raised(raise.min(2)),
            None => band,
        }
    }

    pub fn encounter_chance(&self) -> f64 {
        (0.1 + 0.05 * self.stage().steps()).min(Self::MAX_ENCOUNTER_CHANCE)
    }

    pub fn boss_health(&self, base: u32) -> u32 {
        base + 20 * u32::from(self.stage().get() - 1)
    }

    pub fn attack_multiplier(&self) -> f64 {
        1.0 + 0.2 * self.stage().steps()
    }

    pub fn damage_multiplier(&self) -> f64 {
        1.0 + 0.15 * self.stage().steps()
    }

    pub fn puzzle_complexity(&self, base: f64) -> f64 {
        (base + 0.5 * self.stage().steps()).min(Self::MAX_PUZZLE_COMPLEXITY)
    }

    /// Heuristic weights with the stage escalation applied to the puzzle and
    /// urgency terms. Stage 1 returns `base` unchanged.
    pub fn scaled_weights(&self, base: &HeuristicWeights) -> HeuristicWeights {
        let steps = self.stage().steps();
        HeuristicWeights {
            puzzle: base.puzzle + HeuristicWeights::PUZZLE_STEP * steps,
            urgency: base.urgency + HeuristicWeights::URGENCY_STEP * steps,
            ..base.clone()
        }
    }
}
