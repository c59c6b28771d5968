//! Difficulty table over puzzle progress.

use anyhow::{Result, bail};
use clap::Parser;
use guidance_core::DifficultyModel;

/// Base boss health used for the table.
const BASE_BOSS_HEALTH: u32 = 100;

/// Show how difficulty scales with puzzle progress
#[derive(Parser, Debug)]
pub struct Stages {
    /// Total number of puzzles in the labyrinth
    #[arg(long, default_value = "4")]
    pub total: u32,
}

impl Stages {
    pub fn execute(self) -> Result<()> {
        if self.total == 0 {
            bail!("--total must be at least 1");
        }

        println!(
            "{:>6}  {:>8}  {:>5}  {:>6}  {:>9}  {:>4}  {:>6}",
            "solved", "progress", "stage", "hints", "encounter", "boss", "damage"
        );
        for solved in 0..=self.total {
            let model = DifficultyModel::from_progress(solved, self.total);
            println!(
                "{:>6}  {:>7.0}%  {:>5}  {:>6}  {:>8.0}%  {:>4}  {:>5.2}x",
                solved,
                model.progress_pct(),
                model.stage().get(),
                model.hint_band().as_ref(),
                model.encounter_chance() * 100.0,
                model.boss_health(BASE_BOSS_HEALTH),
                model.damage_multiplier(),
            );
        }
        Ok(())
    }
}
