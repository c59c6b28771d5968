//! One-off hint request at an arbitrary location.

use anyhow::{Context, Result};
use clap::Parser;
use guidance_core::{
    GameStateSnapshot, GuidanceEngine, GuidanceFault, HintEconomyLedger, HintTier, LocationId,
};

use crate::config::CliConfig;

/// Ask the guide for a hint at a location
#[derive(Parser, Debug)]
pub struct Hint {
    /// Hint tier: vague, moderate, specific or explicit
    #[arg(long, default_value = "vague")]
    pub tier: HintTier,

    /// Location to ask from (defaults to the labyrinth start)
    #[arg(long)]
    pub at: Option<String>,

    /// Item held (repeatable)
    #[arg(long = "item")]
    pub items: Vec<String>,

    /// Score available to pay for the hint
    #[arg(long, default_value = "0")]
    pub score: i32,

    /// Puzzles already solved
    #[arg(long, default_value = "0")]
    pub solved: u32,
}

impl Hint {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let (labyrinth, guidance) = config.load_content()?;
        let location = self
            .at
            .map(LocationId::from)
            .unwrap_or_else(|| labyrinth.start.clone());

        let mut snapshot = GameStateSnapshot::new(location, labyrinth.graph.total_puzzles());
        snapshot.solved_puzzles = self.solved.min(snapshot.total_puzzles);
        for item in self.items {
            snapshot = snapshot.with_item(item);
        }

        let mut ledger = HintEconomyLedger::new(&guidance.economy).with_score(self.score);
        let engine = GuidanceEngine::new(guidance).with_tier_hints(labyrinth.tier_hints.clone());

        let selection = engine
            .select_hint(&labyrinth.graph, &snapshot, &mut ledger, self.tier)
            .map_err(|err| {
                tracing::debug!(code = err.error_code(), severity = ?err.severity(), "hint refused");
                err
            })
            .context("Hint request failed")?;

        println!("LUMOS ({}): {}", self.tier, selection.guidance);
        println!("  next step: {}", selection.hint);
        println!(
            "  paid with {} ({} points, x{} penalty), {} tokens left",
            selection.charge.funding,
            selection.charge.final_cost,
            selection.charge.penalty_multiplier,
            ledger.tokens(),
        );
        println!(
            "  search: {} after {} nodes",
            selection.outcome.reason, selection.outcome.popped
        );
        Ok(())
    }
}
