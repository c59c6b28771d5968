//! Cheapest route between two locations.

use std::collections::BTreeSet;

use anyhow::Result;
use clap::Parser;
use guidance_core::{GuidanceEngine, LocationId};

use crate::config::CliConfig;

/// Find the cheapest route between two locations
#[derive(Parser, Debug)]
pub struct Route {
    /// Starting location
    pub from: String,

    /// Destination
    pub to: String,

    /// Item held while travelling (repeatable)
    #[arg(long = "item")]
    pub items: Vec<String>,
}

impl Route {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let (labyrinth, guidance) = config.load_content()?;
        let engine = GuidanceEngine::new(guidance);
        let inventory: BTreeSet<String> = self.items.into_iter().collect();

        let route = engine.find_route(
            &labyrinth.graph,
            &LocationId::from(self.from.as_str()),
            &LocationId::from(self.to.as_str()),
            &inventory,
            &labyrinth.items.protective_set(),
        )?;

        if !route.is_reachable() {
            println!("No route from {} to {}.", self.from, self.to);
            return Ok(());
        }

        println!("Route from {} to {} (cost {}):", self.from, self.to, route.total_cost);
        for (step, movement) in route.moves.iter().enumerate() {
            println!("  {}. {}", step + 1, movement);
        }
        Ok(())
    }
}
