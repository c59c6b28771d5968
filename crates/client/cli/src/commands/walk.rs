//! Scripted walk through the labyrinth.

use anyhow::Result;
use clap::Parser;
use guidance_core::LocationId;
use session::{Session, SessionStatus};

use super::print_events;
use crate::config::CliConfig;

/// Walk through a list of locations and print what happens
#[derive(Parser, Debug)]
pub struct Walk {
    /// Locations to enter, in order
    #[arg(required = true)]
    pub locations: Vec<String>,
}

impl Walk {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let (labyrinth, guidance) = config.load_content()?;
        let mut session = Session::new(labyrinth, guidance, config.seed)?;
        println!("You stand in the {}.", session.location());

        for name in self.locations {
            let events = session.move_to(&LocationId::from(name))?;
            print_events(&events);
            if session.status() != SessionStatus::Active {
                break;
            }
        }

        println!(
            "Health {}, score {}, tokens {}, turn {}.",
            session.health(),
            session.score(),
            session.tokens(),
            session.turns()
        );
        Ok(())
    }
}
