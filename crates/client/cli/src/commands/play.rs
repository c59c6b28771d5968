//! Interactive session over stdin.
//!
//! One command per line. Rejected actions are reported and the session
//! carries on; only I/O and content loading abort the loop.

use std::io::{self, BufRead, Write};

use anyhow::{Result, anyhow};
use clap::Parser;
use guidance_core::{GuidanceFault, HintTier, LocationId};
use session::{BossAction, Session, SessionEvent, SessionStatus};

use super::print_events;
use crate::config::CliConfig;

const HELP: &str = "\
Commands:
  go <location>        move to an adjacent location
  solve <n>            answer the puzzle here with option n
  skip                 leave the puzzle for later
  fight <action>       attack, defend, use_weakness or flee
  use <item>           use a healing item
  choose <n>           respond to the current encounter
  hint [tier]          vague (default), moderate, specific or explicit
  cancel               withdraw the last hint request
  feedback <yes|no>    tell LUMOS whether the hint helped
  route <location>     cheapest route from here
  status               show health, score and inventory
  quit                 leave the labyrinth";

/// Play an interactive session on stdin
#[derive(Parser, Debug)]
pub struct Play;

impl Play {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let (labyrinth, guidance) = config.load_content()?;
        let mut session = Session::new(labyrinth, guidance, config.seed)?;

        println!("Welcome to {}. Type 'help' for commands.", session.name());
        print_status(&session);

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        loop {
            print!("> ");
            io::stdout().flush()?;

            let Some(line) = lines.next().transpose()? else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
            let rest = rest.trim();

            match verb {
                "quit" | "exit" => break,
                "help" => println!("{HELP}"),
                "status" => print_status(&session),
                _ => match dispatch(&mut session, verb, rest) {
                    Ok(events) => print_events(&events),
                    Err(err) => println!("Cannot do that: {err}"),
                },
            }

            if session.status() != SessionStatus::Active {
                break;
            }
        }

        println!(
            "The session ends ({}) with score {}.",
            session.status(),
            session.score()
        );
        Ok(())
    }
}

fn dispatch(session: &mut Session, verb: &str, rest: &str) -> Result<Vec<SessionEvent>> {
    let events = match verb {
        "go" => session.move_to(&LocationId::from(rest)),
        "solve" => session.solve_puzzle(parse_index(rest)?),
        "skip" => session.skip_puzzle(),
        "fight" => {
            let action: BossAction = rest
                .parse()
                .map_err(|_| anyhow!("unknown fight action '{rest}'"))?;
            session.fight_boss(action)
        }
        "use" => session.use_item(rest),
        "choose" => session.resolve_encounter(parse_index(rest)?),
        "hint" => {
            let tier = if rest.is_empty() {
                HintTier::lowest()
            } else {
                rest.parse()
                    .map_err(|_| anyhow!("unknown hint tier '{rest}'"))?
            };
            session.request_hint(tier)
        }
        "cancel" => session.cancel_hint(),
        "feedback" => session.hint_feedback(matches!(rest, "yes" | "y" | "helpful")),
        "route" => session
            .route_to(&LocationId::from(rest))
            .map(|(_, events)| events),
        _ => return Err(anyhow!("unknown command '{verb}', try 'help'")),
    };

    events.map_err(|err| {
        tracing::debug!(code = err.error_code(), "action rejected");
        err.into()
    })
}

fn parse_index(value: &str) -> Result<usize> {
    value
        .parse()
        .map_err(|_| anyhow!("expected an option number, got '{value}'"))
}

fn print_status(session: &Session) {
    let inventory: Vec<&str> = session.inventory().iter().map(String::as_str).collect();
    println!(
        "{} | health {} | score {} | tokens {} | turn {}",
        session.location(),
        session.health(),
        session.score(),
        session.tokens(),
        session.turns()
    );
    if !inventory.is_empty() {
        println!("Carrying: {}", inventory.join(", "));
    }
    if let Some(encounter) = session.pending_encounter() {
        println!("{} awaits your response.", encounter.name);
    }
}
