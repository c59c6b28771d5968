//! Events emitted by session operations.

use std::fmt;

use guidance_core::{Funding, HintTier, LocationId};

/// Something that happened during a session operation.
///
/// Events are ordered as they occurred within one call. The presentation
/// layer renders them; nothing in the session reads them back.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    Moved {
        from: LocationId,
        to: LocationId,
    },
    Discovered {
        location: LocationId,
        points: i32,
    },
    HazardDamage {
        hazard: String,
        damage: i32,
        protected_by: Option<String>,
    },
    ItemsCollected {
        items: Vec<String>,
    },
    StuckIncreased {
        location: LocationId,
        stuck_count: u32,
    },
    PuzzleAvailable {
        question: String,
        options: Vec<String>,
    },
    BossAppears {
        name: String,
    },
    EncounterStarted {
        name: String,
        description: String,
        options: Vec<String>,
    },
    EncounterResolved {
        action: String,
        outcome: String,
        score_delta: i32,
    },
    PuzzleSolved {
        location: LocationId,
        reward: i32,
        solved: u32,
        total: u32,
    },
    PuzzleFailed {
        location: LocationId,
        penalty: i32,
        attempts: u32,
    },
    PuzzleSkipped {
        location: LocationId,
        penalty: i32,
    },
    BonusToken {
        tokens: u32,
    },
    PlayerStrikes {
        damage: i32,
        boss_health: i32,
    },
    PlayerDefends,
    BossStrikes {
        attack: String,
        damage: i32,
    },
    Escaped,
    EscapeFailed,
    BossDefeated {
        name: String,
        points: i32,
    },
    ItemUsed {
        item: String,
        healed: i32,
        health: i32,
    },
    HintGiven {
        hint: String,
        /// Tier text for the current room.
        guidance: String,
        tier: HintTier,
        cost: u32,
        funding: Funding,
        health_cost: i32,
    },
    HintCancelled {
        consecutive: u32,
    },
    HintFeedback {
        helpful: bool,
        stuck_count: u32,
    },
    RouteFound {
        moves: Vec<String>,
        total_cost: f64,
    },
    NoRoute {
        goal: LocationId,
    },
    PlayerDefeated,
    Victory {
        score: i32,
    },
}

impl fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Moved { from, to } => write!(f, "You travel from {from} to {to}."),
            Self::Discovered { location, points } => {
                write!(f, "+{points} points for discovering {location}!")
            }
            Self::HazardDamage {
                hazard,
                damage,
                protected_by: Some(item),
            } => write!(f, "{hazard} causes {damage} damage (reduced by {item})."),
            Self::HazardDamage { hazard, damage, .. } => {
                write!(f, "{hazard} causes {damage} damage!")
            }
            Self::ItemsCollected { items } => write!(f, "You find: {}.", items.join(", ")),
            Self::StuckIncreased {
                location,
                stuck_count,
            } => write!(f, "You seem stuck in {location} ({stuck_count})."),
            Self::PuzzleAvailable { question, options } => {
                write!(f, "Puzzle: {question}")?;
                for (index, option) in options.iter().enumerate() {
                    write!(f, "\n  [{index}] {option}")?;
                }
                Ok(())
            }
            Self::BossAppears { name } => write!(f, "The {name} blocks your way!"),
            Self::EncounterStarted {
                name,
                description,
                options,
            } => {
                write!(f, "Encounter: {name}. {description}")?;
                for (index, option) in options.iter().enumerate() {
                    write!(f, "\n  [{index}] {option}")?;
                }
                Ok(())
            }
            Self::EncounterResolved {
                outcome,
                score_delta,
                ..
            } => write!(f, "{outcome} Score change: {score_delta:+}"),
            Self::PuzzleSolved {
                reward,
                solved,
                total,
                ..
            } => write!(f, "Correct! +{reward} points ({solved}/{total} puzzles solved)."),
            Self::PuzzleFailed {
                penalty, attempts, ..
            } => write!(f, "Incorrect. -{penalty} points (attempt {attempts})."),
            Self::PuzzleSkipped { penalty, .. } => {
                write!(f, "You leave the puzzle for later. -{penalty} points.")
            }
            Self::BonusToken { tokens } => {
                write!(f, "LUMOS grants you a hint token ({tokens} available).")
            }
            Self::PlayerStrikes {
                damage,
                boss_health,
            } => write!(f, "You strike for {damage} damage ({boss_health} left)."),
            Self::PlayerDefends => write!(f, "You brace yourself."),
            Self::BossStrikes { attack, damage } => {
                write!(f, "It uses {attack} for {damage} damage!")
            }
            Self::Escaped => write!(f, "You escaped!"),
            Self::EscapeFailed => write!(f, "Couldn't escape!"),
            Self::BossDefeated { name, points } => {
                write!(f, "You defeated the {name}! +{points} points.")
            }
            Self::ItemUsed {
                item,
                healed,
                health,
            } => write!(f, "The {item} restores {healed} health ({health} now)."),
            Self::HintGiven {
                hint,
                guidance,
                tier,
                cost,
                funding,
                health_cost,
            } => {
                write!(f, "LUMOS ({tier}): {guidance} {hint} [{funding}, {cost} points")?;
                if *health_cost > 0 {
                    write!(f, ", {health_cost} health")?;
                }
                write!(f, "]")
            }
            Self::HintCancelled { consecutive } => {
                write!(f, "Hint request withdrawn (streak {consecutive}).")
            }
            Self::HintFeedback {
                helpful,
                stuck_count,
            } => {
                let verdict = if *helpful { "helpful" } else { "not helpful" };
                write!(f, "Hint marked {verdict} (stuck {stuck_count}).")
            }
            Self::RouteFound { moves, total_cost } => {
                write!(f, "Route ({total_cost} cost): {}", moves.join(" -> "))
            }
            Self::NoRoute { goal } => write!(f, "No route leads to {goal}."),
            Self::PlayerDefeated => write!(f, "You have fallen in the labyrinth."),
            Self::Victory { score } => write!(f, "Victory! Final score {score}."),
        }
    }
}
