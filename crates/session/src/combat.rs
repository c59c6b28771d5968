//! Boss combat rounds.
//!
//! A round is resolved from the boss descriptor, the running fight state and
//! a handful of rolls. Player health is not touched here; the round reports
//! the damage taken and the session applies it.

use guidance_core::BossState;
use guidance_core::rng::{RngOracle, roll};

use crate::error::{Result, SessionError};
use crate::event::SessionEvent;

/// What the player does in a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BossAction {
    Attack,
    Defend,
    UseWeakness,
    Flee,
}

/// Running state of a boss fight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BossFight {
    pub boss_health: i32,
}

impl BossFight {
    pub fn new(boss_health: u32) -> Self {
        Self {
            boss_health: boss_health as i32,
        }
    }
}

/// How a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    Continue,
    BossDefeated,
    Escaped,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Round {
    pub events: Vec<SessionEvent>,
    pub damage_taken: i32,
    pub outcome: RoundOutcome,
}

/// Damage ranges and odds of a round.
pub mod tuning {
    pub const ATTACK: (u32, u32) = (10, 20);
    pub const WEAKNESS_BONUS: i32 = 5;
    pub const WEAKNESS_STRIKE: (u32, u32) = (30, 50);
    pub const COUNTER: (u32, u32) = (15, 25);
    pub const DEFENDED_COUNTER: (u32, u32) = (5, 15);
    pub const FAILED_ESCAPE_COUNTER: (u32, u32) = (20, 30);
    pub const ESCAPE_CHANCE: f64 = 0.3;
}

/// Resolves one round of combat.
///
/// `seed` maps a roll context from [`roll`] to the seed of that roll.
pub fn resolve_round<R, S>(
    rng: &R,
    seed: S,
    boss: &BossState,
    fight: &mut BossFight,
    action: BossAction,
    has_weakness: bool,
    damage_multiplier: f64,
) -> Result<Round>
where
    R: RngOracle + ?Sized,
    S: Fn(u32) -> u64,
{
    let mut events = Vec::new();
    let mut damage_taken = 0;

    let counter = |range: (u32, u32), events: &mut Vec<SessionEvent>| -> i32 {
        let raw = rng.range(seed(roll::BOSS_DAMAGE), range.0, range.1);
        let damage = (f64::from(raw) * damage_multiplier).floor() as i32;
        let attack = rng
            .pick(seed(roll::BOSS_ATTACK), boss.attacks.len())
            .map_or_else(|| "a crushing blow".to_string(), |index| boss.attacks[index].clone());
        events.push(SessionEvent::BossStrikes { attack, damage });
        damage
    };

    match action {
        BossAction::Attack => {
            let mut damage =
                rng.range(seed(roll::PLAYER_DAMAGE), tuning::ATTACK.0, tuning::ATTACK.1) as i32;
            if has_weakness {
                damage += tuning::WEAKNESS_BONUS;
            }
            fight.boss_health -= damage;
            events.push(SessionEvent::PlayerStrikes {
                damage,
                boss_health: fight.boss_health.max(0),
            });
            if fight.boss_health > 0 {
                damage_taken += counter(tuning::COUNTER, &mut events);
            }
        }
        BossAction::Defend => {
            events.push(SessionEvent::PlayerDefends);
            damage_taken += counter(tuning::DEFENDED_COUNTER, &mut events);
        }
        BossAction::UseWeakness => {
            let Some(weakness) = boss.weakness.as_deref().filter(|_| has_weakness) else {
                let item = boss.weakness.clone().unwrap_or_else(|| "weakness".to_string());
                return Err(SessionError::ItemNotUsable(item));
            };
            let damage = rng.range(
                seed(roll::PLAYER_DAMAGE),
                tuning::WEAKNESS_STRIKE.0,
                tuning::WEAKNESS_STRIKE.1,
            ) as i32;
            fight.boss_health -= damage;
            tracing::debug!(item = weakness, damage, "weakness used");
            events.push(SessionEvent::PlayerStrikes {
                damage,
                boss_health: fight.boss_health.max(0),
            });
        }
        BossAction::Flee => {
            if rng.chance(seed(roll::FLEE), tuning::ESCAPE_CHANCE) {
                events.push(SessionEvent::Escaped);
                return Ok(Round {
                    events,
                    damage_taken,
                    outcome: RoundOutcome::Escaped,
                });
            }
            events.push(SessionEvent::EscapeFailed);
            damage_taken += counter(tuning::FAILED_ESCAPE_COUNTER, &mut events);
        }
    }

    let outcome = if fight.boss_health <= 0 {
        RoundOutcome::BossDefeated
    } else {
        RoundOutcome::Continue
    };

    Ok(Round {
        events,
        damage_taken,
        outcome,
    })
}
