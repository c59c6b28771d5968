use std::collections::{BTreeMap, BTreeSet};

use guidance_content::{Encounter, ItemRules, Labyrinth};
use guidance_core::rng::{ActionSeed, RngOracle, roll};
use guidance_core::{
    DifficultyModel, GameStateSnapshot, GuidanceConfig, GuidanceEngine, HintEconomyLedger,
    HintTier, LocationGraph, LocationId, PcgRng, Route,
};
use tracing::{debug, info};

use crate::combat::{self, BossAction, BossFight, RoundOutcome};
use crate::encounter;
use crate::error::{Result, SessionError};
use crate::event::SessionEvent;

/// Score awarded for entering a location for the first time.
pub const DISCOVERY_POINTS: i32 = 10;
/// Score lost on a wrong puzzle answer.
pub const WRONG_ANSWER_PENALTY: i32 = 10;
/// Score lost when walking away from a puzzle.
pub const SKIP_PENALTY: i32 = 5;
/// Score awarded for defeating a boss.
pub const BOSS_POINTS: i32 = 100;
/// Odds of a free hint token after a solved puzzle.
pub const BONUS_TOKEN_CHANCE: f64 = 0.5;

/// Turn after which lingering at an unsolved puzzle counts as being stuck.
const STUCK_AFTER_TURN: u32 = 3;
/// Visits to one location beyond which lingering counts as being stuck.
const STUCK_AFTER_VISITS: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SessionStatus {
    Active,
    Won,
    Lost,
}

/// One run through a labyrinth.
///
/// Randomness comes from the injected oracle `R`, seeded from the game seed
/// and an action counter, so a session replays identically from its seed.
pub struct Session<R: RngOracle = PcgRng> {
    name: String,
    graph: LocationGraph,
    items: ItemRules,
    encounters: Vec<Encounter>,
    engine: GuidanceEngine,
    ledger: HintEconomyLedger,

    location: LocationId,
    inventory: BTreeSet<String>,
    solved_puzzles: u32,
    total_puzzles: u32,
    turns: u32,
    hint_history: Vec<String>,
    visits: BTreeMap<LocationId, u32>,
    skipped_puzzles: u32,

    pending_encounter: Option<Encounter>,
    fight: Option<(LocationId, BossFight)>,
    status: SessionStatus,

    rng: R,
    seed: u64,
    nonce: u64,
}

impl Session<PcgRng> {
    pub fn new(labyrinth: Labyrinth, config: GuidanceConfig, seed: u64) -> Result<Self> {
        Self::with_rng(labyrinth, config, seed, PcgRng)
    }
}

impl<R: RngOracle> Session<R> {
    /// Starts a session at the labyrinth's start location.
    ///
    /// The start counts as visited and discovered, and its items are picked
    /// up, without awarding discovery points.
    pub fn with_rng(
        labyrinth: Labyrinth,
        config: GuidanceConfig,
        seed: u64,
        rng: R,
    ) -> Result<Self> {
        let Labyrinth {
            name,
            start,
            mut graph,
            items,
            encounters,
            tier_hints,
        } = labyrinth;

        graph.mark_visited(&start)?;
        let inventory: BTreeSet<String> = graph.collect_items(&start)?.into_iter().collect();
        let total_puzzles = graph.total_puzzles();
        let ledger = HintEconomyLedger::new(&config.economy);

        info!(labyrinth = %name, start = %start, seed, "session started");

        Ok(Self {
            name,
            graph,
            items,
            encounters,
            engine: GuidanceEngine::new(config).with_tier_hints(tier_hints),
            ledger,
            visits: BTreeMap::from([(start.clone(), 1)]),
            location: start,
            inventory,
            solved_puzzles: 0,
            total_puzzles,
            turns: 0,
            hint_history: Vec::new(),
            skipped_puzzles: 0,
            pending_encounter: None,
            fight: None,
            status: SessionStatus::Active,
            rng,
            seed,
            nonce: 0,
        })
    }

    // ===== accessors =====

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn graph(&self) -> &LocationGraph {
        &self.graph
    }

    pub fn location(&self) -> &LocationId {
        &self.location
    }

    pub fn inventory(&self) -> &BTreeSet<String> {
        &self.inventory
    }

    pub fn score(&self) -> i32 {
        self.ledger.score()
    }

    pub fn health(&self) -> i32 {
        self.ledger.health()
    }

    pub fn tokens(&self) -> u32 {
        self.ledger.tokens()
    }

    pub fn ledger(&self) -> &HintEconomyLedger {
        &self.ledger
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn hint_history(&self) -> &[String] {
        &self.hint_history
    }

    pub fn pending_encounter(&self) -> Option<&Encounter> {
        self.pending_encounter.as_ref()
    }

    pub fn difficulty(&self) -> DifficultyModel {
        DifficultyModel::from_progress(self.solved_puzzles, self.total_puzzles)
    }

    /// Fresh value snapshot of the player and world for the guidance core.
    pub fn snapshot(&self) -> GameStateSnapshot {
        GameStateSnapshot {
            location: self.location.clone(),
            inventory: self.inventory.clone(),
            solved_puzzles: self.solved_puzzles,
            total_puzzles: self.total_puzzles,
            turns: self.turns,
            health: self.ledger.health(),
            hint_history: self.hint_history.clone(),
            visits: self.visits.clone(),
            skipped_puzzles: self.skipped_puzzles,
        }
    }

    // ===== operations =====

    /// Moves to an adjacent, unlocked location and processes the entry.
    pub fn move_to(&mut self, destination: &LocationId) -> Result<Vec<SessionEvent>> {
        self.ensure_active()?;
        let target = self.graph.require(destination)?;

        let adjacent = self
            .graph
            .neighbors(&self.location)?
            .iter()
            .any(|(next, _)| next == destination);
        if !adjacent {
            return Err(SessionError::NotAdjacent {
                from: self.location.clone(),
                to: destination.clone(),
            });
        }
        if target.is_locked(&self.inventory) {
            return Err(SessionError::Locked {
                location: destination.clone(),
                missing: target
                    .missing_items(&self.inventory)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            });
        }

        self.nonce += 1;
        let from = std::mem::replace(&mut self.location, destination.clone());
        let mut events = vec![SessionEvent::Moved {
            from,
            to: destination.clone(),
        }];

        self.pending_encounter = None;
        self.ledger.enter_location();
        self.turns += 1;
        let visits = {
            let count = self.visits.entry(destination.clone()).or_insert(0);
            *count += 1;
            *count
        };

        let first_visit = self.graph.mark_visited(destination)?;
        if first_visit {
            self.ledger.credit_score(DISCOVERY_POINTS);
            events.push(SessionEvent::Discovered {
                location: destination.clone(),
                points: DISCOVERY_POINTS,
            });
        }

        self.apply_hazards(destination, &mut events)?;
        if self.ledger.health() <= 0 {
            self.lose(&mut events);
            return Ok(events);
        }

        let found = self.graph.collect_items(destination)?;
        if !found.is_empty() {
            self.inventory.extend(found.iter().cloned());
            events.push(SessionEvent::ItemsCollected { items: found });
        }

        let node = self.graph.require(destination)?;
        let open_puzzle = node.open_puzzle().is_some();
        if self.turns > STUCK_AFTER_TURN && visits > STUCK_AFTER_VISITS && open_puzzle {
            let stuck_count = self.graph.adjust_stuck(destination, 1)?;
            events.push(SessionEvent::StuckIncreased {
                location: destination.clone(),
                stuck_count,
            });
        }

        if first_visit {
            let chance = self.difficulty().encounter_chance();
            let seeds = ActionSeed::new(self.seed, self.nonce);
            let rolled = encounter::roll_encounter(
                &self.rng,
                |context| seeds.roll(context),
                chance,
                &self.encounters,
            );
            if let Some(found) = rolled {
                events.push(SessionEvent::EncounterStarted {
                    name: found.name.clone(),
                    description: found.description.clone(),
                    options: found.options.iter().map(|option| option.action.clone()).collect(),
                });
                self.pending_encounter = Some(found.clone());
            }
        }

        let node = self.graph.require(destination)?;
        if let Some(puzzle) = node.open_puzzle() {
            events.push(SessionEvent::PuzzleAvailable {
                question: puzzle.question.clone(),
                options: puzzle.options.clone(),
            });
        }
        if let Some(boss) = node.active_boss() {
            events.push(SessionEvent::BossAppears {
                name: boss.name.clone(),
            });
        }

        debug!(
            location = %destination,
            turn = self.turns,
            health = self.ledger.health(),
            score = self.ledger.score(),
            "entered location"
        );
        Ok(events)
    }

    /// Answers the puzzle at the current location with option `option`.
    pub fn solve_puzzle(&mut self, option: usize) -> Result<Vec<SessionEvent>> {
        self.ensure_active()?;
        let location = self.location.clone();
        let puzzle = self
            .graph
            .require(&location)?
            .open_puzzle()
            .ok_or_else(|| SessionError::NoPuzzle(location.clone()))?;
        if option >= puzzle.options.len() {
            return Err(SessionError::InvalidOption {
                option,
                available: puzzle.options.len(),
            });
        }
        let correct = option == puzzle.correct_option;
        let reward = puzzle.reward as i32;

        self.nonce += 1;
        let attempts = self.graph.record_puzzle_attempt(&location)?.unwrap_or(0);
        let mut events = Vec::new();

        if correct {
            self.graph.mark_puzzle_solved(&location)?;
            self.solved_puzzles += 1;
            self.ledger.credit_score(reward);
            events.push(SessionEvent::PuzzleSolved {
                location: location.clone(),
                reward,
                solved: self.solved_puzzles,
                total: self.total_puzzles,
            });

            let seed = ActionSeed::new(self.seed, self.nonce).roll(roll::BONUS_TOKEN);
            if self.rng.chance(seed, BONUS_TOKEN_CHANCE) {
                self.ledger.grant_token();
                events.push(SessionEvent::BonusToken {
                    tokens: self.ledger.tokens(),
                });
            }
            info!(%location, solved = self.solved_puzzles, "puzzle solved");
        } else {
            self.ledger.debit_score(WRONG_ANSWER_PENALTY);
            events.push(SessionEvent::PuzzleFailed {
                location,
                penalty: WRONG_ANSWER_PENALTY,
                attempts,
            });
        }
        Ok(events)
    }

    pub fn skip_puzzle(&mut self) -> Result<Vec<SessionEvent>> {
        self.ensure_active()?;
        let location = self.location.clone();
        if self.graph.require(&location)?.open_puzzle().is_none() {
            return Err(SessionError::NoPuzzle(location));
        }
        self.ledger.debit_score(SKIP_PENALTY);
        self.skipped_puzzles += 1;
        Ok(vec![SessionEvent::PuzzleSkipped {
            location,
            penalty: SKIP_PENALTY,
        }])
    }

    /// Plays one round against the boss at the current location.
    pub fn fight_boss(&mut self, action: BossAction) -> Result<Vec<SessionEvent>> {
        self.ensure_active()?;
        let location = self.location.clone();
        let boss = self
            .graph
            .require(&location)?
            .active_boss()
            .cloned()
            .ok_or_else(|| SessionError::NoBoss(location.clone()))?;

        let difficulty = self.difficulty();
        let mut fight = match &self.fight {
            Some((at, fight)) if *at == location => *fight,
            _ => BossFight::new(difficulty.boss_health(boss.health)),
        };
        let has_weakness = boss
            .weakness
            .as_ref()
            .is_some_and(|item| self.inventory.contains(item));

        let nonce = self.nonce + 1;
        let seeds = ActionSeed::new(self.seed, nonce);
        let round = combat::resolve_round(
            &self.rng,
            |context| seeds.roll(context),
            &boss,
            &mut fight,
            action,
            has_weakness,
            difficulty.damage_multiplier(),
        )?;
        self.nonce = nonce;
        self.fight = Some((location.clone(), fight));

        let mut events = round.events;
        self.ledger.adjust_health(-round.damage_taken);

        match round.outcome {
            RoundOutcome::BossDefeated => {
                self.graph.mark_boss_defeated(&location)?;
                self.fight = None;
                self.ledger.credit_score(BOSS_POINTS);
                events.push(SessionEvent::BossDefeated {
                    name: boss.name.clone(),
                    points: BOSS_POINTS,
                });
                self.status = SessionStatus::Won;
                events.push(SessionEvent::Victory {
                    score: self.ledger.score(),
                });
                info!(boss = %boss.name, score = self.ledger.score(), "boss defeated");
            }
            RoundOutcome::Escaped | RoundOutcome::Continue => {
                if self.ledger.health() <= 0 {
                    self.lose(&mut events);
                }
            }
        }
        Ok(events)
    }

    /// Uses a healing item from the inventory.
    pub fn use_item(&mut self, item: &str) -> Result<Vec<SessionEvent>> {
        self.ensure_active()?;
        let healing = self
            .items
            .healing_for(item)
            .filter(|_| self.inventory.contains(item))
            .ok_or_else(|| SessionError::ItemNotUsable(item.to_string()))?;

        let before = self.ledger.health();
        let health = self.ledger.adjust_health(healing);
        self.inventory.remove(item);
        Ok(vec![SessionEvent::ItemUsed {
            item: item.to_string(),
            healed: health - before,
            health,
        }])
    }

    /// Picks option `choice` of the pending encounter.
    pub fn resolve_encounter(&mut self, choice: usize) -> Result<Vec<SessionEvent>> {
        self.ensure_active()?;
        let encounter = self
            .pending_encounter
            .as_ref()
            .ok_or(SessionError::NoEncounter)?;
        let option = encounter
            .options
            .get(choice)
            .ok_or(SessionError::InvalidOption {
                option: choice,
                available: encounter.options.len(),
            })?
            .clone();

        self.pending_encounter = None;
        self.ledger.credit_score(option.score_delta);
        Ok(vec![SessionEvent::EncounterResolved {
            action: option.action,
            outcome: option.outcome,
            score_delta: option.score_delta,
        }])
    }

    /// Asks the guide for a hint of `tier`.
    ///
    /// A rejected request leaves the session unchanged.
    pub fn request_hint(&mut self, tier: HintTier) -> Result<Vec<SessionEvent>> {
        self.ensure_active()?;
        let snapshot = self.snapshot();
        let selection = self
            .engine
            .select_hint(&self.graph, &snapshot, &mut self.ledger, tier)?;

        self.hint_history = selection.history;
        let mut events = vec![SessionEvent::HintGiven {
            hint: selection.hint,
            guidance: selection.guidance,
            tier,
            cost: selection.charge.final_cost,
            funding: selection.charge.funding,
            health_cost: selection.charge.health_cost,
        }];
        if self.ledger.health() <= 0 {
            self.lose(&mut events);
        }
        Ok(events)
    }

    pub fn cancel_hint(&mut self) -> Result<Vec<SessionEvent>> {
        self.ensure_active()?;
        self.ledger.cancel();
        Ok(vec![SessionEvent::HintCancelled {
            consecutive: self.ledger.consecutive_requests(),
        }])
    }

    /// Records whether the last hint helped; helpful hints ease the current
    /// location's stuck counter, unhelpful ones raise it.
    pub fn hint_feedback(&mut self, helpful: bool) -> Result<Vec<SessionEvent>> {
        self.ensure_active()?;
        let delta = if helpful { -1 } else { 1 };
        let stuck_count = self.graph.adjust_stuck(&self.location, delta)?;
        Ok(vec![SessionEvent::HintFeedback {
            helpful,
            stuck_count,
        }])
    }

    /// Least-cost route from the current location to `goal`.
    pub fn route_to(&self, goal: &LocationId) -> Result<(Route, Vec<SessionEvent>)> {
        let route = self.engine.find_route(
            &self.graph,
            &self.location,
            goal,
            &self.inventory,
            &self.items.protective_set(),
        )?;
        let event = if route.is_reachable() {
            SessionEvent::RouteFound {
                moves: route.moves.clone(),
                total_cost: route.total_cost,
            }
        } else {
            SessionEvent::NoRoute { goal: goal.clone() }
        };
        Ok((route, vec![event]))
    }

    // ===== internals =====

    fn ensure_active(&self) -> Result<()> {
        match self.status {
            SessionStatus::Active => Ok(()),
            status => Err(SessionError::GameOver(status)),
        }
    }

    fn apply_hazards(&mut self, at: &LocationId, events: &mut Vec<SessionEvent>) -> Result<()> {
        let hazards = self.graph.require(at)?.hazards.clone();
        let protection = self
            .items
            .best_protection(&self.inventory)
            .map(|(item, percent)| (item.to_string(), percent));

        for (hazard, damage) in hazards {
            let (damage, protected_by) = match &protection {
                Some((item, percent)) => {
                    let reduced = damage - damage * (*percent).min(100) / 100;
                    (reduced, Some(item.clone()))
                }
                None => (damage, None),
            };
            let damage = damage as i32;
            self.ledger.adjust_health(-damage);
            events.push(SessionEvent::HazardDamage {
                hazard,
                damage,
                protected_by,
            });
        }
        Ok(())
    }

    fn lose(&mut self, events: &mut Vec<SessionEvent>) {
        self.status = SessionStatus::Lost;
        events.push(SessionEvent::PlayerDefeated);
        info!(location = %self.location, score = self.ledger.score(), "session lost");
    }
}
