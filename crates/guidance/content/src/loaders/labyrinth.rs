//! Labyrinth loader.
//!
//! The RON layout mirrors how a designer thinks about a room rather than the
//! core's node struct: connections, requirements and optional puzzle/boss
//! blocks. Conversion validates the result through [`LocationGraph::new`].

use std::collections::BTreeMap;
use std::path::Path;

use guidance_core::{
    BossState, LocationGraph, LocationId, LocationNode, LocationTierHints, PuzzleHints,
    PuzzleState, TierHintTable, TierTexts,
};
use serde::Deserialize;
use tracing::debug;

use crate::labyrinth::{Encounter, EncounterOption, ItemRules, Labyrinth};
use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Deserialize)]
struct LabyrinthRon {
    name: String,
    start: String,
    locations: Vec<LocationRon>,
    #[serde(default)]
    protective_items: BTreeMap<String, u32>,
    #[serde(default)]
    healing_items: BTreeMap<String, i32>,
    #[serde(default)]
    encounters: Vec<EncounterRon>,
    #[serde(default)]
    tier_hints: BTreeMap<String, LocationTierHints>,
    #[serde(default)]
    default_tier_hints: Option<TierTexts>,
}

#[derive(Debug, Deserialize)]
struct LocationRon {
    name: String,
    #[serde(default)]
    description: String,
    level: u32,
    #[serde(default)]
    connections: Vec<(String, u32)>,
    #[serde(default)]
    requires: Vec<String>,
    #[serde(default)]
    hazards: BTreeMap<String, u32>,
    #[serde(default)]
    items: Vec<String>,
    #[serde(default)]
    puzzle: Option<PuzzleRon>,
    #[serde(default)]
    boss: Option<BossRon>,
}

#[derive(Debug, Deserialize)]
struct PuzzleRon {
    question: String,
    options: Vec<String>,
    answer: usize,
    complexity: f64,
    #[serde(default)]
    clue: Option<String>,
    #[serde(default)]
    hints: PuzzleHints,
    #[serde(default)]
    reward: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct BossRon {
    name: String,
    health: u32,
    #[serde(default)]
    attacks: Vec<String>,
    #[serde(default)]
    weakness: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EncounterRon {
    name: String,
    description: String,
    options: Vec<(String, String, i32)>,
}

/// Loader for labyrinth definitions in RON.
pub struct LabyrinthLoader;

impl LabyrinthLoader {
    pub fn load(path: &Path) -> LoadResult<Labyrinth> {
        let content = read_file(path)?;
        Self::parse(&content).map_err(|e| {
            anyhow::anyhow!("Failed to load labyrinth RON at {}: {}", path.display(), e)
        })
    }

    pub fn parse(content: &str) -> LoadResult<Labyrinth> {
        let data: LabyrinthRon = ron::from_str(content)?;

        let nodes = data
            .locations
            .into_iter()
            .map(convert_location)
            .collect::<LoadResult<Vec<_>>>()?;
        let graph = LocationGraph::new(nodes)?;

        let start = LocationId::new(data.start);
        if !graph.contains(&start) {
            anyhow::bail!("start location '{}' is not defined", start);
        }

        let encounters = data
            .encounters
            .into_iter()
            .map(|encounter| Encounter {
                name: encounter.name,
                description: encounter.description,
                options: encounter
                    .options
                    .into_iter()
                    .map(|(action, outcome, score_delta)| EncounterOption {
                        action,
                        outcome,
                        score_delta,
                    })
                    .collect(),
            })
            .collect();

        let mut tier_hints = TierHintTable::new(data.default_tier_hints.unwrap_or_default());
        for (location, hints) in data.tier_hints {
            let id = LocationId::new(location);
            if !graph.contains(&id) {
                anyhow::bail!("tier hints given for unknown location '{}'", id);
            }
            tier_hints = tier_hints.with_location(id, hints);
        }

        debug!(
            name = %data.name,
            locations = graph.len(),
            puzzles = graph.total_puzzles(),
            tier_hint_rooms = tier_hints.locations.len(),
            "labyrinth loaded"
        );

        Ok(Labyrinth {
            name: data.name,
            start,
            graph,
            items: ItemRules {
                protective: data.protective_items,
                healing: data.healing_items,
            },
            encounters,
            tier_hints,
        })
    }
}

fn convert_location(location: LocationRon) -> LoadResult<LocationNode> {
    let mut node = LocationNode::new(location.name, location.level)
        .with_description(location.description);

    for (to, weight) in location.connections {
        node = node.with_edge(to, weight);
    }
    for item in location.requires {
        node = node.with_required_item(item);
    }
    for (hazard, damage) in location.hazards {
        node = node.with_hazard(hazard, damage);
    }
    for item in location.items {
        node = node.with_item(item);
    }

    if let Some(puzzle) = location.puzzle {
        if puzzle.answer >= puzzle.options.len() {
            anyhow::bail!(
                "puzzle in '{}' has answer index {} but only {} options",
                node.id,
                puzzle.answer,
                puzzle.options.len()
            );
        }
        let mut state =
            PuzzleState::new(puzzle.question, puzzle.options, puzzle.answer, puzzle.complexity)
                .with_hints(puzzle.hints);
        if let Some(clue) = puzzle.clue {
            state = state.with_clue(clue);
        }
        if let Some(reward) = puzzle.reward {
            state.reward = reward;
        }
        node = node.with_puzzle(state);
    }

    if let Some(boss) = location.boss {
        let mut state = BossState::new(boss.name, boss.health);
        for attack in boss.attacks {
            state = state.with_attack(attack);
        }
        if let Some(weakness) = boss.weakness {
            state = state.with_weakness(weakness);
        }
        node = node.with_boss(state);
    }

    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ROOMS: &str = r#"
        (
            name: "Test Vault",
            start: "Hall",
            locations: [
                (
                    name: "Hall",
                    level: 1,
                    connections: [("Vault", 4)],
                    items: ["Bronze Key"],
                    puzzle: Some((
                        question: "What has keys but no locks?",
                        options: ["A Map", "A Keyboard"],
                        answer: 1,
                        complexity: 1.0,
                        clue: Some("Think about computers"),
                    )),
                ),
                (
                    name: "Vault",
                    level: 2,
                    connections: [("Hall", 4)],
                    requires: ["Bronze Key"],
                    hazards: {"Spikes": 6},
                    boss: Some((name: "Warden", health: 80, weakness: Some("Bronze Key"))),
                ),
            ],
            protective_items: {"Shield": 50},
            tier_hints: {
                "Hall": (
                    puzzle: Some((
                        vague: "Patterns reveal themselves to the patient observer...",
                        explicit: "Type on the keyboard.",
                    )),
                ),
            },
        )
    "#;

    #[test]
    fn parses_locations_and_rules() {
        let labyrinth = LabyrinthLoader::parse(TWO_ROOMS).expect("valid labyrinth");
        assert_eq!(labyrinth.start, LocationId::from("Hall"));
        assert_eq!(labyrinth.graph.len(), 2);
        assert_eq!(labyrinth.graph.total_puzzles(), 1);

        let vault = labyrinth.graph.node(&"Vault".into()).unwrap();
        assert_eq!(vault.hazard_penalty(), 6);
        assert_eq!(vault.boss.as_ref().unwrap().weakness.as_deref(), Some("Bronze Key"));

        let hall = labyrinth.graph.node(&"Hall".into()).unwrap();
        let puzzle = hall.puzzle.as_ref().unwrap();
        assert_eq!(puzzle.correct_answer(), Some("A Keyboard"));
        assert_eq!(puzzle.reward, PuzzleState::DEFAULT_REWARD);

        assert_eq!(labyrinth.items.protective.get("Shield"), Some(&50));
        assert!(labyrinth.encounters.is_empty());
    }

    #[test]
    fn parses_tier_hints_with_defaults() {
        use guidance_core::{HintContext, HintTier};

        let labyrinth = LabyrinthLoader::parse(TWO_ROOMS).unwrap();
        let table = &labyrinth.tier_hints;
        let hall = LocationId::from("Hall");
        assert_eq!(
            table.text_for(&hall, HintContext::Puzzle, HintTier::Explicit),
            "Type on the keyboard."
        );
        // moderate left out: falls back to the room's vague text
        assert_eq!(
            table.text_for(&hall, HintContext::Puzzle, HintTier::Moderate),
            "Patterns reveal themselves to the patient observer..."
        );
        assert_eq!(table.defaults, TierTexts::default());
    }

    #[test]
    fn rejects_tier_hints_for_unknown_room() {
        let broken = TWO_ROOMS.replace("\"Hall\": (", "\"Attic\": (");
        let err = LabyrinthLoader::parse(&broken).unwrap_err();
        assert!(err.to_string().contains("Attic"));
    }

    #[test]
    fn rejects_unknown_start() {
        let broken = TWO_ROOMS.replace("start: \"Hall\"", "start: \"Attic\"");
        let err = LabyrinthLoader::parse(&broken).unwrap_err();
        assert!(err.to_string().contains("Attic"));
    }

    #[test]
    fn rejects_dangling_connection() {
        let broken = TWO_ROOMS.replace("[(\"Hall\", 4)]", "[(\"Cellar\", 4)]");
        assert!(LabyrinthLoader::parse(&broken).is_err());
    }

    #[test]
    fn rejects_out_of_range_answer() {
        let broken = TWO_ROOMS.replace("answer: 1", "answer: 7");
        let err = LabyrinthLoader::parse(&broken).unwrap_err();
        assert!(err.to_string().contains("answer index 7"));
    }
}
