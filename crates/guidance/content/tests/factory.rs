use std::fs;

use guidance_content::ContentFactory;
use guidance_core::{GuidanceConfig, HintContext, HintTier, LocationId, PuzzleHints};

const LABYRINTH: &str = r#"
(
    name: "Cellar",
    start: "Stairs",
    locations: [
        (name: "Stairs", level: 1, connections: [("Cellar", 3)]),
        (name: "Cellar", level: 2, connections: [("Stairs", 3)], items: ["Lantern"]),
    ],
)
"#;

#[test]
fn loads_labyrinth_and_config_from_directory() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("labyrinth.ron"), LABYRINTH).unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "[search]\nmax_depth = 12\n\n[generator]\nredundancy_surcharge = 7\n",
    )
    .unwrap();

    let factory = ContentFactory::new(dir.path());
    let labyrinth = factory.load_labyrinth().expect("labyrinth loads");
    assert_eq!(labyrinth.start, LocationId::from("Stairs"));
    assert_eq!(labyrinth.graph.owner_of("Lantern"), Some(&LocationId::from("Cellar")));

    let config = factory.load_config().expect("config loads");
    assert_eq!(config.search.max_depth, 12);
    assert_eq!(config.generator.redundancy_surcharge, 7);
    assert_eq!(config.economy, GuidanceConfig::default().economy);
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("labyrinth.ron"), LABYRINTH).unwrap();

    let config = ContentFactory::new(dir.path()).load_config().unwrap();
    assert_eq!(config, GuidanceConfig::default());
}

#[test]
fn missing_labyrinth_names_the_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = ContentFactory::new(dir.path()).load_labyrinth().unwrap_err();
    assert!(err.to_string().contains("labyrinth.ron"));
}

#[test]
fn malformed_labyrinth_is_rejected_with_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("labyrinth.ron"), "(name: \"Broken\"").unwrap();

    let err = ContentFactory::new(dir.path()).load_labyrinth().unwrap_err();
    assert!(err.to_string().contains("Failed to load labyrinth RON"));
}

#[test]
fn bundled_puzzles_carry_every_hint_tier() {
    let labyrinth = ContentFactory::bundled_labyrinth().expect("bundled labyrinth");
    let hints = |room: &str| -> PuzzleHints {
        let node = labyrinth.graph.node(&LocationId::from(room)).expect("room exists");
        node.puzzle.as_ref().expect("room has a puzzle").hints.clone()
    };

    let entrance = hints("Ancient Entrance");
    assert_eq!(
        entrance.specific.as_deref(),
        Some("Think about things with keys and spaces...")
    );
    assert_eq!(
        entrance.near_exact.as_deref(),
        Some("It's a device you're likely using right now.")
    );
    assert_eq!(
        hints("Shadow Maze").near_exact.as_deref(),
        Some("It brings light and warmth but can be dangerous.")
    );

    for room in ["Ancient Entrance", "Crystal Caverns", "Shadow Maze", "Elemental Chambers"] {
        let hints = hints(room);
        assert!(hints.general.is_some(), "{room} lacks a general hint");
        assert!(hints.specific.is_some(), "{room} lacks a specific hint");
        assert!(hints.near_exact.is_some(), "{room} lacks a near-exact hint");
    }
}

#[test]
fn bundled_tier_hints_cover_the_first_three_rooms() {
    let labyrinth = ContentFactory::bundled_labyrinth().expect("bundled labyrinth");
    let table = &labyrinth.tier_hints;
    assert_eq!(table.locations.len(), 3);

    let caverns = LocationId::from("Crystal Caverns");
    assert_eq!(
        table.text_for(&caverns, HintContext::Puzzle, HintTier::Explicit),
        "Shine your torch at the northwest crystal to open the secret passage."
    );
    assert_eq!(
        table.text_for(&"Time-Lost Library".into(), HintContext::General, HintTier::Vague),
        "Trust your instincts, brave one..."
    );
}
