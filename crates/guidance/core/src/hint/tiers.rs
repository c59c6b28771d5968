//! Authored guidance text per location and tier.
//!
//! The hint search decides *what* the player should do next; the tier table
//! decides how much the guide spells out the room itself. Each location may
//! carry a general text set and a puzzle text set. A location without an
//! entry, or without the context in question, gets the table's defaults.

use std::collections::BTreeMap;

use crate::economy::HintTier;
use crate::graph::{LocationId, LocationNode};

/// Which text set of a location applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum HintContext {
    General,
    /// The location still has an unsolved puzzle.
    Puzzle,
}

impl HintContext {
    pub fn of(node: &LocationNode) -> Self {
        if node.open_puzzle().is_some() {
            Self::Puzzle
        } else {
            Self::General
        }
    }
}

/// One text per hint tier.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TierTexts {
    pub vague: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub moderate: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub specific: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub explicit: String,
}

impl TierTexts {
    pub fn new(
        vague: impl Into<String>,
        moderate: impl Into<String>,
        specific: impl Into<String>,
        explicit: impl Into<String>,
    ) -> Self {
        Self {
            vague: vague.into(),
            moderate: moderate.into(),
            specific: specific.into(),
            explicit: explicit.into(),
        }
    }

    /// Text for `tier`; an empty entry falls back to the vague text.
    pub fn get(&self, tier: HintTier) -> &str {
        let text = match tier {
            HintTier::Vague => &self.vague,
            HintTier::Moderate => &self.moderate,
            HintTier::Specific => &self.specific,
            HintTier::Explicit => &self.explicit,
        };
        if text.is_empty() { &self.vague } else { text }
    }
}

impl Default for TierTexts {
    fn default() -> Self {
        Self::new(
            "Trust your instincts, brave one...",
            "The path forward is not always clear, but it exists.",
            "Your current situation demands careful observation.",
            "Look for the unusual pattern - that's your next step.",
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LocationTierHints {
    pub general: Option<TierTexts>,
    pub puzzle: Option<TierTexts>,
}

impl LocationTierHints {
    fn context(&self, context: HintContext) -> Option<&TierTexts> {
        match context {
            HintContext::General => self.general.as_ref(),
            HintContext::Puzzle => self.puzzle.as_ref(),
        }
    }
}

/// Tiered texts for every location that has them, plus the defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TierHintTable {
    pub locations: BTreeMap<LocationId, LocationTierHints>,
    pub defaults: TierTexts,
}

impl TierHintTable {
    pub fn new(defaults: TierTexts) -> Self {
        Self {
            locations: BTreeMap::new(),
            defaults,
        }
    }

    pub fn with_location(mut self, id: impl Into<LocationId>, hints: LocationTierHints) -> Self {
        self.locations.insert(id.into(), hints);
        self
    }

    pub fn text_for(&self, location: &LocationId, context: HintContext, tier: HintTier) -> &str {
        self.locations
            .get(location)
            .and_then(|hints| hints.context(context))
            .unwrap_or(&self.defaults)
            .get(tier)
    }

    /// Text for the player standing at `node`.
    pub fn text_at(&self, node: &LocationNode, tier: HintTier) -> &str {
        self.text_for(&node.id, HintContext::of(node), tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PuzzleState;

    fn table() -> TierHintTable {
        TierHintTable::default().with_location(
            "Caverns",
            LocationTierHints {
                general: Some(TierTexts::new(
                    "Light and crystal dance together.",
                    "The crystals react to you.",
                    "Your light source matters.",
                    "Use the torch on the central crystal.",
                )),
                puzzle: Some(TierTexts {
                    vague: "Reflections hold more than meets the eye.".into(),
                    moderate: String::new(),
                    specific: "Aim at the largest crystal.".into(),
                    explicit: "Shine at the northwest crystal.".into(),
                }),
            },
        )
    }

    #[test]
    fn text_changes_with_tier() {
        let table = table();
        let caverns = LocationId::from("Caverns");
        let texts: Vec<_> = [
            HintTier::Vague,
            HintTier::Moderate,
            HintTier::Specific,
            HintTier::Explicit,
        ]
        .into_iter()
        .map(|tier| table.text_for(&caverns, HintContext::General, tier))
        .collect();

        assert_eq!(texts[0], "Light and crystal dance together.");
        assert_eq!(texts[3], "Use the torch on the central crystal.");
        for pair in texts.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn missing_tier_text_falls_back_to_vague() {
        let table = table();
        let text = table.text_for(&"Caverns".into(), HintContext::Puzzle, HintTier::Moderate);
        assert_eq!(text, "Reflections hold more than meets the eye.");
    }

    #[test]
    fn unknown_location_uses_defaults() {
        let table = table();
        assert_eq!(
            table.text_for(&"Attic".into(), HintContext::General, HintTier::Explicit),
            "Look for the unusual pattern - that's your next step."
        );

        let only_general = TierHintTable::default()
            .with_location("Hall", LocationTierHints {
                general: Some(TierTexts::new("a", "b", "c", "d")),
                puzzle: None,
            });
        assert_eq!(
            only_general.text_for(&"Hall".into(), HintContext::Puzzle, HintTier::Specific),
            "Your current situation demands careful observation."
        );
    }

    #[test]
    fn open_puzzle_selects_puzzle_texts() {
        let table = table();
        let mut node = LocationNode::new("Caverns", 2).with_puzzle(PuzzleState::new(
            "What comes next?",
            vec!["Hexagon".into()],
            0,
            2.0,
        ));
        assert_eq!(
            table.text_at(&node, HintTier::Explicit),
            "Shine at the northwest crystal."
        );

        if let Some(puzzle) = node.puzzle.as_mut() {
            puzzle.solved = true;
        }
        assert_eq!(
            table.text_at(&node, HintTier::Explicit),
            "Use the torch on the central crystal."
        );
    }
}
