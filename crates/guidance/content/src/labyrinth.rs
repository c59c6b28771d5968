//! Loaded labyrinth content.

use std::collections::{BTreeMap, BTreeSet};

use guidance_core::{LocationGraph, LocationId, TierHintTable};

/// A playable labyrinth: the location graph plus the rules around it.
#[derive(Clone, Debug, PartialEq)]
pub struct Labyrinth {
    pub name: String,
    pub start: LocationId,
    pub graph: LocationGraph,
    pub items: ItemRules,
    pub encounters: Vec<Encounter>,
    /// Per-room guidance text for each hint tier.
    pub tier_hints: TierHintTable,
}

/// Item effects that live outside the location graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemRules {
    /// Item to hazard damage reduction in percent.
    pub protective: BTreeMap<String, u32>,
    /// Item to health restored when used.
    pub healing: BTreeMap<String, i32>,
}

impl ItemRules {
    /// Names of every protective item, as the route search expects them.
    pub fn protective_set(&self) -> BTreeSet<String> {
        self.protective.keys().cloned().collect()
    }

    /// Strongest protective item held in `inventory`, with its reduction.
    pub fn best_protection<'a>(
        &'a self,
        inventory: &BTreeSet<String>,
    ) -> Option<(&'a str, u32)> {
        self.protective
            .iter()
            .filter(|(item, _)| inventory.contains(*item))
            .max_by_key(|(_, percent)| **percent)
            .map(|(item, percent)| (item.as_str(), *percent))
    }

    pub fn healing_for(&self, item: &str) -> Option<i32> {
        self.healing.get(item).copied()
    }
}

/// A random encounter and the ways the player can respond to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encounter {
    pub name: String,
    pub description: String,
    pub options: Vec<EncounterOption>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncounterOption {
    pub action: String,
    pub outcome: String,
    pub score_delta: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> ItemRules {
        ItemRules {
            protective: BTreeMap::from([("Magic Amulet".to_string(), 75), ("Shield".to_string(), 50)]),
            healing: BTreeMap::from([("Health Potion".to_string(), 20)]),
        }
    }

    #[test]
    fn strongest_held_protection_wins() {
        let rules = rules();
        let mut inventory = BTreeSet::from(["Shield".to_string()]);
        assert_eq!(rules.best_protection(&inventory), Some(("Shield", 50)));

        inventory.insert("Magic Amulet".to_string());
        assert_eq!(rules.best_protection(&inventory), Some(("Magic Amulet", 75)));

        assert_eq!(rules.best_protection(&BTreeSet::new()), None);
    }

    #[test]
    fn healing_lookup() {
        assert_eq!(rules().healing_for("Health Potion"), Some(20));
        assert_eq!(rules().healing_for("Shield"), None);
    }
}
