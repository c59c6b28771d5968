//! Random encounters on first entry to a location.

use guidance_content::Encounter;
use guidance_core::rng::{RngOracle, roll};

/// Rolls for an encounter with probability `chance` and picks one from
/// `table`. An empty table never produces an encounter.
pub fn roll_encounter<'a, R, S>(
    rng: &R,
    seed: S,
    chance: f64,
    table: &'a [Encounter],
) -> Option<&'a Encounter>
where
    R: RngOracle + ?Sized,
    S: Fn(u32) -> u64,
{
    if !rng.chance(seed(roll::ENCOUNTER), chance) {
        return None;
    }
    rng.pick(seed(roll::ENCOUNTER_KIND), table.len())
        .map(|index| &table[index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use guidance_content::EncounterOption;

    struct FixedRng(u32);

    impl RngOracle for FixedRng {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    fn table() -> Vec<Encounter> {
        ["Crystal Guardian", "Shadow Wisp"]
            .into_iter()
            .map(|name| Encounter {
                name: name.to_string(),
                description: String::new(),
                options: vec![EncounterOption {
                    action: "Stand still".into(),
                    outcome: "Nothing happens.".into(),
                    score_delta: 5,
                }],
            })
            .collect()
    }

    #[test]
    fn low_roll_triggers_encounter() {
        let table = table();
        let picked = roll_encounter(&FixedRng(1), |c| u64::from(c), 0.1, &table);
        assert_eq!(picked.map(|e| e.name.as_str()), Some("Shadow Wisp"));
    }

    #[test]
    fn high_roll_or_empty_table_skips() {
        let table = table();
        assert!(roll_encounter(&FixedRng(u32::MAX), |c| u64::from(c), 0.3, &table).is_none());
        assert!(roll_encounter(&FixedRng(0), |c| u64::from(c), 1.0, &[]).is_none());
    }
}
