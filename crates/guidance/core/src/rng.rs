//! Seedable randomness for the session layer.
//!
//! The guidance searches never roll dice. Random encounters, combat damage
//! and bonus tokens do, and they draw from an [`RngOracle`] that the session
//! controller owns and passes explicitly. Every roll is a pure function of a
//! seed, so a session replays identically from its game seed.

/// Stateless source of random values keyed by a per-roll seed.
pub trait RngOracle {
    fn next_u32(&self, seed: u64) -> u32;

    /// Value in `[min, max]` inclusive. Returns `min` for an empty range.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = u64::from(max - min) + 1;
        min + (u64::from(self.next_u32(seed)) % span) as u32
    }

    /// True with probability `p`, clamped to `[0, 1]`.
    fn chance(&self, seed: u64, p: f64) -> bool {
        let p = p.clamp(0.0, 1.0);
        let unit = f64::from(self.next_u32(seed)) / (f64::from(u32::MAX) + 1.0);
        unit < p
    }

    /// Index into a collection of `len` elements, or `None` if it is empty.
    fn pick(&self, seed: u64, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.next_u32(seed) as usize % len)
    }
}

/// PCG-XSH-RR output over a single LCG step of the seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Distinct roll purposes within a single session action.
///
/// Passed as the `context` of [`compute_seed`] so two rolls made by the same
/// action never share a seed.
pub mod roll {
    pub const ENCOUNTER: u32 = 0;
    pub const ENCOUNTER_KIND: u32 = 1;
    pub const PLAYER_DAMAGE: u32 = 2;
    pub const BOSS_DAMAGE: u32 = 3;
    pub const BOSS_ATTACK: u32 = 4;
    pub const FLEE: u32 = 5;
    pub const BONUS_TOKEN: u32 = 6;
}

/// Seed source for the rolls of one session action.
///
/// The session bumps its nonce once per action, so rolls with the same
/// context in different actions never repeat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionSeed {
    game_seed: u64,
    nonce: u64,
}

impl ActionSeed {
    pub fn new(game_seed: u64, nonce: u64) -> Self {
        Self { game_seed, nonce }
    }

    /// Seed of the roll identified by a [`roll`] context.
    pub fn roll(self, context: u32) -> u64 {
        compute_seed(self.game_seed, self.nonce, context)
    }
}

/// Mixes the game seed, the action counter and a roll context into one seed.
pub fn compute_seed(game_seed: u64, nonce: u64, context: u32) -> u64 {
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    // murmur3 finalizer
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_value() {
        let rng = PcgRng;
        let seed = compute_seed(42, 7, roll::ENCOUNTER);
        assert_eq!(rng.next_u32(seed), rng.next_u32(seed));
    }

    #[test]
    fn action_seed_matches_compute_seed() {
        let seeds = ActionSeed::new(42, 3);
        assert_eq!(seeds.roll(roll::FLEE), compute_seed(42, 3, roll::FLEE));
        assert_ne!(seeds.roll(roll::FLEE), ActionSeed::new(42, 4).roll(roll::FLEE));
    }

    #[test]
    fn contexts_separate_rolls() {
        assert_ne!(
            compute_seed(42, 7, roll::PLAYER_DAMAGE),
            compute_seed(42, 7, roll::BOSS_DAMAGE)
        );
        assert_ne!(compute_seed(42, 7, 0), compute_seed(42, 8, 0));
    }

    #[test]
    fn range_stays_inclusive() {
        let rng = PcgRng;
        for nonce in 0..500 {
            let value = rng.range(compute_seed(1, nonce, 0), 10, 20);
            assert!((10..=20).contains(&value));
        }
        assert_eq!(rng.range(3, 5, 5), 5);
    }

    #[test]
    fn full_width_range_does_not_overflow() {
        struct Max;
        impl RngOracle for Max {
            fn next_u32(&self, _seed: u64) -> u32 {
                u32::MAX
            }
        }
        assert_eq!(Max.range(0, 0, u32::MAX), u32::MAX);
        // span is u32::MAX, which the raw value wraps to zero
        assert_eq!(Max.range(0, 1, u32::MAX), 1);
        assert_eq!(PcgRng.range(4, 0, u32::MAX), PcgRng.next_u32(4));
    }

    #[test]
    fn chance_extremes() {
        let rng = PcgRng;
        for nonce in 0..100 {
            let seed = compute_seed(9, nonce, 0);
            assert!(!rng.chance(seed, 0.0));
            assert!(rng.chance(seed, 1.0));
        }
    }

    #[test]
    fn pick_handles_empty() {
        assert_eq!(PcgRng.pick(1, 0), None);
        assert!(PcgRng.pick(1, 3).is_some_and(|index| index < 3));
    }
}
