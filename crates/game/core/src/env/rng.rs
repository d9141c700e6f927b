//! Injected randomness for energy draws and evasion rolls.
//!
//! The engine never owns a global generator. Callers hand in an [`RngOracle`]
//! and every draw is derived from the match seed, the turn number, and the
//! position of the draw inside the resolution. Replaying the same state with
//! the same oracle reproduces the same log bit for bit.

/// Stateless random source keyed by seed.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::pcg_output(Self::pcg_step(seed))
    }
}

/// Purpose of a draw. Mixed into the seed so unrelated rolls never share a stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RollContext {
    EnergyGrant = 0,
    Evasion = 1,
    WildcardFallback = 2,
    Targeting = 3,
}

/// Compute a deterministic seed from match components.
///
/// * `match_seed` - fixed when the match is created
/// * `turn` - turn being resolved
/// * `draw` - index of the draw within the resolution
/// * `context` - which mechanic is rolling
pub fn compute_seed(match_seed: u64, turn: u32, draw: u64, context: RollContext) -> u64 {
    // SplitMix64 / FxHash style mixing constants
    let mut hash = match_seed;

    hash ^= (turn as u64).wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= draw.wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Sequential draw cursor over an [`RngOracle`] for one resolution call.
pub struct Dice<'a> {
    oracle: &'a dyn RngOracle,
    match_seed: u64,
    turn: u32,
    draws: u64,
}

impl<'a> Dice<'a> {
    pub fn new(oracle: &'a dyn RngOracle, match_seed: u64, turn: u32) -> Self {
        Self {
            oracle,
            match_seed,
            turn,
            draws: 0,
        }
    }

    fn next_seed(&mut self, context: RollContext) -> u64 {
        let seed = compute_seed(self.match_seed, self.turn, self.draws, context);
        self.draws += 1;
        seed
    }

    /// Number of draws consumed so far.
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Percentage roll, 1..=100.
    pub fn roll_d100(&mut self, context: RollContext) -> u32 {
        let seed = self.next_seed(context);
        self.oracle.roll_d100(seed)
    }

    /// Uniform index in `0..len`. Returns `None` for an empty range.
    pub fn pick(&mut self, len: usize, context: RollContext) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let seed = self.next_seed(context);
        let upper = u32::try_from(len - 1).unwrap_or(u32::MAX);
        Some(self.oracle.range(seed, 0, upper) as usize)
    }

    /// Index drawn proportionally to `weights`. Returns `None` when every weight is zero.
    pub fn weighted(&mut self, weights: &[u32], context: RollContext) -> Option<usize> {
        let total: u32 = weights.iter().sum();
        if total == 0 {
            return None;
        }
        let seed = self.next_seed(context);
        let mut roll = self.oracle.range(seed, 0, total - 1);
        for (index, &weight) in weights.iter().enumerate() {
            if roll < weight {
                return Some(index);
            }
            roll -= weight;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(u32);

    impl RngOracle for Fixed {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    #[test]
    fn pcg_is_deterministic() {
        let rng = PcgRng;
        assert_eq!(rng.next_u32(42), rng.next_u32(42));
        assert_ne!(rng.next_u32(42), rng.next_u32(43));
    }

    #[test]
    fn seeds_differ_by_context_and_draw() {
        let a = compute_seed(7, 1, 0, RollContext::EnergyGrant);
        let b = compute_seed(7, 1, 0, RollContext::Evasion);
        let c = compute_seed(7, 1, 1, RollContext::EnergyGrant);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn weighted_respects_zero_weights() {
        let oracle = Fixed(0);
        let mut dice = Dice::new(&oracle, 1, 1);
        assert_eq!(dice.weighted(&[0, 3, 1], RollContext::EnergyGrant), Some(1));
        assert_eq!(dice.weighted(&[0, 0], RollContext::EnergyGrant), None);
        assert_eq!(dice.draws(), 1);
    }

    #[test]
    fn weighted_walks_cumulative_ranges() {
        // roll = 3 % 4 = 3 -> falls in the last bucket
        let oracle = Fixed(3);
        let mut dice = Dice::new(&oracle, 1, 1);
        assert_eq!(dice.weighted(&[1, 2, 1], RollContext::EnergyGrant), Some(2));
    }

    #[test]
    fn pick_handles_empty_range() {
        let oracle = PcgRng;
        let mut dice = Dice::new(&oracle, 9, 2);
        assert_eq!(dice.pick(0, RollContext::Targeting), None);
        let index = dice.pick(3, RollContext::Targeting);
        assert!(matches!(index, Some(i) if i < 3));
    }
}
