use std::collections::VecDeque;

/// The single random source injected into a battle.
///
/// Every roll the engine makes (accuracy, crits, secondary effects, speed
/// tie-breaks) goes through this trait, so a battle is fully reproducible
/// given a fixed seed.
pub trait BattleRng {
    /// Returns a uniformly distributed value in `[min, max]` (inclusive).
    fn next(&mut self, min: u32, max: u32) -> u32;

    /// Rolls 1..=100 and succeeds when the roll is at or below `percent`.
    fn chance(&mut self, percent: u8) -> bool {
        self.next(1, 100) <= percent as u32
    }
}

/// Deterministic linear congruential generator.
///
/// Two generators created with the same seed produce identical sequences,
/// which is what makes battle replays and regression tests possible.
pub struct SeededRng {
    initial_seed: u64,
    seed: u64,
}

impl SeededRng {
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(Self::generate_seed);
        Self {
            initial_seed: seed,
            seed,
        }
    }

    /// The seed this generator started from, for replaying a battle.
    pub fn initial_seed(&self) -> u64 {
        self.initial_seed
    }

    fn generate_seed() -> u64 {
        use rand::Rng;
        rand::rng().random()
    }

    fn next_seed(seed: u64) -> u64 {
        const A: u64 = 0x5D58_8B65_6C07_8965;
        const C: u64 = 0x0000_0000_0026_9EC3;
        seed.wrapping_mul(A).wrapping_add(C)
    }

    fn next_raw(&mut self) -> u64 {
        self.seed = Self::next_seed(self.seed);
        // The low bits of an LCG are weak; use the upper half.
        self.seed >> 32
    }
}

impl BattleRng for SeededRng {
    fn next(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        let span = (max - min + 1) as u64;
        min + (self.next_raw() % span) as u32
    }
}

/// Scripted random source for tests: returns pre-loaded values verbatim,
/// clamped into the requested range.
pub struct FixedRng {
    values: VecDeque<u32>,
    /// Returned once the script runs out.
    fallback: u32,
}

impl FixedRng {
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            values: values.into(),
            fallback: 0,
        }
    }

    pub fn with_fallback(mut self, fallback: u32) -> Self {
        self.fallback = fallback;
        self
    }
}

impl BattleRng for FixedRng {
    fn next(&mut self, min: u32, max: u32) -> u32 {
        let value = self.values.pop_front().unwrap_or(self.fallback);
        value.clamp(min, max)
    }
}
