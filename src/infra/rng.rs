use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng, SeedableRng};

use crate::engine::RandomSource;

/// Системный RNG (thread_rng) для обычной игры.
#[derive(Clone, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut thread_rng());
    }

    fn roll(&mut self, sides: u32) -> u32 {
        thread_rng().gen_range(0..sides.max(1))
    }
}

/// Детерминированный RNG для тестов и реплея.
/// Позволяет воспроизводить одни и те же раздачи при одинаковом seed.
#[derive(Clone, Debug)]
pub struct DeterministicRng {
    inner: StdRng,
}

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    fn roll(&mut self, sides: u32) -> u32 {
        self.inner.gen_range(0..sides.max(1))
    }
}
