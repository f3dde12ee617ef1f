// Deterministic per-task random streams.
//
// Every agent update gets its own generator, derived from (seed, tick, index).
// Nothing is shared between rayon tasks, so a tick is reproducible no matter
// how the work is scheduled.

use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Generator handed to a single agent update.
pub type AgentRng = SmallRng;

// Stream tags keep the spawn sub-streams disjoint from the tick sub-streams.
const TICK_STREAM: u64 = 0x7469_636B_0000_0001;
const SPAWN_STREAM: u64 = 0x7370_6177_6E00_0002;

/// Base seed from which all sub-streams are split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomSource {
    seed: u64,
}

impl RandomSource {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Stream for agent `index` during tick number `tick`.
    pub fn agent_rng(&self, tick: u64, index: usize) -> AgentRng {
        SmallRng::seed_from_u64(derive(self.seed ^ TICK_STREAM, tick, index as u64))
    }

    /// Stream used to initialise agent `index` when it is spawned.
    ///
    /// Keyed by index only, so growing a flock from N to N+k spawns the same
    /// k agents regardless of how many ticks ran before.
    pub fn spawn_rng(&self, index: usize) -> AgentRng {
        SmallRng::seed_from_u64(derive(self.seed ^ SPAWN_STREAM, 0, index as u64))
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new(1)
    }
}

fn derive(base: u64, tick: u64, index: u64) -> u64 {
    let a = splitmix64(base.wrapping_add(tick.wrapping_mul(0x9E37_79B9_7F4A_7C15)));
    splitmix64(a ^ index.wrapping_mul(0xD1B5_4A32_D192_ED03))
}

// SplitMix64 finalizer: cheap avalanche so neighbouring indices get unrelated seeds.
fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
