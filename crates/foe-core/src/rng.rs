//! Deterministic per-agent and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Every random decision in the framework (look-around rolls, strafe flips,
//! frontal attacks, grid neighbor shuffling) draws from a seeded `SmallRng`:
//!
//!   agent seed = master_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space.
//! Agents never share RNG state, so adding an agent does not perturb the
//! decisions of the others and a run replays exactly from its seed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Shared sampling API for both wrappers.
macro_rules! seeded_rng_api {
    ($name:ident) => {
        impl $name {
            /// `true` with probability `p` (clamped to [0, 1]).  `chance(1.0)`
            /// always succeeds and `chance(0.0)` never does, which tests use to
            /// force an outcome.
            #[inline]
            pub fn chance(&mut self, p: f32) -> bool {
                self.0.gen_bool((p as f64).clamp(0.0, 1.0))
            }

            /// Shuffle a mutable slice in place (Fisher-Yates).
            #[inline]
            pub fn shuffle<T>(&mut self, slice: &mut [T]) {
                use rand::seq::SliceRandom;
                slice.shuffle(&mut self.0);
            }
        }
    };
}

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG, owned next to (not inside) the agent so the
/// sim can hand out `&mut AgentController` and `&mut AgentRng` together.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's master seed and an agent ID.
    pub fn new(master_seed: u64, agent: AgentId) -> Self {
        let seed = master_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }
}

seeded_rng_api!(AgentRng);

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global decisions (squad directives, grid build).
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent child stream, e.g. one per subsystem.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }
}

seeded_rng_api!(SimRng);
