//! Deterministic per-vehicle and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each vehicle gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (vehicle_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive vehicle IDs uniformly across the seed space.
//! This means:
//!
//! - Vehicles never share RNG state, so fault trials do not depend on the
//!   order in which vehicles are updated.
//! - Adding vehicles at the end of the fleet does not disturb the fault
//!   sequence of existing vehicles.
//! - Nothing reads the system clock; a seed fully determines a run.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::VehicleId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── VehicleRng ────────────────────────────────────────────────────────────────

/// Per-vehicle deterministic RNG, owned by the vehicle it was seeded for.
#[derive(Clone, Debug)]
pub struct VehicleRng(SmallRng);

impl VehicleRng {
    /// Seed deterministically from the run's global seed and a vehicle ID.
    pub fn new(global_seed: u64, vehicle: VehicleId) -> Self {
        let seed = global_seed ^ (vehicle.0 as u64).wrapping_mul(MIXING_CONSTANT);
        VehicleRng(SmallRng::seed_from_u64(seed))
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for global operations (prototype selection).
///
/// Used only from the single-threaded build phase.
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    /// The seed is offset by a rotated mixing constant so this stream never
    /// coincides with `VehicleRng::new(seed, VehicleId(0))`.
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed ^ MIXING_CONSTANT.rotate_left(32)))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
