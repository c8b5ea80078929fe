//! Top-level run parameters.
//!
//! Typically loaded from a JSON file by the application crate and passed to
//! the simulation builder.  Nothing here is global: every run gets its own
//! `SimConfig` value.

use crate::{EvError, EvResult, SimClock, SimTime};

/// How the scheduler relates simulated time to wall-clock time.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Pacing {
    /// Fire ticks back to back.  Used by tests and batch runs.
    #[default]
    Virtual,
    /// Sleep between ticks so simulated time runs `compression` times
    /// faster than real time.
    RealTime,
}

/// How a flying vehicle turns its hourly fault probability into faults.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FaultSampling {
    /// One Bernoulli trial per tick with the per-interval probability.
    #[default]
    Bernoulli,
    /// Accumulate the per-interval probability and count a fault each time
    /// the running sum crosses an integer.  Same long-run expectation,
    /// no randomness.
    Expected,
}

/// Simulation parameters for one run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Number of vehicles spawned from the prototype set.
    pub vehicle_count: usize,

    /// Charging bays at the station.  `0` is legal: every vehicle that needs
    /// charge waits forever.
    pub bay_count: usize,

    /// Total simulated duration in minutes.
    pub total_minutes: u64,

    /// Simulated milliseconds per tick.  Must be non-zero.
    pub tick_ms: u64,

    /// Simulated time units per real time unit.  Must be non-zero; `1` is
    /// real-time.  Ignored under [`Pacing::Virtual`].
    pub compression: u32,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    pub pacing: Pacing,

    pub fault_sampling: FaultSampling,

    /// Deliver an observer snapshot every N ticks.  `0` disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    /// 20 vehicles, 3 bays, three simulated hours in one-second ticks,
    /// compressed 60:1 so a run takes three real minutes.
    fn default() -> Self {
        Self {
            vehicle_count:         20,
            bay_count:             3,
            total_minutes:         180,
            tick_ms:               1_000,
            compression:           60,
            seed:                  42,
            pacing:                Pacing::RealTime,
            fault_sampling:        FaultSampling::Bernoulli,
            output_interval_ticks: 60,
        }
    }
}

impl SimConfig {
    /// Reject parameters the scheduler cannot run with.
    pub fn validate(&self) -> EvResult<()> {
        if self.tick_ms == 0 {
            return Err(EvError::Config("tick_ms must be greater than 0".into()));
        }
        if self.compression == 0 {
            return Err(EvError::Config("compression must be greater than 0".into()));
        }
        let last_tick_end = SimTime::from_minutes(self.total_minutes)
            .and_then(|total| SimClock::new(self.tick_ms).end_of_run(total));
        if last_tick_end.is_none() {
            return Err(EvError::Config(format!(
                "total_minutes {} does not fit the millisecond clock",
                self.total_minutes
            )));
        }
        Ok(())
    }
}
