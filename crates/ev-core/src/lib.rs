//! `ev-core`: foundational types for the `evtol-sim` fleet simulator.
//!
//! This crate is a dependency of every other `ev-*` crate.  It intentionally
//! has no `ev-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VehicleId`                                           |
//! | [`time`]        | `SimTime`, `TickSpan`, `SimClock`, unit constants     |
//! | [`config`]      | `SimConfig`, `Pacing`, `FaultSampling`                |
//! | [`rng`]         | `VehicleRng` (per-vehicle), `SimRng` (global)         |
//! | [`error`]       | `EvError`, `EvResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to configuration types.     |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{FaultSampling, Pacing, SimConfig};
pub use error::{EvError, EvResult};
pub use ids::VehicleId;
pub use rng::{SimRng, VehicleRng};
pub use time::{MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND, SimClock, SimTime, TickSpan};
