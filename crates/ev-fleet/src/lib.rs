//! `ev-fleet`: vehicles, their configurations, and the factory that spawns
//! them.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`config`]    | `VehicleConfig`: immutable, validated prototype parameters |
//! | [`state`]     | `VehicleState`: `Unknown`, `Flying`, `Waiting`, `Charging` |
//! | [`vehicle`]   | `Vehicle`: the agent; implements both capability traits   |
//! | [`factory`]   | `PrototypeFactory`: uniform random prototype selection    |
//! | [`error`]     | `FleetError`, `FleetResult<T>`                             |
//!
//! # State machine
//!
//! ```text
//!   Unknown ──begin()──▶ Flying ──charge < 50 %──▶ Waiting
//!                          ▲                          │ add_charge (not full)
//!                          │ full                     ▼
//!                          └──────────────────────  Charging
//! ```
//!
//! `add_charge` that fills the battery on the very first increment moves a
//! vehicle straight from `Waiting` to `Flying`.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | `VehicleConfig` (de)serialization; invalid input is rejected. |

pub mod config;
pub mod error;
pub mod factory;
pub mod state;
pub mod vehicle;

#[cfg(test)]
mod tests;

pub use config::{DEFAULT_FAULT_PROB_PER_HOUR, VehicleConfig};
pub use error::{FleetError, FleetResult};
pub use factory::PrototypeFactory;
pub use state::VehicleState;
pub use vehicle::{LOW_CHARGE_FRACTION, Vehicle};
