//! `ev-agent`: the two capability traits every fleet participant is built on.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`agent`]   | `SimulationAgent`: `begin` + per-tick `tick_update`            |
//! | [`device`]  | `ChargeableDevice`: `add_charge`, `charge_rate`, `has_full_charge` |
//! | [`intent`]  | `Intent`: what an agent asks the driver to do after its update |
//! | [`error`]   | `AgentError`, `AgentResult<T>`                                  |
//!
//! # Design notes
//!
//! The tick loop in ev-sim works in two phases:
//!
//! 1. **Update phase**: every vehicle's `tick_update` runs.  A vehicle never
//!    touches the charging station directly; it returns an [`Intent`].
//!
//! 2. **Apply phase** (sequential): the driver hands each
//!    `Intent::RequestCharge` to the station in ascending vehicle order, then
//!    ticks the station, which talks back through `ChargeableDevice`.
//!
//! Because the station is only reachable from the apply phase, vehicles hold
//! no reference to it and the update phase can run in parallel.

pub mod agent;
pub mod device;
pub mod error;
pub mod intent;


pub use agent::SimulationAgent;
pub use device::ChargeableDevice;
pub use error::{AgentError, AgentResult};
pub use intent::Intent;
