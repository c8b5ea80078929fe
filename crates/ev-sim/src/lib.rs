//! `ev-sim`: scheduler, driver, and reports for the evtol-sim fleet simulator.
//!
//! # Tick loop
//!
//! ```text
//! Scheduler fires ceil(total_ms / tick_ms) ticks; for each span:
//!   ① Update:  Vehicle::tick_update for every vehicle, ascending id
//!                (parallel with the `parallel` feature).
//!   ② Apply:   each Intent::RequestCharge → ChargingStation::admit,
//!                ascending id.
//!   ③ Station: charge bays, release full vehicles, promote waiters.
//!   ④ Observe: on_tick_end, and on_snapshot every output_interval_ticks.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                      |
//! |------------|-------------------------------------------------------------|
//! | `parallel` | Runs the update phase on Rayon's thread pool.               |
//! | `serde`    | `FleetConfig` (de)serialization, `Serialize` on reports.    |
//!
//! # Quick-start
//!
//! ```rust
//! use ev_core::Pacing;
//! use ev_sim::{FleetConfig, NoopObserver, SimBuilder};
//!
//! let mut fleet = FleetConfig::reference().unwrap();
//! fleet.sim.pacing = Pacing::Virtual;
//! fleet.sim.total_minutes = 10;
//!
//! let mut sim = SimBuilder::from_fleet_config(fleet).build().unwrap();
//! sim.run(&mut NoopObserver).unwrap();
//! for row in sim.report().prototypes {
//!     println!("{}: {} vehicles", row.name, row.vehicles);
//! }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod pacing;
pub mod report;
pub mod sim;
pub mod timer;


pub use builder::SimBuilder;
pub use config::{FleetConfig, reference_prototypes};
pub use error::{SimError, SimResult, TimerError, TimerResult};
pub use observer::{NoopObserver, SimObserver, TickStats};
pub use pacing::{Pacer, RealTimePacer, VirtualPacer};
pub use report::{FleetReport, PrototypeSummary, VehicleReport};
pub use sim::Sim;
pub use timer::{Scheduler, SchedulerBuilder, TickCallback};
