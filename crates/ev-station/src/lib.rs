//! `ev-station`: a charging station with a fixed number of bays.
//!
//! # Admission policy
//!
//! ```text
//! admit(v):  bay free?  ──yes──▶ occupied.push(v)
//!                       ──no───▶ waiting.push_front(v)
//!
//! tick:      1. charge every occupied device for the elapsed interval
//!            2. release every device that is now full
//!            3. while a bay is free: occupied.push(waiting.pop_back())
//! ```
//!
//! New arrivals enter the *front* of the waiting queue and promotions take
//! from the *back*, so the queue serves the oldest entry first only among
//! vehicles that were already waiting when a bay opens.  This reproduces the
//! wait-time statistics of the reference model and must not be "fixed".
//!
//! The station stores [`VehicleId`](ev_core::VehicleId)s, not devices.  Each
//! tick borrows the device slice (indexed by id) for exactly as long as it
//! needs to deliver charge.

pub mod error;
pub mod station;

#[cfg(test)]
mod tests;

pub use error::{StationError, StationResult};
pub use station::{Admission, ChargingStation, StationTick};
