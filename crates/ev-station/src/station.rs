use std::collections::VecDeque;

use ev_agent::ChargeableDevice;
use ev_core::{TickSpan, VehicleId};
use tracing::{debug, trace};

use crate::{StationError, StationResult};

/// Outcome of [`ChargingStation::admit`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Admission {
    /// A bay was free; the vehicle receives charge on the next `tick`.
    Charging,
    /// All bays busy; the vehicle joined the front of the waiting queue.
    Queued,
}

/// What changed during one [`ChargingStation::tick`].
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct StationTick {
    /// Devices that reached full charge and left their bay, in bay order.
    pub released: Vec<VehicleId>,
    /// Devices moved from the waiting queue into a freed bay, in promotion
    /// order.
    pub promoted: Vec<VehicleId>,
}

/// Fixed-capacity charging station.
///
/// Invariants held across every public call:
/// - `occupied().len() <= bays()`
/// - an id appears at most once across `occupied` and `waiting` combined
#[derive(Clone, Debug)]
pub struct ChargingStation {
    bays:     usize,
    occupied: Vec<VehicleId>,
    /// Front = most recent arrival, back = next to be promoted.
    waiting:  VecDeque<VehicleId>,
}

impl ChargingStation {
    /// A station with `bays` charging bays.  Zero is allowed; every arrival
    /// then waits forever.
    pub fn new(bays: usize) -> Self {
        Self {
            bays,
            occupied: Vec::with_capacity(bays),
            waiting:  VecDeque::new(),
        }
    }

    pub fn bays(&self) -> usize {
        self.bays
    }

    pub fn free_bays(&self) -> usize {
        self.bays - self.occupied.len()
    }

    /// Ids currently charging, in the order they took their bay.
    pub fn occupied(&self) -> &[VehicleId] {
        &self.occupied
    }

    /// Waiting ids from front (newest) to back (next promoted).
    pub fn waiting(&self) -> impl ExactSizeIterator<Item = VehicleId> + '_ {
        self.waiting.iter().copied()
    }

    pub fn contains(&self, id: VehicleId) -> bool {
        self.occupied.contains(&id) || self.waiting.contains(&id)
    }

    /// Nobody charging, nobody waiting.
    pub fn is_idle(&self) -> bool {
        self.occupied.is_empty() && self.waiting.is_empty()
    }

    /// Take a bay if one is free, otherwise queue at the front.
    ///
    /// # Errors
    ///
    /// [`StationError::AlreadyPresent`] if `id` is already charging or
    /// waiting here.
    pub fn admit(&mut self, id: VehicleId) -> StationResult<Admission> {
        if self.contains(id) {
            return Err(StationError::AlreadyPresent(id));
        }
        if self.occupied.len() < self.bays {
            self.occupied.push(id);
            debug!(vehicle = %id, free_bays = self.free_bays(), "admitted to bay");
            Ok(Admission::Charging)
        } else {
            self.waiting.push_front(id);
            debug!(vehicle = %id, queue_len = self.waiting.len(), "queued for bay");
            Ok(Admission::Queued)
        }
    }

    /// Advance the station over `span`.
    ///
    /// `devices` is indexed by [`VehicleId::index`].  Every occupied device
    /// receives `charge_rate() * span.elapsed_ms()`; full devices leave;
    /// freed bays are then filled from the back of the waiting queue.
    /// Promoted devices receive their first charge on the following tick.
    ///
    /// # Errors
    ///
    /// [`StationError::UnknownDevice`] if any id held by the station is out
    /// of range for `devices`.  The station is left untouched in that case.
    pub fn tick<D: ChargeableDevice>(
        &mut self,
        span: TickSpan,
        devices: &mut [D],
    ) -> StationResult<StationTick> {
        let len = devices.len();
        if let Some(&id) = self
            .occupied
            .iter()
            .chain(self.waiting.iter())
            .find(|id| id.index() >= len)
        {
            return Err(StationError::UnknownDevice { id, len });
        }

        let dt = span.elapsed_ms() as f64;
        for id in &self.occupied {
            let device = &mut devices[id.index()];
            let rate = device.charge_rate();
            device.add_charge(rate * dt);
        }

        let mut out = StationTick::default();
        self.occupied.retain(|id| {
            let full = devices[id.index()].has_full_charge();
            if full {
                out.released.push(*id);
            }
            !full
        });
        for id in &out.released {
            debug!(vehicle = %id, tick = span.index, "fully charged, leaving bay");
        }

        while self.occupied.len() < self.bays {
            let Some(id) = self.waiting.pop_back() else { break };
            self.occupied.push(id);
            out.promoted.push(id);
            debug!(vehicle = %id, tick = span.index, "promoted from queue");
        }

        trace!(
            tick = span.index,
            charging = self.occupied.len(),
            waiting = self.waiting.len(),
            "station"
        );
        Ok(out)
    }
}
