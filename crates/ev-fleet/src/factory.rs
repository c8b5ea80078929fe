//! Fluent prototype factory.
//!
//! # Usage
//!
//! ```rust
//! use ev_fleet::{PrototypeFactory, VehicleConfig, VehicleState};
//!
//! let mut factory = PrototypeFactory::new(/*seed=*/ 42)
//!     .prototype(VehicleConfig::new("Alpha Company", 120.0, 320.0, 0.6, 1.6, 4, 0.25).unwrap())
//!     .prototype(VehicleConfig::new("Beta Company", 100.0, 100.0, 0.2, 1.5, 5, 0.10).unwrap());
//!
//! let fleet = factory.create_fleet(10).unwrap();
//! assert_eq!(fleet.len(), 10);
//! assert!(fleet.iter().all(|v| v.state() == VehicleState::Unknown));
//! ```

use std::sync::Arc;

use ev_core::{FaultSampling, SimRng, VehicleId, VehicleRng};

use crate::{FleetError, FleetResult, Vehicle, VehicleConfig};

/// Holds the named prototype configurations and spawns vehicles from them.
///
/// Each vehicle gets a uniformly chosen prototype, the next sequential
/// [`VehicleId`], a shared handle to the prototype's config, and its own
/// [`VehicleRng`] derived from the factory seed.
pub struct PrototypeFactory {
    seed:           u64,
    prototypes:     Vec<Arc<VehicleConfig>>,
    fault_sampling: FaultSampling,
    rng:            SimRng,
    next_id:        u32,
}

impl PrototypeFactory {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            prototypes:     Vec::new(),
            fault_sampling: FaultSampling::default(),
            rng:            SimRng::new(seed),
            next_id:        0,
        }
    }

    /// Add a prototype.  Chainable.
    pub fn prototype(mut self, config: VehicleConfig) -> Self {
        self.add_prototype(config);
        self
    }

    /// Fault sampling mode given to every vehicle created afterwards.
    pub fn fault_sampling(mut self, sampling: FaultSampling) -> Self {
        self.fault_sampling = sampling;
        self
    }

    pub fn add_prototype(&mut self, config: VehicleConfig) {
        self.prototypes.push(Arc::new(config));
    }

    pub fn prototypes(&self) -> impl Iterator<Item = &VehicleConfig> {
        self.prototypes.iter().map(|c| c.as_ref())
    }

    /// Spawn one vehicle from a uniformly chosen prototype.
    ///
    /// # Errors
    ///
    /// [`FleetError::NoPrototypes`] if no prototype was ever added.
    pub fn create_vehicle(&mut self) -> FleetResult<Vehicle> {
        if self.prototypes.is_empty() {
            return Err(FleetError::NoPrototypes);
        }
        let index = self.rng.gen_range(0..self.prototypes.len());
        let config = Arc::clone(&self.prototypes[index]);

        let id = VehicleId(self.next_id);
        self.next_id += 1;

        Ok(Vehicle::new(id, config, VehicleRng::new(self.seed, id))
            .with_fault_sampling(self.fault_sampling))
    }

    /// Spawn `count` vehicles with consecutive ids.
    pub fn create_fleet(&mut self, count: usize) -> FleetResult<Vec<Vehicle>> {
        (0..count).map(|_| self.create_vehicle()).collect()
    }
}
