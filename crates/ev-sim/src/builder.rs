//! Fluent builder for constructing a [`Sim`].

use ev_agent::SimulationAgent;
use ev_core::SimConfig;
use ev_fleet::{PrototypeFactory, VehicleConfig};
use ev_station::ChargingStation;
use tracing::debug;

use crate::{FleetConfig, Sim, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Example
///
/// ```rust
/// use ev_core::{Pacing, SimConfig};
/// use ev_sim::{NoopObserver, SimBuilder, reference_prototypes};
///
/// let config = SimConfig { total_minutes: 30, pacing: Pacing::Virtual, ..SimConfig::default() };
/// let mut sim = SimBuilder::new(config)
///     .prototypes(reference_prototypes().unwrap())
///     .build()
///     .unwrap();
/// sim.run(&mut NoopObserver).unwrap();
/// assert_eq!(sim.report().vehicles.len(), 20);
/// ```
pub struct SimBuilder {
    config:     SimConfig,
    prototypes: Vec<VehicleConfig>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, prototypes: Vec::new() }
    }

    pub fn from_fleet_config(fleet: FleetConfig) -> Self {
        Self { config: fleet.sim, prototypes: fleet.prototypes }
    }

    pub fn prototype(mut self, config: VehicleConfig) -> Self {
        self.prototypes.push(config);
        self
    }

    pub fn prototypes(mut self, configs: impl IntoIterator<Item = VehicleConfig>) -> Self {
        self.prototypes.extend(configs);
        self
    }

    /// Validate the configuration, spawn `vehicle_count` vehicles from the
    /// prototypes and start each of them.
    ///
    /// # Errors
    ///
    /// - [`SimError::Config`](crate::SimError::Config) for a zero tick size
    ///   or compression ratio.
    /// - [`SimError::Fleet`](crate::SimError::Fleet) if vehicles are
    ///   requested but no prototype was supplied.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let mut factory = PrototypeFactory::new(self.config.seed)
            .fault_sampling(self.config.fault_sampling);
        for proto in self.prototypes {
            factory.add_prototype(proto);
        }

        let mut vehicles = factory.create_fleet(self.config.vehicle_count)?;
        for v in &mut vehicles {
            v.begin()?;
        }
        debug!(
            vehicles = vehicles.len(),
            prototypes = factory.prototypes().count(),
            "fleet spawned"
        );

        let station = ChargingStation::new(self.config.bay_count);
        Ok(Sim::new(self.config, vehicles, station))
    }
}
