//! Complete run description: simulation parameters plus the prototype set.

use ev_core::SimConfig;
use ev_fleet::{FleetResult, VehicleConfig};

/// Everything [`SimBuilder`](crate::SimBuilder) needs to build a [`Sim`](crate::Sim).
///
/// With the `serde` feature this is the shape of the JSON configuration file:
///
/// ```json
/// {
///   "sim": { "vehicle_count": 20, "bay_count": 3, "pacing": "virtual" },
///   "prototypes": [
///     { "name": "Alpha Company", "cruise_speed_mph": 120, "battery_kwh": 320,
///       "charge_hours": 0.6, "energy_kwh_per_mile": 1.6, "passengers": 4,
///       "fault_prob_per_hour": 0.25 }
///   ]
/// }
/// ```
///
/// Omitted `sim` fields take their [`SimConfig::default`] values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetConfig {
    #[cfg_attr(feature = "serde", serde(default))]
    pub sim:        SimConfig,
    pub prototypes: Vec<VehicleConfig>,
}

impl FleetConfig {
    /// Default simulation parameters with the five reference prototypes.
    pub fn reference() -> FleetResult<Self> {
        Ok(Self {
            sim:        SimConfig::default(),
            prototypes: reference_prototypes()?,
        })
    }
}

/// The five-company prototype set the simulator ships with.
pub fn reference_prototypes() -> FleetResult<Vec<VehicleConfig>> {
    Ok(vec![
        VehicleConfig::new("Alpha Company", 120.0, 320.0, 0.60, 1.6, 4, 0.25)?,
        VehicleConfig::new("Beta Company", 100.0, 100.0, 0.20, 1.5, 5, 0.10)?,
        VehicleConfig::new("Charlie Company", 220.0, 320.0, 0.80, 2.2, 3, 0.05)?,
        VehicleConfig::new("Delta Company", 90.0, 120.0, 0.62, 0.8, 2, 0.22)?,
        VehicleConfig::new("Echo Company", 30.0, 150.0, 0.30, 5.8, 2, 0.61)?,
    ])
}
