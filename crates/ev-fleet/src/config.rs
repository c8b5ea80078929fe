//! Immutable, validated vehicle configuration.
//!
//! A `VehicleConfig` can only be obtained through [`VehicleConfig::new`] (or,
//! with the `serde` feature, by deserializing, which runs the same checks).
//! Fields are private and there are no setters, so every config in
//! circulation satisfies the constraints below:
//!
//! | Field                  | Unit      | Constraint     |
//! |------------------------|-----------|----------------|
//! | `name`                 | -         | non-empty      |
//! | `cruise_speed_mph`     | mph       | finite, > 0    |
//! | `battery_kwh`          | kWh       | finite, > 0    |
//! | `charge_hours`         | h         | finite, > 0 (empty → full) |
//! | `energy_kwh_per_mile`  | kWh/mile  | finite, > 0    |
//! | `passengers`           | -         | > 0            |
//! | `fault_prob_per_hour`  | 1/h       | in [0, 1]      |

use ev_core::MS_PER_HOUR;

use crate::{FleetError, FleetResult};

/// Fault probability used when a configuration file omits it.
pub const DEFAULT_FAULT_PROB_PER_HOUR: f64 = 0.25;

/// Static parameters of one vehicle prototype.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawVehicleConfig"))]
pub struct VehicleConfig {
    name:                String,
    cruise_speed_mph:    f64,
    battery_kwh:         f64,
    charge_hours:        f64,
    energy_kwh_per_mile: f64,
    passengers:          u32,
    fault_prob_per_hour: f64,
}

impl VehicleConfig {
    /// Validate and construct a configuration.
    ///
    /// # Errors
    ///
    /// [`FleetError::InvalidConfig`] naming the first field that violates its
    /// constraint.  NaN and infinity fail every numeric check.
    pub fn new(
        name:                impl Into<String>,
        cruise_speed_mph:    f64,
        battery_kwh:         f64,
        charge_hours:        f64,
        energy_kwh_per_mile: f64,
        passengers:          u32,
        fault_prob_per_hour: f64,
    ) -> FleetResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(invalid("name", "cannot be blank"));
        }
        positive("cruise_speed_mph", cruise_speed_mph)?;
        positive("battery_kwh", battery_kwh)?;
        positive("charge_hours", charge_hours)?;
        positive("energy_kwh_per_mile", energy_kwh_per_mile)?;
        if passengers == 0 {
            return Err(invalid("passengers", "must be a positive number"));
        }
        if !(0.0..=1.0).contains(&fault_prob_per_hour) {
            return Err(invalid("fault_prob_per_hour", "must be in [0.0, 1.0]"));
        }

        Ok(Self {
            name,
            cruise_speed_mph,
            battery_kwh,
            charge_hours,
            energy_kwh_per_mile,
            passengers,
            fault_prob_per_hour,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cruise_speed_mph(&self) -> f64 {
        self.cruise_speed_mph
    }

    pub fn battery_kwh(&self) -> f64 {
        self.battery_kwh
    }

    pub fn charge_hours(&self) -> f64 {
        self.charge_hours
    }

    pub fn energy_kwh_per_mile(&self) -> f64 {
        self.energy_kwh_per_mile
    }

    pub fn passengers(&self) -> u32 {
        self.passengers
    }

    pub fn fault_prob_per_hour(&self) -> f64 {
        self.fault_prob_per_hour
    }

    // ── Derived rates ─────────────────────────────────────────────────────

    /// Charging rate in kWh per simulated millisecond.
    #[inline]
    pub fn charge_rate_kwh_per_ms(&self) -> f64 {
        self.battery_kwh / (self.charge_hours * MS_PER_HOUR as f64)
    }

    /// Energy drawn at cruise, in kWh per simulated millisecond.
    #[inline]
    pub fn energy_use_kwh_per_ms(&self) -> f64 {
        self.energy_kwh_per_mile * self.cruise_speed_mph / MS_PER_HOUR as f64
    }

    /// Probability of a fault within `interval_ms`, clamped to `[0, 1]`.
    #[inline]
    pub fn fault_probability(&self, interval_ms: u64) -> f64 {
        (self.fault_prob_per_hour * interval_ms as f64 / MS_PER_HOUR as f64).min(1.0)
    }
}

fn invalid(field: &'static str, reason: &'static str) -> FleetError {
    FleetError::InvalidConfig { field, reason }
}

fn positive(field: &'static str, value: f64) -> FleetResult<()> {
    // NaN fails both comparisons; infinity fails `is_finite`.
    if !(value.is_finite() && value > 0.0) {
        return Err(invalid(field, "must be a positive number"));
    }
    Ok(())
}

// ── Deserialization mirror ────────────────────────────────────────────────────

/// Unchecked field bag that serde fills before [`VehicleConfig::new`] runs.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawVehicleConfig {
    name:                String,
    cruise_speed_mph:    f64,
    battery_kwh:         f64,
    charge_hours:        f64,
    energy_kwh_per_mile: f64,
    passengers:          u32,
    #[serde(default = "default_fault_prob")]
    fault_prob_per_hour: f64,
}

#[cfg(feature = "serde")]
fn default_fault_prob() -> f64 {
    DEFAULT_FAULT_PROB_PER_HOUR
}

#[cfg(feature = "serde")]
impl TryFrom<RawVehicleConfig> for VehicleConfig {
    type Error = FleetError;

    fn try_from(raw: RawVehicleConfig) -> FleetResult<Self> {
        VehicleConfig::new(
            raw.name,
            raw.cruise_speed_mph,
            raw.battery_kwh,
            raw.charge_hours,
            raw.energy_kwh_per_mile,
            raw.passengers,
            raw.fault_prob_per_hour,
        )
    }
}
