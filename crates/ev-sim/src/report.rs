//! Read-only result queries over a finished (or running) fleet.
//!
//! Nothing here formats or prints; the demo binary and `ev-output` decide how
//! results are presented.

use std::collections::BTreeMap;

use ev_core::{MS_PER_HOUR, MS_PER_MINUTE, VehicleId};
use ev_fleet::{Vehicle, VehicleState};

// ── VehicleReport ─────────────────────────────────────────────────────────────

/// Snapshot of one vehicle's statistics.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VehicleReport {
    pub id:               VehicleId,
    pub name:             String,
    pub flight_ms:        u64,
    pub charge_ms:        u64,
    pub wait_ms:          u64,
    pub state:            VehicleState,
    pub charge_pct:       f64,
    pub faults:           u32,
    pub passengers:       u32,
    pub cruise_speed_mph: f64,
}

impl VehicleReport {
    pub fn from_vehicle(v: &Vehicle) -> Self {
        Self {
            id:               v.id(),
            name:             v.name().to_owned(),
            flight_ms:        v.flight_ms(),
            charge_ms:        v.charge_ms(),
            wait_ms:          v.wait_ms(),
            state:            v.state(),
            charge_pct:       v.percent_charge_remaining(),
            faults:           v.faults(),
            passengers:       v.passengers(),
            cruise_speed_mph: v.cruise_speed_mph(),
        }
    }

    pub fn flight_minutes(&self) -> f64 {
        self.flight_ms as f64 / MS_PER_MINUTE as f64
    }

    pub fn charge_minutes(&self) -> f64 {
        self.charge_ms as f64 / MS_PER_MINUTE as f64
    }

    pub fn wait_minutes(&self) -> f64 {
        self.wait_ms as f64 / MS_PER_MINUTE as f64
    }

    /// Flight hours × cruise speed × passengers.
    pub fn passenger_miles(&self) -> f64 {
        self.flight_ms as f64 / MS_PER_HOUR as f64
            * self.cruise_speed_mph
            * self.passengers as f64
    }
}

// ── PrototypeSummary ──────────────────────────────────────────────────────────

/// Aggregates over every vehicle spawned from one prototype.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PrototypeSummary {
    pub name:               String,
    pub vehicles:           usize,
    pub avg_flight_minutes: f64,
    pub avg_charge_minutes: f64,
    pub avg_wait_minutes:   f64,
    pub max_faults:         u32,
    pub passenger_miles:    f64,
}

impl PrototypeSummary {
    /// `group` must be non-empty.
    fn from_group(name: &str, group: &[&VehicleReport]) -> Self {
        let n = group.len() as f64;
        let avg = |f: fn(&VehicleReport) -> f64| group.iter().map(|r| f(r)).sum::<f64>() / n;
        Self {
            name:               name.to_owned(),
            vehicles:           group.len(),
            avg_flight_minutes: avg(VehicleReport::flight_minutes),
            avg_charge_minutes: avg(VehicleReport::charge_minutes),
            avg_wait_minutes:   avg(VehicleReport::wait_minutes),
            max_faults:         group.iter().map(|r| r.faults).max().unwrap_or(0),
            passenger_miles:    group.iter().map(|r| r.passenger_miles()).sum(),
        }
    }
}

// ── FleetReport ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FleetReport {
    /// One entry per vehicle, ascending id.
    pub vehicles:   Vec<VehicleReport>,
    /// One entry per prototype with at least one vehicle, ordered by name.
    pub prototypes: Vec<PrototypeSummary>,
}

impl FleetReport {
    pub fn from_vehicles(vehicles: &[Vehicle]) -> Self {
        let vehicles: Vec<VehicleReport> = vehicles.iter().map(VehicleReport::from_vehicle).collect();

        let mut groups: BTreeMap<&str, Vec<&VehicleReport>> = BTreeMap::new();
        for r in &vehicles {
            groups.entry(r.name.as_str()).or_default().push(r);
        }
        let prototypes = groups
            .iter()
            .map(|(name, group)| PrototypeSummary::from_group(name, group))
            .collect();

        Self { vehicles, prototypes }
    }

    pub fn prototype(&self, name: &str) -> Option<&PrototypeSummary> {
        self.prototypes.iter().find(|p| p.name == name)
    }

    pub fn total_faults(&self) -> u64 {
        self.vehicles.iter().map(|r| r.faults as u64).sum()
    }
}
