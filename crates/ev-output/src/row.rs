//! Plain data row types written by output backends.

use ev_sim::{PrototypeSummary, VehicleReport};

/// Fleet state at one snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:          u64,
    /// Simulated time at the end of the tick.
    pub sim_time_ms:   u64,
    pub flying:        u32,
    pub waiting:       u32,
    pub charging:      u32,
    pub bays_occupied: u32,
    pub queue_len:     u32,
    /// Charge requests granted a bay immediately during this tick.
    pub admitted:      u32,
    /// Vehicles that left a bay fully charged during this tick.
    pub released:      u32,
}

/// Final statistics for one vehicle.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleResultRow {
    pub vehicle_id: u32,
    pub name:       String,
    pub flight_ms:  u64,
    pub charge_ms:  u64,
    pub wait_ms:    u64,
    pub state:      &'static str,
    pub charge_pct: f64,
    pub faults:     u32,
    pub passengers: u32,
}

impl From<&VehicleReport> for VehicleResultRow {
    fn from(r: &VehicleReport) -> Self {
        Self {
            vehicle_id: r.id.0,
            name:       r.name.clone(),
            flight_ms:  r.flight_ms,
            charge_ms:  r.charge_ms,
            wait_ms:    r.wait_ms,
            state:      r.state.as_str(),
            charge_pct: r.charge_pct,
            faults:     r.faults,
            passengers: r.passengers,
        }
    }
}

/// Final aggregates for one prototype.
#[derive(Debug, Clone, PartialEq)]
pub struct PrototypeSummaryRow {
    pub name:               String,
    pub vehicles:           u32,
    pub avg_flight_minutes: f64,
    pub avg_charge_minutes: f64,
    pub avg_wait_minutes:   f64,
    pub max_faults:         u32,
    pub passenger_miles:    f64,
}

impl From<&PrototypeSummary> for PrototypeSummaryRow {
    fn from(s: &PrototypeSummary) -> Self {
        Self {
            name:               s.name.clone(),
            vehicles:           s.vehicles as u32,
            avg_flight_minutes: s.avg_flight_minutes,
            avg_charge_minutes: s.avg_charge_minutes,
            avg_wait_minutes:   s.avg_wait_minutes,
            max_faults:         s.max_faults,
            passenger_miles:    s.passenger_miles,
        }
    }
}
