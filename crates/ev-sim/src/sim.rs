//! The `Sim` struct and its tick loop.

use ev_agent::{AgentResult, Intent, SimulationAgent};
use ev_core::{Pacing, SimConfig, SimTime, TickSpan, VehicleId};
use ev_fleet::{Vehicle, VehicleState};
use ev_station::{Admission, ChargingStation};
use tracing::info;

use crate::{
    FleetReport, Pacer, RealTimePacer, Scheduler, SimError, SimObserver, SimResult, TickStats,
    VirtualPacer,
};

/// One simulation run.
///
/// Each tick, driven by a [`Scheduler`]:
///
/// 1. **Update phase** (optionally parallel with the `parallel` feature):
///    every vehicle's `tick_update`, collecting `Intent`s.
/// 2. **Apply phase** (sequential, ascending `VehicleId`):
///    `RequestCharge` → [`ChargingStation::admit`].
/// 3. **Station**: charge occupied bays, release full vehicles, promote from
///    the queue.
///
/// Create via [`SimBuilder`][crate::SimBuilder].  A `Sim` runs once; a second
/// [`run`](Sim::run) returns [`SimError::AlreadyRun`].
pub struct Sim {
    config:   SimConfig,
    /// Indexed by `VehicleId`.
    vehicles: Vec<Vehicle>,
    station:  ChargingStation,
    has_run:  bool,
    elapsed:  SimTime,
}

impl Sim {
    pub(crate) fn new(config: SimConfig, vehicles: Vec<Vehicle>, station: ChargingStation) -> Self {
        Self {
            config,
            vehicles,
            station,
            has_run: false,
            elapsed: SimTime::ZERO,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn station(&self) -> &ChargingStation {
        &self.station
    }

    /// Simulated time covered so far (end of the last tick fired).
    pub fn elapsed(&self) -> SimTime {
        self.elapsed
    }

    pub fn has_run(&self) -> bool {
        self.has_run
    }

    pub fn report(&self) -> FleetReport {
        FleetReport::from_vehicles(&self.vehicles)
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Run to completion, pacing as `config.pacing` says.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        match self.config.pacing {
            Pacing::Virtual => self.run_with_pacer(&mut VirtualPacer::new(), observer),
            Pacing::RealTime => self.run_with_pacer(&mut RealTimePacer::new(), observer),
        }
    }

    /// Run to completion with an explicit pacer.
    pub fn run_with_pacer<P: Pacer, O: SimObserver>(
        &mut self,
        pacer:    &mut P,
        observer: &mut O,
    ) -> SimResult<()> {
        if self.has_run {
            return Err(SimError::AlreadyRun);
        }
        self.has_run = true;

        let snapshot_every = self.config.output_interval_ticks;
        let vehicles = &mut self.vehicles;
        let station = &mut self.station;
        let obs = &mut *observer;

        let scheduler = Scheduler::builder(self.config.tick_ms)
            .total_minutes(self.config.total_minutes)
            .compression(self.config.compression)
            .on_tick(|span| step(&mut *vehicles, &mut *station, &mut *obs, span, snapshot_every))
            .build()?;

        let real_secs = match self.config.pacing {
            Pacing::Virtual => 0.0,
            Pacing::RealTime => scheduler.expected_real_duration().as_secs_f64(),
        };
        info!(
            vehicles = self.config.vehicle_count,
            bays = self.config.bay_count,
            ticks = scheduler.total_ticks(),
            pacing = ?self.config.pacing,
            real_secs,
            "simulation started"
        );

        let ticks = scheduler.run(pacer)?;
        self.elapsed = SimTime(ticks * self.config.tick_ms);

        info!(ticks, elapsed = %self.elapsed, "simulation finished");
        observer.on_sim_end(self.elapsed, &self.vehicles);
        Ok(())
    }
}

// ── Tick processing ───────────────────────────────────────────────────────────

fn step<O: SimObserver>(
    vehicles:       &mut [Vehicle],
    station:        &mut ChargingStation,
    observer:       &mut O,
    span:           TickSpan,
    snapshot_every: u64,
) -> SimResult<()> {
    observer.on_tick_start(span);

    let requests = update_vehicles(vehicles, span)?;

    let mut stats = TickStats::default();
    for id in requests {
        match station.admit(id)? {
            Admission::Charging => stats.admitted += 1,
            Admission::Queued => stats.queued += 1,
        }
    }

    let out = station.tick(span, vehicles)?;
    stats.released = out.released.len();
    stats.promoted = out.promoted.len();

    for v in vehicles.iter() {
        match v.state() {
            VehicleState::Flying => stats.flying += 1,
            VehicleState::Waiting => stats.waiting += 1,
            VehicleState::Charging => stats.charging += 1,
            VehicleState::Unknown => {}
        }
    }

    observer.on_tick_end(span, &stats);
    if snapshot_every > 0 && span.index.is_multiple_of(snapshot_every) {
        observer.on_snapshot(span, vehicles, station);
    }
    Ok(())
}

/// Update every vehicle and return the ids that asked for charge, ascending.
///
/// With the `parallel` feature the updates run on Rayon's pool; `collect` on
/// an indexed parallel iterator keeps slice order, so the returned ids (and
/// the first error, if any) are the same as a sequential pass.
fn update_vehicles(vehicles: &mut [Vehicle], span: TickSpan) -> SimResult<Vec<VehicleId>> {
    #[cfg(not(feature = "parallel"))]
    let results: Vec<(VehicleId, AgentResult<Option<Intent>>)> = vehicles
        .iter_mut()
        .map(|v| (v.id(), v.tick_update(span)))
        .collect();

    #[cfg(feature = "parallel")]
    let results: Vec<(VehicleId, AgentResult<Option<Intent>>)> = {
        use rayon::prelude::*;

        vehicles
            .par_iter_mut()
            .map(|v| (v.id(), v.tick_update(span)))
            .collect()
    };

    let mut requests = Vec::new();
    for (id, result) in results {
        if let Some(Intent::RequestCharge) = result? {
            requests.push(id);
        }
    }
    Ok(requests)
}
