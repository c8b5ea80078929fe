//! The vehicle agent.
//!
//! A `Vehicle` never holds a reference to the charging station.  When its
//! battery runs low during a flying tick it moves itself to `Waiting` and
//! returns [`Intent::RequestCharge`]; the simulation driver turns that intent
//! into a station admission.  The station then charges the vehicle through
//! the [`ChargeableDevice`] impl below, which is the only path out of
//! `Waiting`.

use std::sync::Arc;

use ev_agent::{AgentError, AgentResult, ChargeableDevice, Intent, SimulationAgent};
use ev_core::{FaultSampling, TickSpan, VehicleId, VehicleRng};
use tracing::debug;

use crate::{VehicleConfig, VehicleState};

/// A flying vehicle requests charge once its remaining fraction drops below
/// this value.
pub const LOW_CHARGE_FRACTION: f64 = 0.5;

/// One eVTOL.  Created by [`PrototypeFactory`](crate::PrototypeFactory) with
/// a full battery in the `Unknown` state.
#[derive(Clone, Debug)]
pub struct Vehicle {
    id:              VehicleId,
    config:          Arc<VehicleConfig>,
    charge_kwh:      f64,
    state:           VehicleState,

    // Cumulative statistics, simulated milliseconds.
    flight_ms:       u64,
    charge_ms:       u64,
    wait_ms:         u64,
    faults:          u32,

    fault_sampling:  FaultSampling,
    /// Running per-interval probability sum for `FaultSampling::Expected`.
    expected_faults: f64,
    rng:             VehicleRng,
}

impl Vehicle {
    pub fn new(id: VehicleId, config: Arc<VehicleConfig>, rng: VehicleRng) -> Self {
        let charge_kwh = config.battery_kwh();
        Self {
            id,
            config,
            charge_kwh,
            state:           VehicleState::Unknown,
            flight_ms:       0,
            charge_ms:       0,
            wait_ms:         0,
            faults:          0,
            fault_sampling:  FaultSampling::default(),
            expected_faults: 0.0,
            rng,
        }
    }

    /// Switch how flying ticks turn fault probability into faults.
    pub fn with_fault_sampling(mut self, sampling: FaultSampling) -> Self {
        self.fault_sampling = sampling;
        self
    }

    // ── Read accessors ────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> VehicleId {
        self.id
    }

    #[inline]
    pub fn config(&self) -> &VehicleConfig {
        &self.config
    }

    /// Prototype (company) name.
    #[inline]
    pub fn name(&self) -> &str {
        self.config.name()
    }

    #[inline]
    pub fn state(&self) -> VehicleState {
        self.state
    }

    #[inline]
    pub fn charge_kwh(&self) -> f64 {
        self.charge_kwh
    }

    /// Remaining charge as a fraction of capacity, in `[0, 1]`.
    #[inline]
    pub fn charge_fraction(&self) -> f64 {
        self.charge_kwh / self.config.battery_kwh()
    }

    /// Remaining charge as a percentage of capacity, in `[0, 100]`.
    #[inline]
    pub fn percent_charge_remaining(&self) -> f64 {
        self.charge_fraction() * 100.0
    }

    pub fn flight_ms(&self) -> u64 {
        self.flight_ms
    }

    pub fn charge_ms(&self) -> u64 {
        self.charge_ms
    }

    pub fn wait_ms(&self) -> u64 {
        self.wait_ms
    }

    pub fn faults(&self) -> u32 {
        self.faults
    }

    pub fn passengers(&self) -> u32 {
        self.config.passengers()
    }

    pub fn cruise_speed_mph(&self) -> f64 {
        self.config.cruise_speed_mph()
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// One fault trial covering `interval_ms` of flight.
    fn fault_trial(&mut self, interval_ms: u64) -> bool {
        let p = self.config.fault_probability(interval_ms);
        match self.fault_sampling {
            FaultSampling::Bernoulli => self.rng.gen_bool(p),
            FaultSampling::Expected => {
                self.expected_faults += p;
                if self.expected_faults >= 1.0 {
                    self.expected_faults -= 1.0;
                    true
                } else {
                    false
                }
            }
        }
    }

    fn fly(&mut self, span: TickSpan) -> Option<Intent> {
        let dt = span.elapsed_ms();
        self.flight_ms += dt;
        self.charge_kwh =
            (self.charge_kwh - self.config.energy_use_kwh_per_ms() * dt as f64).max(0.0);

        if self.fault_trial(dt) {
            self.faults += 1;
            debug!(vehicle = %self.id, tick = span.index, faults = self.faults, "fault");
        }

        if self.charge_fraction() < LOW_CHARGE_FRACTION {
            self.state = VehicleState::Waiting;
            debug!(
                vehicle = %self.id,
                tick = span.index,
                charge_pct = self.percent_charge_remaining(),
                "low charge, requesting a bay"
            );
            return Some(Intent::RequestCharge);
        }
        None
    }
}

impl SimulationAgent for Vehicle {
    fn begin(&mut self) -> AgentResult<()> {
        if self.state != VehicleState::Unknown {
            return Err(AgentError::AlreadyStarted(self.id));
        }
        self.state = VehicleState::Flying;
        Ok(())
    }

    fn tick_update(&mut self, span: TickSpan) -> AgentResult<Option<Intent>> {
        let intent = match self.state {
            VehicleState::Unknown => return Err(AgentError::NotStarted(self.id)),
            VehicleState::Flying => self.fly(span),
            VehicleState::Waiting => {
                self.wait_ms += span.elapsed_ms();
                None
            }
            VehicleState::Charging => {
                self.charge_ms += span.elapsed_ms();
                if self.has_full_charge() {
                    self.state = VehicleState::Flying;
                }
                None
            }
        };
        Ok(intent)
    }
}

impl ChargeableDevice for Vehicle {
    /// Clamp to capacity, then pick `Flying` if full and `Charging` otherwise.
    /// A first increment that fills the battery skips `Charging` entirely.
    fn add_charge(&mut self, kwh: f64) {
        self.charge_kwh = (self.charge_kwh + kwh).min(self.config.battery_kwh());
        self.state = if self.has_full_charge() {
            VehicleState::Flying
        } else {
            VehicleState::Charging
        };
    }

    #[inline]
    fn charge_rate(&self) -> f64 {
        self.config.charge_rate_kwh_per_ms()
    }

    #[inline]
    fn has_full_charge(&self) -> bool {
        self.charge_kwh == self.config.battery_kwh()
    }
}
