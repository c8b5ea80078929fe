//! Unit tests for ev-fleet.

use std::sync::Arc;

use ev_core::{MS_PER_HOUR, MS_PER_MINUTE, SimClock, VehicleId, VehicleRng};

use crate::{Vehicle, VehicleConfig};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 60 mph at 1 kWh/mile: drains 1 kWh per simulated minute.
fn config(battery_kwh: f64, fault_prob_per_hour: f64) -> VehicleConfig {
    VehicleConfig::new("Test Co", 60.0, battery_kwh, 1.0, 1.0, 2, fault_prob_per_hour).unwrap()
}

fn vehicle(cfg: VehicleConfig) -> Vehicle {
    Vehicle::new(VehicleId(0), Arc::new(cfg), VehicleRng::new(7, VehicleId(0)))
}

#[cfg(test)]
mod config_tests {
    use super::*;
    use crate::FleetError;

    fn field_of(result: Result<VehicleConfig, FleetError>) -> &'static str {
        match result {
            Err(FleetError::InvalidConfig { field, .. }) => field,
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn valid_config_exposes_fields() {
        let cfg = VehicleConfig::new("Alpha Company", 120.0, 320.0, 0.6, 1.6, 4, 0.25).unwrap();
        assert_eq!(cfg.name(), "Alpha Company");
        assert_eq!(cfg.cruise_speed_mph(), 120.0);
        assert_eq!(cfg.battery_kwh(), 320.0);
        assert_eq!(cfg.charge_hours(), 0.6);
        assert_eq!(cfg.energy_kwh_per_mile(), 1.6);
        assert_eq!(cfg.passengers(), 4);
        assert_eq!(cfg.fault_prob_per_hour(), 0.25);
    }

    #[test]
    fn zero_cruise_speed_rejected() {
        assert_eq!(
            field_of(VehicleConfig::new("x", 0.0, 1.0, 1.0, 1.0, 1, 0.1)),
            "cruise_speed_mph"
        );
    }

    #[test]
    fn each_bad_field_rejected_independently() {
        assert_eq!(field_of(VehicleConfig::new("", 1.0, 1.0, 1.0, 1.0, 1, 0.1)), "name");
        assert_eq!(field_of(VehicleConfig::new("   ", 1.0, 1.0, 1.0, 1.0, 1, 0.1)), "name");
        assert_eq!(
            field_of(VehicleConfig::new("x", 1.0, -5.0, 1.0, 1.0, 1, 0.1)),
            "battery_kwh"
        );
        assert_eq!(
            field_of(VehicleConfig::new("x", 1.0, 1.0, 0.0, 1.0, 1, 0.1)),
            "charge_hours"
        );
        assert_eq!(
            field_of(VehicleConfig::new("x", 1.0, 1.0, 1.0, 0.0, 1, 0.1)),
            "energy_kwh_per_mile"
        );
        assert_eq!(
            field_of(VehicleConfig::new("x", f64::INFINITY, 1.0, 1.0, 1.0, 1, 0.1)),
            "cruise_speed_mph"
        );
        assert_eq!(
            field_of(VehicleConfig::new("x", 1.0, f64::INFINITY, 1.0, 1.0, 1, 0.1)),
            "battery_kwh"
        );
        assert_eq!(
            field_of(VehicleConfig::new("x", 1.0, 1.0, 1.0, 1.0, 0, 0.1)),
            "passengers"
        );
        assert_eq!(
            field_of(VehicleConfig::new("x", 1.0, 1.0, 1.0, 1.0, 1, 1.01)),
            "fault_prob_per_hour"
        );
        assert_eq!(
            field_of(VehicleConfig::new("x", 1.0, 1.0, 1.0, 1.0, 1, -0.01)),
            "fault_prob_per_hour"
        );
    }

    #[test]
    fn nan_rejected() {
        assert_eq!(
            field_of(VehicleConfig::new("x", f64::NAN, 1.0, 1.0, 1.0, 1, 0.1)),
            "cruise_speed_mph"
        );
        assert_eq!(
            field_of(VehicleConfig::new("x", 1.0, 1.0, 1.0, 1.0, 1, f64::NAN)),
            "fault_prob_per_hour"
        );
    }

    #[test]
    fn fault_probability_bounds_are_inclusive() {
        assert!(VehicleConfig::new("x", 1.0, 1.0, 1.0, 1.0, 1, 0.0).is_ok());
        assert!(VehicleConfig::new("x", 1.0, 1.0, 1.0, 1.0, 1, 1.0).is_ok());
    }

    #[test]
    fn derived_rates() {
        // 320 kWh over 0.6 h.
        let cfg = VehicleConfig::new("a", 120.0, 320.0, 0.6, 1.6, 4, 0.25).unwrap();
        let per_hour = cfg.charge_rate_kwh_per_ms() * MS_PER_HOUR as f64;
        assert!((per_hour - 320.0 / 0.6).abs() < 1e-9);
        // 1.6 kWh/mile at 120 mph = 192 kWh/h.
        let use_per_hour = cfg.energy_use_kwh_per_ms() * MS_PER_HOUR as f64;
        assert!((use_per_hour - 192.0).abs() < 1e-9);
    }

    #[test]
    fn fault_probability_scales_and_clamps() {
        let cfg = config(100.0, 0.5);
        assert_eq!(cfg.fault_probability(MS_PER_HOUR / 2), 0.25);
        assert_eq!(cfg.fault_probability(10 * MS_PER_HOUR), 1.0);
        assert_eq!(cfg.fault_probability(0), 0.0);
    }

    #[test]
    fn error_message_names_field() {
        let err = VehicleConfig::new("x", 1.0, 1.0, 1.0, 1.0, 0, 0.1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid vehicle configuration: passengers must be a positive number"
        );
    }
}

#[cfg(test)]
mod state_machine {
    use ev_agent::{AgentError, ChargeableDevice, Intent, SimulationAgent};

    use super::*;
    use crate::{LOW_CHARGE_FRACTION, VehicleState};

    #[test]
    fn starts_full_and_unknown() {
        let v = vehicle(config(100.0, 0.0));
        assert_eq!(v.state(), VehicleState::Unknown);
        assert_eq!(v.charge_kwh(), 100.0);
        assert_eq!(v.percent_charge_remaining(), 100.0);
        assert!(v.has_full_charge());
    }

    #[test]
    fn update_before_begin_is_logic_error() {
        let mut v = vehicle(config(100.0, 0.0));
        let span = SimClock::new(1_000).advance().unwrap();
        assert_eq!(v.tick_update(span), Err(AgentError::NotStarted(VehicleId(0))));
    }

    #[test]
    fn begin_twice_is_logic_error() {
        let mut v = vehicle(config(100.0, 0.0));
        v.begin().unwrap();
        assert_eq!(v.state(), VehicleState::Flying);
        assert_eq!(v.begin(), Err(AgentError::AlreadyStarted(VehicleId(0))));
    }

    #[test]
    fn flying_depletes_until_low_then_waits() {
        let mut v = vehicle(config(100.0, 0.0));
        v.begin().unwrap();

        let mut clock = SimClock::new(MS_PER_MINUTE);
        let mut prev_fraction = v.charge_fraction();
        let mut request_tick = None;
        for _ in 0..200 {
            let span = clock.advance().unwrap();
            let intent = v.tick_update(span).unwrap();
            if let Some(Intent::RequestCharge) = intent {
                request_tick = Some(span.index);
                break;
            }
            assert_eq!(v.state(), VehicleState::Flying);
            assert!(v.charge_fraction() < prev_fraction, "charge must fall while flying");
            assert!(v.charge_fraction() >= LOW_CHARGE_FRACTION);
            prev_fraction = v.charge_fraction();
        }

        let tick = request_tick.expect("vehicle never requested charge");
        assert!((49..=51).contains(&tick), "requested at tick {tick}");
        assert_eq!(v.state(), VehicleState::Waiting);
        assert!(v.charge_fraction() < LOW_CHARGE_FRACTION);
        assert_eq!(v.flight_ms(), (tick + 1) * MS_PER_MINUTE);
    }

    #[test]
    fn waiting_accumulates_wait_time_only() {
        let mut v = vehicle(config(100.0, 0.0));
        v.begin().unwrap();
        let mut clock = SimClock::new(30 * MS_PER_MINUTE);
        v.tick_update(clock.advance().unwrap()).unwrap();
        assert_eq!(v.tick_update(clock.advance().unwrap()).unwrap(), Some(Intent::RequestCharge));

        let charge = v.charge_kwh();
        for _ in 0..3 {
            assert_eq!(v.tick_update(clock.advance().unwrap()).unwrap(), None);
        }
        assert_eq!(v.state(), VehicleState::Waiting);
        assert_eq!(v.wait_ms(), 90 * MS_PER_MINUTE);
        assert_eq!(v.charge_kwh(), charge);
        assert_eq!(v.flight_ms(), 60 * MS_PER_MINUTE);
    }

    #[test]
    fn depletion_clamps_at_zero() {
        // One four-hour tick burns 240 kWh from a 100 kWh pack.
        let mut v = vehicle(config(100.0, 0.0));
        v.begin().unwrap();
        let span = SimClock::new(4 * MS_PER_HOUR).advance().unwrap();
        assert_eq!(v.tick_update(span).unwrap(), Some(Intent::RequestCharge));
        assert_eq!(v.charge_kwh(), 0.0);
    }

    #[test]
    fn partial_charge_sets_charging_then_full_flies() {
        let mut v = vehicle(config(100.0, 0.0));
        v.begin().unwrap();
        let mut clock = SimClock::new(30 * MS_PER_MINUTE);
        v.tick_update(clock.advance().unwrap()).unwrap();
        v.tick_update(clock.advance().unwrap()).unwrap();
        assert_eq!(v.state(), VehicleState::Waiting);

        v.add_charge(10.0);
        assert_eq!(v.state(), VehicleState::Charging);
        v.tick_update(clock.advance().unwrap()).unwrap();
        assert_eq!(v.state(), VehicleState::Charging);
        assert_eq!(v.charge_ms(), 30 * MS_PER_MINUTE);

        v.add_charge(1_000.0);
        assert_eq!(v.charge_kwh(), 100.0);
        assert_eq!(v.state(), VehicleState::Flying);
    }

    #[test]
    fn filling_first_increment_skips_charging() {
        let mut v = vehicle(config(100.0, 0.0));
        v.begin().unwrap();
        let mut clock = SimClock::new(30 * MS_PER_MINUTE);
        v.tick_update(clock.advance().unwrap()).unwrap();
        v.tick_update(clock.advance().unwrap()).unwrap();
        assert_eq!(v.state(), VehicleState::Waiting);

        v.add_charge(v.charge_rate() * 10.0 * MS_PER_HOUR as f64);
        assert_eq!(v.state(), VehicleState::Flying);
        assert!(v.has_full_charge());
        assert_eq!(v.charge_ms(), 0);
    }

    #[test]
    fn charge_rate_comes_from_config() {
        let v = vehicle(config(100.0, 0.0));
        assert_eq!(v.charge_rate(), v.config().charge_rate_kwh_per_ms());
    }
}

#[cfg(test)]
mod faults {
    use ev_agent::SimulationAgent;
    use ev_core::FaultSampling;

    use super::*;

    /// Big battery so the vehicle keeps flying for the whole test.
    fn flyer(fault_prob_per_hour: f64, sampling: FaultSampling) -> Vehicle {
        let mut v = vehicle(config(1e9, fault_prob_per_hour)).with_fault_sampling(sampling);
        v.begin().unwrap();
        v
    }

    #[test]
    fn zero_probability_never_faults() {
        let mut v = flyer(0.0, FaultSampling::Bernoulli);
        let mut clock = SimClock::new(MS_PER_HOUR);
        for _ in 0..50 {
            v.tick_update(clock.advance().unwrap()).unwrap();
        }
        assert_eq!(v.faults(), 0);
    }

    #[test]
    fn certain_probability_faults_every_tick() {
        let mut v = flyer(1.0, FaultSampling::Bernoulli);
        let mut clock = SimClock::new(MS_PER_HOUR);
        for _ in 0..20 {
            v.tick_update(clock.advance().unwrap()).unwrap();
        }
        assert_eq!(v.faults(), 20);
    }

    #[test]
    fn expected_sampling_counts_whole_faults() {
        // 0.5 per hour over 30-minute ticks: 0.25 per tick, one fault per four.
        let mut v = flyer(0.5, FaultSampling::Expected);
        let mut clock = SimClock::new(30 * MS_PER_MINUTE);
        for _ in 0..3 {
            v.tick_update(clock.advance().unwrap()).unwrap();
        }
        assert_eq!(v.faults(), 0);
        v.tick_update(clock.advance().unwrap()).unwrap();
        assert_eq!(v.faults(), 1);
        for _ in 0..12 {
            v.tick_update(clock.advance().unwrap()).unwrap();
        }
        assert_eq!(v.faults(), 4);
    }

    #[test]
    fn bernoulli_rate_near_expectation() {
        // 0.5 per tick over 4000 ticks; a 6-sigma band is about ±190.
        let mut v = flyer(0.5, FaultSampling::Bernoulli);
        let mut clock = SimClock::new(MS_PER_HOUR);
        for _ in 0..4_000 {
            v.tick_update(clock.advance().unwrap()).unwrap();
        }
        let faults = v.faults() as i64;
        assert!((faults - 2_000).abs() < 200, "faults = {faults}");
    }

    #[test]
    fn same_seed_same_faults() {
        let run = || {
            let mut v = flyer(0.3, FaultSampling::Bernoulli);
            let mut clock = SimClock::new(MS_PER_HOUR);
            (0..100)
                .map(|_| {
                    v.tick_update(clock.advance().unwrap()).unwrap();
                    v.faults()
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}

#[cfg(test)]
mod factory {
    use std::collections::HashSet;

    use ev_core::FaultSampling;

    use crate::{FleetError, PrototypeFactory, VehicleState};

    use super::*;

    fn five() -> PrototypeFactory {
        ["one", "two", "three", "four", "five"]
            .into_iter()
            .fold(PrototypeFactory::new(99), |f, name| {
                f.prototype(VehicleConfig::new(name, 1.0, 1.0, 1.0, 1.0, 1, 1.0).unwrap())
            })
    }

    #[test]
    fn empty_factory_errors() {
        let mut factory = PrototypeFactory::new(1);
        assert_eq!(factory.create_vehicle().unwrap_err(), FleetError::NoPrototypes);
    }

    #[test]
    fn ids_are_sequential_and_state_unknown() {
        let fleet = five().create_fleet(20).unwrap();
        for (i, v) in fleet.iter().enumerate() {
            assert_eq!(v.id().index(), i);
            assert_eq!(v.state(), VehicleState::Unknown);
            assert_eq!(v.charge_kwh(), v.config().battery_kwh());
        }
    }

    #[test]
    fn every_prototype_gets_picked() {
        let fleet = five().create_fleet(500).unwrap();
        let names: HashSet<&str> = fleet.iter().map(|v| v.name()).collect();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn selection_is_deterministic_per_seed() {
        let a: Vec<String> =
            five().create_fleet(50).unwrap().iter().map(|v| v.name().to_owned()).collect();
        let b: Vec<String> =
            five().create_fleet(50).unwrap().iter().map(|v| v.name().to_owned()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn vehicles_share_prototype_config() {
        let mut factory = PrototypeFactory::new(3)
            .prototype(VehicleConfig::new("solo", 1.0, 1.0, 1.0, 1.0, 1, 1.0).unwrap());
        let a = factory.create_vehicle().unwrap();
        let b = factory.create_vehicle().unwrap();
        assert!(std::ptr::eq(a.config(), b.config()));
        assert_eq!(factory.prototypes().count(), 1);
    }

    #[test]
    fn fault_sampling_is_passed_on() {
        use ev_agent::SimulationAgent;

        // 1 fault/hour with Expected sampling faults exactly once per hour tick.
        let mut factory = PrototypeFactory::new(3)
            .fault_sampling(FaultSampling::Expected)
            .prototype(VehicleConfig::new("solo", 1.0, 1e6, 1.0, 1.0, 1, 1.0).unwrap());
        let mut v = factory.create_vehicle().unwrap();
        v.begin().unwrap();
        let mut clock = SimClock::new(MS_PER_HOUR);
        for _ in 0..5 {
            v.tick_update(clock.advance().unwrap()).unwrap();
        }
        assert_eq!(v.faults(), 5);
    }

}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use crate::{DEFAULT_FAULT_PROB_PER_HOUR, VehicleConfig};

    #[test]
    fn missing_fault_probability_defaults() {
        let json = r#"{
            "name": "Beta Company", "cruise_speed_mph": 100, "battery_kwh": 100,
            "charge_hours": 0.2, "energy_kwh_per_mile": 1.5, "passengers": 5
        }"#;
        let cfg: VehicleConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.fault_prob_per_hour(), DEFAULT_FAULT_PROB_PER_HOUR);
        assert_eq!(cfg.passengers(), 5);
    }

    #[test]
    fn invalid_json_config_rejected() {
        let json = r#"{
            "name": "Broken", "cruise_speed_mph": -1, "battery_kwh": 100,
            "charge_hours": 0.2, "energy_kwh_per_mile": 1.5, "passengers": 5
        }"#;
        let err = serde_json::from_str::<VehicleConfig>(json).unwrap_err();
        assert!(err.to_string().contains("cruise_speed_mph"), "{err}");
    }

    #[test]
    fn serialize_then_parse_is_equal() {
        let cfg = VehicleConfig::new("Echo Company", 30.0, 150.0, 0.3, 5.8, 2, 0.61).unwrap();
        let text = serde_json::to_string(&cfg).unwrap();
        assert_eq!(serde_json::from_str::<VehicleConfig>(&text).unwrap(), cfg);
    }
}
