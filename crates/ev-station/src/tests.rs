//! Unit tests for ev-station.

use ev_agent::ChargeableDevice;
use ev_core::{SimTime, TickSpan, VehicleId};

use crate::{Admission, ChargingStation, StationError};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Accepts 1 unit per ms and reports full once it has `full_at` units.
#[derive(Debug, Clone)]
struct MockDevice {
    total:   f64,
    full_at: f64,
}

impl MockDevice {
    fn new(full_at: f64) -> Self {
        Self { total: 0.0, full_at }
    }
}

impl ChargeableDevice for MockDevice {
    fn add_charge(&mut self, kwh: f64) {
        self.total += kwh;
    }

    fn charge_rate(&self) -> f64 {
        1.0
    }

    fn has_full_charge(&self) -> bool {
        self.total >= self.full_at
    }
}

/// One-millisecond span `[i, i + 1]`.
fn span(i: u64) -> TickSpan {
    TickSpan::new(i, SimTime(i), SimTime(i + 1))
}

fn ids(raw: &[u32]) -> Vec<VehicleId> {
    raw.iter().copied().map(VehicleId).collect()
}

#[cfg(test)]
mod admission {
    use super::*;

    #[test]
    fn fills_bays_then_queues_newest_first() {
        let mut station = ChargingStation::new(2);
        assert_eq!(station.admit(VehicleId(0)), Ok(Admission::Charging));
        assert_eq!(station.admit(VehicleId(1)), Ok(Admission::Charging));
        assert_eq!(station.admit(VehicleId(2)), Ok(Admission::Queued));
        assert_eq!(station.admit(VehicleId(3)), Ok(Admission::Queued));

        assert_eq!(station.occupied(), ids(&[0, 1]).as_slice());
        assert_eq!(station.waiting().collect::<Vec<_>>(), ids(&[3, 2]));
        assert_eq!(station.free_bays(), 0);
    }

    #[test]
    fn oldest_waiter_promoted_first() {
        // A fills on the first tick, B never does.
        let mut devices =
            vec![MockDevice::new(0.5), MockDevice::new(100.0), MockDevice::new(100.0), MockDevice::new(100.0)];
        let mut station = ChargingStation::new(2);
        for i in 0..4 {
            station.admit(VehicleId(i)).unwrap();
        }

        let out = station.tick(span(0), &mut devices).unwrap();
        assert_eq!(out.released, ids(&[0]));
        assert_eq!(out.promoted, ids(&[2]));
        assert_eq!(station.occupied(), ids(&[1, 2]).as_slice());
        assert_eq!(station.waiting().collect::<Vec<_>>(), ids(&[3]));
    }

    #[test]
    fn duplicate_admission_is_an_error() {
        let mut station = ChargingStation::new(1);
        station.admit(VehicleId(4)).unwrap();
        station.admit(VehicleId(5)).unwrap();
        assert_eq!(station.admit(VehicleId(4)), Err(StationError::AlreadyPresent(VehicleId(4))));
        assert_eq!(station.admit(VehicleId(5)), Err(StationError::AlreadyPresent(VehicleId(5))));
        assert_eq!(station.occupied().len() + station.waiting().len(), 2);
    }

    #[test]
    fn zero_bays_always_waits() {
        let mut devices = vec![MockDevice::new(1.0); 3];
        let mut station = ChargingStation::new(0);
        for i in 0..3 {
            assert_eq!(station.admit(VehicleId(i)), Ok(Admission::Queued));
        }
        for i in 0..10 {
            let out = station.tick(span(i), &mut devices).unwrap();
            assert!(out.promoted.is_empty());
        }
        assert!(station.occupied().is_empty());
        assert_eq!(station.waiting().len(), 3);
        assert!(devices.iter().all(|d| d.total == 0.0));
    }
}

#[cfg(test)]
mod ticking {
    use super::*;

    #[test]
    fn four_device_walkthrough() {
        let mut devices = vec![MockDevice::new(3.0); 4];
        let mut station = ChargingStation::new(2);

        station.admit(VehicleId(0)).unwrap();
        station.tick(span(0), &mut devices).unwrap();
        assert_eq!(devices[0].total, 1.0);

        station.admit(VehicleId(1)).unwrap();
        station.tick(span(1), &mut devices).unwrap();
        assert_eq!(devices[0].total, 2.0);
        assert_eq!(devices[1].total, 1.0);

        assert_eq!(station.admit(VehicleId(2)), Ok(Admission::Queued));
        let out = station.tick(span(2), &mut devices).unwrap();
        assert_eq!(out.released, ids(&[0]));
        assert_eq!(out.promoted, ids(&[2]));
        assert_eq!(devices[1].total, 2.0);
        assert_eq!(devices[2].total, 0.0, "promoted devices charge from the next tick");

        assert_eq!(station.admit(VehicleId(3)), Ok(Admission::Queued));
        let out = station.tick(span(3), &mut devices).unwrap();
        // Device 1 fills here, so device 3 gets its bay straight away.
        assert_eq!(out.released, ids(&[1]));
        assert_eq!(out.promoted, ids(&[3]));

        station.tick(span(4), &mut devices).unwrap();

        let totals: Vec<f64> = devices.iter().map(|d| d.total).collect();
        assert_eq!(totals, vec![3.0, 3.0, 2.0, 1.0]);
        assert_eq!(station.occupied(), ids(&[2, 3]).as_slice());
        assert_eq!(station.waiting().len(), 0);
    }

    #[test]
    fn charge_scales_with_elapsed_time() {
        let mut devices = vec![MockDevice::new(1e9)];
        let mut station = ChargingStation::new(1);
        station.admit(VehicleId(0)).unwrap();
        station.tick(TickSpan::new(0, SimTime(0), SimTime(250)), &mut devices).unwrap();
        assert_eq!(devices[0].total, 250.0);
    }

    #[test]
    fn simultaneous_fills_all_released() {
        let mut devices = vec![MockDevice::new(1.0); 5];
        let mut station = ChargingStation::new(3);
        for i in 0..5 {
            station.admit(VehicleId(i)).unwrap();
        }
        let out = station.tick(span(0), &mut devices).unwrap();
        assert_eq!(out.released, ids(&[0, 1, 2]));
        // Queue was [4, 3]; the back goes first.
        assert_eq!(out.promoted, ids(&[3, 4]));
        assert_eq!(station.free_bays(), 1);
    }

    #[test]
    fn unknown_device_leaves_station_untouched() {
        let mut devices = vec![MockDevice::new(1.0); 2];
        let mut station = ChargingStation::new(2);
        station.admit(VehicleId(0)).unwrap();
        station.admit(VehicleId(7)).unwrap();

        let err = station.tick(span(0), &mut devices).unwrap_err();
        assert_eq!(err, StationError::UnknownDevice { id: VehicleId(7), len: 2 });
        assert_eq!(devices[0].total, 0.0);
        assert_eq!(station.occupied(), ids(&[0, 7]).as_slice());
    }

    #[test]
    fn idle_after_everyone_leaves() {
        let mut devices = vec![MockDevice::new(1.0); 2];
        let mut station = ChargingStation::new(1);
        station.admit(VehicleId(0)).unwrap();
        station.admit(VehicleId(1)).unwrap();
        station.tick(span(0), &mut devices).unwrap();
        assert!(!station.is_idle());
        station.tick(span(1), &mut devices).unwrap();
        assert!(station.is_idle());
    }
}

#[cfg(test)]
mod invariants {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    const FLEET: u32 = 8;

    #[derive(Clone, Debug)]
    enum Op {
        Admit(u32),
        Tick,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![(0..FLEET).prop_map(Op::Admit), Just(Op::Tick)]
    }

    fn check(station: &ChargingStation) -> Result<(), TestCaseError> {
        prop_assert!(station.occupied().len() <= station.bays());
        let mut seen = HashSet::new();
        for id in station.occupied().iter().copied().chain(station.waiting()) {
            prop_assert!(seen.insert(id), "{} present twice", id);
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn capacity_and_exclusivity_hold(
            bays in 0usize..4,
            full_at in prop::collection::vec(1.0f64..6.0, FLEET as usize),
            ops in prop::collection::vec(op(), 0..200),
        ) {
            let mut devices: Vec<MockDevice> = full_at.into_iter().map(MockDevice::new).collect();
            let mut station = ChargingStation::new(bays);
            let mut t = 0;

            for op in ops {
                match op {
                    Op::Admit(raw) => {
                        let id = VehicleId(raw);
                        let present = station.contains(id);
                        let result = station.admit(id);
                        prop_assert_eq!(result.is_err(), present);
                    }
                    Op::Tick => {
                        station.tick(span(t), &mut devices).unwrap();
                        t += 1;
                        if station.waiting().len() > 0 {
                            prop_assert_eq!(station.occupied().len(), bays);
                        }
                    }
                }
                check(&station)?;
            }
        }
    }
}
