//! The `ChargeableDevice` trait: anything a charging bay can fill.

/// A device that can be charged at a charging station.
///
/// The station only ever calls these three methods; it never sets a device's
/// state directly.  A device decides for itself what receiving charge means
/// (a vehicle flips to `Charging`, or to `Flying` once full).
pub trait ChargeableDevice {
    /// Deliver `kwh` of energy.
    fn add_charge(&mut self, kwh: f64);

    /// Energy the device can accept per simulated millisecond, in kWh/ms.
    fn charge_rate(&self) -> f64;

    /// `true` once the device holds its full capacity.
    fn has_full_charge(&self) -> bool;
}
