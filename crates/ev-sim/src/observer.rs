//! Simulation observer trait for progress reporting and data collection.

use ev_core::{SimTime, TickSpan};
use ev_fleet::Vehicle;
use ev_station::ChargingStation;

/// Fleet-wide counts for one tick, taken after the station has ticked.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub struct TickStats {
    pub flying:   usize,
    pub waiting:  usize,
    pub charging: usize,
    /// Charge requests that got a bay straight away.
    pub admitted: usize,
    /// Charge requests that joined the waiting queue.
    pub queued:   usize,
    /// Vehicles that left a bay fully charged.
    pub released: usize,
    /// Vehicles moved from the queue into a bay.
    pub promoted: usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust
/// use ev_core::TickSpan;
/// use ev_sim::{SimObserver, TickStats};
///
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, span: TickSpan, stats: &TickStats) {
///         if span.index % self.interval == 0 {
///             println!("{span}: {} waiting", stats.waiting);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any vehicle updates.
    fn on_tick_start(&mut self, _span: TickSpan) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _span: TickSpan, _stats: &TickStats) {}

    /// Called every `config.output_interval_ticks` ticks, after `on_tick_end`.
    ///
    /// Read-only access to the whole fleet and the station, so output writers
    /// can record a snapshot without the sim knowing any output format.
    fn on_snapshot(
        &mut self,
        _span:     TickSpan,
        _vehicles: &[Vehicle],
        _station:  &ChargingStation,
    ) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_time: SimTime, _vehicles: &[Vehicle]) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
