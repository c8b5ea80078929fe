//! Fixed-timestep scheduler.
//!
//! # Tick schedule
//!
//! ```text
//! tick k:  span = [k * tick_ms, (k + 1) * tick_ms]
//!          released at real offset  k * tick_ms / compression
//! fires while span.prev < total_ms  →  ceil(total_ms / tick_ms) ticks
//! run returns no earlier than real offset  total_ms / compression
//! ```
//!
//! When `tick_ms` does not divide the total, the last span ends past the
//! configured duration rather than being shortened or dropped.

use std::time::Duration;

use ev_core::{MS_PER_MINUTE, SimClock, SimTime, TickSpan};
use tracing::debug;

use crate::{Pacer, SimResult, TimerError, TimerResult};

/// Per-tick callback.  An `Err` aborts the run.
pub type TickCallback<'a> = Box<dyn FnMut(TickSpan) -> SimResult<()> + 'a>;

/// Fluent builder for [`Scheduler`].
///
/// ```rust
/// use ev_sim::{Scheduler, VirtualPacer};
///
/// let mut seen = 0;
/// let fired = Scheduler::builder(1_000)
///     .total_minutes(1)
///     .compression(60)
///     .on_tick(|_span| {
///         seen += 1;
///         Ok(())
///     })
///     .build()
///     .unwrap()
///     .run(&mut VirtualPacer::new())
///     .unwrap();
/// assert_eq!(fired, 60);
/// assert_eq!(seen, 60);
/// ```
pub struct SchedulerBuilder<'a> {
    tick_ms:       u64,
    total_minutes: u64,
    compression:   u32,
    callback:      Option<TickCallback<'a>>,
}

impl<'a> SchedulerBuilder<'a> {
    /// Total simulated duration.  Defaults to 0 (no ticks).
    pub fn total_minutes(mut self, minutes: u64) -> Self {
        self.total_minutes = minutes;
        self
    }

    /// Simulated time per unit of real time.  Defaults to 1.
    pub fn compression(mut self, ratio: u32) -> Self {
        self.compression = ratio;
        self
    }

    pub fn on_tick(mut self, callback: impl FnMut(TickSpan) -> SimResult<()> + 'a) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    pub fn build(self) -> TimerResult<Scheduler<'a>> {
        if self.tick_ms == 0 {
            return Err(TimerError::ZeroTickSize);
        }
        if self.compression == 0 {
            return Err(TimerError::ZeroCompression);
        }
        let clock = SimClock::new(self.tick_ms);
        let overflow = TimerError::DurationOverflow { minutes: self.total_minutes };
        let end = SimTime::from_minutes(self.total_minutes).ok_or(overflow.clone())?;
        clock.end_of_run(end).ok_or(overflow)?;
        let callback = self.callback.ok_or(TimerError::MissingCallback)?;

        Ok(Scheduler {
            clock,
            end,
            compression: self.compression,
            callback,
        })
    }
}

/// Drives a callback through fixed simulated-time steps.  Single use:
/// [`run`](Scheduler::run) consumes the scheduler.
pub struct Scheduler<'a> {
    clock:       SimClock,
    end:         SimTime,
    compression: u32,
    callback:    TickCallback<'a>,
}

impl<'a> Scheduler<'a> {
    pub fn builder(tick_ms: u64) -> SchedulerBuilder<'a> {
        SchedulerBuilder {
            tick_ms,
            total_minutes: 0,
            compression:   1,
            callback:      None,
        }
    }

    /// Number of callbacks [`run`](Scheduler::run) will fire.
    pub fn total_ticks(&self) -> u64 {
        self.clock.ticks_to_cover(self.end)
    }

    /// Real time a paced run takes: total simulated time / compression.
    pub fn expected_real_duration(&self) -> Duration {
        Duration::from_millis(self.end.as_millis()) / self.compression
    }

    /// Real-time offset at which tick `k` is released.
    fn release_offset(&self, k: u64) -> Duration {
        Duration::from_millis(k.saturating_mul(self.clock.tick_ms)) / self.compression
    }

    /// Fire every tick, pacing with `pacer`.  Returns the number of ticks
    /// fired.  The first callback error stops the run and is returned.
    pub fn run<P: Pacer>(mut self, pacer: &mut P) -> SimResult<u64> {
        debug!(
            tick_ms = self.clock.tick_ms,
            ticks = self.total_ticks(),
            compression = self.compression,
            "scheduler started"
        );
        pacer.start();
        while self.clock.now < self.end {
            pacer.wait_until(self.release_offset(self.clock.ticks));
            let span = self.clock.advance().ok_or(TimerError::DurationOverflow {
                minutes: self.end.as_millis() / MS_PER_MINUTE,
            })?;
            (self.callback)(span)?;
        }
        pacer.wait_until(self.expected_real_duration());
        debug!(ticks = self.clock.ticks, now = %self.clock.now, "scheduler finished");
        Ok(self.clock.ticks)
    }
}
