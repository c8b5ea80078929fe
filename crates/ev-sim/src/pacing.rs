//! Wall-clock pacing for the scheduler.
//!
//! The scheduler decides *when* each tick is due (as an offset from the start
//! of the run in real time) and asks a [`Pacer`] to wait for it.  Swapping the
//! pacer is the only difference between an interactive, time-compressed run
//! and a test that finishes instantly.

use std::time::{Duration, Instant};

pub trait Pacer {
    /// Mark the real-time origin.  Called once before the first tick.
    fn start(&mut self);

    /// Block until `offset` has elapsed since [`start`](Pacer::start).
    /// Returns immediately if the deadline has already passed.
    fn wait_until(&mut self, offset: Duration);
}

/// Never blocks.  Records deadlines so tests can check the pacing schedule.
#[derive(Debug, Default, Clone)]
pub struct VirtualPacer {
    last:  Option<Duration>,
    waits: u64,
}

impl VirtualPacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent deadline passed to `wait_until`.
    pub fn last_deadline(&self) -> Option<Duration> {
        self.last
    }

    pub fn waits(&self) -> u64 {
        self.waits
    }
}

impl Pacer for VirtualPacer {
    fn start(&mut self) {
        self.last = None;
        self.waits = 0;
    }

    fn wait_until(&mut self, offset: Duration) {
        self.last = Some(offset);
        self.waits += 1;
    }
}

/// Sleeps until each deadline.  Late ticks are fired immediately, never
/// skipped, so a slow tick shortens the following waits.
#[derive(Debug, Default)]
pub struct RealTimePacer {
    origin: Option<Instant>,
}

impl RealTimePacer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Pacer for RealTimePacer {
    fn start(&mut self) {
        self.origin = Some(Instant::now());
    }

    fn wait_until(&mut self, offset: Duration) {
        let origin = *self.origin.get_or_insert_with(Instant::now);
        let deadline = origin + offset;
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
    }
}
