//! Simulation time model.
//!
//! # Design
//!
//! Time is an integer count of simulated milliseconds since the start of the
//! run, wrapped in `SimTime`.  The scheduler advances a `SimClock` by a fixed
//! `tick_ms` and hands every agent the resulting `TickSpan`:
//!
//!   span.prev = index * tick_ms
//!   span.cur  = (index + 1) * tick_ms
//!
//! Keeping time integral means accumulated flight/charge/wait totals are
//! exact; only energy and probability arithmetic is floating point.

use std::fmt;

pub const MS_PER_SECOND: u64 = 1_000;
pub const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR:   u64 = 60 * MS_PER_MINUTE;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// Simulated milliseconds since the start of the run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    /// `None` if the duration does not fit in a `u64` of milliseconds.
    #[inline]
    pub fn from_minutes(minutes: u64) -> Option<SimTime> {
        minutes.checked_mul(MS_PER_MINUTE).map(SimTime)
    }

    #[inline]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: SimTime) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: u64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: SimTime) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.0 / MS_PER_SECOND;
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            total_secs / 3_600,
            (total_secs % 3_600) / 60,
            total_secs % 60,
            self.0 % MS_PER_SECOND,
        )
    }
}

// ── TickSpan ──────────────────────────────────────────────────────────────────

/// The `(previous, current)` pair delivered to every agent on one tick.
///
/// `index` counts ticks from zero, so `index * tick_ms == prev`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct TickSpan {
    pub index: u64,
    pub prev:  SimTime,
    pub cur:   SimTime,
}

impl TickSpan {
    pub fn new(index: u64, prev: SimTime, cur: SimTime) -> Self {
        debug_assert!(prev <= cur, "tick span runs backwards: {prev} > {cur}");
        Self { index, prev, cur }
    }

    /// Simulated milliseconds covered by this tick.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.cur.since(self.prev)
    }

    #[inline]
    pub fn elapsed_hours(&self) -> f64 {
        self.elapsed_ms() as f64 / MS_PER_HOUR as f64
    }
}

impl fmt::Display for TickSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} [{} → {}]", self.index, self.prev, self.cur)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Fixed-step simulated clock.
///
/// `SimClock` is cheap to copy and holds no heap data.  It never moves
/// backwards: `advance` is the only mutator.
#[derive(Clone, Debug)]
pub struct SimClock {
    /// Simulated milliseconds added by every `advance()`.
    pub tick_ms: u64,
    /// Start of the next tick.
    pub now: SimTime,
    /// Number of completed `advance()` calls.
    pub ticks: u64,
}

impl SimClock {
    pub fn new(tick_ms: u64) -> Self {
        Self { tick_ms, now: SimTime::ZERO, ticks: 0 }
    }

    /// Advance by one tick and return the span just covered, or `None`
    /// (leaving the clock untouched) if the end of the tick is not
    /// representable.
    #[inline]
    pub fn advance(&mut self) -> Option<TickSpan> {
        let prev = self.now;
        self.now = SimTime(prev.0.checked_add(self.tick_ms)?);
        let span = TickSpan::new(self.ticks, prev, self.now);
        self.ticks += 1;
        Some(span)
    }

    /// How many ticks it takes to cover `total` (rounds up, so the final
    /// tick may end past `total`).
    #[inline]
    pub fn ticks_to_cover(&self, total: SimTime) -> u64 {
        total.0.div_ceil(self.tick_ms)
    }

    /// Where the last of [`ticks_to_cover`](Self::ticks_to_cover) ticks ends,
    /// or `None` if that instant overflows.
    #[inline]
    pub fn end_of_run(&self, total: SimTime) -> Option<SimTime> {
        self.ticks_to_cover(total).checked_mul(self.tick_ms).map(SimTime)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (tick {})", self.now, self.ticks)
    }
}
