//! Simulation time model.
//!
//! # Design
//!
//! Time is a monotonically increasing [`Interval`] counter.  Interval 0 starts
//! at the schedule's global start (earliest departure minus the arrival span)
//! and every interval covers [`IntervalLength::minutes`] whole minutes:
//!
//!   minute_offset(i) = i * interval_minutes
//!
//! Rates and travel times are configured in real-world units (per minute, per
//! hour, minutes, seconds) and converted here, so changing the interval length
//! never changes throughput.  Travel times always round *up* so a passenger
//! never arrives before the real walk would finish.

use std::fmt;

// ── Interval ─────────────────────────────────────────────────────────────────

/// An absolute simulation interval index.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval(pub u32);

impl Interval {
    pub const ZERO: Interval = Interval(0);

    /// The previous interval, saturating at zero.
    #[inline]
    pub fn prev(self) -> Interval {
        Interval(self.0.saturating_sub(1))
    }

    #[inline]
    pub fn next(self) -> Interval {
        Interval(self.0.saturating_add(1))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Saturates at `u32::MAX`.
impl std::ops::Add<u32> for Interval {
    type Output = Interval;
    #[inline]
    fn add(self, rhs: u32) -> Interval {
        Interval(self.0.saturating_add(rhs))
    }
}

impl std::ops::Sub for Interval {
    type Output = u32;
    #[inline]
    fn sub(self, rhs: Interval) -> u32 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I{}", self.0)
    }
}

// ── IntervalLength ───────────────────────────────────────────────────────────

/// Length of one interval in whole minutes (never zero).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct IntervalLength(u32);

impl IntervalLength {
    pub const ONE_MINUTE: IntervalLength = IntervalLength(1);

    /// Zero is clamped to one minute.
    pub fn new(minutes: u32) -> Self {
        IntervalLength(minutes.max(1))
    }

    #[inline]
    pub fn minutes(self) -> u32 {
        self.0
    }

    /// How many intervals span `minutes` minutes (rounds up).
    #[inline]
    pub fn intervals_for_minutes(self, minutes: u32) -> u32 {
        minutes.div_ceil(self.0)
    }

    /// The interval containing the given minute offset from the global start.
    #[inline]
    pub fn interval_of_minute(self, minute: u32) -> Interval {
        Interval(minute / self.0)
    }

    /// Minute offsets covered by `interval`, as a half-open range.
    #[inline]
    pub fn minutes_of(self, interval: Interval) -> std::ops::Range<u32> {
        let start = interval.0.saturating_mul(self.0);
        start..start.saturating_add(self.0)
    }

    /// Scale a per-minute rate to this interval length.
    #[inline]
    pub fn per_interval_from_per_minute(self, per_minute: f64) -> f64 {
        non_negative(per_minute) * self.0 as f64
    }

    /// Scale a per-hour rate to this interval length.
    #[inline]
    pub fn per_interval_from_per_hour(self, per_hour: f64) -> f64 {
        non_negative(per_hour) / 60.0 * self.0 as f64
    }
}

impl Default for IntervalLength {
    fn default() -> Self {
        Self::ONE_MINUTE
    }
}

/// Whole minutes needed to cover `seconds` (rounds up).
#[inline]
pub fn ceil_minutes_from_seconds(seconds: u32) -> u32 {
    seconds.div_ceil(60)
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}
