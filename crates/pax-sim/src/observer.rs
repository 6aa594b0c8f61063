//! Engine observer trait for progress reporting and data collection.

use pax_core::{Flight, Interval};

use crate::{CloseOutcome, IntervalMetrics};

/// Callbacks invoked by [`Engine::simulate_interval_with`] and
/// [`Engine::run_all_intervals_with`].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// [`Engine::simulate_interval_with`]: crate::Engine::simulate_interval_with
/// [`Engine::run_all_intervals_with`]: crate::Engine::run_all_intervals_with
///
/// # Example — missed-passenger counter
///
/// ```rust,ignore
/// struct MissedCounter(usize);
///
/// impl EngineObserver for MissedCounter {
///     fn on_boarding_closed(&mut self, _: &Flight, _: Interval, outcome: CloseOutcome) {
///         self.0 += outcome.missed;
///     }
/// }
/// ```
pub trait EngineObserver {
    /// Called after `interval` has been simulated.  `metrics` describes the
    /// state the step produced (the start of `interval + 1`).
    fn on_interval_end(&mut self, _interval: Interval, _metrics: &IntervalMetrics) {}

    /// Called when `flight`'s boarding closes during `interval`.
    fn on_boarding_closed(&mut self, _flight: &Flight, _interval: Interval, _outcome: CloseOutcome) {}

    /// Called once after `run_all_intervals_with` reaches the final interval.
    fn on_run_end(&mut self, _final_interval: Interval) {}
}

/// An [`EngineObserver`] that does nothing.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}
